//! ASN.1 DER encoding and decoding.

mod decoder;
mod encoder;
mod tag;

pub use decoder::{decode, Decoder};
pub use encoder::Encoder;

/// ASN.1 tag constants (full identifier octets for the universal types).
pub mod tags {
    pub const BOOLEAN: u8 = 0x01;
    pub const INTEGER: u8 = 0x02;
    pub const BIT_STRING: u8 = 0x03;
    pub const OCTET_STRING: u8 = 0x04;
    pub const NULL: u8 = 0x05;
    pub const OID: u8 = 0x06;
    pub const SEQUENCE: u8 = 0x30;
    pub const SET: u8 = 0x31;
    pub const CONTEXT_SPECIFIC: u8 = 0x80;
    pub const CONSTRUCTED: u8 = 0x20;
}

/// Universal tag number of SEQUENCE / SEQUENCE OF.
pub const SEQUENCE_TAG_NUMBER: u32 = 0x10;

/// Represents a parsed ASN.1 tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tag {
    pub class: TagClass,
    pub constructed: bool,
    pub number: u32,
}

/// ASN.1 tag class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagClass {
    Universal,
    Application,
    ContextSpecific,
    Private,
}

/// A borrowed ASN.1 TLV element.
///
/// `value` is the content octets and `raw` the complete element
/// (identifier, length and content), both slices of the decoded buffer.
#[derive(Debug, Clone, Copy)]
pub struct Tlv<'a> {
    pub tag: Tag,
    pub value: &'a [u8],
    pub raw: &'a [u8],
}

impl Tlv<'_> {
    /// Detach this element from the input buffer.
    pub fn to_raw_value(&self) -> RawValue {
        RawValue {
            tag: self.tag,
            bytes: self.value.to_vec(),
            full_bytes: self.raw.to_vec(),
        }
    }
}

/// An owned ASN.1 element kept exactly as it was parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawValue {
    pub tag: Tag,
    /// Content octets.
    pub bytes: Vec<u8>,
    /// The original encoding of the whole element.
    pub full_bytes: Vec<u8>,
}

impl RawValue {
    /// The element's encoding, emitted verbatim.
    pub fn as_der(&self) -> &[u8] {
        &self.full_bytes
    }
}

impl From<Tlv<'_>> for RawValue {
    fn from(tlv: Tlv<'_>) -> Self {
        tlv.to_raw_value()
    }
}
