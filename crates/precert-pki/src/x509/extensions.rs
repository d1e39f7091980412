//! X.509 extensions and the subjectAltName payload parser.

use precert_types::EncodingError;
use precert_utils::asn1::{decode, Decoder, Encoder, Tag, TagClass};
use precert_utils::oid::Oid;

// ---------------------------------------------------------------------------
// Extension
// ---------------------------------------------------------------------------

/// An X.509 extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extension {
    pub id: Oid,
    /// `BOOLEAN DEFAULT FALSE`
    pub critical: bool,
    /// Content of the `extnValue` OCTET STRING.
    pub value: Vec<u8>,
}

impl Extension {
    pub fn new(id: Oid, critical: bool, value: Vec<u8>) -> Self {
        Self {
            id,
            critical,
            value,
        }
    }

    /// Returns true if this extension's OID has exactly these arcs.
    pub fn is(&self, arcs: &[u32]) -> bool {
        self.id == *arcs
    }

    /// Encode as `SEQUENCE { extnID, critical (omitted when false), extnValue }`.
    pub fn to_der(&self) -> Vec<u8> {
        let mut inner = Encoder::new();
        inner.write_oid(&self.id.to_der_value());
        if self.critical {
            inner.write_boolean(true);
        }
        inner.write_octet_string(&self.value);
        let mut outer = Encoder::new();
        outer.write_sequence(&inner.finish());
        outer.finish()
    }
}

/// Parse the content of the `[3]` extensions field: one non-empty
/// `SEQUENCE OF Extension`, nothing after it.
pub(crate) fn parse_extensions(ext_data: &[u8]) -> Result<Vec<Extension>, EncodingError> {
    let mut outer = Decoder::new(ext_data);
    let mut ext_seq = outer.read_sequence()?;
    if !outer.is_empty() {
        return Err(EncodingError::malformed("unexpected data after extensions"));
    }
    // Extensions ::= SEQUENCE SIZE (1..MAX) OF Extension
    if ext_seq.is_empty() {
        return Err(EncodingError::malformed("empty extensions list"));
    }

    let mut extensions = Vec::new();
    while !ext_seq.is_empty() {
        let mut ext_dec = ext_seq.read_sequence()?;
        let id = Oid::from_der_value(ext_dec.read_oid()?)?;
        // critical BOOLEAN DEFAULT FALSE
        let critical = if ext_dec.next_is_boolean()? {
            ext_dec.read_boolean()?
        } else {
            false
        };
        let value = ext_dec.read_octet_string()?.to_vec();
        if !ext_dec.is_empty() {
            return Err(EncodingError::malformed(format!(
                "unexpected data in extension {id}"
            )));
        }
        extensions.push(Extension {
            id,
            critical,
            value,
        });
    }
    Ok(extensions)
}

/// Encode an extension list as `SEQUENCE OF Extension`.
pub(crate) fn encode_extensions(exts: &[Extension]) -> Vec<u8> {
    let mut list = Encoder::new();
    for ext in exts {
        list.write_raw(&ext.to_der());
    }
    let mut outer = Encoder::new();
    outer.write_sequence(&list.finish());
    outer.finish()
}

// ---------------------------------------------------------------------------
// SubjectAltName
// ---------------------------------------------------------------------------

/// GeneralName CHOICE tags (RFC 5280 §4.2.1.6).
pub mod general_name {
    pub const OTHER_NAME: u32 = 0;
    pub const RFC822_NAME: u32 = 1;
    pub const DNS_NAME: u32 = 2;
    pub const X400_ADDRESS: u32 = 3;
    pub const DIRECTORY_NAME: u32 = 4;
    pub const EDI_PARTY_NAME: u32 = 5;
    pub const URI: u32 = 6;
    pub const IP_ADDRESS: u32 = 7;
    pub const REGISTERED_ID: u32 = 8;

    /// Alternatives whose encoding is constructed.
    pub fn is_constructed(name_type: u32) -> bool {
        matches!(
            name_type,
            OTHER_NAME | X400_ADDRESS | DIRECTORY_NAME | EDI_PARTY_NAME
        )
    }
}

/// One subjectAltName entry: the GeneralName tag number and its content
/// octets, uninterpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectAltName {
    pub name_type: u32,
    pub value: Vec<u8>,
}

impl SubjectAltName {
    pub fn dns_name(name: &str) -> Self {
        Self {
            name_type: general_name::DNS_NAME,
            value: name.as_bytes().to_vec(),
        }
    }

    pub fn is_dns_name(&self) -> bool {
        self.name_type == general_name::DNS_NAME
    }
}

/// Parse a subjectAltName extension payload (`SEQUENCE OF GeneralName`)
/// into its entries, in encoding order.
///
/// A single trailing zero byte after the SEQUENCE is accepted, since some
/// encoders emit one.
pub fn parse_san_extension(value: &[u8]) -> Result<Vec<SubjectAltName>, EncodingError> {
    let (seq, rest) = decode(value)
        .map_err(|e| EncodingError::InvalidSanStructure(e.to_string()))?;
    if !rest.is_empty() && rest != [0x00] {
        return Err(EncodingError::TrailingData {
            context: "subjectAltName extension",
            len: rest.len(),
        });
    }
    if !seq.tag.is_sequence() {
        return Err(EncodingError::InvalidSanStructure(format!(
            "expected SEQUENCE, found tag {:?}",
            seq.tag
        )));
    }

    let mut dec = Decoder::new(seq.value);
    let mut sans = Vec::new();
    while !dec.is_empty() {
        let tlv = dec
            .read_tlv()
            .map_err(|e| EncodingError::InvalidSanStructure(e.to_string()))?;
        sans.push(SubjectAltName {
            name_type: tlv.tag.number,
            value: tlv.value.to_vec(),
        });
    }
    Ok(sans)
}

/// Encode entries as a subjectAltName extension payload, each as a
/// context-specific `[name_type]` element.
pub fn encode_san_extension(sans: &[SubjectAltName]) -> Vec<u8> {
    let mut items = Encoder::new();
    for san in sans {
        let tag = Tag {
            class: TagClass::ContextSpecific,
            constructed: general_name::is_constructed(san.name_type),
            number: san.name_type,
        };
        items.write_tagged(tag, &san.value);
    }
    let mut outer = Encoder::new();
    outer.write_sequence(&items.finish());
    outer.finish()
}
