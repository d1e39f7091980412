//! ASN.1 DER encoder.

use super::{tags, Tag};

/// A builder for constructing DER-encoded ASN.1 data.
pub struct Encoder {
    buf: Vec<u8>,
}

impl Encoder {
    /// Create a new encoder.
    pub fn new() -> Self {
        Self { buf: Vec::new() }
    }

    /// Consume the encoder and return the encoded bytes.
    pub fn finish(self) -> Vec<u8> {
        self.buf
    }

    /// Write a raw TLV with the given tag byte and value.
    pub fn write_tlv(&mut self, tag: u8, value: &[u8]) -> &mut Self {
        self.buf.push(tag);
        self.write_length(value.len());
        self.buf.extend_from_slice(value);
        self
    }

    /// Write a TLV whose identifier may need more than one octet.
    pub fn write_tagged(&mut self, tag: Tag, value: &[u8]) -> &mut Self {
        self.buf.extend_from_slice(&tag.to_bytes());
        self.write_length(value.len());
        self.buf.extend_from_slice(value);
        self
    }

    /// Write a DER length encoding.
    fn write_length(&mut self, length: usize) {
        if length < 0x80 {
            self.buf.push(length as u8);
            return;
        }
        let octets = length.to_be_bytes();
        let skip = octets.iter().take_while(|&&b| b == 0).count();
        self.buf.push(0x80 | (octets.len() - skip) as u8);
        self.buf.extend_from_slice(&octets[skip..]);
    }

    /// Write an INTEGER from its content octets, as-is.
    pub fn write_integer(&mut self, value: &[u8]) -> &mut Self {
        self.write_tlv(tags::INTEGER, value)
    }

    /// Write an INTEGER in minimal two's-complement form.
    pub fn write_i64(&mut self, value: i64) -> &mut Self {
        let octets = value.to_be_bytes();
        let mut start = 0;
        while start < octets.len() - 1 {
            let (b, next) = (octets[start], octets[start + 1]);
            if (b == 0x00 && next & 0x80 == 0) || (b == 0xFF && next & 0x80 != 0) {
                start += 1;
            } else {
                break;
            }
        }
        self.write_tlv(tags::INTEGER, &octets[start..])
    }

    /// Write an OCTET STRING.
    pub fn write_octet_string(&mut self, value: &[u8]) -> &mut Self {
        self.write_tlv(tags::OCTET_STRING, value)
    }

    /// Write a BIT STRING with the given unused_bits count.
    pub fn write_bit_string(&mut self, unused_bits: u8, value: &[u8]) -> &mut Self {
        let mut content = Vec::with_capacity(value.len() + 1);
        content.push(unused_bits);
        content.extend_from_slice(value);
        self.write_tlv(tags::BIT_STRING, &content)
    }

    /// Write an OID from raw encoded bytes.
    pub fn write_oid(&mut self, oid_bytes: &[u8]) -> &mut Self {
        self.write_tlv(tags::OID, oid_bytes)
    }

    /// Write a NULL.
    pub fn write_null(&mut self) -> &mut Self {
        self.write_tlv(tags::NULL, &[])
    }

    /// Write a SEQUENCE wrapping the given contents.
    pub fn write_sequence(&mut self, contents: &[u8]) -> &mut Self {
        self.write_tlv(tags::SEQUENCE, contents)
    }

    /// Write raw bytes directly (already DER-encoded).
    pub fn write_raw(&mut self, data: &[u8]) -> &mut Self {
        self.buf.extend_from_slice(data);
        self
    }

    /// Write a BOOLEAN (tag 0x01).
    pub fn write_boolean(&mut self, val: bool) -> &mut Self {
        self.write_tlv(tags::BOOLEAN, &[if val { 0xFF } else { 0x00 }])
    }

    /// Write a context-specific tagged value.
    pub fn write_context_specific(
        &mut self,
        tag_num: u8,
        constructed: bool,
        content: &[u8],
    ) -> &mut Self {
        let constructed_bit = if constructed { tags::CONSTRUCTED } else { 0 };
        let tag = tags::CONTEXT_SPECIFIC | constructed_bit | (tag_num & 0x1F);
        self.write_tlv(tag, content)
    }
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new()
    }
}
