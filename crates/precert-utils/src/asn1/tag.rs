//! ASN.1 tag parsing and encoding.

use super::{Tag, TagClass};
use precert_types::EncodingError;

impl Tag {
    /// Parse a tag from the first bytes of `input`.
    /// Returns the tag and number of bytes consumed.
    pub fn from_bytes(input: &[u8]) -> Result<(Self, usize), EncodingError> {
        let first = *input
            .first()
            .ok_or_else(|| EncodingError::malformed("truncated tag"))?;

        let class = match first >> 6 {
            0 => TagClass::Universal,
            1 => TagClass::Application,
            2 => TagClass::ContextSpecific,
            _ => TagClass::Private,
        };
        let constructed = (first & 0x20) != 0;

        let low_bits = first & 0x1F;
        if low_bits < 0x1F {
            return Ok((
                Tag {
                    class,
                    constructed,
                    number: low_bits as u32,
                },
                1,
            ));
        }

        // Long form tag number
        let mut number: u32 = 0;
        let mut i = 1;
        loop {
            let byte = *input
                .get(i)
                .ok_or_else(|| EncodingError::malformed("truncated tag"))?;
            if i == 1 && byte == 0x80 {
                return Err(EncodingError::malformed("non-minimal tag number"));
            }
            number = number
                .checked_mul(0x80)
                .ok_or_else(|| EncodingError::malformed("tag number too large"))?
                | (byte & 0x7F) as u32;
            i += 1;
            if (byte & 0x80) == 0 {
                break;
            }
        }
        if number < 0x1F {
            return Err(EncodingError::malformed("non-minimal tag number"));
        }
        Ok((
            Tag {
                class,
                constructed,
                number,
            },
            i,
        ))
    }

    /// Encode this tag to bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let class_bits = match self.class {
            TagClass::Universal => 0x00,
            TagClass::Application => 0x40,
            TagClass::ContextSpecific => 0x80,
            TagClass::Private => 0xC0,
        };
        let constructed_bit = if self.constructed { 0x20 } else { 0x00 };

        if self.number < 0x1F {
            return vec![class_bits | constructed_bit | (self.number as u8)];
        }

        let mut result = vec![class_bits | constructed_bit | 0x1F];
        let mut num = self.number;
        let mut groups = Vec::new();
        while num > 0 {
            groups.push((num & 0x7F) as u8);
            num >>= 7;
        }
        for (i, b) in groups.iter().enumerate().rev() {
            result.push(if i > 0 { b | 0x80 } else { *b });
        }
        result
    }

    /// True for a universal, constructed SEQUENCE tag.
    pub fn is_sequence(&self) -> bool {
        self.class == TagClass::Universal
            && self.constructed
            && self.number == super::SEQUENCE_TAG_NUMBER
    }
}
