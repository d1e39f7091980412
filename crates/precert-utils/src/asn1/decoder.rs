//! ASN.1 DER decoder.

use super::{Tag, TagClass, Tlv};
use precert_types::EncodingError;

/// Decode one element from the front of `input`.
///
/// Returns the element and the bytes that follow it. Content octets are not
/// interpreted. Only definite, minimally encoded lengths are accepted.
pub fn decode(input: &[u8]) -> Result<(Tlv<'_>, &[u8]), EncodingError> {
    let (tag, tag_len) = Tag::from_bytes(input)?;
    let (length, len_len) = read_length(&input[tag_len..])?;
    let header_len = tag_len + len_len;
    let end = header_len
        .checked_add(length)
        .filter(|&end| end <= input.len())
        .ok_or_else(|| {
            EncodingError::malformed(format!(
                "declared length {length} exceeds {} available byte(s)",
                input.len() - header_len
            ))
        })?;

    let tlv = Tlv {
        tag,
        value: &input[header_len..end],
        raw: &input[..end],
    };
    Ok((tlv, &input[end..]))
}

/// Parse a DER length. Returns the length and the number of octets used.
fn read_length(input: &[u8]) -> Result<(usize, usize), EncodingError> {
    let first = *input
        .first()
        .ok_or_else(|| EncodingError::malformed("truncated length"))?;

    if first < 0x80 {
        return Ok((first as usize, 1));
    }
    if first == 0x80 {
        return Err(EncodingError::malformed("indefinite length"));
    }

    let num_bytes = (first & 0x7F) as usize;
    if num_bytes > 4 {
        return Err(EncodingError::malformed("length too large"));
    }
    let octets = input
        .get(1..1 + num_bytes)
        .ok_or_else(|| EncodingError::malformed("truncated length"))?;
    if octets[0] == 0 {
        return Err(EncodingError::malformed("non-minimal length"));
    }
    let length = octets.iter().fold(0usize, |acc, &b| (acc << 8) | b as usize);
    if length < 0x80 {
        return Err(EncodingError::malformed("non-minimal length"));
    }
    Ok((length, 1 + num_bytes))
}

/// Validate BIT STRING content octets and split them into
/// `(unused_bits, data)`.
fn split_bit_string(value: &[u8]) -> Result<(u8, &[u8]), EncodingError> {
    let (&unused_bits, data) = value
        .split_first()
        .ok_or_else(|| EncodingError::malformed("empty BIT STRING"))?;
    if unused_bits > 7 || (data.is_empty() && unused_bits != 0) {
        return Err(EncodingError::malformed("invalid BIT STRING unused bits"));
    }
    if let Some(&last) = data.last() {
        if last & ((1u8 << unused_bits) - 1) != 0 {
            return Err(EncodingError::malformed("invalid BIT STRING padding bits"));
        }
    }
    Ok((unused_bits, data))
}

fn expect_universal(
    tlv: &Tlv<'_>,
    number: u32,
    constructed: bool,
    what: &str,
) -> Result<(), EncodingError> {
    if tlv.tag.class != TagClass::Universal
        || tlv.tag.number != number
        || tlv.tag.constructed != constructed
    {
        return Err(EncodingError::malformed(format!(
            "expected {what}, found tag {:?}",
            tlv.tag
        )));
    }
    Ok(())
}

/// A streaming ASN.1 DER decoder.
pub struct Decoder<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Decoder<'a> {
    /// Create a new decoder over the given data.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Returns the remaining undecoded bytes.
    pub fn remaining(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }

    /// Returns true if all data has been consumed.
    pub fn is_empty(&self) -> bool {
        self.pos >= self.data.len()
    }

    /// Parse the next TLV element.
    pub fn read_tlv(&mut self) -> Result<Tlv<'a>, EncodingError> {
        let (tlv, _) = decode(self.remaining())?;
        self.pos += tlv.raw.len();
        Ok(tlv)
    }

    /// Peek at the next tag without consuming it.
    pub fn peek_tag(&self) -> Result<Tag, EncodingError> {
        let (tag, _) = Tag::from_bytes(self.remaining())?;
        Ok(tag)
    }

    /// Read an INTEGER and return its content octets.
    pub fn read_integer(&mut self) -> Result<&'a [u8], EncodingError> {
        let tlv = self.read_tlv()?;
        expect_universal(&tlv, 0x02, false, "INTEGER")?;
        match tlv.value {
            [] => Err(EncodingError::malformed("empty INTEGER")),
            [0x00, next, ..] if next & 0x80 == 0 => {
                Err(EncodingError::malformed("non-minimal INTEGER"))
            }
            [0xFF, next, ..] if next & 0x80 != 0 => {
                Err(EncodingError::malformed("non-minimal INTEGER"))
            }
            value => Ok(value),
        }
    }

    /// Read an INTEGER that must fit in an `i64`.
    pub fn read_i64(&mut self) -> Result<i64, EncodingError> {
        let bytes = self.read_integer()?;
        if bytes.len() > 8 {
            return Err(EncodingError::malformed("INTEGER too large"));
        }
        let sign = if bytes[0] & 0x80 != 0 { -1i64 } else { 0 };
        Ok(bytes.iter().fold(sign, |acc, &b| (acc << 8) | b as i64))
    }

    /// Read an OCTET STRING.
    pub fn read_octet_string(&mut self) -> Result<&'a [u8], EncodingError> {
        let tlv = self.read_tlv()?;
        expect_universal(&tlv, 0x04, false, "OCTET STRING")?;
        Ok(tlv.value)
    }

    /// Read a BIT STRING and return (unused_bits, data).
    pub fn read_bit_string(&mut self) -> Result<(u8, &'a [u8]), EncodingError> {
        let tlv = self.read_tlv()?;
        expect_universal(&tlv, 0x03, false, "BIT STRING")?;
        split_bit_string(tlv.value)
    }

    /// Read an OID and return the raw content bytes.
    pub fn read_oid(&mut self) -> Result<&'a [u8], EncodingError> {
        let tlv = self.read_tlv()?;
        expect_universal(&tlv, 0x06, false, "OBJECT IDENTIFIER")?;
        Ok(tlv.value)
    }

    /// Read a SEQUENCE, returning a sub-decoder over its contents.
    pub fn read_sequence(&mut self) -> Result<Decoder<'a>, EncodingError> {
        let tlv = self.read_tlv()?;
        expect_universal(&tlv, 0x10, true, "SEQUENCE")?;
        Ok(Decoder::new(tlv.value))
    }

    /// Read a BOOLEAN value (DER: 0x00=false, 0xFF=true).
    pub fn read_boolean(&mut self) -> Result<bool, EncodingError> {
        let tlv = self.read_tlv()?;
        expect_universal(&tlv, 0x01, false, "BOOLEAN")?;
        match tlv.value {
            [0x00] => Ok(false),
            [0xFF] => Ok(true),
            _ => Err(EncodingError::malformed("invalid BOOLEAN")),
        }
    }

    /// Returns true if the next element is a universal BOOLEAN.
    pub fn next_is_boolean(&self) -> Result<bool, EncodingError> {
        if self.is_empty() {
            return Ok(false);
        }
        let tag = self.peek_tag()?;
        Ok(tag.class == TagClass::Universal && !tag.constructed && tag.number == 0x01)
    }

    /// Read a context-specific tagged value with the expected tag number.
    pub fn read_context_specific(
        &mut self,
        tag_num: u32,
        constructed: bool,
    ) -> Result<Tlv<'a>, EncodingError> {
        let tlv = self.read_tlv()?;
        if tlv.tag.class != TagClass::ContextSpecific
            || tlv.tag.number != tag_num
            || tlv.tag.constructed != constructed
        {
            return Err(EncodingError::malformed(format!(
                "expected context tag [{tag_num}], found tag {:?}",
                tlv.tag
            )));
        }
        Ok(tlv)
    }

    /// Try to read a context-specific tagged value. Returns `None` if
    /// the next tag does not match, without consuming any bytes.
    pub fn try_read_context_specific(
        &mut self,
        tag_num: u32,
        constructed: bool,
    ) -> Result<Option<Tlv<'a>>, EncodingError> {
        if self.is_empty() {
            return Ok(None);
        }
        let tag = self.peek_tag()?;
        if tag.class == TagClass::ContextSpecific
            && tag.number == tag_num
            && tag.constructed == constructed
        {
            Ok(Some(self.read_tlv()?))
        } else {
            Ok(None)
        }
    }

    /// Try to read a `[tag_num] IMPLICIT BIT STRING`, returning
    /// `(unused_bits, data)` or `None` if the next tag does not match.
    pub fn try_read_implicit_bit_string(
        &mut self,
        tag_num: u32,
    ) -> Result<Option<(u8, &'a [u8])>, EncodingError> {
        self.try_read_context_specific(tag_num, false)?
            .map(|tlv| split_bit_string(tlv.value))
            .transpose()
    }
}
