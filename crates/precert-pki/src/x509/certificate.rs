//! Certificate and TBSCertificate DER codec.
//!
//! Only the extension list is decoded into typed values. Every other
//! TBSCertificate field is kept as the exact bytes it was parsed from, so
//! re-encoding a decoded structure reproduces the input.

use precert_types::EncodingError;
use precert_utils::asn1::{decode, Decoder, Encoder, RawValue};

use super::extensions::{encode_extensions, parse_extensions, Extension};

/// Value of `version` when the `[0]` field is absent.
pub const DEFAULT_VERSION: i64 = 1;

// ---------------------------------------------------------------------------
// Core type definitions
// ---------------------------------------------------------------------------

/// An X.509 certificate, split into its three top-level elements.
#[derive(Debug, Clone)]
pub struct Certificate {
    /// DER-encoded certificate data.
    pub raw: Vec<u8>,
    pub tbs_certificate: RawValue,
    pub signature_algorithm: RawValue,
    pub signature_value: RawValue,
}

/// A BIT STRING value: unused bit count plus data octets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitString {
    pub unused_bits: u8,
    pub bytes: Vec<u8>,
}

impl BitString {
    fn content_octets(&self) -> Vec<u8> {
        let mut content = Vec::with_capacity(self.bytes.len() + 1);
        content.push(self.unused_bits);
        content.extend_from_slice(&self.bytes);
        content
    }
}

/// The signed body of an X.509 certificate.
#[derive(Debug, Clone)]
pub struct TbsCertificate {
    /// Exact encoding this value was parsed from, or produced by
    /// reconstruction. `None` for values assembled by hand.
    pub raw: Option<Vec<u8>>,
    /// `[0] EXPLICIT INTEGER DEFAULT 1`
    pub version: i64,
    pub serial_number: RawValue,
    pub signature_algorithm: RawValue,
    pub issuer: RawValue,
    pub validity: RawValue,
    pub subject: RawValue,
    pub public_key: RawValue,
    /// `[1] IMPLICIT BIT STRING OPTIONAL`
    pub issuer_unique_id: Option<BitString>,
    /// `[2] IMPLICIT BIT STRING OPTIONAL`
    pub subject_unique_id: Option<BitString>,
    /// `[3] EXPLICIT SEQUENCE OF Extension OPTIONAL`
    pub extensions: Vec<Extension>,
}

// ---------------------------------------------------------------------------
// Certificate
// ---------------------------------------------------------------------------

/// Parse a DER `Certificate`. See [`Certificate::from_der`].
pub fn parse_certificate(data: &[u8]) -> Result<Certificate, EncodingError> {
    Certificate::from_der(data)
}

impl Certificate {
    /// Parse a certificate from DER-encoded bytes.
    ///
    /// The outer SEQUENCE must hold exactly three elements and nothing may
    /// follow it.
    pub fn from_der(data: &[u8]) -> Result<Self, EncodingError> {
        let (outer, rest) = decode(data)?;
        if !rest.is_empty() {
            return Err(EncodingError::TrailingData {
                context: "certificate",
                len: rest.len(),
            });
        }
        if !outer.tag.is_sequence() {
            return Err(EncodingError::malformed("certificate is not a SEQUENCE"));
        }

        let mut dec = Decoder::new(outer.value);
        let mut next_field = |name: &str| -> Result<RawValue, EncodingError> {
            if dec.is_empty() {
                return Err(EncodingError::malformed(format!(
                    "certificate is missing {name}"
                )));
            }
            Ok(dec.read_tlv()?.to_raw_value())
        };
        let tbs_certificate = next_field("tbsCertificate")?;
        let signature_algorithm = next_field("signatureAlgorithm")?;
        let signature_value = next_field("signatureValue")?;
        if !dec.is_empty() {
            return Err(EncodingError::malformed(
                "certificate SEQUENCE has more than three elements",
            ));
        }

        Ok(Certificate {
            raw: outer.raw.to_vec(),
            tbs_certificate,
            signature_algorithm,
            signature_value,
        })
    }

    /// The original encoding of the `tbsCertificate` field, untouched.
    pub fn extract_tbs(&self) -> &[u8] {
        self.tbs_certificate.as_der()
    }

    /// Decode the `tbsCertificate` field.
    pub fn parse_tbs_certificate(&self) -> Result<TbsCertificate, EncodingError> {
        parse_tbs_certificate(self.extract_tbs())
    }
}

// ---------------------------------------------------------------------------
// TBSCertificate decoding
// ---------------------------------------------------------------------------

/// Parse a DER `TBSCertificate`. See [`TbsCertificate::from_der`].
pub fn parse_tbs_certificate(data: &[u8]) -> Result<TbsCertificate, EncodingError> {
    TbsCertificate::from_der(data)
}

impl TbsCertificate {
    /// Parse a TBSCertificate from DER-encoded bytes, field by field in
    /// grammar order.
    pub fn from_der(data: &[u8]) -> Result<Self, EncodingError> {
        let (outer, rest) = decode(data)?;
        if !rest.is_empty() {
            return Err(EncodingError::TrailingData {
                context: "TBSCertificate",
                len: rest.len(),
            });
        }
        if !outer.tag.is_sequence() {
            return Err(EncodingError::malformed("TBSCertificate is not a SEQUENCE"));
        }
        let mut dec = Decoder::new(outer.value);

        // version [0] EXPLICIT INTEGER DEFAULT 1
        let version = match dec.try_read_context_specific(0, true)? {
            Some(tlv) => {
                let mut v_dec = Decoder::new(tlv.value);
                let version = v_dec.read_i64()?;
                if !v_dec.is_empty() {
                    return Err(EncodingError::malformed("unexpected data after version"));
                }
                version
            }
            None => DEFAULT_VERSION,
        };

        let serial_number = dec.read_tlv()?.to_raw_value();
        let signature_algorithm = dec.read_tlv()?.to_raw_value();
        let issuer = dec.read_tlv()?.to_raw_value();
        let validity = dec.read_tlv()?.to_raw_value();
        let subject = dec.read_tlv()?.to_raw_value();
        let public_key = dec.read_tlv()?.to_raw_value();

        let issuer_unique_id = dec
            .try_read_implicit_bit_string(1)?
            .map(|(unused_bits, bytes)| BitString {
                unused_bits,
                bytes: bytes.to_vec(),
            });
        let subject_unique_id = dec
            .try_read_implicit_bit_string(2)?
            .map(|(unused_bits, bytes)| BitString {
                unused_bits,
                bytes: bytes.to_vec(),
            });

        // extensions [3] EXPLICIT Extensions OPTIONAL
        let extensions = match dec.try_read_context_specific(3, true)? {
            Some(tlv) => parse_extensions(tlv.value)?,
            None => Vec::new(),
        };

        if !dec.is_empty() {
            return Err(EncodingError::TrailingData {
                context: "TBSCertificate fields",
                len: dec.remaining().len(),
            });
        }

        Ok(TbsCertificate {
            raw: Some(outer.raw.to_vec()),
            version,
            serial_number,
            signature_algorithm,
            issuer,
            validity,
            subject,
            public_key,
            issuer_unique_id,
            subject_unique_id,
            extensions,
        })
    }

    // -----------------------------------------------------------------------
    // TBSCertificate encoding
    // -----------------------------------------------------------------------

    /// Encode to canonical DER.
    ///
    /// Optional fields at their default (version 1, absent unique IDs, an
    /// empty extension list) are omitted. Opaque fields are written from
    /// their original encoding.
    pub fn to_der(&self) -> Vec<u8> {
        let mut body = Encoder::new();

        if self.version != DEFAULT_VERSION {
            let mut version = Encoder::new();
            version.write_i64(self.version);
            body.write_context_specific(0, true, &version.finish());
        }

        body.write_raw(self.serial_number.as_der())
            .write_raw(self.signature_algorithm.as_der())
            .write_raw(self.issuer.as_der())
            .write_raw(self.validity.as_der())
            .write_raw(self.subject.as_der())
            .write_raw(self.public_key.as_der());

        if let Some(id) = &self.issuer_unique_id {
            body.write_context_specific(1, false, &id.content_octets());
        }
        if let Some(id) = &self.subject_unique_id {
            body.write_context_specific(2, false, &id.content_octets());
        }

        if !self.extensions.is_empty() {
            body.write_context_specific(3, true, &encode_extensions(&self.extensions));
        }

        let mut outer = Encoder::new();
        outer.write_sequence(&body.finish());
        outer.finish()
    }
}
