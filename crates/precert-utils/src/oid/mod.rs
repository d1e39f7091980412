//! OID (Object Identifier) handling.

use precert_types::EncodingError;

/// A parsed OID represented as a sequence of arc values.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Oid {
    arcs: Vec<u32>,
}

impl Oid {
    /// Create an OID from a slice of arc values.
    pub fn new(arcs: &[u32]) -> Self {
        Self {
            arcs: arcs.to_vec(),
        }
    }

    /// Return the arc values.
    pub fn arcs(&self) -> &[u32] {
        &self.arcs
    }

    /// Encode this OID to DER bytes (just the value, no tag/length).
    pub fn to_der_value(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        if let [first, second, rest @ ..] = self.arcs.as_slice() {
            encode_arc(&mut buf, first * 40 + second);
            for &arc in rest {
                encode_arc(&mut buf, arc);
            }
        }
        buf
    }

    /// Parse an OID from DER value bytes.
    pub fn from_der_value(data: &[u8]) -> Result<Self, EncodingError> {
        if data.is_empty() {
            return Err(EncodingError::malformed("empty OBJECT IDENTIFIER"));
        }

        let (first, mut i) = decode_arc(data)?;
        let mut arcs = if first < 80 {
            vec![first / 40, first % 40]
        } else {
            vec![2, first - 80]
        };

        while i < data.len() {
            let (arc, consumed) = decode_arc(&data[i..])?;
            arcs.push(arc);
            i += consumed;
        }

        Ok(Self { arcs })
    }

    /// Return the dotted-string representation (e.g., "2.5.29.17").
    pub fn to_dot_string(&self) -> String {
        self.arcs
            .iter()
            .map(|a| a.to_string())
            .collect::<Vec<_>>()
            .join(".")
    }
}

impl PartialEq<[u32]> for Oid {
    fn eq(&self, other: &[u32]) -> bool {
        self.arcs == other
    }
}

impl std::fmt::Display for Oid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_dot_string())
    }
}

fn encode_arc(buf: &mut Vec<u8>, mut value: u32) {
    let mut groups = vec![(value & 0x7F) as u8];
    value >>= 7;
    while value > 0 {
        groups.push((value & 0x7F) as u8 | 0x80);
        value >>= 7;
    }
    buf.extend(groups.iter().rev());
}

fn decode_arc(data: &[u8]) -> Result<(u32, usize), EncodingError> {
    if data.first() == Some(&0x80) {
        return Err(EncodingError::malformed("non-minimal OID arc"));
    }
    let mut value: u32 = 0;
    for (i, &byte) in data.iter().enumerate() {
        value = value
            .checked_mul(0x80)
            .ok_or_else(|| EncodingError::malformed("OID arc too large"))?
            | (byte & 0x7F) as u32;
        if (byte & 0x80) == 0 {
            return Ok((value, i + 1));
        }
    }
    Err(EncodingError::malformed("truncated OID arc"))
}

/// Well-known OIDs, as arc sequences.
pub mod known {
    use super::Oid;

    // X.509 extensions (RFC 5280)
    pub const SUBJECT_ALT_NAME: &[u32] = &[2, 5, 29, 17];
    pub const BASIC_CONSTRAINTS: &[u32] = &[2, 5, 29, 19];
    pub const AUTHORITY_KEY_ID: &[u32] = &[2, 5, 29, 35];

    // Certificate Transparency (RFC 6962)
    pub const SCT_LIST: &[u32] = &[1, 3, 6, 1, 4, 1, 11129, 2, 4, 2];
    pub const CT_POISON: &[u32] = &[1, 3, 6, 1, 4, 1, 11129, 2, 4, 3];

    // SAN label redaction
    pub const REDACTED_SANS: &[u32] = &[1, 3, 6, 1, 4, 1, 46450, 5, 123, 1];
    pub const REDACTED_LABEL_SALT: &[u32] = &[1, 3, 6, 1, 4, 1, 46450, 5, 123, 2];

    /// Map a well-known extension OID to its display name.
    pub fn extension_name(oid: &Oid) -> Option<&'static str> {
        match oid.arcs() {
            SUBJECT_ALT_NAME => Some("subjectAltName"),
            BASIC_CONSTRAINTS => Some("basicConstraints"),
            AUTHORITY_KEY_ID => Some("authorityKeyIdentifier"),
            SCT_LIST => Some("ctSignedCertificateTimestampList"),
            CT_POISON => Some("ctPrecertificatePoison"),
            REDACTED_SANS => Some("redactedSubjectAltName"),
            REDACTED_LABEL_SALT => Some("redactedLabelSalt"),
            _ => None,
        }
    }
}
