/// DER and SAN grammar errors: the input is not a well-formed certificate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodingError {
    #[error("malformed DER encoding: {0}")]
    MalformedEncoding(String),
    #[error("trailing data after {context}: {len} byte(s)")]
    TrailingData { context: &'static str, len: usize },
    #[error("invalid subjectAltName structure: {0}")]
    InvalidSanStructure(String),
}

impl EncodingError {
    /// Shorthand for [`EncodingError::MalformedEncoding`].
    pub fn malformed(msg: impl Into<String>) -> Self {
        EncodingError::MalformedEncoding(msg.into())
    }
}

/// Redaction protocol violations: the certificate is valid DER but its
/// redacted-SANs claim does not hold.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RedactionError {
    #[error("redacted subjectAltName extension present without a subjectAltName extension")]
    MissingSanExtension,
    #[error("redacted subjectAltName extension present without a redacted label salt extension")]
    MissingSaltExtension,
    #[error("subjectAltName has {original} entries but redacted subjectAltName has {redacted}")]
    LengthMismatch { original: usize, redacted: usize },
    #[error("entry {index}: type {original} does not match redacted type {redacted}")]
    TypeMismatch {
        index: usize,
        original: u32,
        redacted: u32,
    },
    #[error("entry {index}: {original} label(s) but redacted name has {redacted}")]
    LabelCountMismatch {
        index: usize,
        original: usize,
        redacted: usize,
    },
    #[error("entry {index}, label {label}: wildcard label cannot be redacted")]
    WildcardRedacted { index: usize, label: usize },
    #[error("entry {index}, label {label}: redacted label hash does not match")]
    HashMismatch { index: usize, label: usize },
    #[error("entry {index}, label {label}: unredacted label {redacted:?} does not match {original:?}")]
    UnredactedLabelMismatch {
        index: usize,
        label: usize,
        original: String,
        redacted: String,
    },
    #[error("entry {index}: value of type {tag} differs from redacted value")]
    NonDnsValueMismatch { index: usize, tag: u32 },
}

/// Any failure of the precertificate reconstruction pipeline.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PrecertError {
    #[error(transparent)]
    Encoding(#[from] EncodingError),
    #[error("redaction verification failed: {0}")]
    Redaction(#[from] RedactionError),
}

impl PrecertError {
    /// True when the input could not be decoded as a certificate.
    pub fn is_encoding(&self) -> bool {
        matches!(self, PrecertError::Encoding(_))
    }

    /// True when the certificate decoded but its redaction claim is false.
    pub fn is_redaction(&self) -> bool {
        matches!(self, PrecertError::Redaction(_))
    }
}
