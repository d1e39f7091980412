//! Certificate Transparency: precertificate reconstruction and SAN label
//! redaction.

pub mod precert;
pub mod redaction;

pub use precert::{
    check_redaction, disposition, reconstruct_precert_tbs,
    reconstruct_precert_tbs_from_certificate, ExtensionDisposition, RedactionStatus,
};
pub use redaction::{
    hash_label, redact_dns_name, redact_label, verify_redacted_san_extension,
    verify_redacted_sans,
};
