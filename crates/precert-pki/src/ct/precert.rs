//! Precertificate TBSCertificate reconstruction (RFC 6962 §3.2).
//!
//! A final certificate differs from the precertificate submitted to CT logs
//! by its embedded SCT list, and, when SAN labels are redacted, by the
//! label salt and the plain subjectAltName. Reconstruction removes those
//! again and re-encodes, leaving every other field byte-for-byte intact.

use precert_types::{PrecertError, RedactionError};
use precert_utils::oid::known;
use tracing::debug;

use super::redaction::verify_redacted_san_extension;
use crate::x509::certificate::{parse_certificate, TbsCertificate};
use crate::x509::extensions::Extension;

/// What happens to one extension during reconstruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtensionDisposition {
    Keep,
    Drop,
}

/// Outcome of the redaction check on a TBSCertificate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedactionStatus {
    /// No redacted-SANs extension.
    NotRedacted,
    /// Redacted-SANs extension present and consistent with the plain SAN.
    Verified,
}

/// First occurrence of each extension reconstruction cares about.
#[derive(Default)]
struct SpecialExtensions<'a> {
    san: Option<&'a Extension>,
    redacted_sans: Option<&'a Extension>,
    salt: Option<&'a Extension>,
}

impl<'a> SpecialExtensions<'a> {
    fn locate(extensions: &'a [Extension]) -> Self {
        let mut found = Self::default();
        for ext in extensions {
            let slot = match ext.id.arcs() {
                known::SUBJECT_ALT_NAME => &mut found.san,
                known::REDACTED_SANS => &mut found.redacted_sans,
                known::REDACTED_LABEL_SALT => &mut found.salt,
                _ => continue,
            };
            slot.get_or_insert(ext);
        }
        found
    }
}

/// Verify the redacted-SANs claim of `tbs`, if it makes one.
pub fn check_redaction(tbs: &TbsCertificate) -> Result<RedactionStatus, PrecertError> {
    let special = SpecialExtensions::locate(&tbs.extensions);
    let Some(redacted) = special.redacted_sans else {
        return Ok(RedactionStatus::NotRedacted);
    };
    let san = special.san.ok_or(RedactionError::MissingSanExtension)?;
    let salt = special.salt.ok_or(RedactionError::MissingSaltExtension)?;

    verify_redacted_san_extension(&san.value, &redacted.value, &salt.value)?;
    Ok(RedactionStatus::Verified)
}

/// Decide whether `ext` survives into the precertificate.
pub fn disposition(ext: &Extension, redaction: RedactionStatus) -> ExtensionDisposition {
    match ext.id.arcs() {
        known::SCT_LIST | known::REDACTED_LABEL_SALT => ExtensionDisposition::Drop,
        known::SUBJECT_ALT_NAME if redaction == RedactionStatus::Verified => {
            ExtensionDisposition::Drop
        }
        _ => ExtensionDisposition::Keep,
    }
}

/// Rebuild the precertificate TBSCertificate from a final certificate's.
///
/// The result carries its DER encoding in `raw`. Nothing is returned if
/// the redaction check fails.
pub fn reconstruct_precert_tbs(tbs: &TbsCertificate) -> Result<TbsCertificate, PrecertError> {
    let redaction = check_redaction(tbs)?;

    let mut precert = tbs.clone();
    precert.extensions = tbs
        .extensions
        .iter()
        .filter(|ext| match disposition(ext, redaction) {
            ExtensionDisposition::Keep => true,
            ExtensionDisposition::Drop => {
                debug!(oid = %ext.id, "dropping extension");
                false
            }
        })
        .cloned()
        .collect();
    precert.raw = Some(precert.to_der());
    Ok(precert)
}

/// Parse a DER certificate and return its reconstructed precertificate
/// TBSCertificate encoding.
pub fn reconstruct_precert_tbs_from_certificate(
    cert_der: &[u8],
) -> Result<Vec<u8>, PrecertError> {
    let cert = parse_certificate(cert_der)?;
    let tbs = cert.parse_tbs_certificate()?;
    let precert = reconstruct_precert_tbs(&tbs)?;
    Ok(match precert.raw {
        Some(raw) => raw,
        None => precert.to_der(),
    })
}
