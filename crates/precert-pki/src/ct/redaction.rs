//! Salted-hash redaction of subjectAltName DNS labels.
//!
//! A redacted dNSName keeps its label structure but replaces selected
//! labels with `?` followed by the lowercase hex SHA-256 of
//! `salt || label`. Verification walks the plain and redacted SAN lists
//! in parallel and checks every label against that commitment.

use precert_types::{PrecertError, RedactionError};
use sha2::{Digest, Sha256};
use tracing::{debug, trace};

use crate::x509::extensions::{parse_san_extension, SubjectAltName};

/// Prefix marking a label as redacted.
pub const REDACTION_MARKER: u8 = b'?';

const WILDCARD_LABEL: &[u8] = b"*";

/// Lowercase hex of `SHA-256(salt || label)`.
pub fn hash_label(label: &[u8], salt: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(label);
    hex::encode(hasher.finalize())
}

/// The redacted form of a single label.
pub fn redact_label(label: &str, salt: &[u8]) -> String {
    format!(
        "{}{}",
        REDACTION_MARKER as char,
        hash_label(label.as_bytes(), salt)
    )
}

/// Redact the labels of `name` at the given (zero-based) positions.
pub fn redact_dns_name(name: &str, salt: &[u8], labels_to_redact: &[usize]) -> String {
    name.split('.')
        .enumerate()
        .map(|(i, label)| {
            if labels_to_redact.contains(&i) {
                redact_label(label, salt)
            } else {
                label.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(".")
}

/// Check that `redacted` is a faithful redaction of `original`.
///
/// Entries are compared by position. Non-DNS entries must match exactly;
/// dNSName entries are compared label by label.
pub fn verify_redacted_sans(
    original: &[SubjectAltName],
    redacted: &[SubjectAltName],
    salt: &[u8],
) -> Result<(), RedactionError> {
    if original.len() != redacted.len() {
        return Err(RedactionError::LengthMismatch {
            original: original.len(),
            redacted: redacted.len(),
        });
    }

    for (index, (orig, red)) in original.iter().zip(redacted).enumerate() {
        if orig.name_type != red.name_type {
            return Err(RedactionError::TypeMismatch {
                index,
                original: orig.name_type,
                redacted: red.name_type,
            });
        }
        if orig.is_dns_name() {
            verify_dns_name(index, &orig.value, &red.value, salt)?;
        } else if orig.value != red.value {
            return Err(RedactionError::NonDnsValueMismatch {
                index,
                tag: orig.name_type,
            });
        }
    }

    debug!(entries = original.len(), "redacted subjectAltName verified");
    Ok(())
}

fn verify_dns_name(
    index: usize,
    original: &[u8],
    redacted: &[u8],
    salt: &[u8],
) -> Result<(), RedactionError> {
    let orig_labels: Vec<&[u8]> = original.split(|&b| b == b'.').collect();
    let red_labels: Vec<&[u8]> = redacted.split(|&b| b == b'.').collect();
    if orig_labels.len() != red_labels.len() {
        return Err(RedactionError::LabelCountMismatch {
            index,
            original: orig_labels.len(),
            redacted: red_labels.len(),
        });
    }

    for (label, (orig, red)) in orig_labels.iter().zip(&red_labels).enumerate() {
        match red.split_first() {
            Some((&REDACTION_MARKER, digest)) => {
                if *orig == WILDCARD_LABEL {
                    return Err(RedactionError::WildcardRedacted { index, label });
                }
                trace!(index, label, "checking redacted label");
                if digest != hash_label(orig, salt).as_bytes() {
                    return Err(RedactionError::HashMismatch { index, label });
                }
            }
            _ if orig != red => {
                return Err(RedactionError::UnredactedLabelMismatch {
                    index,
                    label,
                    original: String::from_utf8_lossy(orig).into_owned(),
                    redacted: String::from_utf8_lossy(red).into_owned(),
                });
            }
            _ => {}
        }
    }
    Ok(())
}

/// Parse two subjectAltName extension payloads and verify the second is a
/// redaction of the first.
pub fn verify_redacted_san_extension(
    san: &[u8],
    redacted_san: &[u8],
    salt: &[u8],
) -> Result<(), PrecertError> {
    let original = parse_san_extension(san)?;
    let redacted = parse_san_extension(redacted_san)?;
    verify_redacted_sans(&original, &redacted, salt)?;
    Ok(())
}
