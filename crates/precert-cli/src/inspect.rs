//! Extension listing and reconstruction summary.

use std::fmt;

use precert_pki::ct::{check_redaction, reconstruct_precert_tbs, RedactionStatus};
use precert_pki::x509::{parse_certificate, TbsCertificate};
use precert_utils::oid::known;
use sha2::{Digest, Sha256};

use crate::input::load_certificate;

pub fn run(input: &str) -> Result<(), Box<dyn std::error::Error>> {
    let cert_der = load_certificate(input)?;
    let cert = parse_certificate(&cert_der)?;
    let tbs = cert.parse_tbs_certificate()?;
    print!("{}", describe(&tbs));
    Ok(())
}

/// Human-readable report for a parsed TBSCertificate.
///
/// Redaction and reconstruction failures are reported in the text rather
/// than returned.
fn describe(tbs: &TbsCertificate) -> String {
    Report(tbs).to_string()
}

struct Report<'a>(&'a TbsCertificate);

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tbs = self.0;
        let tbs_len = tbs.raw.as_ref().map_or(0, Vec::len);
        // The encoded value is zero-based; out-of-range values print as-is.
        match tbs.version.checked_add(1) {
            Some(v) => writeln!(f, "TBSCertificate: v{v}, {tbs_len} bytes")?,
            None => writeln!(f, "TBSCertificate: version {}, {tbs_len} bytes", tbs.version)?,
        }

        writeln!(f, "Extensions ({}):", tbs.extensions.len())?;
        for (i, ext) in tbs.extensions.iter().enumerate() {
            let name = known::extension_name(&ext.id).unwrap_or("unknown");
            let critical = if ext.critical { ", critical" } else { "" };
            writeln!(
                f,
                "  [{i}] {} {name}{critical} ({} bytes)",
                ext.id,
                ext.value.len()
            )?;
        }

        match check_redaction(tbs) {
            Ok(RedactionStatus::NotRedacted) => writeln!(f, "Redaction: none")?,
            Ok(RedactionStatus::Verified) => writeln!(f, "Redaction: verified")?,
            Err(e) => writeln!(f, "Redaction: failed ({e})")?,
        }

        match reconstruct_precert_tbs(tbs) {
            Ok(precert) => {
                let der = precert.to_der();
                let removed = tbs.extensions.len() - precert.extensions.len();
                writeln!(
                    f,
                    "Precertificate TBS: {} bytes, {removed} extension(s) removed",
                    der.len()
                )?;
                writeln!(f, "SHA256= {}", hex::encode(Sha256::digest(&der)))
            }
            Err(e) => writeln!(f, "Precertificate TBS: unavailable ({e})"),
        }
    }
}
