//! Redacted subjectAltName verification command implementation.

use precert_pki::ct::{check_redaction, RedactionStatus};
use precert_pki::x509::parse_certificate;

use crate::input::load_certificate;

pub fn run(input: &str) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", verify(&load_certificate(input)?)?);
    Ok(())
}

fn verify(cert_der: &[u8]) -> Result<&'static str, Box<dyn std::error::Error>> {
    let tbs = parse_certificate(cert_der)?.parse_tbs_certificate()?;
    let message = match check_redaction(&tbs)? {
        RedactionStatus::NotRedacted => "no redaction",
        RedactionStatus::Verified => "redaction verified",
    };
    Ok(message)
}
