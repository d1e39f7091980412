//! Precertificate TBS reconstruction command implementation.

use std::fs;
use std::io::{self, Write};

use precert_pki::ct::reconstruct_precert_tbs_from_certificate;
use precert_utils::pem;
use tracing::info;

use crate::input::load_certificate;

/// PEM label used for reconstructed output.
pub const PRECERT_TBS_LABEL: &str = "PRECERT TBS CERTIFICATE";

/// Encoding of the reconstructed structure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Der,
    Pem,
    Hex,
}

pub fn run(
    input: &str,
    output: Option<&str>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let cert_der = load_certificate(input)?;
    let tbs = reconstruct_precert_tbs_from_certificate(&cert_der)?;
    info!(len = tbs.len(), "reconstructed precertificate TBSCertificate");

    let rendered = render(&tbs, format);
    match output {
        Some(path) => fs::write(path, &rendered)?,
        None => io::stdout().write_all(&rendered)?,
    }
    Ok(())
}

fn render(tbs: &[u8], format: OutputFormat) -> Vec<u8> {
    match format {
        OutputFormat::Der => tbs.to_vec(),
        OutputFormat::Pem => pem::encode(PRECERT_TBS_LABEL, tbs).into_bytes(),
        OutputFormat::Hex => format!("{}\n", hex::encode(tbs)).into_bytes(),
    }
}
