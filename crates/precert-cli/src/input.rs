//! Certificate input shared by all commands.

use std::fs;
use std::io::{self, Read};

use precert_utils::pem;
use tracing::debug;

/// PEM label of an input certificate.
pub const CERTIFICATE_LABEL: &str = "CERTIFICATE";

/// Read a file, or stdin when `path` is `-`.
pub fn read_input(path: &str) -> io::Result<Vec<u8>> {
    if path == "-" {
        let mut buf = Vec::new();
        io::stdin().read_to_end(&mut buf)?;
        Ok(buf)
    } else {
        fs::read(path)
    }
}

/// Return DER certificate bytes, decoding the first `CERTIFICATE` block if
/// the input is PEM.
pub fn certificate_der(data: Vec<u8>) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    if !pem::is_pem(&data) {
        return Ok(data);
    }
    let text = std::str::from_utf8(&data).map_err(|e| format!("PEM input is not UTF-8: {e}"))?;
    let der = pem::find(text, CERTIFICATE_LABEL)?;
    debug!(len = der.len(), "decoded PEM certificate");
    Ok(der)
}

/// Read a DER or PEM certificate from `path`.
pub fn load_certificate(path: &str) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    let data = read_input(path).map_err(|e| format!("cannot read {path}: {e}"))?;
    certificate_der(data)
}
