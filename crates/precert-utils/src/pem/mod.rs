//! PEM format parsing and generation.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use precert_types::EncodingError;

/// A parsed PEM block.
#[derive(Debug, Clone)]
pub struct PemBlock {
    /// The label (e.g., "CERTIFICATE").
    pub label: String,
    /// The decoded binary data.
    pub data: Vec<u8>,
}

const BEGIN_PREFIX: &str = "-----BEGIN ";
const END_PREFIX: &str = "-----END ";
const DASHES_SUFFIX: &str = "-----";

/// Returns true if `input` looks like PEM text rather than binary DER:
/// some line starts with a BEGIN marker.
pub fn is_pem(input: &[u8]) -> bool {
    let marker = BEGIN_PREFIX.as_bytes();
    input
        .split(|&b| b == b'\n')
        .any(|line| {
            let start = line.iter().position(|b| !b.is_ascii_whitespace());
            start.is_some_and(|i| line[i..].starts_with(marker))
        })
}

/// Parse a PEM-encoded string into one or more PEM blocks.
/// Text outside of BEGIN/END markers is ignored.
pub fn parse(input: &str) -> Result<Vec<PemBlock>, EncodingError> {
    let mut blocks = Vec::new();
    let mut lines = input.lines();

    while let Some(line) = lines.next() {
        let Some(label) = line
            .trim()
            .strip_prefix(BEGIN_PREFIX)
            .and_then(|s| s.strip_suffix(DASHES_SUFFIX))
        else {
            continue;
        };
        let end_marker = format!("{END_PREFIX}{label}{DASHES_SUFFIX}");

        let mut body = String::new();
        let mut found_end = false;
        for inner_line in lines.by_ref() {
            let inner_line = inner_line.trim();
            if inner_line == end_marker {
                found_end = true;
                break;
            }
            body.push_str(inner_line);
        }
        if !found_end {
            return Err(EncodingError::malformed(format!(
                "missing PEM end marker for {label}"
            )));
        }

        let data = STANDARD
            .decode(body.as_bytes())
            .map_err(|e| EncodingError::malformed(format!("invalid PEM base64: {e}")))?;
        blocks.push(PemBlock {
            label: label.to_string(),
            data,
        });
    }

    Ok(blocks)
}

/// Return the data of the first block carrying `label`.
pub fn find(input: &str, label: &str) -> Result<Vec<u8>, EncodingError> {
    parse(input)?
        .into_iter()
        .find(|b| b.label == label)
        .map(|b| b.data)
        .ok_or_else(|| EncodingError::malformed(format!("no {label} PEM block found")))
}

/// Encode binary data as a PEM string with the given label.
pub fn encode(label: &str, data: &[u8]) -> String {
    let body = STANDARD.encode(data);
    let mut output = format!("{BEGIN_PREFIX}{label}{DASHES_SUFFIX}\n");

    // Wrap at 64 characters per line
    let mut rest = body.as_str();
    while !rest.is_empty() {
        let (line, tail) = rest.split_at(rest.len().min(64));
        output.push_str(line);
        output.push('\n');
        rest = tail;
    }

    output.push_str(&format!("{END_PREFIX}{label}{DASHES_SUFFIX}\n"));
    output
}
