#![no_main]
use libfuzzer_sys::fuzz_target;
use precert_pki::ct::verify_redacted_sans;
use precert_pki::x509::{encode_san_extension, parse_san_extension};

fuzz_target!(|data: &[u8]| {
    let Ok(sans) = parse_san_extension(data) else {
        return;
    };
    let reencoded = encode_san_extension(&sans);
    assert_eq!(parse_san_extension(&reencoded).as_ref(), Ok(&sans));
    let _ = verify_redacted_sans(&sans, &sans, data);
});
