#![no_main]
use libfuzzer_sys::fuzz_target;
use precert_pki::ct::reconstruct_precert_tbs;
use precert_pki::x509::{parse_certificate, parse_tbs_certificate};

fuzz_target!(|data: &[u8]| {
    let tbs = match parse_certificate(data) {
        Ok(cert) => cert.parse_tbs_certificate(),
        Err(_) => parse_tbs_certificate(data),
    };
    let Ok(tbs) = tbs else {
        return;
    };
    if let Ok(precert) = reconstruct_precert_tbs(&tbs) {
        assert_eq!(precert.raw, Some(precert.to_der()));
    }
});
