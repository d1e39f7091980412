#![no_main]
use libfuzzer_sys::fuzz_target;
use precert_utils::asn1::Decoder;

fuzz_target!(|data: &[u8]| {
    let mut decoder = Decoder::new(data);
    while !decoder.is_empty() {
        let Ok(tlv) = decoder.read_tlv() else {
            break;
        };
        // Every decoded element must re-emit its exact source bytes
        assert_eq!(tlv.to_raw_value().as_der(), tlv.raw);
        if tlv.tag.constructed {
            let mut inner = Decoder::new(tlv.value);
            while inner.read_tlv().is_ok() {}
        }
    }
});
