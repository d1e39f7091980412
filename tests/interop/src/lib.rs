//! Integration tests for precert-rs.
//! Whole-certificate reconstruction and redaction scenarios across crates.

#[cfg(test)]
mod tests {
    use precert_pki::ct::{
        hash_label, reconstruct_precert_tbs, reconstruct_precert_tbs_from_certificate,
        redact_dns_name,
    };
    use precert_pki::x509::{
        encode_san_extension, general_name, parse_certificate, parse_tbs_certificate,
        Extension, SubjectAltName,
    };
    use precert_types::{EncodingError, PrecertError, RedactionError};
    use precert_utils::asn1::Encoder;
    use precert_utils::oid::{known, Oid};
    use precert_utils::pem;
    use sha2::{Digest, Sha256};

    // Subject key identifier, not special-cased anywhere
    const SUBJECT_KEY_ID: &[u32] = &[2, 5, 29, 14];

    fn seq(content: &[u8]) -> Vec<u8> {
        let mut enc = Encoder::new();
        enc.write_sequence(content);
        enc.finish()
    }

    fn oid(arcs: &[u32]) -> Vec<u8> {
        let mut enc = Encoder::new();
        enc.write_oid(&Oid::new(arcs).to_der_value());
        enc.finish()
    }

    fn rdn_name(org: &str, cn: &str) -> Vec<u8> {
        let mut rdns = Encoder::new();
        for (arcs, value) in [(&[2u32, 5, 4, 10][..], org), (&[2, 5, 4, 3][..], cn)] {
            let mut atv = oid(arcs);
            let mut v = Encoder::new();
            v.write_tlv(0x13, value.as_bytes());
            atv.extend(v.finish());
            let mut set = Encoder::new();
            set.write_tlv(0x31, &seq(&atv));
            rdns.write_raw(&set.finish());
        }
        seq(&rdns.finish())
    }

    fn dns_sans(names: &[&str]) -> Vec<SubjectAltName> {
        names.iter().map(|n| SubjectAltName::dns_name(n)).collect()
    }

    fn san_ext(arcs: &[u32], sans: &[SubjectAltName]) -> Extension {
        Extension::new(Oid::new(arcs), false, encode_san_extension(sans))
    }

    /// An SCT list payload shaped like RFC 6962 (one v1 SCT, dummy values).
    fn sct_ext() -> Extension {
        let mut sct = vec![0x00];
        sct.extend_from_slice(&[0x5A; 32]);
        sct.extend_from_slice(&0x0000_0190_0000_0000u64.to_be_bytes());
        sct.extend_from_slice(&[0x00, 0x00]);
        sct.extend_from_slice(&[0x04, 0x03, 0x00, 0x08]);
        sct.extend_from_slice(&[0x30, 0x06, 0x02, 0x01, 0x01, 0x02, 0x01, 0x01]);
        let mut list = (sct.len() as u16 + 2).to_be_bytes().to_vec();
        list.extend_from_slice(&(sct.len() as u16).to_be_bytes());
        list.extend_from_slice(&sct);
        let mut value = Encoder::new();
        value.write_octet_string(&list);
        Extension::new(Oid::new(known::SCT_LIST), false, value.finish())
    }

    fn encode_tbs(version: Option<i64>, exts: &[Extension]) -> Vec<u8> {
        let mut body = Encoder::new();
        if let Some(version) = version {
            let mut v = Encoder::new();
            v.write_i64(version);
            body.write_context_specific(0, true, &v.finish());
        }
        let mut validity = Encoder::new();
        validity
            .write_tlv(0x17, b"240301120000Z")
            .write_tlv(0x18, b"20500301120000Z");
        let mut spki_alg = oid(&[1, 2, 840, 10045, 2, 1]);
        spki_alg.extend(oid(&[1, 3, 132, 0, 34]));
        let mut spki = seq(&spki_alg);
        let mut key = Encoder::new();
        key.write_bit_string(0, &[0x04; 97]);
        spki.extend(key.finish());

        body.write_integer(&[0x00, 0xC3, 0x5E, 0x11, 0x02, 0x9A, 0x7B])
            .write_raw(&seq(&oid(&[1, 2, 840, 10045, 4, 3, 3])))
            .write_raw(&rdn_name("Example Trust", "Example Issuing CA 1"))
            .write_raw(&seq(&validity.finish()))
            .write_raw(&rdn_name("Example Corp", "secret.example.com"))
            .write_raw(&seq(&spki));
        if !exts.is_empty() {
            let mut list = Encoder::new();
            for ext in exts {
                list.write_raw(&ext.to_der());
            }
            body.write_context_specific(3, true, &seq(&list.finish()));
        }
        seq(&body.finish())
    }

    fn encode_certificate(tbs: &[u8]) -> Vec<u8> {
        let mut inner = Encoder::new();
        inner
            .write_raw(tbs)
            .write_raw(&seq(&oid(&[1, 2, 840, 10045, 4, 3, 3])))
            .write_bit_string(0, &[0x30, 0x06, 0x02, 0x01, 0x2A, 0x02, 0x01, 0x2B]);
        seq(&inner.finish())
    }

    fn common_exts() -> Vec<Extension> {
        vec![
            Extension::new(Oid::new(known::BASIC_CONSTRAINTS), true, vec![0x30, 0x00]),
            Extension::new(Oid::new(SUBJECT_KEY_ID), false, vec![0x04, 0x02, 0xBE, 0xEF]),
            Extension::new(
                Oid::new(known::AUTHORITY_KEY_ID),
                false,
                vec![0x30, 0x04, 0x80, 0x02, 0xCA, 0xFE],
            ),
        ]
    }

    /// Final certificate with a redacted first label of `secret.example.com`.
    fn redacted_certificate(salt: &[u8], redacted_name: &str) -> (Vec<u8>, Vec<Extension>) {
        let sans = dns_sans(&["secret.example.com", "www.example.com"]);
        let redacted = dns_sans(&[redacted_name, "www.example.com"]);
        let redacted_ext = san_ext(known::REDACTED_SANS, &redacted);

        let mut exts = common_exts();
        exts.push(san_ext(known::SUBJECT_ALT_NAME, &sans));
        exts.push(redacted_ext.clone());
        exts.push(Extension::new(Oid::new(known::REDACTED_LABEL_SALT), false, salt.to_vec()));
        exts.push(sct_ext());

        let mut expected = common_exts();
        expected.push(redacted_ext);
        (encode_certificate(&encode_tbs(Some(2), &exts)), expected)
    }

    // -------------------------------------------------------
    // 1. Certificate → extract TBS → parse → re-encode
    // -------------------------------------------------------
    #[test]
    fn test_extract_and_reencode_unmodified() {
        let mut exts = common_exts();
        exts.push(san_ext(known::SUBJECT_ALT_NAME, &dns_sans(&["www.example.com"])));
        let tbs = encode_tbs(Some(2), &exts);
        let cert_der = encode_certificate(&tbs);

        let cert = parse_certificate(&cert_der).unwrap();
        assert_eq!(cert.extract_tbs(), tbs.as_slice());
        let parsed = cert.parse_tbs_certificate().unwrap();
        assert_eq!(parsed.to_der(), tbs);

        // Nothing to strip: reconstruction is the identity
        assert_eq!(reconstruct_precert_tbs_from_certificate(&cert_der).unwrap(), tbs);
    }

    // -------------------------------------------------------
    // 2. SCT list stripped from an otherwise unchanged TBS
    // -------------------------------------------------------
    #[test]
    fn test_sct_stripped_matches_precert() {
        let mut precert_exts = common_exts();
        precert_exts.push(san_ext(known::SUBJECT_ALT_NAME, &dns_sans(&["www.example.com"])));
        precert_exts.push(Extension::new(Oid::new(known::CT_POISON), true, vec![0x05, 0x00]));

        let mut final_exts = precert_exts.clone();
        final_exts.insert(3, sct_ext());

        let cert_der = encode_certificate(&encode_tbs(Some(2), &final_exts));
        let rebuilt = reconstruct_precert_tbs_from_certificate(&cert_der).unwrap();
        assert_eq!(rebuilt, encode_tbs(Some(2), &precert_exts));
        let sct_oid = hex::decode("060a2b06010401d679020402").unwrap();
        assert!(!rebuilt.windows(sct_oid.len()).any(|w| w == sct_oid));
    }

    // -------------------------------------------------------
    // 3. Idempotence over the reconstructed structure
    // -------------------------------------------------------
    #[test]
    fn test_reconstruct_twice() {
        let mut exts = common_exts();
        exts.push(sct_ext());
        let cert_der = encode_certificate(&encode_tbs(None, &exts));
        let once = reconstruct_precert_tbs_from_certificate(&cert_der).unwrap();
        let twice = reconstruct_precert_tbs(&parse_tbs_certificate(&once).unwrap()).unwrap();
        assert_eq!(twice.raw.as_deref(), Some(once.as_slice()));
        assert_eq!(twice.version, 1);
    }

    // -------------------------------------------------------
    // 4. Valid redaction: SAN and salt dropped, redacted SANs kept
    // -------------------------------------------------------
    #[test]
    fn test_redacted_certificate_verifies() {
        let salt = b"s";
        let name = format!("?{}.example.com", hash_label(b"secret", salt));
        let (cert_der, expected_exts) = redacted_certificate(salt, &name);

        let rebuilt = reconstruct_precert_tbs_from_certificate(&cert_der).unwrap();
        assert_eq!(rebuilt, encode_tbs(Some(2), &expected_exts));

        let parsed = parse_tbs_certificate(&rebuilt).unwrap();
        assert!(parsed.extensions.iter().any(|e| e.is(known::REDACTED_SANS)));
        assert!(!parsed.extensions.iter().any(|e| e.is(known::SUBJECT_ALT_NAME)));
        assert!(!parsed.extensions.iter().any(|e| e.is(known::REDACTED_LABEL_SALT)));
    }

    // -------------------------------------------------------
    // 5. Redaction failures surface as redaction errors
    // -------------------------------------------------------
    #[test]
    fn test_redacted_certificate_altered_digest() {
        let salt = b"s";
        let mut digest = hash_label(b"secret", salt);
        let last = if digest.ends_with('0') { "1" } else { "0" };
        digest.replace_range(63.., last);
        let (cert_der, _) = redacted_certificate(salt, &format!("?{digest}.example.com"));

        let err = reconstruct_precert_tbs_from_certificate(&cert_der).unwrap_err();
        assert!(err.is_redaction());
        assert_eq!(
            err,
            PrecertError::Redaction(RedactionError::HashMismatch { index: 0, label: 0 })
        );
    }

    #[test]
    fn test_redacted_wildcard_certificate() {
        let salt = b"pepper";
        let sans = dns_sans(&["*.example.com"]);
        let redacted = dns_sans(&[redact_dns_name("*.example.com", salt, &[0]).as_str()]);
        let exts = vec![
            san_ext(known::SUBJECT_ALT_NAME, &sans),
            san_ext(known::REDACTED_SANS, &redacted),
            Extension::new(Oid::new(known::REDACTED_LABEL_SALT), false, salt.to_vec()),
        ];
        let cert_der = encode_certificate(&encode_tbs(Some(2), &exts));
        assert_eq!(
            reconstruct_precert_tbs_from_certificate(&cert_der).unwrap_err(),
            PrecertError::Redaction(RedactionError::WildcardRedacted { index: 0, label: 0 })
        );
    }

    #[test]
    fn test_redacted_entry_count_mismatch() {
        let salt = b"pepper";
        let exts = vec![
            san_ext(known::SUBJECT_ALT_NAME, &dns_sans(&["a.example.com", "b.example.com"])),
            san_ext(
                known::REDACTED_SANS,
                &dns_sans(&["a.example.com", "b.example.com", "c.example.com"]),
            ),
            Extension::new(Oid::new(known::REDACTED_LABEL_SALT), false, salt.to_vec()),
        ];
        let cert_der = encode_certificate(&encode_tbs(Some(2), &exts));
        assert_eq!(
            reconstruct_precert_tbs_from_certificate(&cert_der).unwrap_err(),
            PrecertError::Redaction(RedactionError::LengthMismatch {
                original: 2,
                redacted: 3
            })
        );
    }

    #[test]
    fn test_redacted_sans_without_san() {
        let mut exts = common_exts();
        exts.push(san_ext(known::REDACTED_SANS, &dns_sans(&["www.example.com"])));
        exts.push(Extension::new(Oid::new(known::REDACTED_LABEL_SALT), false, vec![1]));
        exts.push(sct_ext());
        let cert_der = encode_certificate(&encode_tbs(Some(2), &exts));
        assert_eq!(
            reconstruct_precert_tbs_from_certificate(&cert_der).unwrap_err(),
            PrecertError::Redaction(RedactionError::MissingSanExtension)
        );
    }

    // -------------------------------------------------------
    // 6. Mixed GeneralName types under redaction
    // -------------------------------------------------------
    #[test]
    fn test_redaction_with_non_dns_entries() {
        let salt = b"mixed";
        let ip = SubjectAltName {
            name_type: general_name::IP_ADDRESS,
            value: vec![198, 51, 100, 7],
        };
        let email = SubjectAltName {
            name_type: general_name::RFC822_NAME,
            value: b"ops@example.com".to_vec(),
        };
        let original = vec![
            ip.clone(),
            SubjectAltName::dns_name("db.internal.example.com"),
            email.clone(),
        ];
        let redacted = vec![
            ip,
            SubjectAltName::dns_name(&redact_dns_name("db.internal.example.com", salt, &[0, 1])),
            email,
        ];
        let exts = vec![
            san_ext(known::SUBJECT_ALT_NAME, &original),
            san_ext(known::REDACTED_SANS, &redacted),
            Extension::new(Oid::new(known::REDACTED_LABEL_SALT), false, salt.to_vec()),
        ];
        let cert_der = encode_certificate(&encode_tbs(Some(2), &exts));
        let rebuilt = reconstruct_precert_tbs_from_certificate(&cert_der).unwrap();
        assert_eq!(rebuilt, encode_tbs(Some(2), &exts[1..2]));
    }

    // -------------------------------------------------------
    // 7. SAN trailing byte tolerance
    // -------------------------------------------------------
    #[test]
    fn test_san_trailing_bytes() {
        let salt = b"s";
        let sans = dns_sans(&["www.example.com"]);
        let mut san_value = encode_san_extension(&sans);
        san_value.push(0x00);
        let build = |value: Vec<u8>| {
            let exts = vec![
                Extension::new(Oid::new(known::SUBJECT_ALT_NAME), false, value),
                san_ext(known::REDACTED_SANS, &sans),
                Extension::new(Oid::new(known::REDACTED_LABEL_SALT), false, salt.to_vec()),
            ];
            encode_certificate(&encode_tbs(Some(2), &exts))
        };

        assert!(reconstruct_precert_tbs_from_certificate(&build(san_value.clone())).is_ok());

        san_value.push(0x00);
        let err = reconstruct_precert_tbs_from_certificate(&build(san_value)).unwrap_err();
        assert!(err.is_encoding());
        assert!(matches!(
            err,
            PrecertError::Encoding(EncodingError::TrailingData { len: 2, .. })
        ));
    }

    // -------------------------------------------------------
    // 8. Long-form lengths survive the round trip
    // -------------------------------------------------------
    #[test]
    fn test_large_extension_values() {
        let names: Vec<String> = (0..40)
            .map(|i| format!("node{i:02}.cluster.example.com"))
            .collect();
        let sans: Vec<_> = names.iter().map(|n| SubjectAltName::dns_name(n)).collect();
        let mut exts = common_exts();
        exts.push(san_ext(known::SUBJECT_ALT_NAME, &sans));
        let tbs = encode_tbs(Some(2), &exts);
        assert!(tbs.len() > 1024);

        let mut with_sct = exts.clone();
        with_sct.push(sct_ext());
        let cert_der = encode_certificate(&encode_tbs(Some(2), &with_sct));
        assert_eq!(reconstruct_precert_tbs_from_certificate(&cert_der).unwrap(), tbs);
    }

    // -------------------------------------------------------
    // 9. PEM transport and TBS digest
    // -------------------------------------------------------
    #[test]
    fn test_pem_certificate_pipeline() {
        let salt = b"s";
        let name = redact_dns_name("secret.example.com", salt, &[0]);
        let (cert_der, expected_exts) = redacted_certificate(salt, &name);
        let text = pem::encode("CERTIFICATE", &cert_der);

        let der = pem::find(&text, "CERTIFICATE").unwrap();
        let rebuilt = reconstruct_precert_tbs_from_certificate(&der).unwrap();
        let expected = encode_tbs(Some(2), &expected_exts);
        assert_eq!(
            hex::encode(Sha256::digest(&rebuilt)),
            hex::encode(Sha256::digest(&expected))
        );
    }

    // -------------------------------------------------------
    // 10. Structural errors are encoding errors
    // -------------------------------------------------------
    #[test]
    fn test_malformed_inputs() {
        let cert_der = encode_certificate(&encode_tbs(Some(2), &common_exts()));

        let mut trailing = cert_der.clone();
        trailing.push(0x00);
        assert_eq!(
            reconstruct_precert_tbs_from_certificate(&trailing).unwrap_err(),
            PrecertError::Encoding(EncodingError::TrailingData {
                context: "certificate",
                len: 1
            })
        );

        for cut in [1, 10, cert_der.len() / 2, cert_der.len() - 1] {
            let err = reconstruct_precert_tbs_from_certificate(&cert_der[..cut]).unwrap_err();
            assert!(err.is_encoding(), "cut at {cut}: {err}");
        }

        // Indefinite length
        let mut indefinite = cert_der.clone();
        indefinite[1] = 0x80;
        assert!(reconstruct_precert_tbs_from_certificate(&indefinite)
            .unwrap_err()
            .is_encoding());
    }
}
