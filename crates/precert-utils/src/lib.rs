#![forbid(unsafe_code)]
#![doc = "DER codec, object identifiers and PEM for precert-rs."]

#[cfg(feature = "asn1")]
pub mod asn1;

#[cfg(feature = "pem")]
pub mod pem;

#[cfg(feature = "oid")]
pub mod oid;
