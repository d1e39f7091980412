#![forbid(unsafe_code)]
#![doc = "X.509 TBSCertificate handling and CT precertificate reconstruction for precert-rs."]

#[cfg(feature = "x509")]
pub mod x509;

#[cfg(feature = "ct")]
pub mod ct;
