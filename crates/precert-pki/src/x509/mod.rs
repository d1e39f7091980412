//! X.509 certificate structures.

pub mod certificate;
pub mod extensions;

pub use certificate::{
    parse_certificate, parse_tbs_certificate, BitString, Certificate, TbsCertificate,
};
pub use extensions::{
    encode_san_extension, general_name, parse_san_extension, Extension, SubjectAltName,
};
