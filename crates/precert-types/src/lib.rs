#![forbid(unsafe_code)]
#![doc = "Shared error types for precert-rs."]

pub mod error;

pub use error::*;
