//! Reading trip exports and turning rows into index documents.
//!
//! - [`transform`]: the row transformer ([`transform_line`], [`transform_record`])
//! - [`csv`]: file reading on top of the `csv` crate

pub mod csv;
pub mod transform;

pub use transform::{document_id, transform_line, transform_record};
