//! Import functionality
//!
//! Reads operator model XML documents into the data model defined in
//! [`crate::models`].

pub mod operator_model;

pub use operator_model::OperatorModelImporter;

use crate::models::LiteralError;

/// Error during import
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("Parse error at position {position}: {message}")]
    ParseError { position: u64, message: String },
    #[error("Unexpected element '{element}' in {class} at position {position}")]
    UnexpectedElement {
        class: &'static str,
        element: String,
        position: u64,
    },
    #[error("Unexpected attribute '{attribute}' on {class} at position {position}")]
    UnexpectedAttribute {
        class: &'static str,
        attribute: String,
        position: u64,
    },
    #[error("Missing required element '{element}' in {class} at position {position}")]
    MissingElement {
        class: &'static str,
        element: &'static str,
        position: u64,
    },
    /// A simple value that does not parse as its type
    ///
    /// XSD `integer` values are held as `i64` and `nonNegativeInteger` values
    /// as `u64`; a well-formed number outside those ranges is rejected here
    /// and `expected` names the range.
    #[error("Invalid value '{value}' for '{feature}' (expected {expected})")]
    InvalidValue {
        feature: &'static str,
        value: String,
        expected: &'static str,
    },
    #[error("Invalid literal: {0}")]
    Literal(#[from] LiteralError),
    #[error("IO error: {0}")]
    IoError(String),
}
