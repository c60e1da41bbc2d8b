//! # Error Types — Document Loading and Schema Errors
//!
//! All errors use `thiserror` for derive-based `Display` and `Error`
//! implementations.
//!
//! ## Design
//!
//! - Schema errors carry the document name and the full JSON path of the
//!   offending field, so a broken bundle can be fixed without guessing.
//! - Rule violations are not errors. They live in `mapp-rules` as plain data.

use thiserror::Error;

/// A required field is absent or has the wrong JSON type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// The field (or list index) does not exist.
    #[error("{document}: missing required field `{path}`")]
    MissingField {
        /// Archive member the field was read from.
        document: String,
        /// Dotted JSON path of the missing field.
        path: String,
    },

    /// The field exists but holds a different JSON type.
    #[error("{document}: expected {expected} at `{path}`, found {found}")]
    WrongType {
        /// Archive member the field was read from.
        document: String,
        /// Dotted JSON path of the field.
        path: String,
        /// JSON type the reader required.
        expected: &'static str,
        /// JSON type actually present.
        found: &'static str,
    },
}

impl SchemaError {
    /// Archive member the error was raised for.
    pub fn document(&self) -> &str {
        match self {
            Self::MissingField { document, .. } | Self::WrongType { document, .. } => document,
        }
    }

    /// Dotted JSON path of the offending field.
    pub fn path(&self) -> &str {
        match self {
            Self::MissingField { path, .. } | Self::WrongType { path, .. } => path,
        }
    }
}

/// Error turning raw member bytes into a typed document.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The member is not valid JSON text.
    #[error("{document}: invalid JSON: {source}")]
    Parse {
        /// Archive member being parsed.
        document: String,
        /// Underlying parser error (carries line and column).
        source: serde_json::Error,
    },

    /// The member is valid JSON but misses a required field.
    #[error(transparent)]
    Schema(#[from] SchemaError),
}
