//! Error types for reading, parsing, and validating collection documents
//!
//! Copyright (c) 2025 Satchel Team
//! Licensed under the Apache-2.0 license

use std::path::PathBuf;
use thiserror::Error;

use crate::validation::ValidationErrors;

/// Result type for collection operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the document and validation layers
///
/// Syntax-level failures (`Encoding`, `Syntax`, `DepthExceeded`) are fatal:
/// no value exists to validate. Schema violations are gathered during the
/// walk and surface together in the `Validation` variant.
#[derive(Error, Debug)]
pub enum Error {
    /// File I/O errors
    #[error("Failed to read file '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The document bytes are not valid UTF-8
    #[error("Document is not valid UTF-8: {source}")]
    Encoding { source: std::str::Utf8Error },

    /// The document is not well-formed JSON
    #[error("Malformed JSON at line {line}, column {column}: {source}")]
    Syntax {
        line: usize,
        column: usize,
        source: serde_json::Error,
    },

    /// The raw document nests deeper than the configured limit
    #[error("Document nesting depth {depth} exceeds the limit of {limit}")]
    DepthExceeded { depth: usize, limit: usize },

    /// No JSON object could be recovered from the document
    #[error("Unable to salvage a JSON object: {reason}")]
    Salvage { reason: String },

    /// A collection failed to serialize
    #[error("Failed to serialize collection: {source}")]
    Serialize { source: serde_json::Error },

    /// The document is well-formed JSON but violates the collection schema
    #[error("Collection failed validation with {} violation(s)", errors.len())]
    Validation { errors: ValidationErrors },
}

impl Error {
    /// Create an I/O error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create an encoding error
    pub fn encoding(source: std::str::Utf8Error) -> Self {
        Self::Encoding { source }
    }

    /// Create a syntax error, lifting line and column from the parser
    pub fn syntax(source: serde_json::Error) -> Self {
        Self::Syntax {
            line: source.line(),
            column: source.column(),
            source,
        }
    }

    /// Create a depth error
    pub fn depth_exceeded(depth: usize, limit: usize) -> Self {
        Self::DepthExceeded { depth, limit }
    }

    /// Create a salvage error
    pub fn salvage(reason: impl Into<String>) -> Self {
        Self::Salvage {
            reason: reason.into(),
        }
    }

    /// Create a serialization error
    pub fn serialize(source: serde_json::Error) -> Self {
        Self::Serialize { source }
    }

    /// Create a validation error carrying the gathered violations
    pub fn validation(errors: ValidationErrors) -> Self {
        Self::Validation { errors }
    }

    /// The violations behind a `Validation` error, if that is what this is
    pub fn violations(&self) -> Option<&ValidationErrors> {
        match self {
            Self::Validation { errors } => Some(errors),
            _ => None,
        }
    }
}

impl From<ValidationErrors> for Error {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation { errors }
    }
}
