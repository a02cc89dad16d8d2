//! Satchel Core - parsing, validation, and traversal for Postman
//! Collection v2.2.0 documents
//!
//! This crate reads collection documents from text or disk, checks them
//! against the v2.2.0 schema, and builds a strongly typed, traversable
//! model of the folder/request tree.
//!
//! # Main Components
//!
//! - **Document Layer**: UTF-8 decoding, nesting-depth guarding, syntax
//!   parsing, and salvage of damaged documents
//! - **Structural Validation**: single-pass schema walk that accumulates
//!   every violation with its `$`-rooted JSON path
//! - **Typed Model**: the validated collection as Rust structs, with
//!   serialization that reproduces an equivalent document
//! - **Traversal**: depth-first iterators over items, requests, and
//!   script hooks
//!
//! # Example
//!
//! ```rust
//! use satchel_core::{parse_value, ParseOptions, SCHEMA_URL};
//! use serde_json::json;
//!
//! let document = json!({
//!     "info": {"name": "Demo", "schema": SCHEMA_URL},
//!     "item": [
//!         {"name": "ping", "request": {"method": "GET", "url": "https://api.example.com/ping"}}
//!     ]
//! });
//!
//! let collection = parse_value(&document, &ParseOptions::default()).unwrap();
//! assert_eq!(collection.info.name, "Demo");
//! assert_eq!(collection.requests().count(), 1);
//! ```
//!
//! Validation failures name the exact path of every violation:
//!
//! ```rust
//! use satchel_core::validate;
//! use serde_json::json;
//!
//! let errors = validate(&json!({"info": {}, "item": []}));
//! assert_eq!(errors.errors[0].path, "$.info.name");
//! ```
//!
//! # Validation Modes
//!
//! - **Basic**: schema-faithful checks only, the default
//! - **Strict**: schema checks plus the policy rules: unknown fields,
//!   degenerate union matches, and body mode correlation
//!
//! Copyright (c) 2025 Satchel Team
//! Licensed under the Apache-2.0 license

pub mod document;
pub mod error;
pub mod types;
pub mod validation;
pub mod version;
pub mod walk;

use std::path::Path;

use serde_json::Value;
use tracing::debug;

// Re-export commonly used types for convenience
pub use document::{
    to_pretty_string, DocumentConfig, DocumentParser, Salvage, SalvageMethod,
    DEFAULT_MAX_NESTING_DEPTH,
};
pub use error::{Error, Result};
pub use types::{
    // The document tree
    Collection, Info, Item, Request, Response,

    // Union-typed fields
    Description, InfoVersion, Scalar, Url,

    // Leaf records
    Body, BodyOptions, Event, Listen, Parameter, RawBodyOptions, Script, UrlParts,
    Variable, VersionTriple,
};
pub use validation::{
    CollectionValidator, ValidationConfig, ValidationContext, ValidationError,
    ValidationErrors, ValidationMode, ViolationKind, DEFAULT_MAX_ITEM_DEPTH,
};
pub use version::{stamp_schema_url, SchemaVersion, SCHEMA_URL, SCHEMA_URL_V2_1_0};
pub use walk::{Events, Items, Requests};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Settings for a full parse: document layer plus validation
#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    /// Document-layer settings
    pub document: DocumentConfig,
    /// Validation settings
    pub validation: ValidationConfig,
}

impl ParseOptions {
    /// Default options: Basic validation, default depth bounds
    pub fn new() -> Self {
        Self::default()
    }

    /// Options with the strict policy rules enabled
    pub fn strict() -> Self {
        Self {
            validation: ValidationConfig::strict(),
            ..Self::default()
        }
    }

    /// Replace the document-layer settings
    pub fn with_document(mut self, document: DocumentConfig) -> Self {
        self.document = document;
        self
    }

    /// Replace the validation settings
    pub fn with_validation(mut self, validation: ValidationConfig) -> Self {
        self.validation = validation;
        self
    }
}

/// Outcome of a lenient parse
///
/// The collection holds everything that validated; subtrees named in the
/// violations were pruned at their nearest optional attachment point.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseReport {
    /// The recovered collection
    pub collection: Collection,
    /// Violations recorded during the walk
    pub violations: ValidationErrors,
}

impl ParseReport {
    /// True when the document validated without any pruning
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Parse and validate a collection file with default options
pub fn parse(path: impl AsRef<Path>) -> Result<Collection> {
    parse_with(path, &ParseOptions::default())
}

/// Parse and validate a collection file
pub fn parse_with(path: impl AsRef<Path>, options: &ParseOptions) -> Result<Collection> {
    let document =
        DocumentParser::with_config(options.document.clone()).parse_file(path.as_ref())?;
    parse_value(&document, options)
}

/// Parse and validate collection text with default options
pub fn parse_str(text: &str) -> Result<Collection> {
    parse_str_with(text, &ParseOptions::default())
}

/// Parse and validate collection text
pub fn parse_str_with(text: &str, options: &ParseOptions) -> Result<Collection> {
    let document = DocumentParser::with_config(options.document.clone()).parse_str(text)?;
    parse_value(&document, options)
}

/// Parse and validate raw collection bytes with default options
pub fn parse_slice(bytes: &[u8]) -> Result<Collection> {
    parse_slice_with(bytes, &ParseOptions::default())
}

/// Parse and validate raw collection bytes
pub fn parse_slice_with(bytes: &[u8], options: &ParseOptions) -> Result<Collection> {
    let document = DocumentParser::with_config(options.document.clone()).parse_slice(bytes)?;
    parse_value(&document, options)
}

/// Validate a parsed JSON document and build the typed collection
///
/// Any violation fails the parse; the violations ride along in
/// [`Error::Validation`].
pub fn parse_value(document: &Value, options: &ParseOptions) -> Result<Collection> {
    let validator = CollectionValidator::with_config(options.validation.clone());
    let (collection, errors) = validator.build(document);
    match collection {
        Some(collection) if errors.is_empty() => {
            debug!(items = collection.item.len(), "collection parsed");
            Ok(collection)
        }
        _ => Err(Error::validation(errors)),
    }
}

/// Parse a collection file, keeping everything that validates
pub fn parse_lenient(path: impl AsRef<Path>) -> Result<ParseReport> {
    parse_lenient_with(path, &ParseOptions::default())
}

/// Parse a collection file leniently with explicit options
pub fn parse_lenient_with(
    path: impl AsRef<Path>,
    options: &ParseOptions,
) -> Result<ParseReport> {
    let document =
        DocumentParser::with_config(options.document.clone()).parse_file(path.as_ref())?;
    parse_value_lenient(&document, options)
}

/// Validate a parsed JSON document leniently
///
/// Succeeds as long as the fatal parts of the document (the root object,
/// `info` and its required fields, the root `item` array) are intact;
/// everything else that fails validation is pruned and reported.
pub fn parse_value_lenient(document: &Value, options: &ParseOptions) -> Result<ParseReport> {
    let validator = CollectionValidator::with_config(options.validation.clone());
    let (collection, violations) = validator.build(document);
    match collection {
        Some(collection) => {
            debug!(
                items = collection.item.len(),
                pruned = violations.len(),
                "collection parsed leniently"
            );
            Ok(ParseReport {
                collection,
                violations,
            })
        }
        None => Err(Error::validation(violations)),
    }
}

/// Validate a parsed JSON document with default configuration
pub fn validate(document: &Value) -> ValidationErrors {
    validation::validate_collection(document)
}

/// Validate a parsed JSON document with explicit configuration
pub fn validate_with(document: &Value, config: &ValidationConfig) -> ValidationErrors {
    CollectionValidator::with_config(config.clone()).validate(document)
}

/// Serialize a collection to pretty-printed JSON
pub fn serialize(collection: &Collection) -> Result<String> {
    collection.to_json_pretty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_library_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_parse_value_rejects_any_violation() {
        let document = json!({
            "info": {"name": "t", "schema": SCHEMA_URL},
            "item": [{"name": 5}]
        });
        let error = parse_value(&document, &ParseOptions::default()).unwrap_err();
        let violations = error.violations().unwrap();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations.errors[0].path, "$.item[0].name");
    }

    #[test]
    fn test_lenient_parse_prunes_and_reports() {
        let document = json!({
            "info": {"name": "t", "schema": SCHEMA_URL},
            "item": [{"name": 5}, {"name": "ok"}]
        });
        let report = parse_value_lenient(&document, &ParseOptions::default()).unwrap();
        assert!(!report.is_clean());
        assert_eq!(report.collection.item.len(), 1);
        assert_eq!(report.collection.item[0].name, "ok");
    }

    #[test]
    fn test_serialize_is_pretty_printed() {
        let collection = Collection::new("fmt");
        let text = serialize(&collection).unwrap();
        assert!(text.contains("\n"));
        assert!(text.contains("\"name\": \"fmt\""));
    }

    #[test]
    fn test_parse_slice_round_trips_serialize() {
        let original = Collection::new("bytes");
        let text = serialize(&original).unwrap();
        let reparsed = parse_slice(text.as_bytes()).unwrap();
        assert_eq!(reparsed, original);
    }
}
