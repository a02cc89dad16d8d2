//! Structural validation for collection documents
//!
//! Validation walks a parsed JSON document in a single top-down,
//! depth-first, left-to-right pass, accumulating every violation with its
//! `$`-rooted path instead of stopping at the first one. The same walk
//! assembles the typed model, so a document that validates cleanly always
//! yields a [`crate::types::Collection`].
//!
//! Copyright (c) 2025 Satchel Team
//! Licensed under the Apache-2.0 license

pub mod base;
pub mod collection;
pub mod error;

pub use base::{ValidationContext, ValidationMode};
pub use collection::CollectionValidator;
pub use error::{ValidationError, ValidationErrors, ViolationKind};

use serde_json::Value;

/// Default bound on item-tree nesting
pub const DEFAULT_MAX_ITEM_DEPTH: usize = 64;

/// Configuration for collection validation
#[derive(Debug, Clone)]
pub struct ValidationConfig {
    /// Validation mode
    pub mode: ValidationMode,
    /// Stop walking at the first violation
    pub fail_fast: bool,
    /// Cap on collected violations, 0 meaning unlimited
    pub max_errors: usize,
    /// Item-tree depth at which descent stops with a dedicated
    /// depth violation
    pub max_item_depth: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            mode: ValidationMode::Basic,
            fail_fast: false,
            max_errors: 0,
            max_item_depth: DEFAULT_MAX_ITEM_DEPTH,
        }
    }
}

impl ValidationConfig {
    /// Schema-faithful configuration
    pub fn basic() -> Self {
        Self::default()
    }

    /// Configuration with the strict policy rules enabled
    pub fn strict() -> Self {
        Self {
            mode: ValidationMode::Strict,
            ..Self::default()
        }
    }

    /// Set fail-fast behavior
    pub fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    /// Set the violation cap (0 = unlimited)
    pub fn with_max_errors(mut self, max_errors: usize) -> Self {
        self.max_errors = max_errors;
        self
    }

    /// Set the item-tree depth bound
    pub fn with_max_item_depth(mut self, max_item_depth: usize) -> Self {
        self.max_item_depth = max_item_depth;
        self
    }
}

/// Validate a JSON document against the collection schema with defaults
pub fn validate_collection(document: &Value) -> ValidationErrors {
    CollectionValidator::new().validate(document)
}
