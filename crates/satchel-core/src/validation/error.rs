//! Validation error types for collection documents
//!
//! Copyright (c) 2025 Satchel Team
//! Licensed under the Apache-2.0 license

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Category of a structural violation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    /// A required field is absent
    MissingField,
    /// A field holds a JSON type outside the allowed set
    TypeMismatch,
    /// A string field holds a value outside its closed enumeration
    EnumMismatch,
    /// A string field does not match its required pattern
    PatternMismatch,
    /// A union-typed field matches none of its branches
    UnionMismatch,
    /// A union-typed field matches a branch only trivially
    AmbiguousUnion,
    /// A field required by a sibling's value is absent
    ConditionalField,
    /// A field outside the entity's schema (strict mode only)
    UnknownField,
    /// The item tree nests deeper than the configured bound
    DepthExceeded,
}

impl ViolationKind {
    /// Stable string form, matching the serialized representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::TypeMismatch => "type_mismatch",
            Self::EnumMismatch => "enum_mismatch",
            Self::PatternMismatch => "pattern_mismatch",
            Self::UnionMismatch => "union_mismatch",
            Self::AmbiguousUnion => "ambiguous_union",
            Self::ConditionalField => "conditional_field",
            Self::UnknownField => "unknown_field",
            Self::DepthExceeded => "depth_exceeded",
        }
    }
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single structural violation with path context
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub struct ValidationError {
    /// JSON path where the violation occurred, `$`-rooted
    pub path: String,
    /// Category of the violation
    pub kind: ViolationKind,
    /// What the schema expects at this path
    pub expected: String,
    /// What the document actually holds
    pub actual: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Validation error at '{}': expected {}, found {} ({})",
            self.path, self.expected, self.actual, self.kind
        )
    }
}

impl ValidationError {
    /// Create a new validation error
    pub fn new<P, E, A>(path: P, kind: ViolationKind, expected: E, actual: A) -> Self
    where
        P: Into<String>,
        E: Into<String>,
        A: Into<String>,
    {
        Self {
            path: path.into(),
            kind,
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}

/// Ordered collection of violations gathered during a document walk
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub struct ValidationErrors {
    /// Violations in document order
    pub errors: Vec<ValidationError>,
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} validation error(s):", self.errors.len())?;
        for (i, error) in self.errors.iter().enumerate() {
            write!(f, "\n{}. {}", i + 1, error)?;
        }
        Ok(())
    }
}

impl ValidationErrors {
    /// Create an empty collection
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Add a violation to the collection
    pub fn add(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Check if there are any violations
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Get the number of violations
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Iterate the violations in document order
    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.errors.iter()
    }

    /// Convert to result: Ok when empty, Err carrying the violations otherwise
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl Default for ValidationErrors {
    fn default() -> Self {
        Self::new()
    }
}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        let mut errors = Self::new();
        errors.add(error);
        errors
    }
}

impl From<Vec<ValidationError>> for ValidationErrors {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self { errors }
    }
}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}
