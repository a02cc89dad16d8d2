//! Validation context and primitive field checks
//!
//! Copyright (c) 2025 Satchel Team
//! Licensed under the Apache-2.0 license

use serde_json::{Map, Value};

use crate::types::Scalar;
use crate::validation::error::{ValidationError, ValidationErrors, ViolationKind};

/// Validation mode selecting how loose the structural checks are
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationMode {
    /// Schema-faithful checks only
    Basic,
    /// Schema checks plus the policy rules: unknown fields, degenerate
    /// union matches, and body mode correlation
    Strict,
}

/// Walk state passed down the document tree
#[derive(Debug, Clone)]
pub struct ValidationContext {
    /// Current JSON path, `$`-rooted
    pub path: String,
    /// Validation mode
    pub mode: ValidationMode,
    /// Item-tree depth of the current node
    pub depth: usize,
}

impl ValidationContext {
    /// Create a root context
    pub fn new(mode: ValidationMode) -> Self {
        Self {
            path: "$".to_string(),
            mode,
            depth: 0,
        }
    }

    /// Create a child context with updated path
    pub fn child<P: AsRef<str>>(&self, segment: P) -> Self {
        let path = if self.path == "$" {
            format!("$.{}", segment.as_ref())
        } else {
            format!("{}.{}", self.path, segment.as_ref())
        };

        Self {
            path,
            mode: self.mode,
            depth: self.depth,
        }
    }

    /// Create a child context for an array index
    pub fn child_index(&self, index: usize) -> Self {
        Self {
            path: format!("{}[{}]", self.path, index),
            mode: self.mode,
            depth: self.depth,
        }
    }

    /// Create a context one item-tree level deeper
    pub fn descend(&self) -> Self {
        Self {
            path: self.path.clone(),
            mode: self.mode,
            depth: self.depth + 1,
        }
    }
}

/// JSON type name used in violation messages
pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Check that a value is an object, recording a type violation otherwise
pub(crate) fn expect_object<'a>(
    value: &'a Value,
    ctx: &ValidationContext,
    errors: &mut ValidationErrors,
) -> Option<&'a Map<String, Value>> {
    match value.as_object() {
        Some(map) => Some(map),
        None => {
            errors.add(ValidationError::new(
                &ctx.path,
                ViolationKind::TypeMismatch,
                "object",
                type_name(value),
            ));
            None
        }
    }
}

/// Check that a value is a string, recording a type violation otherwise
pub(crate) fn expect_string<'a>(
    value: &'a Value,
    ctx: &ValidationContext,
    errors: &mut ValidationErrors,
) -> Option<&'a str> {
    match value.as_str() {
        Some(text) => Some(text),
        None => {
            errors.add(ValidationError::new(
                &ctx.path,
                ViolationKind::TypeMismatch,
                "string",
                type_name(value),
            ));
            None
        }
    }
}

/// Check that a value is an array, recording a type violation otherwise
pub(crate) fn expect_array<'a>(
    value: &'a Value,
    ctx: &ValidationContext,
    errors: &mut ValidationErrors,
) -> Option<&'a Vec<Value>> {
    match value.as_array() {
        Some(array) => Some(array),
        None => {
            errors.add(ValidationError::new(
                &ctx.path,
                ViolationKind::TypeMismatch,
                "array",
                type_name(value),
            ));
            None
        }
    }
}

/// Check that every element of an array is a string
///
/// Records one violation per offending element; returns `None` when any
/// element fails so the enclosing optional field is pruned as a whole.
pub(crate) fn expect_string_array(
    value: &Value,
    ctx: &ValidationContext,
    errors: &mut ValidationErrors,
) -> Option<Vec<String>> {
    let array = expect_array(value, ctx, errors)?;
    let mut out = Vec::with_capacity(array.len());
    let mut clean = true;
    for (index, entry) in array.iter().enumerate() {
        match entry.as_str() {
            Some(text) => out.push(text.to_string()),
            None => {
                errors.add(ValidationError::new(
                    ctx.child_index(index).path,
                    ViolationKind::TypeMismatch,
                    "string",
                    type_name(entry),
                ));
                clean = false;
            }
        }
    }
    clean.then_some(out)
}

/// Check that a value is one of the scalar types parameter and variable
/// values may hold
pub(crate) fn expect_scalar(
    value: &Value,
    ctx: &ValidationContext,
    errors: &mut ValidationErrors,
) -> Option<Scalar> {
    match value {
        Value::String(text) => Some(Scalar::String(text.clone())),
        Value::Number(number) => Some(Scalar::Number(number.clone())),
        Value::Bool(flag) => Some(Scalar::Bool(*flag)),
        other => {
            errors.add(ValidationError::new(
                &ctx.path,
                ViolationKind::TypeMismatch,
                "string, number, or boolean",
                type_name(other),
            ));
            None
        }
    }
}

/// Look up a required key, recording a missing-field violation at the
/// field's own path when absent
pub(crate) fn require<'a>(
    map: &'a Map<String, Value>,
    key: &str,
    ctx: &ValidationContext,
    errors: &mut ValidationErrors,
) -> Option<&'a Value> {
    match map.get(key) {
        Some(value) => Some(value),
        None => {
            errors.add(ValidationError::new(
                ctx.child(key).path,
                ViolationKind::MissingField,
                format!("required field '{}'", key),
                "absent",
            ));
            None
        }
    }
}

/// Check a string against a closed enumeration
pub(crate) fn check_enum<'a>(
    value: &'a Value,
    allowed: &[&str],
    ctx: &ValidationContext,
    errors: &mut ValidationErrors,
) -> Option<&'a str> {
    let text = expect_string(value, ctx, errors)?;
    if allowed.contains(&text) {
        Some(text)
    } else {
        errors.add(ValidationError::new(
            &ctx.path,
            ViolationKind::EnumMismatch,
            format!("one of: {}", allowed.join(", ")),
            format!("\"{}\"", text),
        ));
        None
    }
}

/// Strict mode rejects fields outside the entity's schema
pub(crate) fn check_unknown_fields(
    map: &Map<String, Value>,
    known: &[&str],
    ctx: &ValidationContext,
    errors: &mut ValidationErrors,
) {
    if ctx.mode != ValidationMode::Strict {
        return;
    }
    for key in map.keys() {
        if !known.contains(&key.as_str()) {
            errors.add(ValidationError::new(
                ctx.child(key).path,
                ViolationKind::UnknownField,
                format!("one of: {}", known.join(", ")),
                format!("unknown field '{}'", key),
            ));
        }
    }
}
