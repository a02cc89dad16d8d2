//! Typed object model for collection documents
//!
//! This module defines the in-memory form of a parsed collection: a named,
//! versioned tree of folders and requests with optional scripts, variables,
//! and captured responses. Field names match the wire format, and every
//! optional field skips serialization when absent, so serializing a parsed
//! collection reproduces an equivalent document.
//!
//! The model derives `Serialize` only. Instances are built by the
//! validator, which is how the structural invariants (required fields,
//! union shapes, the pinned schema URI) hold for every value of these
//! types that came from JSON.
//!
//! Copyright (c) 2025 Satchel Team
//! Licensed under the Apache-2.0 license

use serde::Serialize;
use serde_json::{Map, Number, Value};
use std::fmt;

use crate::error::{Error, Result};
use crate::version::SCHEMA_URL;

/// A parsed, validated collection document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Collection {
    /// Collection metadata
    pub info: Info,

    /// Root items of the folder/request tree; may be empty
    pub item: Vec<Item>,

    /// Collection-level script hooks
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event: Option<Vec<Event>>,

    /// Collection-level variables
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variable: Option<Vec<Variable>>,
}

impl Collection {
    /// Create an empty collection stamped with the v2.2.0 schema URI
    pub fn new<N: Into<String>>(name: N) -> Self {
        Self {
            info: Info {
                name: name.into(),
                schema: SCHEMA_URL.to_string(),
                description: None,
                version: None,
            },
            item: Vec::new(),
            event: None,
            variable: None,
        }
    }

    /// Serialize to a JSON value
    pub fn to_value(&self) -> Result<Value> {
        serde_json::to_value(self).map_err(Error::serialize)
    }

    /// Serialize to pretty-printed JSON, the form collection files are
    /// written in on disk
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(Error::serialize)
    }
}

/// Collection metadata
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Info {
    /// Human-readable collection name
    pub name: String,

    /// Schema URI; validated against the exact v2.2.0 URI
    pub schema: String,

    /// Free-form description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Description>,

    /// Collection version
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<InfoVersion>,
}

/// Description carried either as a plain string or a structured object;
/// object contents pass through as written
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Description {
    Text(String),
    Object(Map<String, Value>),
}

/// Collection version: a free-form string or a major/minor/patch triple
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum InfoVersion {
    Text(String),
    Triple(VersionTriple),
}

/// Structured form of `info.version`; all three parts are required
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VersionTriple {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl fmt::Display for VersionTriple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// A node in the collection tree
///
/// The schema lets a node carry child items (a folder), a request, both,
/// or neither; only the name is required.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Item {
    /// Node name
    pub name: String,

    /// Child items when the node acts as a folder
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<Vec<Item>>,

    /// The request this node holds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request: Option<Request>,

    /// Script hooks scoped to this node
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event: Option<Vec<Event>>,

    /// Captured example responses
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<Vec<Response>>,
}

impl Item {
    /// True when the node carries child items
    pub fn is_folder(&self) -> bool {
        self.item.is_some()
    }

    /// True when the node carries a request
    pub fn is_request(&self) -> bool {
        self.request.is_some()
    }

    /// Child items, empty for leaf nodes
    pub fn children(&self) -> &[Item] {
        self.item.as_deref().unwrap_or(&[])
    }
}

/// An HTTP request definition
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Request {
    /// HTTP method; free-form string, not restricted to the common verbs
    pub method: String,

    /// Request URL
    pub url: Url,

    /// Request headers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<Vec<Parameter>>,

    /// Request body
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<Body>,
}

/// Request URL: a plain string or a decomposed object
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Url {
    Raw(String),
    Parts(UrlParts),
}

impl Url {
    /// The raw URL string when one is present in either branch
    pub fn raw(&self) -> Option<&str> {
        match self {
            Self::Raw(raw) => Some(raw),
            Self::Parts(parts) => parts.raw.as_deref(),
        }
    }
}

impl fmt::Display for Url {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(raw) = self.raw() {
            return f.write_str(raw);
        }
        // reassemble from parts when no raw string was given
        if let Self::Parts(parts) = self {
            if let Some(host) = &parts.host {
                f.write_str(&host.join("."))?;
            }
            if let Some(path) = &parts.path {
                for segment in path {
                    write!(f, "/{}", segment)?;
                }
            }
        }
        Ok(())
    }
}

/// Decomposed URL; every field is optional in the schema
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct UrlParts {
    /// Full URL string
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,

    /// Host split on dots
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<Vec<String>>,

    /// Path split on slashes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<String>>,
}

/// Request body; the mode names which payload field applies
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct Body {
    /// Payload mode, e.g. `"raw"`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,

    /// Raw payload text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,

    /// Mode-specific options
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<BodyOptions>,
}

/// Options attached to a body
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct BodyOptions {
    /// Options for the raw mode
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<RawBodyOptions>,
}

/// Options for raw-mode bodies
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct RawBodyOptions {
    /// Payload language hint, e.g. `"json"`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// A script attached to a lifecycle hook
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Event {
    /// Which lifecycle hook the script runs on
    pub listen: Listen,

    /// The script itself
    pub script: Script,
}

/// Lifecycle hooks a script may attach to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Listen {
    /// Runs after the response arrives
    Test,
    /// Runs before the request is sent
    Prerequest,
}

impl Listen {
    /// Wire value for this hook
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Test => "test",
            Self::Prerequest => "prerequest",
        }
    }
}

impl fmt::Display for Listen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Script source attached to an event
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct Script {
    /// Script identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Source lines in execution order
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exec: Option<Vec<String>>,

    /// Script language hint, e.g. `"text/javascript"`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub r#type: Option<String>,
}

/// Key/value entry used for request headers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Parameter {
    /// Entry key
    pub key: String,

    /// Entry value
    pub value: Scalar,

    /// Value type hint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub r#type: Option<String>,
}

/// A collection-level variable
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Variable {
    /// Variable identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Variable key
    pub key: String,

    /// Variable value
    pub value: Scalar,

    /// Value type hint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub r#type: Option<String>,

    /// Display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Free-form description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Scalar value restricted to the JSON types parameter and variable
/// values may hold
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    String(String),
    Number(Number),
    Bool(bool),
}

impl Scalar {
    /// String form when the scalar is a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(text) => Some(text),
            _ => None,
        }
    }

    /// Boolean form when the scalar is a boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(flag) => Some(*flag),
            _ => None,
        }
    }

    /// Numeric form when the scalar is a number
    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Self::Number(number) => Some(number),
            _ => None,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(text) => f.write_str(text),
            Self::Number(number) => write!(f, "{}", number),
            Self::Bool(flag) => write!(f, "{}", flag),
        }
    }
}

impl From<&str> for Scalar {
    fn from(text: &str) -> Self {
        Self::String(text.to_string())
    }
}

impl From<String> for Scalar {
    fn from(text: String) -> Self {
        Self::String(text)
    }
}

impl From<bool> for Scalar {
    fn from(flag: bool) -> Self {
        Self::Bool(flag)
    }
}

impl From<i64> for Scalar {
    fn from(number: i64) -> Self {
        Self::Number(Number::from(number))
    }
}

/// A captured response attached to an item
///
/// The schema deliberately leaves response structure open, so contents
/// pass through untouched; only object-ness is checked during validation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Response(pub Map<String, Value>);
