//! Schema version pinning, detection, and stamping
//!
//! A v2.2.0 document must carry the exact schema URI in `info.schema`;
//! comparison is string equality, never a semver range. The helpers here
//! also recognize URIs of *other* collection-schema versions so
//! diagnostics can say "found v2.1.0" instead of echoing a long URL, and
//! re-stamp documents for tooling still consuming v2.1.0.
//!
//! Copyright (c) 2025 Satchel Team
//! Licensed under the Apache-2.0 license

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde_json::{Map, Value};

use crate::types::Collection;

/// Schema URI every v2.2.0 collection must carry in `info.schema`
pub const SCHEMA_URL: &str =
    "https://schema.getpostman.com/json/collection/v2.2.0/collection.json";

/// Schema URI of the previous minor version, used when stamping documents
/// for tooling that has not moved to v2.2.0 yet
pub const SCHEMA_URL_V2_1_0: &str =
    "https://schema.getpostman.com/json/collection/v2.1.0/collection.json";

static SCHEMA_URL_PATTERN: OnceLock<Regex> = OnceLock::new();

fn schema_url_pattern() -> &'static Regex {
    SCHEMA_URL_PATTERN.get_or_init(|| {
        Regex::new(
            r"^https://schema\.getpostman\.com/json/collection/v(\d+)\.(\d+)\.(\d+)/collection\.json$",
        )
        .expect("schema URL pattern is valid")
    })
}

/// True when the URI is exactly the pinned v2.2.0 schema URI
pub fn is_current_schema_url(url: &str) -> bool {
    url == SCHEMA_URL
}

/// Extract the `(major, minor, patch)` triple from a collection-schema URI
///
/// Returns `None` for anything that is not a well-formed collection-schema
/// URI, including URIs that merely contain one.
pub fn schema_url_version(url: &str) -> Option<(u32, u32, u32)> {
    let captures = schema_url_pattern().captures(url)?;
    let major = captures[1].parse().ok()?;
    let minor = captures[2].parse().ok()?;
    let patch = captures[3].parse().ok()?;
    Some((major, minor, patch))
}

/// Collection schema versions this library can stamp
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaVersion {
    V2_1_0,
    V2_2_0,
}

impl SchemaVersion {
    /// The `info.schema` URI for this version
    pub fn as_url(&self) -> &'static str {
        match self {
            Self::V2_1_0 => SCHEMA_URL_V2_1_0,
            Self::V2_2_0 => SCHEMA_URL,
        }
    }

    /// The `(major, minor, patch)` triple for this version
    pub fn triple(&self) -> (u32, u32, u32) {
        match self {
            Self::V2_1_0 => (2, 1, 0),
            Self::V2_2_0 => (2, 2, 0),
        }
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (major, minor, patch) = self.triple();
        write!(f, "{}.{}.{}", major, minor, patch)
    }
}

/// Error for unrecognized schema-version strings
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unrecognized schema version '{0}'; known versions: 2.1.0, 2.2.0")]
pub struct UnknownVersion(pub String);

impl FromStr for SchemaVersion {
    type Err = UnknownVersion;

    /// Accepts `2.2.0`, `v2.2.0`, or the full schema URI
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let candidate = s.trim();
        if candidate == SCHEMA_URL {
            return Ok(Self::V2_2_0);
        }
        if candidate == SCHEMA_URL_V2_1_0 {
            return Ok(Self::V2_1_0);
        }
        match candidate.trim_start_matches('v') {
            "2.1.0" => Ok(Self::V2_1_0),
            "2.2.0" => Ok(Self::V2_2_0),
            _ => Err(UnknownVersion(s.to_string())),
        }
    }
}

/// Overwrite `info.schema` in a raw document, creating `info` when absent
///
/// Does nothing when the root or an existing `info` is not an object;
/// validation reports those shapes separately.
pub fn stamp_schema_url(document: &mut Value, version: SchemaVersion) {
    if let Value::Object(root) = document {
        let info = root
            .entry("info")
            .or_insert_with(|| Value::Object(Map::new()));
        if let Value::Object(info) = info {
            info.insert(
                "schema".to_string(),
                Value::String(version.as_url().to_string()),
            );
        }
    }
}

impl Collection {
    /// Re-stamp the schema URI carried in `info.schema`
    pub fn set_schema_version(&mut self, version: SchemaVersion) {
        self.info.schema = version.as_url().to_string();
    }

    /// The schema version the collection claims, when recognized
    pub fn schema_version(&self) -> Option<SchemaVersion> {
        SchemaVersion::from_str(&self.info.schema).ok()
    }
}
