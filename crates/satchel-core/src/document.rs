//! Document text layer: decoding, preprocessing, depth guarding, syntax
//! parsing, and salvage of damaged collection documents
//!
//! Everything here runs before structural validation. The nesting-depth
//! guard scans the raw text with a string-aware counter, so a document
//! nested a thousand levels deep is rejected with a dedicated error
//! before any recursive structure exists; the configured cap stays below
//! serde_json's own recursion limit.
//!
//! Salvage recovers collections from the messy documents machine pipelines
//! produce: Markdown-fenced output, trailing garbage after the closing
//! brace, or text truncated mid-document.
//!
//! Copyright (c) 2025 Satchel Team
//! Licensed under the Apache-2.0 license

use std::fmt;
use std::fs;
use std::path::Path;

use serde_json::{Deserializer, Value};
use tracing::debug;

use crate::error::{Error, Result};

/// Default raw-text nesting cap
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 120;

/// Configuration for the document layer
#[derive(Debug, Clone)]
pub struct DocumentConfig {
    /// Maximum bracket/brace nesting accepted in the raw text
    pub max_nesting_depth: usize,
    /// Strip a surrounding Markdown code fence before parsing
    pub allow_code_fences: bool,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
            allow_code_fences: false,
        }
    }
}

impl DocumentConfig {
    /// Set the raw-text nesting cap
    pub fn with_max_nesting_depth(mut self, max_nesting_depth: usize) -> Self {
        self.max_nesting_depth = max_nesting_depth;
        self
    }

    /// Allow Markdown code fences around the document
    pub fn with_code_fences(mut self, allow_code_fences: bool) -> Self {
        self.allow_code_fences = allow_code_fences;
        self
    }
}

/// Parser for raw collection documents
#[derive(Debug, Clone, Default)]
pub struct DocumentParser {
    config: DocumentConfig,
}

impl DocumentParser {
    /// Create a parser with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser with explicit configuration
    pub fn with_config(config: DocumentConfig) -> Self {
        Self { config }
    }

    /// Parse raw bytes into a JSON value
    pub fn parse_slice(&self, bytes: &[u8]) -> Result<Value> {
        let text = std::str::from_utf8(bytes).map_err(Error::encoding)?;
        self.parse_str(text)
    }

    /// Parse document text into a JSON value
    pub fn parse_str(&self, text: &str) -> Result<Value> {
        let text = if self.config.allow_code_fences {
            strip_code_fence(text)
        } else {
            text.trim()
        };
        self.guard_depth(text)?;
        let value = serde_json::from_str(text).map_err(Error::syntax)?;
        debug!(bytes = text.len(), "document parsed");
        Ok(value)
    }

    /// Read and parse a document from disk
    pub fn parse_file(&self, path: &Path) -> Result<Value> {
        let bytes = fs::read(path).map_err(|source| Error::io(path, source))?;
        self.parse_slice(&bytes)
    }

    /// Attempt to recover a JSON object from damaged document text
    ///
    /// Stages, in order: strip any code fence, trim to the outermost
    /// `{...}` boundaries, parse the first complete value ignoring
    /// trailing content, and finally close up a document truncated
    /// mid-stream. The nesting guard applies to the candidate text.
    pub fn salvage_str(&self, text: &str) -> Result<Salvage> {
        let text = strip_code_fence(text);
        let start = text
            .find('{')
            .ok_or_else(|| Error::salvage("no JSON object found in the document"))?;
        let tail = &text[start..];
        self.guard_depth(tail)?;

        // a complete object, trimmed to its outermost braces, possibly
        // with content after it
        let bounded = match tail.rfind('}') {
            Some(end) => &tail[..=end],
            None => tail,
        };
        let mut stream = Deserializer::from_str(bounded).into_iter::<Value>();
        if let Some(Ok(value)) = stream.next() {
            let rest = bounded[stream.byte_offset()..].trim();
            let method = if rest.is_empty() {
                SalvageMethod::ExactObject
            } else {
                SalvageMethod::TrailingContent
            };
            debug!(?method, "document salvaged");
            return Ok(Salvage { value, method });
        }

        // close up the full tail so truncated trailing entries survive
        let repaired = close_truncated(tail)
            .ok_or_else(|| Error::salvage("document could not be repaired"))?;
        match serde_json::from_str(&repaired) {
            Ok(value) => {
                debug!(method = ?SalvageMethod::AutoClosed, "document salvaged");
                Ok(Salvage {
                    value,
                    method: SalvageMethod::AutoClosed,
                })
            }
            Err(_) => Err(Error::salvage("document could not be repaired")),
        }
    }

    /// Read a document from disk and attempt salvage
    pub fn salvage_file(&self, path: &Path) -> Result<Salvage> {
        let bytes = fs::read(path).map_err(|source| Error::io(path, source))?;
        let text = std::str::from_utf8(&bytes).map_err(Error::encoding)?;
        self.salvage_str(text)
    }

    fn guard_depth(&self, text: &str) -> Result<()> {
        let depth = nesting_depth(text);
        if depth > self.config.max_nesting_depth {
            return Err(Error::depth_exceeded(depth, self.config.max_nesting_depth));
        }
        Ok(())
    }
}

/// Outcome of a salvage attempt
#[derive(Debug, Clone, PartialEq)]
pub struct Salvage {
    /// The recovered document
    pub value: Value,
    /// How the document was recovered
    pub method: SalvageMethod,
}

/// How a salvaged document was recovered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SalvageMethod {
    /// The object parsed cleanly once surrounding text was trimmed
    ExactObject,
    /// A complete object parsed; trailing content was discarded
    TrailingContent,
    /// The text was truncated mid-document and closed up
    AutoClosed,
}

impl fmt::Display for SalvageMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::ExactObject => "object extracted from surrounding text",
            Self::TrailingContent => "complete object parsed, trailing content discarded",
            Self::AutoClosed => "truncated document closed up",
        };
        f.write_str(text)
    }
}

/// Pretty-print a JSON value the way collection files are written on disk
pub fn to_pretty_string(value: &Value) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(Error::serialize)
}

/// Maximum bracket/brace nesting of the raw text, ignoring characters
/// inside strings
fn nesting_depth(text: &str) -> usize {
    let mut depth: usize = 0;
    let mut max_depth: usize = 0;
    let mut in_string = false;
    let mut escaped = false;
    for ch in text.chars() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' | '[' => {
                depth += 1;
                max_depth = max_depth.max(depth);
            }
            '}' | ']' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    max_depth
}

/// Strip a surrounding Markdown code fence (```json ... ```)
///
/// A missing closing fence is tolerated; truncated documents often lose it.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // the info string ("json", if any) runs to the first line break
    let Some(line_break) = rest.find('\n') else {
        return trimmed;
    };
    let body = rest[line_break + 1..].trim_end();
    body.strip_suffix("```").unwrap_or(body).trim()
}

/// Close up a document truncated mid-stream
///
/// Tracks string state and open containers; closes an unterminated
/// string, drops a dangling comma, and appends the missing closers.
/// Returns `None` when the text is malformed beyond bracket counting.
fn close_truncated(candidate: &str) -> Option<String> {
    let mut closers: Vec<char> = Vec::new();
    let mut in_string = false;
    let mut escaped = false;
    for ch in candidate.chars() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => closers.push('}'),
            '[' => closers.push(']'),
            '}' | ']' => {
                if closers.pop() != Some(ch) {
                    return None;
                }
            }
            _ => {}
        }
    }
    if closers.is_empty() && !in_string {
        return None;
    }

    let mut repaired = candidate.trim_end().to_string();
    if in_string {
        if escaped {
            repaired.pop();
        }
        repaired.push('"');
    } else {
        while repaired.ends_with(',') {
            repaired.pop();
            repaired.truncate(repaired.trim_end().len());
        }
    }
    while let Some(closer) = closers.pop() {
        repaired.push(closer);
    }
    Some(repaired)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn test_nesting_depth_ignores_strings() {
        assert_eq!(nesting_depth(r#"{"a": 1}"#), 1);
        assert_eq!(nesting_depth(r#"{"a": [1, [2]]}"#), 3);
        assert_eq!(nesting_depth(r#"{"a": "}}}}[[["}"#), 1);
        assert_eq!(nesting_depth(r#"{"a": "quote \" then }"}"#), 1);
        assert_eq!(nesting_depth("plain text"), 0);
    }

    #[test]
    fn test_depth_guard_rejects_deep_documents() {
        let deep = format!("{}1{}", "[".repeat(200), "]".repeat(200));
        let error = DocumentParser::new().parse_str(&deep).unwrap_err();
        match error {
            Error::DepthExceeded { depth, limit } => {
                assert_eq!(depth, 200);
                assert_eq!(limit, DEFAULT_MAX_NESTING_DEPTH);
            }
            other => panic!("expected depth error, got {:?}", other),
        }
    }

    #[test]
    fn test_depth_guard_is_configurable() {
        let parser =
            DocumentParser::with_config(DocumentConfig::default().with_max_nesting_depth(2));
        assert!(parser.parse_str(r#"{"a": {"b": 1}}"#).is_ok());
        assert!(matches!(
            parser.parse_str(r#"{"a": {"b": {"c": 1}}}"#),
            Err(Error::DepthExceeded { depth: 3, limit: 2 })
        ));
    }

    #[test]
    fn test_parse_reports_syntax_position() {
        let error = DocumentParser::new().parse_str("{\"a\": }").unwrap_err();
        assert!(matches!(error, Error::Syntax { line: 1, .. }));
    }

    #[test]
    fn test_code_fence_stripping() {
        assert_eq!(strip_code_fence("```json\n{\"a\": 1}\n```"), "{\"a\": 1}");
        assert_eq!(strip_code_fence("```\n{\"a\": 1}\n```"), "{\"a\": 1}");
        // lost closing fence
        assert_eq!(strip_code_fence("```json\n{\"a\": 1}"), "{\"a\": 1}");
        assert_eq!(strip_code_fence("  {\"a\": 1}  "), "{\"a\": 1}");

        let parser =
            DocumentParser::with_config(DocumentConfig::default().with_code_fences(true));
        assert_eq!(
            parser.parse_str("```json\n{\"a\": 1}\n```").unwrap(),
            json!({"a": 1})
        );
        // fences stay syntax errors unless opted in
        assert!(DocumentParser::new()
            .parse_str("```json\n{\"a\": 1}\n```")
            .is_err());
    }

    #[test]
    fn test_salvage_clean_object_with_surrounding_text() {
        let salvage = DocumentParser::new()
            .salvage_str("Here is the collection: {\"a\": 1} hope it helps!")
            .unwrap();
        assert_eq!(salvage.value, json!({"a": 1}));
        assert_eq!(salvage.method, SalvageMethod::ExactObject);
    }

    #[test]
    fn test_salvage_trailing_content() {
        let salvage = DocumentParser::new()
            .salvage_str("{\"a\": 1}{\"leftover\": true}")
            .unwrap();
        assert_eq!(salvage.value, json!({"a": 1}));
        assert_eq!(salvage.method, SalvageMethod::TrailingContent);
    }

    #[test]
    fn test_salvage_truncated_documents() {
        let cases = [
            ("{\"a\": [1, 2", json!({"a": [1, 2]})),
            ("{\"a\": {\"b\": 1}", json!({"a": {"b": 1}})),
            ("{\"a\": \"cut of", json!({"a": "cut of"})),
            ("{\"a\": 1,", json!({"a": 1})),
            ("{\"item\": [{\"name\": \"x\"},", json!({"item": [{"name": "x"}]})),
        ];
        for (input, expected) in cases {
            let salvage = DocumentParser::new().salvage_str(input).unwrap();
            assert_eq!(salvage.value, expected, "input: {}", input);
            assert_eq!(salvage.method, SalvageMethod::AutoClosed, "input: {}", input);
        }
    }

    #[test]
    fn test_salvage_fenced_truncated_document() {
        let salvage = DocumentParser::new()
            .salvage_str("```json\n{\"info\": {\"name\": \"cut")
            .unwrap();
        assert_eq!(salvage.value, json!({"info": {"name": "cut"}}));
        assert_eq!(salvage.method, SalvageMethod::AutoClosed);
    }

    #[test]
    fn test_salvage_hopeless_input() {
        let parser = DocumentParser::new();
        assert!(matches!(
            parser.salvage_str("no braces here at all"),
            Err(Error::Salvage { .. })
        ));
        assert!(matches!(
            parser.salvage_str("{\"a\": }"),
            Err(Error::Salvage { .. })
        ));
        // mismatched closers are beyond bracket counting
        assert!(matches!(
            parser.salvage_str("{\"a\": [1}"),
            Err(Error::Salvage { .. })
        ));
    }

    #[test]
    fn test_parse_file_round() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("minimal.json");
        fs::write(&path, r#"{"a": [true, null]}"#).unwrap();

        let value = DocumentParser::new().parse_file(&path).unwrap();
        assert_eq!(value, json!({"a": [true, null]}));

        let missing = dir.path().join("absent.json");
        assert!(matches!(
            DocumentParser::new().parse_file(&missing),
            Err(Error::Io { .. })
        ));
    }

    #[test]
    fn test_parse_slice_rejects_invalid_utf8() {
        let error = DocumentParser::new().parse_slice(&[0x7b, 0xff, 0x7d]).unwrap_err();
        assert!(matches!(error, Error::Encoding { .. }));
    }
}
