//! Unit tests for the document layer
//!
//! Exercises file loading, syntax error positions, the raw-text nesting
//! guard, and salvage of damaged documents feeding into a lenient parse.

use std::fs;

use satchel_core::{
    parse, parse_lenient, parse_value_lenient, DocumentConfig, DocumentParser, Error,
    ParseOptions, SalvageMethod, SCHEMA_URL,
};
use tempfile::tempdir;

fn minimal_text() -> String {
    format!(
        r#"{{"info": {{"name": "disk", "schema": "{}"}}, "item": []}}"#,
        SCHEMA_URL
    )
}

#[cfg(test)]
mod file_loading {
    use super::*;

    #[test]
    fn test_parse_reads_a_collection_from_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("api.postman_collection.json");
        fs::write(&path, minimal_text()).unwrap();

        let collection = parse(&path).unwrap();
        assert_eq!(collection.info.name, "disk");
    }

    #[test]
    fn test_missing_file_reports_the_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.json");
        let error = parse(&path).unwrap_err();
        match &error {
            Error::Io { path: reported, .. } => assert_eq!(reported, &path),
            other => panic!("expected io error, got {:?}", other),
        }
        assert!(error.to_string().contains("absent.json"));
    }

    #[test]
    fn test_invalid_utf8_is_an_encoding_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("latin1.json");
        fs::write(&path, [0x7b, 0x22, 0xe9, 0x22, 0x7d]).unwrap();

        let error = parse(&path).unwrap_err();
        assert!(matches!(error, Error::Encoding { .. }));
    }

    #[test]
    fn test_syntax_errors_carry_line_and_column() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{\n  \"info\": ,\n}").unwrap();

        let error = parse(&path).unwrap_err();
        match error {
            Error::Syntax { line, column, .. } => {
                assert_eq!(line, 2);
                assert!(column > 0);
            }
            other => panic!("expected syntax error, got {:?}", other),
        }
    }
}

#[cfg(test)]
mod nesting_guard {
    use super::*;

    // malicious depth: a thousand nested folders in the raw text
    fn hostile_document(levels: usize) -> String {
        let mut node = r#"{"name": "leaf"}"#.to_string();
        for _ in 0..levels {
            node = format!(r#"{{"name": "f", "item": [{}]}}"#, node);
        }
        format!(
            r#"{{"info": {{"name": "deep", "schema": "{}"}}, "item": [{}]}}"#,
            SCHEMA_URL, node
        )
    }

    #[test]
    fn test_thousand_level_document_is_rejected_before_parsing() {
        let text = hostile_document(1000);
        let error = DocumentParser::new().parse_str(&text).unwrap_err();
        match error {
            Error::DepthExceeded { depth, limit } => {
                assert!(depth > 1000);
                assert_eq!(limit, 120);
            }
            other => panic!("expected depth error, got {:?}", other),
        }
    }

    #[test]
    fn test_guard_counts_structure_not_string_contents() {
        let text = format!(
            r#"{{"info": {{"name": "{}", "schema": "{}"}}, "item": []}}"#,
            "[".repeat(500),
            SCHEMA_URL
        );
        assert!(DocumentParser::new().parse_str(&text).is_ok());
    }

    #[test]
    fn test_raised_cap_admits_deeper_documents() {
        // 59 folder levels put the raw text just past the default cap
        // while staying inside serde_json's own recursion limit
        let text = hostile_document(59);
        assert!(DocumentParser::new().parse_str(&text).is_err());

        let parser = DocumentParser::with_config(
            DocumentConfig::default().with_max_nesting_depth(125),
        );
        assert!(parser.parse_str(&text).is_ok());
    }
}

#[cfg(test)]
mod salvage {
    use super::*;

    #[test]
    fn test_fenced_output_parses_when_opted_in() {
        let text = format!("```json\n{}\n```", minimal_text());
        let parser =
            DocumentParser::with_config(DocumentConfig::default().with_code_fences(true));
        let value = parser.parse_str(&text).unwrap();
        assert_eq!(value["info"]["name"], "disk");
    }

    #[test]
    fn test_truncated_collection_salvages_into_a_lenient_parse() {
        // cut off mid-request: the closers and the dangling entry are lost
        let text = format!(
            r#"{{"info": {{"name": "cut", "schema": "{}"}}, "item": [{{"name": "a"}}, {{"name": "b", "request": {{"method": "GET""#,
            SCHEMA_URL
        );
        let salvage = DocumentParser::new().salvage_str(&text).unwrap();
        assert_eq!(salvage.method, SalvageMethod::AutoClosed);

        let report = parse_value_lenient(&salvage.value, &ParseOptions::default()).unwrap();
        assert_eq!(report.collection.info.name, "cut");
        assert_eq!(report.collection.item.len(), 2);
        // the truncated request lost its url and was pruned
        assert!(report.collection.item[1].request.is_none());
        assert_eq!(
            report.violations.errors[0].path,
            "$.item[1].request.url"
        );
    }

    #[test]
    fn test_salvage_of_chatty_output() {
        let text = format!(
            "Sure! Here is the collection you asked for:\n\n{}\n\nLet me know if it works.",
            minimal_text()
        );
        let salvage = DocumentParser::new().salvage_str(&text).unwrap();
        assert_eq!(salvage.method, SalvageMethod::ExactObject);
        assert_eq!(salvage.value["info"]["name"], "disk");
    }

    #[test]
    fn test_salvage_file_round() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("truncated.json");
        let full = minimal_text();
        // lop off the closing "]}" so the item array is left open
        fs::write(&path, &full[..full.len() - 2]).unwrap();

        let salvage = DocumentParser::new().salvage_file(&path).unwrap();
        assert_eq!(salvage.value["info"]["name"], "disk");
    }

    #[test]
    fn test_unsalvageable_text_is_reported() {
        let error = DocumentParser::new()
            .salvage_str("the request failed, no document was produced")
            .unwrap_err();
        match error {
            Error::Salvage { reason } => assert!(reason.contains("no JSON object")),
            other => panic!("expected salvage error, got {:?}", other),
        }
    }
}

#[cfg(test)]
mod lenient_file_parsing {
    use super::*;

    #[test]
    fn test_parse_lenient_from_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("partial.json");
        let text = format!(
            r#"{{"info": {{"name": "partial", "schema": "{}"}}, "item": [{{"name": "ok"}}, {{"name": 5}}]}}"#,
            SCHEMA_URL
        );
        fs::write(&path, text).unwrap();

        let report = parse_lenient(&path).unwrap();
        assert_eq!(report.collection.item.len(), 1);
        assert_eq!(report.violations.len(), 1);
        assert_eq!(report.violations.errors[0].path, "$.item[1].name");
    }
}
