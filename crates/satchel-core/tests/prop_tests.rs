//! Property-based tests for collection parsing
//!
//! These tests verify that the parser, validator, and salvage path behave
//! sanely across a wide range of inputs: no panics on arbitrary data, and
//! a faithful round trip for schema-valid documents.

use proptest::prelude::*;
use satchel_core::{
    parse_str, parse_value, serialize, validate, validate_with, DocumentParser, ParseOptions,
    ValidationConfig, SCHEMA_URL,
};
use serde_json::{json, Value};

/// Strategy for generating random JSON values with controlled complexity
fn json_value_strategy() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| Value::Number(n.into())),
        "[a-zA-Z0-9 ]{0,50}".prop_map(Value::String),
    ];

    leaf.prop_recursive(
        4,  // max depth
        16, // max size
        5,  // items per collection
        |inner| {
            prop_oneof![
                proptest::collection::vec(inner.clone(), 0..5).prop_map(Value::Array),
                proptest::collection::hash_map("[a-z_]{1,12}", inner, 0..5)
                    .prop_map(|m| Value::Object(m.into_iter().collect())),
            ]
        },
    )
}

/// Strategy for item and collection names
fn name_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 _-]{1,24}"
}

/// Strategy for scalar header values
fn scalar_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        "[a-zA-Z0-9/ .-]{0,30}".prop_map(Value::String),
        any::<i64>().prop_map(|n| json!(n)),
        any::<bool>().prop_map(Value::Bool),
    ]
}

/// Strategy for request objects
fn request_strategy() -> impl Strategy<Value = Value> {
    (
        prop_oneof![
            Just("GET"),
            Just("POST"),
            Just("PUT"),
            Just("DELETE"),
            Just("PATCH"),
        ],
        "[a-z0-9-]{3,16}",
        proptest::option::of(proptest::collection::vec(
            ("[a-zA-Z-]{1,12}", scalar_strategy()),
            1..3,
        )),
    )
        .prop_map(|(method, host, header)| {
            let mut request = json!({
                "method": method,
                "url": format!("https://{}.test/v1", host),
            });
            if let Some(entries) = header {
                request["header"] = Value::Array(
                    entries
                        .into_iter()
                        .map(|(key, value)| json!({"key": key, "value": value}))
                        .collect(),
                );
            }
            request
        })
}

/// Strategy for item trees of bounded depth
fn item_strategy() -> impl Strategy<Value = Value> {
    let leaf = (name_strategy(), request_strategy())
        .prop_map(|(name, request)| json!({"name": name, "request": request}));

    leaf.prop_recursive(3, 12, 4, |inner| {
        (name_strategy(), proptest::collection::vec(inner, 0..4))
            .prop_map(|(name, children)| json!({"name": name, "item": children}))
    })
}

/// Strategy for whole schema-valid collection documents
fn collection_strategy() -> impl Strategy<Value = Value> {
    (
        name_strategy(),
        proptest::collection::vec(item_strategy(), 0..4),
    )
        .prop_map(|(name, items)| {
            json!({
                "info": {"name": name, "schema": SCHEMA_URL},
                "item": items
            })
        })
}

proptest! {
    /// Property: validation never panics, whatever the document looks like
    #[test]
    fn prop_validate_never_panics(input in json_value_strategy()) {
        let _ = validate(&input);
        let _ = validate_with(&input, &ValidationConfig::strict());
    }

    /// Property: schema-valid documents parse cleanly and survive the
    /// serialize/parse round trip unchanged
    #[test]
    fn prop_generated_collections_round_trip(document in collection_strategy()) {
        let collection = parse_value(&document, &ParseOptions::default())
            .expect("generated collections are schema-valid");

        let text = serialize(&collection).expect("serialization succeeds");
        let reparsed = parse_str(&text).expect("serialized output parses back");
        prop_assert_eq!(&reparsed, &collection);
        prop_assert_eq!(collection.to_value().expect("model serializes"), document);
    }

    /// Property: strict mode never reports fewer violations than basic
    #[test]
    fn prop_strict_reports_at_least_as_much_as_basic(input in json_value_strategy()) {
        let basic = validate(&input);
        let strict = validate_with(&input, &ValidationConfig::strict());
        prop_assert!(strict.len() >= basic.len());
    }

    /// Property: the document layer never panics on arbitrary text
    #[test]
    fn prop_document_layer_never_panics(text in ".{0,300}") {
        let parser = DocumentParser::new();
        let _ = parser.parse_str(&text);
        let _ = parser.salvage_str(&text);
    }

    /// Property: salvage handles a valid document cut off at any point,
    /// and whatever it recovers is an object
    #[test]
    fn prop_salvage_handles_any_truncation(
        document in collection_strategy(),
        keep in 0.05f64..1.0,
    ) {
        let text = serde_json::to_string_pretty(&document).expect("document serializes");
        let cut = ((text.len() as f64) * keep) as usize;
        if let Ok(salvage) = DocumentParser::new().salvage_str(&text[..cut]) {
            prop_assert!(salvage.value.is_object());
        }
    }
}
