//! Schema walk over collection documents
//!
//! The walk visits the document top-down, depth-first, left-to-right,
//! recording violations and assembling typed records in the same pass.
//! Each builder method returns `Some` when its subtree produced a usable
//! record and `None` when it had to be pruned; pruning happens at the
//! nearest enclosing optional field or array entry, so one bad leaf never
//! discards more of the document than it has to. Required fields bubble
//! the `None` upward instead.
//!
//! Every builder checks the error budget on entry, which is what makes
//! `fail_fast` stop after the first violation.
//!
//! Copyright (c) 2025 Satchel Team
//! Licensed under the Apache-2.0 license

use serde_json::{Map, Value};
use tracing::debug;

use crate::types::{
    Body, BodyOptions, Collection, Description, Event, Info, InfoVersion, Item, Listen,
    Parameter, RawBodyOptions, Request, Response, Script, Url, UrlParts, Variable,
    VersionTriple,
};
use crate::validation::base::{self, ValidationContext, ValidationMode};
use crate::validation::error::{ValidationError, ValidationErrors, ViolationKind};
use crate::validation::ValidationConfig;
use crate::version::{is_current_schema_url, schema_url_version, SCHEMA_URL};

const COLLECTION_FIELDS: &[&str] = &["info", "item", "event", "variable"];
const INFO_FIELDS: &[&str] = &["name", "schema", "description", "version"];
const VERSION_FIELDS: &[&str] = &["major", "minor", "patch"];
const ITEM_FIELDS: &[&str] = &["name", "item", "request", "event", "response"];
const REQUEST_FIELDS: &[&str] = &["method", "url", "header", "body"];
const URL_FIELDS: &[&str] = &["raw", "host", "path"];
const BODY_FIELDS: &[&str] = &["mode", "raw", "options"];
const BODY_OPTIONS_FIELDS: &[&str] = &["raw"];
const RAW_OPTIONS_FIELDS: &[&str] = &["language"];
const EVENT_FIELDS: &[&str] = &["listen", "script"];
const SCRIPT_FIELDS: &[&str] = &["id", "exec", "type"];
const PARAMETER_FIELDS: &[&str] = &["key", "value", "type"];
const VARIABLE_FIELDS: &[&str] = &["id", "key", "value", "type", "name", "description"];

const LISTEN_VALUES: &[&str] = &["test", "prerequest"];

/// Validator that checks a JSON document against the collection schema
/// and builds the typed model as it goes
#[derive(Debug, Clone, Default)]
pub struct CollectionValidator {
    config: ValidationConfig,
}

impl CollectionValidator {
    /// Create a validator with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a validator with explicit configuration
    pub fn with_config(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Validate a document, returning every violation found
    pub fn validate(&self, document: &Value) -> ValidationErrors {
        self.build(document).1
    }

    /// Validate a document and build the typed model
    ///
    /// The collection is `None` when a fatal part of the document (the
    /// root object, `info` and its required fields, or the root `item`
    /// array) could not be recovered. A `Some` collection alongside
    /// violations means prunable subtrees were dropped.
    pub fn build(&self, document: &Value) -> (Option<Collection>, ValidationErrors) {
        let mut errors = ValidationErrors::new();
        let ctx = ValidationContext::new(self.config.mode);
        let collection = self.collection(document, &ctx, &mut errors);
        debug!(
            violations = errors.len(),
            complete = collection.is_some(),
            "document walk finished"
        );
        (collection, errors)
    }

    /// True once the configured error budget is spent
    fn saturated(&self, errors: &ValidationErrors) -> bool {
        if errors.is_empty() {
            return false;
        }
        if self.config.fail_fast {
            return true;
        }
        self.config.max_errors > 0 && errors.len() >= self.config.max_errors
    }

    /// Budget-aware required-field lookup
    fn require<'a>(
        &self,
        map: &'a Map<String, Value>,
        key: &str,
        ctx: &ValidationContext,
        errors: &mut ValidationErrors,
    ) -> Option<&'a Value> {
        if self.saturated(errors) {
            return None;
        }
        base::require(map, key, ctx, errors)
    }

    fn collection(
        &self,
        value: &Value,
        ctx: &ValidationContext,
        errors: &mut ValidationErrors,
    ) -> Option<Collection> {
        let map = base::expect_object(value, ctx, errors)?;
        base::check_unknown_fields(map, COLLECTION_FIELDS, ctx, errors);

        // build every child before bubbling a missing requirement, so a
        // broken info block does not hide violations further down
        let info = self
            .require(map, "info", ctx, errors)
            .and_then(|v| self.info(v, &ctx.child("info"), errors));
        let item = self
            .require(map, "item", ctx, errors)
            .and_then(|v| self.items(v, &ctx.child("item"), errors));
        let event = map
            .get("event")
            .and_then(|v| self.events(v, &ctx.child("event"), errors));
        let variable = map
            .get("variable")
            .and_then(|v| self.variables(v, &ctx.child("variable"), errors));

        Some(Collection {
            info: info?,
            item: item?,
            event,
            variable,
        })
    }

    fn info(
        &self,
        value: &Value,
        ctx: &ValidationContext,
        errors: &mut ValidationErrors,
    ) -> Option<Info> {
        if self.saturated(errors) {
            return None;
        }
        let map = base::expect_object(value, ctx, errors)?;
        base::check_unknown_fields(map, INFO_FIELDS, ctx, errors);

        let name = self
            .require(map, "name", ctx, errors)
            .and_then(|v| base::expect_string(v, &ctx.child("name"), errors))
            .map(str::to_string);
        let schema = self
            .require(map, "schema", ctx, errors)
            .and_then(|v| self.schema_url(v, &ctx.child("schema"), errors));
        let description = map
            .get("description")
            .and_then(|v| self.description(v, &ctx.child("description"), errors));
        let version = map
            .get("version")
            .and_then(|v| self.version(v, &ctx.child("version"), errors));

        Some(Info {
            name: name?,
            schema: schema?,
            description,
            version,
        })
    }

    fn schema_url(
        &self,
        value: &Value,
        ctx: &ValidationContext,
        errors: &mut ValidationErrors,
    ) -> Option<String> {
        if self.saturated(errors) {
            return None;
        }
        let text = base::expect_string(value, ctx, errors)?;
        if is_current_schema_url(text) {
            return Some(text.to_string());
        }
        // a well-formed URI for another version gets a sharper message
        let actual = match schema_url_version(text) {
            Some((major, minor, patch)) => {
                format!("schema URI for v{}.{}.{}", major, minor, patch)
            }
            None => format!("\"{}\"", text),
        };
        errors.add(ValidationError::new(
            &ctx.path,
            ViolationKind::PatternMismatch,
            format!("the exact schema URI \"{}\"", SCHEMA_URL),
            actual,
        ));
        None
    }

    fn description(
        &self,
        value: &Value,
        ctx: &ValidationContext,
        errors: &mut ValidationErrors,
    ) -> Option<Description> {
        if self.saturated(errors) {
            return None;
        }
        match value {
            Value::String(text) => Some(Description::Text(text.clone())),
            Value::Object(map) => Some(Description::Object(map.clone())),
            other => {
                errors.add(ValidationError::new(
                    &ctx.path,
                    ViolationKind::UnionMismatch,
                    "string or object",
                    base::type_name(other),
                ));
                None
            }
        }
    }

    fn version(
        &self,
        value: &Value,
        ctx: &ValidationContext,
        errors: &mut ValidationErrors,
    ) -> Option<InfoVersion> {
        if self.saturated(errors) {
            return None;
        }
        match value {
            Value::String(text) => Some(InfoVersion::Text(text.clone())),
            Value::Object(map) => self
                .version_triple(map, ctx, errors)
                .map(InfoVersion::Triple),
            other => {
                errors.add(ValidationError::new(
                    &ctx.path,
                    ViolationKind::UnionMismatch,
                    "string or version object",
                    base::type_name(other),
                ));
                None
            }
        }
    }

    fn version_triple(
        &self,
        map: &Map<String, Value>,
        ctx: &ValidationContext,
        errors: &mut ValidationErrors,
    ) -> Option<VersionTriple> {
        base::check_unknown_fields(map, VERSION_FIELDS, ctx, errors);
        let major = self
            .require(map, "major", ctx, errors)
            .and_then(|v| version_part(v, &ctx.child("major"), errors));
        let minor = self
            .require(map, "minor", ctx, errors)
            .and_then(|v| version_part(v, &ctx.child("minor"), errors));
        let patch = self
            .require(map, "patch", ctx, errors)
            .and_then(|v| version_part(v, &ctx.child("patch"), errors));

        Some(VersionTriple {
            major: major?,
            minor: minor?,
            patch: patch?,
        })
    }

    fn items(
        &self,
        value: &Value,
        ctx: &ValidationContext,
        errors: &mut ValidationErrors,
    ) -> Option<Vec<Item>> {
        if self.saturated(errors) {
            return None;
        }
        let array = base::expect_array(value, ctx, errors)?;
        let mut out = Vec::with_capacity(array.len());
        for (index, entry) in array.iter().enumerate() {
            if self.saturated(errors) {
                break;
            }
            if let Some(item) = self.item(entry, &ctx.child_index(index), errors) {
                out.push(item);
            }
        }
        Some(out)
    }

    fn item(
        &self,
        value: &Value,
        ctx: &ValidationContext,
        errors: &mut ValidationErrors,
    ) -> Option<Item> {
        if self.saturated(errors) {
            return None;
        }
        if ctx.depth >= self.config.max_item_depth {
            errors.add(ValidationError::new(
                &ctx.path,
                ViolationKind::DepthExceeded,
                format!(
                    "item nesting at most {} levels deep",
                    self.config.max_item_depth
                ),
                format!("nesting depth {}", ctx.depth + 1),
            ));
            return None;
        }
        let map = base::expect_object(value, ctx, errors)?;
        base::check_unknown_fields(map, ITEM_FIELDS, ctx, errors);

        let name = self
            .require(map, "name", ctx, errors)
            .and_then(|v| base::expect_string(v, &ctx.child("name"), errors))
            .map(str::to_string);
        let item = map
            .get("item")
            .and_then(|v| self.items(v, &ctx.child("item").descend(), errors));
        let request = map
            .get("request")
            .and_then(|v| self.request(v, &ctx.child("request"), errors));
        let event = map
            .get("event")
            .and_then(|v| self.events(v, &ctx.child("event"), errors));
        let response = map
            .get("response")
            .and_then(|v| self.responses(v, &ctx.child("response"), errors));

        Some(Item {
            name: name?,
            item,
            request,
            event,
            response,
        })
    }

    fn request(
        &self,
        value: &Value,
        ctx: &ValidationContext,
        errors: &mut ValidationErrors,
    ) -> Option<Request> {
        if self.saturated(errors) {
            return None;
        }
        let map = base::expect_object(value, ctx, errors)?;
        base::check_unknown_fields(map, REQUEST_FIELDS, ctx, errors);

        let method = self
            .require(map, "method", ctx, errors)
            .and_then(|v| base::expect_string(v, &ctx.child("method"), errors))
            .map(str::to_string);
        let url = self
            .require(map, "url", ctx, errors)
            .and_then(|v| self.url(v, &ctx.child("url"), errors));
        let header = map
            .get("header")
            .and_then(|v| self.parameters(v, &ctx.child("header"), errors));
        let body = map
            .get("body")
            .and_then(|v| self.body(v, &ctx.child("body"), errors));

        Some(Request {
            method: method?,
            url: url?,
            header,
            body,
        })
    }

    fn url(
        &self,
        value: &Value,
        ctx: &ValidationContext,
        errors: &mut ValidationErrors,
    ) -> Option<Url> {
        if self.saturated(errors) {
            return None;
        }
        match value {
            Value::String(raw) => {
                if ctx.mode == ValidationMode::Strict && raw.is_empty() {
                    errors.add(ValidationError::new(
                        &ctx.path,
                        ViolationKind::PatternMismatch,
                        "non-empty URL string",
                        "\"\"",
                    ));
                    return None;
                }
                Some(Url::Raw(raw.clone()))
            }
            Value::Object(map) => self.url_parts(map, ctx, errors).map(Url::Parts),
            other => {
                errors.add(ValidationError::new(
                    &ctx.path,
                    ViolationKind::UnionMismatch,
                    "string or URL object",
                    base::type_name(other),
                ));
                None
            }
        }
    }

    fn url_parts(
        &self,
        map: &Map<String, Value>,
        ctx: &ValidationContext,
        errors: &mut ValidationErrors,
    ) -> Option<UrlParts> {
        base::check_unknown_fields(map, URL_FIELDS, ctx, errors);
        // `{}` matches the object branch without telling us anything;
        // strict mode treats that as a degenerate union match
        if ctx.mode == ValidationMode::Strict
            && !URL_FIELDS.iter().any(|field| map.contains_key(*field))
        {
            errors.add(ValidationError::new(
                &ctx.path,
                ViolationKind::AmbiguousUnion,
                "a URL object carrying at least one of: raw, host, path",
                "empty object",
            ));
            return None;
        }
        let raw = map
            .get("raw")
            .and_then(|v| base::expect_string(v, &ctx.child("raw"), errors))
            .map(str::to_string);
        let host = map
            .get("host")
            .and_then(|v| base::expect_string_array(v, &ctx.child("host"), errors));
        let path = map
            .get("path")
            .and_then(|v| base::expect_string_array(v, &ctx.child("path"), errors));

        Some(UrlParts { raw, host, path })
    }

    fn body(
        &self,
        value: &Value,
        ctx: &ValidationContext,
        errors: &mut ValidationErrors,
    ) -> Option<Body> {
        if self.saturated(errors) {
            return None;
        }
        let map = base::expect_object(value, ctx, errors)?;
        base::check_unknown_fields(map, BODY_FIELDS, ctx, errors);

        let mode = map
            .get("mode")
            .and_then(|v| base::expect_string(v, &ctx.child("mode"), errors))
            .map(str::to_string);
        let raw = map
            .get("raw")
            .and_then(|v| base::expect_string(v, &ctx.child("raw"), errors))
            .map(str::to_string);
        let options = map
            .get("options")
            .and_then(|v| self.body_options(v, &ctx.child("options"), errors));

        // the mode names its payload field; flag the field only when it
        // is genuinely absent, a type violation on it is already recorded
        if ctx.mode == ValidationMode::Strict
            && mode.as_deref() == Some("raw")
            && !map.contains_key("raw")
        {
            errors.add(ValidationError::new(
                ctx.child("raw").path,
                ViolationKind::ConditionalField,
                "field 'raw' when mode is \"raw\"",
                "absent",
            ));
        }

        Some(Body { mode, raw, options })
    }

    fn body_options(
        &self,
        value: &Value,
        ctx: &ValidationContext,
        errors: &mut ValidationErrors,
    ) -> Option<BodyOptions> {
        if self.saturated(errors) {
            return None;
        }
        let map = base::expect_object(value, ctx, errors)?;
        base::check_unknown_fields(map, BODY_OPTIONS_FIELDS, ctx, errors);
        let raw = map
            .get("raw")
            .and_then(|v| self.raw_body_options(v, &ctx.child("raw"), errors));
        Some(BodyOptions { raw })
    }

    fn raw_body_options(
        &self,
        value: &Value,
        ctx: &ValidationContext,
        errors: &mut ValidationErrors,
    ) -> Option<RawBodyOptions> {
        if self.saturated(errors) {
            return None;
        }
        let map = base::expect_object(value, ctx, errors)?;
        base::check_unknown_fields(map, RAW_OPTIONS_FIELDS, ctx, errors);
        let language = map
            .get("language")
            .and_then(|v| base::expect_string(v, &ctx.child("language"), errors))
            .map(str::to_string);
        Some(RawBodyOptions { language })
    }

    fn events(
        &self,
        value: &Value,
        ctx: &ValidationContext,
        errors: &mut ValidationErrors,
    ) -> Option<Vec<Event>> {
        if self.saturated(errors) {
            return None;
        }
        let array = base::expect_array(value, ctx, errors)?;
        let mut out = Vec::with_capacity(array.len());
        for (index, entry) in array.iter().enumerate() {
            if self.saturated(errors) {
                break;
            }
            if let Some(event) = self.event(entry, &ctx.child_index(index), errors) {
                out.push(event);
            }
        }
        Some(out)
    }

    fn event(
        &self,
        value: &Value,
        ctx: &ValidationContext,
        errors: &mut ValidationErrors,
    ) -> Option<Event> {
        let map = base::expect_object(value, ctx, errors)?;
        base::check_unknown_fields(map, EVENT_FIELDS, ctx, errors);

        let listen = self
            .require(map, "listen", ctx, errors)
            .and_then(|v| self.listen(v, &ctx.child("listen"), errors));
        let script = self
            .require(map, "script", ctx, errors)
            .and_then(|v| self.script(v, &ctx.child("script"), errors));

        Some(Event {
            listen: listen?,
            script: script?,
        })
    }

    fn listen(
        &self,
        value: &Value,
        ctx: &ValidationContext,
        errors: &mut ValidationErrors,
    ) -> Option<Listen> {
        if self.saturated(errors) {
            return None;
        }
        match base::check_enum(value, LISTEN_VALUES, ctx, errors)? {
            "test" => Some(Listen::Test),
            _ => Some(Listen::Prerequest),
        }
    }

    fn script(
        &self,
        value: &Value,
        ctx: &ValidationContext,
        errors: &mut ValidationErrors,
    ) -> Option<Script> {
        if self.saturated(errors) {
            return None;
        }
        let map = base::expect_object(value, ctx, errors)?;
        base::check_unknown_fields(map, SCRIPT_FIELDS, ctx, errors);

        let id = map
            .get("id")
            .and_then(|v| base::expect_string(v, &ctx.child("id"), errors))
            .map(str::to_string);
        let exec = map
            .get("exec")
            .and_then(|v| base::expect_string_array(v, &ctx.child("exec"), errors));
        let r#type = map
            .get("type")
            .and_then(|v| base::expect_string(v, &ctx.child("type"), errors))
            .map(str::to_string);

        Some(Script { id, exec, r#type })
    }

    fn parameters(
        &self,
        value: &Value,
        ctx: &ValidationContext,
        errors: &mut ValidationErrors,
    ) -> Option<Vec<Parameter>> {
        if self.saturated(errors) {
            return None;
        }
        let array = base::expect_array(value, ctx, errors)?;
        let mut out = Vec::with_capacity(array.len());
        for (index, entry) in array.iter().enumerate() {
            if self.saturated(errors) {
                break;
            }
            if let Some(parameter) = self.parameter(entry, &ctx.child_index(index), errors) {
                out.push(parameter);
            }
        }
        Some(out)
    }

    fn parameter(
        &self,
        value: &Value,
        ctx: &ValidationContext,
        errors: &mut ValidationErrors,
    ) -> Option<Parameter> {
        let map = base::expect_object(value, ctx, errors)?;
        base::check_unknown_fields(map, PARAMETER_FIELDS, ctx, errors);

        let key = self
            .require(map, "key", ctx, errors)
            .and_then(|v| base::expect_string(v, &ctx.child("key"), errors))
            .map(str::to_string);
        let scalar = self
            .require(map, "value", ctx, errors)
            .and_then(|v| base::expect_scalar(v, &ctx.child("value"), errors));
        let r#type = map
            .get("type")
            .and_then(|v| base::expect_string(v, &ctx.child("type"), errors))
            .map(str::to_string);

        Some(Parameter {
            key: key?,
            value: scalar?,
            r#type,
        })
    }

    fn variables(
        &self,
        value: &Value,
        ctx: &ValidationContext,
        errors: &mut ValidationErrors,
    ) -> Option<Vec<Variable>> {
        if self.saturated(errors) {
            return None;
        }
        let array = base::expect_array(value, ctx, errors)?;
        let mut out = Vec::with_capacity(array.len());
        for (index, entry) in array.iter().enumerate() {
            if self.saturated(errors) {
                break;
            }
            if let Some(variable) = self.variable(entry, &ctx.child_index(index), errors) {
                out.push(variable);
            }
        }
        Some(out)
    }

    fn variable(
        &self,
        value: &Value,
        ctx: &ValidationContext,
        errors: &mut ValidationErrors,
    ) -> Option<Variable> {
        let map = base::expect_object(value, ctx, errors)?;
        base::check_unknown_fields(map, VARIABLE_FIELDS, ctx, errors);

        let id = map
            .get("id")
            .and_then(|v| base::expect_string(v, &ctx.child("id"), errors))
            .map(str::to_string);
        let key = self
            .require(map, "key", ctx, errors)
            .and_then(|v| base::expect_string(v, &ctx.child("key"), errors))
            .map(str::to_string);
        let scalar = self
            .require(map, "value", ctx, errors)
            .and_then(|v| base::expect_scalar(v, &ctx.child("value"), errors));
        let r#type = map
            .get("type")
            .and_then(|v| base::expect_string(v, &ctx.child("type"), errors))
            .map(str::to_string);
        let name = map
            .get("name")
            .and_then(|v| base::expect_string(v, &ctx.child("name"), errors))
            .map(str::to_string);
        let description = map
            .get("description")
            .and_then(|v| base::expect_string(v, &ctx.child("description"), errors))
            .map(str::to_string);

        Some(Variable {
            id,
            key: key?,
            value: scalar?,
            r#type,
            name,
            description,
        })
    }

    fn responses(
        &self,
        value: &Value,
        ctx: &ValidationContext,
        errors: &mut ValidationErrors,
    ) -> Option<Vec<Response>> {
        if self.saturated(errors) {
            return None;
        }
        let array = base::expect_array(value, ctx, errors)?;
        let mut out = Vec::with_capacity(array.len());
        for (index, entry) in array.iter().enumerate() {
            if self.saturated(errors) {
                break;
            }
            if let Some(map) = base::expect_object(entry, &ctx.child_index(index), errors) {
                out.push(Response(map.clone()));
            }
        }
        Some(out)
    }
}

fn version_part(
    value: &Value,
    ctx: &ValidationContext,
    errors: &mut ValidationErrors,
) -> Option<u32> {
    let part = value.as_u64().and_then(|number| u32::try_from(number).ok());
    if part.is_none() {
        let actual = match value {
            Value::Number(number) => number.to_string(),
            other => base::type_name(other).to_string(),
        };
        errors.add(ValidationError::new(
            &ctx.path,
            ViolationKind::TypeMismatch,
            "non-negative integer",
            actual,
        ));
    }
    part
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn minimal() -> Value {
        json!({
            "info": {"name": "t", "schema": SCHEMA_URL},
            "item": []
        })
    }

    #[test]
    fn test_minimal_document_builds_cleanly() {
        let (collection, errors) = CollectionValidator::new().build(&minimal());
        assert!(errors.is_empty(), "unexpected: {}", errors);
        let collection = collection.unwrap();
        assert_eq!(collection.info.name, "t");
        assert!(collection.item.is_empty());
    }

    #[test]
    fn test_missing_required_fields_are_path_named() {
        let (collection, errors) = CollectionValidator::new().build(&json!({
            "info": {"schema": SCHEMA_URL},
        }));
        assert!(collection.is_none());
        let paths: Vec<&str> = errors.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, vec!["$.info.name", "$.item"]);
        assert!(errors
            .iter()
            .all(|e| e.kind == ViolationKind::MissingField));
    }

    #[test]
    fn test_non_object_root_is_fatal() {
        let (collection, errors) = CollectionValidator::new().build(&json!([1, 2]));
        assert!(collection.is_none());
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.errors[0].path, "$");
        assert_eq!(errors.errors[0].kind, ViolationKind::TypeMismatch);
    }

    #[test]
    fn test_bad_array_entry_is_pruned_not_fatal() {
        let mut document = minimal();
        document["item"] = json!([
            {"name": "ok"},
            {"request": {"method": "GET", "url": "https://x.test"}},
        ]);
        let (collection, errors) = CollectionValidator::new().build(&document);
        let collection = collection.unwrap();
        assert_eq!(collection.item.len(), 1);
        assert_eq!(collection.item[0].name, "ok");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.errors[0].path, "$.item[1].name");
    }

    #[test]
    fn test_fail_fast_stops_the_walk() {
        let document = json!({
            "info": {"name": 1, "schema": "bogus"},
            "item": "not an array"
        });
        let errors =
            CollectionValidator::with_config(ValidationConfig::default()).validate(&document);
        assert_eq!(errors.len(), 3);

        let errors =
            CollectionValidator::with_config(ValidationConfig::default().with_fail_fast(true))
                .validate(&document);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.errors[0].path, "$.info.name");
    }

    #[test]
    fn test_max_errors_caps_the_walk() {
        let document = json!({
            "info": {"name": "t", "schema": SCHEMA_URL},
            "item": [{"name": 1}, {"name": 2}, {"name": 3}, {"name": 4}]
        });
        let errors =
            CollectionValidator::with_config(ValidationConfig::default().with_max_errors(2))
                .validate(&document);
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_item_depth_bound_stops_descent() {
        let mut document = json!({"name": "leaf"});
        for _ in 0..4 {
            document = json!({"name": "folder", "item": [document]});
        }
        let mut root = minimal();
        root["item"] = json!([document]);

        let config = ValidationConfig::default().with_max_item_depth(3);
        let (collection, errors) = CollectionValidator::with_config(config).build(&root);
        assert!(collection.is_some());
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.errors[0].kind, ViolationKind::DepthExceeded);
        assert_eq!(errors.errors[0].path, "$.item[0].item[0].item[0].item[0]");
    }

    #[test]
    fn test_old_schema_version_is_identified() {
        let mut document = minimal();
        document["info"]["schema"] =
            json!("https://schema.getpostman.com/json/collection/v2.1.0/collection.json");
        let errors = CollectionValidator::new().validate(&document);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.errors[0].kind, ViolationKind::PatternMismatch);
        assert_eq!(errors.errors[0].actual, "schema URI for v2.1.0");
    }

    #[test]
    fn test_empty_url_object_is_strict_only() {
        let mut document = minimal();
        document["item"] = json!([
            {"name": "r", "request": {"method": "GET", "url": {}}}
        ]);

        let errors = CollectionValidator::new().validate(&document);
        assert!(errors.is_empty());

        let errors =
            CollectionValidator::with_config(ValidationConfig::strict()).validate(&document);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.errors[0].kind, ViolationKind::AmbiguousUnion);
        assert_eq!(errors.errors[0].path, "$.item[0].request.url");
    }

    #[test]
    fn test_body_mode_correlation_is_strict_only() {
        let mut document = minimal();
        document["item"] = json!([{
            "name": "r",
            "request": {
                "method": "POST",
                "url": "https://x.test",
                "body": {"mode": "raw"}
            }
        }]);

        assert!(CollectionValidator::new().validate(&document).is_empty());

        let errors =
            CollectionValidator::with_config(ValidationConfig::strict()).validate(&document);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.errors[0].kind, ViolationKind::ConditionalField);
        assert_eq!(errors.errors[0].path, "$.item[0].request.body.raw");
    }

    #[test]
    fn test_version_triple_requires_all_parts() {
        let mut document = minimal();
        document["info"]["version"] = json!({"major": 1, "minor": 2});
        let (collection, errors) = CollectionValidator::new().build(&document);
        // info survives, the version field is pruned
        let collection = collection.unwrap();
        assert!(collection.info.version.is_none());
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.errors[0].path, "$.info.version.patch");

        let mut document = minimal();
        document["info"]["version"] = json!({"major": 1, "minor": 2, "patch": -3});
        let errors = CollectionValidator::new().validate(&document);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.errors[0].path, "$.info.version.patch");
        assert_eq!(errors.errors[0].actual, "-3");
    }
}
