//! Support for flat key/value JSON translation files.
//!
//! Partial files are plain objects mapping message ids to translations:
//!
//! ```json
//! { "title": "Bonjour", "subtitle": "Le monde" }
//! ```
//!
//! The merged file wraps all messages in the layout Angular loads at runtime:
//!
//! ```json
//! { "locale": "fr", "translations": { "title": "Bonjour", "subtitle": "Le monde" } }
//! ```

use serde_json::{Map, Value};

use crate::{error::Error, traits::MergeStrategy};

/// Ordered JSON object, the document type of the flat formats.
pub type FlatDocument = Map<String, Value>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Format;

impl MergeStrategy for Format {
    type Document = FlatDocument;

    fn extension(&self) -> &'static str {
        "json"
    }

    fn parse_to_object(&self, content: &str) -> Result<FlatDocument, Error> {
        parse_flat_object(content)
    }

    fn add_prefix_to_message_ids(
        &self,
        document: FlatDocument,
        prefix: &str,
        separator: &str,
    ) -> FlatDocument {
        document
            .into_iter()
            .map(|(id, value)| (format!("{}{}{}", prefix, separator, id), value))
            .collect()
    }

    fn merge_objects(&self, language: &str, partials: Vec<FlatDocument>) -> FlatDocument {
        let mut translations = Map::new();
        for partial in partials {
            translations.extend(partial);
        }

        let mut merged = Map::new();
        merged.insert("locale".to_string(), Value::String(language.to_string()));
        merged.insert("translations".to_string(), Value::Object(translations));
        merged
    }

    fn object_to_string(&self, document: &FlatDocument) -> Result<String, Error> {
        serde_json::to_string_pretty(document).map_err(Error::Parse)
    }
}

/// Parses text that must hold a JSON object at the top level.
pub(crate) fn parse_flat_object(content: &str) -> Result<FlatDocument, Error> {
    match serde_json::from_str::<Value>(content)? {
        Value::Object(map) => Ok(map),
        other => Err(Error::InvalidDocument(format!(
            "expected a JSON object at the top level, found {}",
            json_type_name(&other)
        ))),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
