//! Support for ARB (Application Resource Bundle) files.
//!
//! ARB is a flat JSON object. Keys starting with `@` hold metadata about the
//! message of the same name (`"@greeting": {"description": "..."}`), and
//! `@@`-keys hold document attributes such as `@@locale`.

use serde_json::{Map, Value};

use crate::{
    error::Error,
    formats::json::{FlatDocument, parse_flat_object},
    traits::MergeStrategy,
};

/// Marker of keys describing another message.
pub const META_ATTRIBUTE_MARKER: char = '@';

/// Document attribute holding the language of a merged file.
pub const LOCALE_KEY: &str = "@@locale";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Format;

impl MergeStrategy for Format {
    type Document = FlatDocument;

    fn extension(&self) -> &'static str {
        "arb"
    }

    fn parse_to_object(&self, content: &str) -> Result<FlatDocument, Error> {
        parse_flat_object(content)
    }

    /// Prefixes every key; the `@` marker of metadata keys stays in front,
    /// so `@greeting` becomes `@home.greeting`.
    fn add_prefix_to_message_ids(
        &self,
        document: FlatDocument,
        prefix: &str,
        separator: &str,
    ) -> FlatDocument {
        document
            .into_iter()
            .map(|(id, value)| {
                let prefixed = match id.strip_prefix(META_ATTRIBUTE_MARKER) {
                    Some(message_id) => format!(
                        "{}{}{}{}",
                        META_ATTRIBUTE_MARKER, prefix, separator, message_id
                    ),
                    None => format!("{}{}{}", prefix, separator, id),
                };
                (prefixed, value)
            })
            .collect()
    }

    fn merge_objects(&self, language: &str, partials: Vec<FlatDocument>) -> FlatDocument {
        let mut merged = Map::new();
        merged.insert(LOCALE_KEY.to_string(), Value::String(language.to_string()));
        for partial in partials {
            merged.extend(partial);
        }
        merged
    }

    fn object_to_string(&self, document: &FlatDocument) -> Result<String, Error> {
        serde_json::to_string_pretty(document).map_err(Error::Parse)
    }
}
