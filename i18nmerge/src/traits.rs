//! The format-agnostic contract every translation file format implements.

use std::{fs::File, io::Read, path::Path};

use crate::error::Error;

/// Behavior specific to merging translation files of one format.
///
/// The executor drives every format through these operations only, so a new
/// format is added by implementing this trait and registering it in
/// [`crate::formats::FormatType`].
///
/// # Example
///
/// ```rust
/// use i18nmerge::formats::JsonFormat;
/// use i18nmerge::traits::MergeStrategy;
///
/// let strategy = JsonFormat;
/// let partial = strategy.parse_to_object(r#"{"title": "Bonjour"}"#)?;
/// let partial = strategy.add_prefix_to_message_ids(partial, "home", ".");
/// let merged = strategy.merge_objects("fr", vec![partial]);
/// let text = strategy.object_to_string(&merged)?;
/// assert!(text.contains(r#""home.title": "Bonjour""#));
/// # Ok::<(), i18nmerge::Error>(())
/// ```
pub trait MergeStrategy {
    /// In-memory representation of one translation file.
    type Document;

    /// Extension of the files this strategy reads and writes, without the dot.
    fn extension(&self) -> &'static str;

    /// Parses the content of one partial translation file.
    fn parse_to_object(&self, content: &str) -> Result<Self::Document, Error>;

    /// Prepends `prefix` and `separator` to every message id of the document.
    fn add_prefix_to_message_ids(
        &self,
        document: Self::Document,
        prefix: &str,
        separator: &str,
    ) -> Self::Document;

    /// Merges all partial documents of one language into a new document.
    fn merge_objects(&self, language: &str, partials: Vec<Self::Document>) -> Self::Document;

    /// Serializes a merged document.
    fn object_to_string(&self, document: &Self::Document) -> Result<String, Error>;

    /// Reads and parses a file, decoding UTF-16 content when a BOM says so.
    fn parse_file<P: AsRef<Path>>(&self, path: P) -> Result<Self::Document, Error>
    where
        Self: Sized,
    {
        let content = read_translation_file(path)?;
        self.parse_to_object(&content)
    }
}

/// Reads a file as text. A byte-order mark selects the encoding and is
/// dropped; files without one must be UTF-8.
pub fn read_translation_file<P: AsRef<Path>>(path: P) -> Result<String, Error> {
    let file = File::open(path).map_err(Error::Io)?;
    let mut decoder = encoding_rs_io::DecodeReaderBytesBuilder::new()
        .bom_override(true)
        .build(file);

    let mut decoded = String::new();
    decoder.read_to_string(&mut decoded).map_err(Error::Io)?;

    match decoded.strip_prefix('\u{feff}') {
        Some(stripped) => Ok(stripped.to_string()),
        None => Ok(decoded),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_read_plain_utf8() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.messages.fr.json");
        fs::write(&path, "{\"k\": \"é\"}").unwrap();

        assert_eq!(read_translation_file(&path).unwrap(), "{\"k\": \"é\"}");
    }

    #[test]
    fn test_read_strips_utf8_bom() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.messages.fr.json");
        fs::write(&path, b"\xEF\xBB\xBF{}").unwrap();

        assert_eq!(read_translation_file(&path).unwrap(), "{}");
    }

    #[test]
    fn test_read_utf16_with_bom() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.messages.fr.json");
        let mut bytes = vec![0xFF, 0xFE];
        for unit in "{\"k\":\"v\"}".encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        fs::write(&path, bytes).unwrap();

        assert_eq!(read_translation_file(&path).unwrap(), "{\"k\":\"v\"}");
    }

    #[test]
    fn test_read_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = read_translation_file(dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
