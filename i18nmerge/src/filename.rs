//! Naming convention of partial translation files.
//!
//! Partial files are named `<base>.messages.<lang>.<ext>`, for example
//! `component-one.messages.fr.json`: `component-one` is the base name used
//! for id prefixes and `fr` groups the file with the other French partials.

use std::path::Path;

use regex::Regex;

use crate::error::Error;

/// Marker separating the base name from the language code.
pub const MESSAGES_MARKER: &str = ".messages.";

/// Language code and base name extracted from a partial file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationFileName {
    pub base_name: String,
    pub language: String,
}

/// Matcher for `<base>.messages.<lang>.<ext>` with a fixed extension.
#[derive(Debug, Clone)]
pub struct FilenameConvention {
    pattern: Regex,
}

impl FilenameConvention {
    pub fn new(extension: &str) -> Result<Self, Error> {
        let pattern = format!(r"(?i)^(.*?)\.messages\.(.+)\.{}$", regex::escape(extension));
        let pattern = Regex::new(&pattern)
            .map_err(|e| Error::InvalidDocument(format!("invalid file name pattern: {}", e)))?;
        Ok(FilenameConvention { pattern })
    }

    /// Parses the last component of `path`.
    ///
    /// # Example
    /// ```rust
    /// use i18nmerge::filename::FilenameConvention;
    /// let convention = FilenameConvention::new("json")?;
    /// let name = convention.parse("src/app/component-one.messages.fr.json")?;
    /// assert_eq!(name.base_name, "component-one");
    /// assert_eq!(name.language, "fr");
    /// # Ok::<(), i18nmerge::Error>(())
    /// ```
    pub fn parse<P: AsRef<Path>>(&self, path: P) -> Result<TranslationFileName, Error> {
        let path = path.as_ref();
        let malformed = || Error::MalformedFilename(path.to_path_buf());

        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(malformed)?;
        let captures = self.pattern.captures(file_name).ok_or_else(malformed)?;

        Ok(TranslationFileName {
            base_name: captures[1].to_string(),
            language: captures[2].to_string(),
        })
    }
}
