//! All error types for the i18nmerge crate.
//!
//! These are returned from every fallible step of a merge run (discovery,
//! reading, parsing, serialization and writing). Nothing is recovered inside
//! the crate: the first error aborts the run and reaches the caller.

use std::path::{Path, PathBuf};

use quick_xml::events::attributes::AttrError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("format '{0}' is unknown")]
    UnknownFormat(String),

    #[error("id prefix strategy '{0}' is unknown (expected camel-case, as-is or dot-case)")]
    UnknownPrefixStrategy(String),

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("XML parse error: {0}")]
    XmlParse(#[from] quick_xml::Error),

    #[error("XML attribute error: {0}")]
    XmlAttribute(#[from] AttrError),

    #[error("invalid document: {0}")]
    InvalidDocument(String),

    #[error(
        "malformed translation filename '{}': expected <name>.messages.<lang>.<ext>",
        .0.display()
    )]
    MalformedFilename(PathBuf),

    #[error("{kind} in '{}': {message}", .path.display())]
    File {
        path: PathBuf,
        kind: &'static str,
        message: String,
    },

    #[error("file discovery error: {0}")]
    Discovery(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Short, stable name of the error category.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::UnknownFormat(_) => "UnknownFormat",
            Error::UnknownPrefixStrategy(_) => "UnknownPrefixStrategy",
            Error::Parse(_) => "JsonParseError",
            Error::XmlParse(_) | Error::XmlAttribute(_) => "XmlParseError",
            Error::InvalidDocument(_) => "InvalidDocument",
            Error::MalformedFilename(_) => "MalformedFilename",
            Error::File { kind, .. } => *kind,
            Error::Discovery(_) => "DiscoveryError",
            Error::Io(_) => "IoError",
        }
    }

    /// Wraps an error raised while handling one input file, keeping the
    /// file path, the underlying kind and its message.
    pub fn in_file(path: impl AsRef<Path>, source: Error) -> Self {
        match source {
            file @ Error::File { .. } => file,
            source => Error::File {
                path: path.as_ref().to_path_buf(),
                kind: source.kind(),
                message: source.to_string(),
            },
        }
    }

    /// Returns the offending file for file-scoped errors.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Error::File { path, .. } => Some(path),
            Error::MalformedFilename(path) => Some(path),
            _ => None,
        }
    }
}
