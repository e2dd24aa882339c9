//! All supported translation file formats.
//!
//! Each format implements [`MergeStrategy`]; [`FormatType`] is the table
//! mapping a format token to its strategy.

pub mod arb;
pub mod json;
pub mod tree;
pub mod xliff12;
pub mod xliff20;
pub mod xtb;

use std::{
    fmt::{Display, Formatter},
    path::Path,
    str::FromStr,
};

// Reexporting the formats for easier access
pub use arb::Format as ArbFormat;
pub use json::{FlatDocument, Format as JsonFormat};
pub use tree::UnitLayout;
pub use xliff12::Format as Xliff12Format;
pub use xliff20::Format as Xliff20Format;
pub use xtb::Format as XtbFormat;

use crate::{
    error::Error,
    executor::{MergeExecutor, MergeOptions, MergeReport},
    traits::MergeStrategy,
};

/// Represents all supported translation file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatType {
    /// Flat key/value JSON (`json`).
    Json,
    /// Application Resource Bundle (`arb`).
    Arb,
    /// XLIFF 1.2 (`xlf`).
    Xliff12,
    /// XLIFF 2.0 (`xlf2`), sharing the `xlf` extension with XLIFF 1.2.
    Xliff20,
    /// XML Translation Bundle (`xtb`).
    Xtb,
}

impl FormatType {
    /// Every supported format, in token order.
    pub const ALL: [FormatType; 5] = [
        FormatType::Json,
        FormatType::Arb,
        FormatType::Xliff12,
        FormatType::Xliff20,
        FormatType::Xtb,
    ];

    /// Looks up the format for a token (`json`, `arb`, `xlf`, `xlf2`, `xtb`).
    ///
    /// Surrounding whitespace and ASCII case are ignored. Unknown tokens give
    /// `None`; reporting them is up to the caller.
    ///
    /// # Example
    /// ```rust
    /// use i18nmerge::formats::FormatType;
    /// assert_eq!(FormatType::resolve("xlf2"), Some(FormatType::Xliff20));
    /// assert_eq!(FormatType::resolve("po"), None);
    /// ```
    pub fn resolve(token: &str) -> Option<FormatType> {
        let token = token.trim();
        FormatType::ALL
            .into_iter()
            .find(|format| format.token().eq_ignore_ascii_case(token))
    }

    /// The token selecting this format.
    pub fn token(&self) -> &'static str {
        match self {
            FormatType::Json => "json",
            FormatType::Arb => "arb",
            FormatType::Xliff12 => "xlf",
            FormatType::Xliff20 => "xlf2",
            FormatType::Xtb => "xtb",
        }
    }

    /// Returns the file extension read and written for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            FormatType::Json => JsonFormat.extension(),
            FormatType::Arb => ArbFormat.extension(),
            FormatType::Xliff12 => Xliff12Format.extension(),
            FormatType::Xliff20 => Xliff20Format.extension(),
            FormatType::Xtb => XtbFormat.extension(),
        }
    }

    /// Discovers the partial files under `options.input_root` and merges them
    /// with this format's strategy.
    pub fn merge(&self, options: &MergeOptions) -> Result<MergeReport, Error> {
        match self {
            FormatType::Json => MergeExecutor::new(JsonFormat)?.merge(options),
            FormatType::Arb => MergeExecutor::new(ArbFormat)?.merge(options),
            FormatType::Xliff12 => MergeExecutor::new(Xliff12Format)?.merge(options),
            FormatType::Xliff20 => MergeExecutor::new(Xliff20Format)?.merge(options),
            FormatType::Xtb => MergeExecutor::new(XtbFormat)?.merge(options),
        }
    }

    /// Merges an explicit list of partial files with this format's strategy.
    pub fn merge_files<P: AsRef<Path>>(
        &self,
        paths: &[P],
        options: &MergeOptions,
    ) -> Result<MergeReport, Error> {
        match self {
            FormatType::Json => MergeExecutor::new(JsonFormat)?.merge_files(paths, options),
            FormatType::Arb => MergeExecutor::new(ArbFormat)?.merge_files(paths, options),
            FormatType::Xliff12 => MergeExecutor::new(Xliff12Format)?.merge_files(paths, options),
            FormatType::Xliff20 => MergeExecutor::new(Xliff20Format)?.merge_files(paths, options),
            FormatType::Xtb => MergeExecutor::new(XtbFormat)?.merge_files(paths, options),
        }
    }
}

impl Display for FormatType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.token())
    }
}

/// Implements [`std::str::FromStr`] on top of [`FormatType::resolve`].
///
/// Returns [`crate::error::Error::UnknownFormat`] for unknown strings.
///
/// # Example
/// ```rust
/// use i18nmerge::formats::FormatType;
/// use std::str::FromStr;
/// assert_eq!(FormatType::from_str("arb").unwrap(), FormatType::Arb);
/// assert!(FormatType::from_str("yaml").is_err());
/// ```
impl FromStr for FormatType {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FormatType::resolve(s).ok_or_else(|| Error::UnknownFormat(s.to_string()))
    }
}
