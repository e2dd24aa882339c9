#![forbid(unsafe_code)]
//! Merges partial i18n translation files into one file per language.
//!
//! Projects that keep translations next to their components end up with many
//! files such as `header.messages.fr.json` or `home.messages.fr.xlf`. This
//! crate finds those partials, groups them by language and writes one
//! `messages.<lang>.<ext>` per language.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use i18nmerge::{FormatType, IdPrefixStrategy, MergeOptions};
//!
//! let options = MergeOptions::new("src", "src/locale")
//!     .with_id_prefix(IdPrefixStrategy::CamelCase);
//! let report = FormatType::Xliff12.merge(&options)?;
//! for file in &report.written {
//!     println!("{} -> {}", file.language, file.path.display());
//! }
//! # Ok::<(), i18nmerge::Error>(())
//! ```
//!
//! # Supported Formats
//!
//! - **JSON** (`json`): `{"locale": ..., "translations": {...}}` output
//! - **ARB** (`arb`): Application Resource Bundle with `@@locale`
//! - **XLIFF 1.2** (`xlf`): `trans-unit` elements under `body`
//! - **XLIFF 2.0** (`xlf2`, written as `.xlf`): `unit` elements under `file`
//! - **XTB** (`xtb`): `translation` elements under `translationbundle`

pub mod discovery;
pub mod error;
pub mod executor;
pub mod filename;
pub mod formats;
pub mod prefix;
pub mod traits;
pub mod xml;

// Re-export most used types for easy consumption
pub use crate::{
    error::Error,
    executor::{MergeExecutor, MergeOptions, MergeReport, WrittenFile},
    formats::FormatType,
    prefix::IdPrefixStrategy,
    traits::MergeStrategy,
};
