//! Naming policies turning a file base name into a message id prefix.

use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::Error;

lazy_static! {
    static ref LOWER_UPPER: Regex = Regex::new(r"([\p{Ll}\p{Nd}])(\p{Lu})").unwrap();
    static ref UPPER_UPPER_LOWER: Regex = Regex::new(r"(\p{Lu})(\p{Lu}\p{Ll})").unwrap();
    static ref NON_WORD: Regex = Regex::new(r"[^\p{L}\p{Nd}]+").unwrap();
}

const WORD_BREAK: char = '\0';

/// How the base name of a partial file becomes the prefix of its message ids.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum IdPrefixStrategy {
    /// `component-one` → `componentOne`
    #[default]
    CamelCase,
    /// `component-one` → `component-one`
    AsIs,
    /// `component-one` → `component.one`
    DotCase,
}

impl IdPrefixStrategy {
    pub fn apply(&self, base_name: &str) -> String {
        match self {
            IdPrefixStrategy::AsIs => base_name.to_string(),
            IdPrefixStrategy::CamelCase => camel_case(base_name),
            IdPrefixStrategy::DotCase => dot_case(base_name),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            IdPrefixStrategy::CamelCase => "camel-case",
            IdPrefixStrategy::AsIs => "as-is",
            IdPrefixStrategy::DotCase => "dot-case",
        }
    }
}

impl Display for IdPrefixStrategy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IdPrefixStrategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "camel-case" => Ok(IdPrefixStrategy::CamelCase),
            "as-is" => Ok(IdPrefixStrategy::AsIs),
            "dot-case" => Ok(IdPrefixStrategy::DotCase),
            other => Err(Error::UnknownPrefixStrategy(other.to_string())),
        }
    }
}

/// Splits on punctuation, on `aB` and on `ABc` boundaries.
fn split_words(input: &str) -> Vec<String> {
    let marked = LOWER_UPPER.replace_all(input, "${1}\0${2}");
    let marked = UPPER_UPPER_LOWER.replace_all(&marked, "${1}\0${2}");
    let marked = NON_WORD.replace_all(&marked, "\0");

    marked
        .split(WORD_BREAK)
        .filter(|word| !word.is_empty())
        .map(str::to_string)
        .collect()
}

fn camel_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for (index, word) in split_words(input).iter().enumerate() {
        let lower = word.to_lowercase();
        if index == 0 {
            out.push_str(&lower);
            continue;
        }
        let mut chars = lower.chars();
        if let Some(first) = chars.next() {
            if first.is_ascii_digit() {
                // a leading digit cannot be capitalized
                out.push('_');
                out.push(first);
            } else {
                out.extend(first.to_uppercase());
            }
            out.push_str(chars.as_str());
        }
    }
    out
}

fn dot_case(input: &str) -> String {
    split_words(input)
        .iter()
        .map(|word| word.to_lowercase())
        .collect::<Vec<_>>()
        .join(".")
}
