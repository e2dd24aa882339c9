use std::path::{Path, PathBuf};

use clap::Parser;
use i18nmerge::{IdPrefixStrategy, MergeOptions};

/// Merge partial translation files (`<name>.messages.<lang>.<ext>`) into one
/// file per language.
#[derive(Parser, Debug)]
#[command(name = "i18nmerge", author, version, about, long_about = None)]
pub struct Args {
    /// Root folder searched recursively for partial files [default: ./src]
    #[arg(short = 'i', long = "in", value_name = "DIR")]
    pub input: Option<PathBuf>,

    /// Folder receiving the merged files [default: ./src/locale]
    #[arg(short = 'o', long = "out", value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Format of the translation files: json, arb, xlf, xlf2 or xtb
    #[arg(short, long)]
    pub format: String,

    /// Prefix message ids with the base name of their file
    #[arg(long = "id-prefix", visible_alias = "ip")]
    pub id_prefix: bool,

    /// How the file base name is turned into an id prefix
    #[arg(
        long = "id-prefix-strategy",
        visible_alias = "ips",
        value_enum,
        default_value_t = PrefixStrategyArg::CamelCase
    )]
    pub id_prefix_strategy: PrefixStrategyArg,

    /// Language written to `messages.<ext>` instead of `messages.<lang>.<ext>`
    #[arg(long, value_name = "LANG")]
    pub default_language: Option<String>,

    /// Log every file read and every language merged
    #[arg(short, long)]
    pub verbose: bool,
}

/// Command line names of [`IdPrefixStrategy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum PrefixStrategyArg {
    /// `component-one` → `componentOne`
    CamelCase,
    /// `component-one` → `component-one`
    AsIs,
    /// `component-one` → `component.one`
    DotCase,
}

impl From<PrefixStrategyArg> for IdPrefixStrategy {
    fn from(arg: PrefixStrategyArg) -> Self {
        match arg {
            PrefixStrategyArg::CamelCase => IdPrefixStrategy::CamelCase,
            PrefixStrategyArg::AsIs => IdPrefixStrategy::AsIs,
            PrefixStrategyArg::DotCase => IdPrefixStrategy::DotCase,
        }
    }
}

impl Args {
    /// Builds the merge options, resolving relative folders against `cwd`.
    pub fn merge_options(&self, cwd: &Path) -> MergeOptions {
        let input = match &self.input {
            Some(input) => cwd.join(input),
            None => cwd.join("src"),
        };
        let output = match &self.output {
            Some(output) => cwd.join(output),
            None => cwd.join("src").join("locale"),
        };

        let mut options =
            MergeOptions::new(input, output).with_default_language(self.default_language.clone());
        options.id_prefix = self.id_prefix;
        options.id_prefix_strategy = self.id_prefix_strategy.into();
        options
    }

    /// Default log filter when `RUST_LOG` is not set.
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}
