//! CLI library for testing purposes

pub mod args;
pub mod merge;

pub use args::{Args, PrefixStrategyArg};
pub use merge::run_merge_command;
