//! Recursive lookup of partial translation files.

use std::path::{Path, PathBuf};

use globset::GlobBuilder;
use ignore::WalkBuilder;
use tracing::debug;

use crate::error::Error;

/// Glob matching the partial files of one extension, relative to the root.
pub fn translation_file_pattern(extension: &str) -> String {
    format!("**/*.messages.*.{}", extension)
}

/// Finds every file under `root` matching [`translation_file_pattern`].
///
/// Hidden files and directories are skipped; `.gitignore` and friends are
/// not consulted. Symlinked files are matched but symlinked directories are
/// not entered. The pattern ignores ASCII case, like the file name parser.
/// The result is sorted so that merges are reproducible. A root that does
/// not exist yields an empty list.
pub fn find_translation_files<P: AsRef<Path>>(
    root: P,
    extension: &str,
) -> Result<Vec<PathBuf>, Error> {
    let root = root.as_ref();
    if !root.is_dir() {
        debug!("input folder {} does not exist", root.display());
        return Ok(Vec::new());
    }

    let pattern = translation_file_pattern(extension);
    let matcher = GlobBuilder::new(&pattern)
        .literal_separator(true)
        .case_insensitive(true)
        .build()
        .map_err(|e| Error::Discovery(format!("invalid glob pattern '{}': {}", pattern, e)))?
        .compile_matcher();

    let walker = WalkBuilder::new(root)
        .standard_filters(false)
        .hidden(true)
        .build();

    let mut found = Vec::new();
    for dent in walker {
        let dent = dent.map_err(|e| Error::Discovery(e.to_string()))?;
        let is_file = dent.file_type().is_some_and(|t| t.is_file())
            || (dent.path_is_symlink() && dent.path().is_file());
        if !is_file {
            continue;
        }
        let relative = dent.path().strip_prefix(root).unwrap_or(dent.path());
        if matcher.is_match(relative) {
            found.push(dent.into_path());
        }
    }

    found.sort();
    debug!(
        "found {} file(s) matching '{}' under {}",
        found.len(),
        pattern,
        root.display()
    );
    Ok(found)
}
