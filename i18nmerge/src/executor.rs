//! The merge pipeline shared by all formats.
//!
//! For one run the [`MergeExecutor`] discovers the partial files, parses each
//! of them, optionally prefixes their message ids, groups them by language,
//! merges every group and finally writes one file per language. Nothing is
//! written unless every file was read, parsed and merged successfully.

use std::{
    fs,
    path::{Path, PathBuf},
};

use indexmap::IndexMap;
use tracing::{debug, info, warn};

use crate::{
    discovery::{find_translation_files, translation_file_pattern},
    error::Error,
    filename::FilenameConvention,
    prefix::IdPrefixStrategy,
    traits::MergeStrategy,
};

/// Separator placed between the id prefix and the original message id.
pub const MESSAGE_PREFIX_SEPARATOR: &str = ".";

/// Inputs of one merge run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOptions {
    /// Folder searched recursively for partial files.
    pub input_root: PathBuf,
    /// Folder receiving the merged files; created when missing.
    pub output_folder: PathBuf,
    /// Whether message ids get a prefix derived from the file base name.
    pub id_prefix: bool,
    pub id_prefix_strategy: IdPrefixStrategy,
    /// Language written as `messages.<ext>` instead of `messages.<lang>.<ext>`.
    pub default_language: Option<String>,
}

impl MergeOptions {
    pub fn new(input_root: impl Into<PathBuf>, output_folder: impl Into<PathBuf>) -> Self {
        MergeOptions {
            input_root: input_root.into(),
            output_folder: output_folder.into(),
            id_prefix: false,
            id_prefix_strategy: IdPrefixStrategy::default(),
            default_language: None,
        }
    }

    /// Enables id prefixes built with `strategy`.
    pub fn with_id_prefix(mut self, strategy: IdPrefixStrategy) -> Self {
        self.id_prefix = true;
        self.id_prefix_strategy = strategy;
        self
    }

    pub fn with_default_language(mut self, language: Option<String>) -> Self {
        self.default_language = language;
        self
    }
}

/// A merged file written by a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFile {
    pub language: String,
    pub path: PathBuf,
}

/// Outcome of a successful run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeReport {
    /// Number of partial files that were merged.
    pub input_files: usize,
    /// Files written, one per language, in the order languages were first seen.
    pub written: Vec<WrittenFile>,
}

impl MergeReport {
    /// `true` when no partial file was found.
    pub fn is_empty(&self) -> bool {
        self.input_files == 0
    }
}

/// Merges the partial translation files of one format.
#[derive(Debug)]
pub struct MergeExecutor<S: MergeStrategy> {
    strategy: S,
    convention: FilenameConvention,
}

impl<S: MergeStrategy> MergeExecutor<S> {
    pub fn new(strategy: S) -> Result<Self, Error> {
        let convention = FilenameConvention::new(strategy.extension())?;
        Ok(MergeExecutor {
            strategy,
            convention,
        })
    }

    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    /// Merges every partial file found under `options.input_root` and saves
    /// the result to `options.output_folder`.
    ///
    /// Finding no file is not an error: a warning is logged and an empty
    /// report returned.
    pub fn merge(&self, options: &MergeOptions) -> Result<MergeReport, Error> {
        let paths = find_translation_files(&options.input_root, self.strategy.extension())?;
        if paths.is_empty() {
            warn!(
                "Didn't find any files on folder '{}' matching pattern '{}'.",
                options.input_root.display(),
                translation_file_pattern(self.strategy.extension())
            );
            return Ok(MergeReport::default());
        }
        self.merge_files(&paths, options)
    }

    /// Merges the given partial files, in the given order.
    pub fn merge_files<P: AsRef<Path>>(
        &self,
        paths: &[P],
        options: &MergeOptions,
    ) -> Result<MergeReport, Error> {
        if paths.is_empty() {
            warn!("No translation files to merge.");
            return Ok(MergeReport::default());
        }

        let groups = self.group_by_language(paths, options)?;

        let mut merged_contents = Vec::with_capacity(groups.len());
        for (language, partials) in groups {
            debug!("merging {} file(s) for language '{}'", partials.len(), language);
            let merged = self.strategy.merge_objects(&language, partials);
            let content = self.strategy.object_to_string(&merged)?;
            merged_contents.push((language, content));
        }

        let written = self.save_to_files(merged_contents, options)?;
        Ok(MergeReport {
            input_files: paths.len(),
            written,
        })
    }

    /// Parses every file and groups the documents by language, keeping the
    /// order in which files were given.
    fn group_by_language<P: AsRef<Path>>(
        &self,
        paths: &[P],
        options: &MergeOptions,
    ) -> Result<IndexMap<String, Vec<S::Document>>, Error> {
        let mut groups: IndexMap<String, Vec<S::Document>> = IndexMap::new();

        for path in paths {
            let path = path.as_ref();
            let name = self.convention.parse(path)?;
            let document = self.load_partial(path, &name.base_name, options)?;
            groups.entry(name.language).or_default().push(document);
        }

        Ok(groups)
    }

    fn load_partial(
        &self,
        path: &Path,
        base_name: &str,
        options: &MergeOptions,
    ) -> Result<S::Document, Error> {
        debug!("reading {}", path.display());
        let document = self
            .strategy
            .parse_file(path)
            .map_err(|e| Error::in_file(path, e))?;

        if !options.id_prefix {
            return Ok(document);
        }
        let prefix = options.id_prefix_strategy.apply(base_name);
        Ok(self
            .strategy
            .add_prefix_to_message_ids(document, &prefix, MESSAGE_PREFIX_SEPARATOR))
    }

    fn save_to_files(
        &self,
        merged_contents: Vec<(String, String)>,
        options: &MergeOptions,
    ) -> Result<Vec<WrittenFile>, Error> {
        fs::create_dir_all(&options.output_folder)?;

        let mut written = Vec::with_capacity(merged_contents.len());
        for (language, content) in merged_contents {
            let path = options
                .output_folder
                .join(self.output_file_name(&language, options));
            fs::write(&path, content)?;
            info!("Merged translation file generated at: {}", path.display());
            written.push(WrittenFile { language, path });
        }
        Ok(written)
    }

    fn output_file_name(&self, language: &str, options: &MergeOptions) -> String {
        let extension = self.strategy.extension();
        if options.default_language.as_deref() == Some(language) {
            format!("messages.{}", extension)
        } else {
            format!("messages.{}.{}", language, extension)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::{ArbFormat, JsonFormat, Xliff12Format};
    use serde_json::{Value, json};
    use tempfile::TempDir;

    fn write(root: &Path, relative: &str, content: &str) -> PathBuf {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
        path
    }

    fn read_json(path: &Path) -> Value {
        serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
    }

    #[test]
    fn test_merge_groups_by_language() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("src");
        let output = dir.path().join("out");
        write(&input, "a/a.messages.en.json", r#"{"k1": "v1"}"#);
        write(&input, "b/b.messages.en.json", r#"{"k2": "v2"}"#);
        write(&input, "a/a.messages.fr.json", r#"{"k1": "f1"}"#);

        let executor = MergeExecutor::new(JsonFormat).unwrap();
        let report = executor.merge(&MergeOptions::new(&input, &output)).unwrap();

        assert_eq!(report.input_files, 3);
        let languages: Vec<_> = report.written.iter().map(|w| w.language.as_str()).collect();
        assert_eq!(languages, vec!["en", "fr"]);

        assert_eq!(
            read_json(&output.join("messages.en.json")),
            json!({"locale": "en", "translations": {"k1": "v1", "k2": "v2"}})
        );
        assert_eq!(
            read_json(&output.join("messages.fr.json")),
            json!({"locale": "fr", "translations": {"k1": "f1"}})
        );
    }

    #[test]
    fn test_merge_files_uses_given_order() {
        let dir = TempDir::new().unwrap();
        let first = write(dir.path(), "z.messages.en.arb", r#"{"k": "from z"}"#);
        let second = write(dir.path(), "a.messages.en.arb", r#"{"k": "from a"}"#);
        let output = dir.path().join("out");

        let executor = MergeExecutor::new(ArbFormat).unwrap();
        executor
            .merge_files(&[first, second], &MergeOptions::new(dir.path(), &output))
            .unwrap();

        assert_eq!(
            read_json(&output.join("messages.en.arb")),
            json!({"@@locale": "en", "k": "from a"})
        );
    }

    #[test]
    fn test_merge_with_prefix() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "in/home-page.messages.en.json", r#"{"title": "T"}"#);
        let output = dir.path().join("out");

        let options = MergeOptions::new(dir.path().join("in"), &output)
            .with_id_prefix(IdPrefixStrategy::DotCase);
        MergeExecutor::new(JsonFormat)
            .unwrap()
            .merge(&options)
            .unwrap();

        assert_eq!(
            read_json(&output.join("messages.en.json"))["translations"],
            json!({"home.page.title": "T"})
        );
    }

    #[test]
    fn test_default_language_file_name() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "in/a.messages.en.json", r#"{"k": "v"}"#);
        write(dir.path(), "in/a.messages.de.json", r#"{"k": "w"}"#);
        let output = dir.path().join("out");

        let options = MergeOptions::new(dir.path().join("in"), &output)
            .with_default_language(Some("en".to_string()));
        let report = MergeExecutor::new(JsonFormat)
            .unwrap()
            .merge(&options)
            .unwrap();

        let names: Vec<_> = report
            .written
            .iter()
            .map(|w| w.path.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["messages.de.json", "messages.json"]);
        assert!(output.join("messages.json").exists());
        assert!(!output.join("messages.en.json").exists());
    }

    #[test]
    fn test_no_files_is_not_an_error() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("out");

        let report = MergeExecutor::new(JsonFormat)
            .unwrap()
            .merge(&MergeOptions::new(dir.path(), &output))
            .unwrap();

        assert!(report.is_empty());
        assert!(report.written.is_empty());
        assert!(!output.exists());
    }

    #[test]
    fn test_parse_error_aborts_without_output() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "in/a.messages.en.xlf", "<xliff><file><body></xliff>");
        write(dir.path(), "in/b.messages.fr.xlf", "<xliff/>");
        let output = dir.path().join("out");

        let err = MergeExecutor::new(Xliff12Format)
            .unwrap()
            .merge(&MergeOptions::new(dir.path().join("in"), &output))
            .unwrap_err();

        match err {
            Error::File { path, kind, .. } => {
                assert!(path.ends_with("a.messages.en.xlf"));
                assert_eq!(kind, "XmlParseError");
            }
            other => panic!("unexpected error {:?}", other),
        }
        assert!(!output.exists());
    }

    #[test]
    fn test_malformed_filename_aborts() {
        let dir = TempDir::new().unwrap();
        let path = write(dir.path(), "strings.en.json", "{}");

        let err = MergeExecutor::new(JsonFormat)
            .unwrap()
            .merge_files(&[path], &MergeOptions::new(dir.path(), dir.path().join("out")))
            .unwrap_err();
        assert!(matches!(err, Error::MalformedFilename(_)));
    }

    #[test]
    fn test_unreadable_file_is_file_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("gone.messages.en.json");

        let err = MergeExecutor::new(JsonFormat)
            .unwrap()
            .merge_files(&[&missing], &MergeOptions::new(dir.path(), dir.path().join("out")))
            .unwrap_err();
        assert_eq!(err.kind(), "IoError");
        assert_eq!(err.path(), Some(missing.as_path()));
    }
}
