use std::path::Path;

use i18nmerge::{Error, FormatType, MergeReport};
use tracing::{debug, error, info};

use crate::args::Args;

/// Run the merge command: resolve the format, then merge every partial file
/// under the input folder into one file per language.
pub fn run_merge_command(args: &Args, cwd: &Path) -> Result<MergeReport, Error> {
    let Some(format) = FormatType::resolve(&args.format) else {
        error!("Format '{}' is unknown.", args.format);
        return Err(Error::UnknownFormat(args.format.clone()));
    };

    let options = args.merge_options(cwd);
    debug!(
        "merging {} files from {} into {}",
        format,
        options.input_root.display(),
        options.output_folder.display()
    );

    match format.merge(&options) {
        Ok(report) => {
            if !report.is_empty() {
                info!(
                    "Merged {} file(s) into {} language file(s).",
                    report.input_files,
                    report.written.len()
                );
            }
            Ok(report)
        }
        Err(e) => {
            report_error(&e);
            Err(e)
        }
    }
}

fn report_error(e: &Error) {
    match e {
        Error::File {
            path,
            kind,
            message,
        } => error!(
            "Failed to merge '{}' ({}): {}",
            path.display(),
            kind,
            message
        ),
        other => error!("Merge failed ({}): {}", other.kind(), other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_unknown_format_touches_nothing() {
        let dir = TempDir::new().unwrap();
        let args = Args::try_parse_from(["i18nmerge", "-f", "yaml"]).unwrap();

        let err = run_merge_command(&args, dir.path()).unwrap_err();
        assert!(matches!(err, Error::UnknownFormat(ref f) if f == "yaml"));
        assert!(!dir.path().join("src").exists());
    }

    #[test]
    fn test_merges_under_default_folders() {
        let dir = TempDir::new().unwrap();
        let partial = dir.path().join("src/app/home.messages.en.json");
        fs::create_dir_all(partial.parent().unwrap()).unwrap();
        fs::write(&partial, r#"{"title": "Home"}"#).unwrap();

        let args = Args::try_parse_from(["i18nmerge", "-f", "json", "--ip"]).unwrap();
        let report = run_merge_command(&args, dir.path()).unwrap();

        assert_eq!(report.input_files, 1);
        let merged = fs::read_to_string(dir.path().join("src/locale/messages.en.json")).unwrap();
        assert!(merged.contains(r#""home.title": "Home""#));
    }
}
