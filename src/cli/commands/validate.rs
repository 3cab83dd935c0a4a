//! Validate command
//!
//! Checks content files and reports every issue, in human or JSON form.

use std::fmt::Write as _;
use std::path::Path;

use folio_core::error::{ConfigError, ValidationIssue};
use folio_core::validation::ValidationResult;
use serde::Serialize;

use crate::cli::args::{OutputFormat, ValidateArgs};
use crate::config::ContentLoader;
use crate::error::FolioError;

/// Validation outcome for one file.
#[derive(Debug, Serialize)]
struct FileReport {
    file: String,
    valid: bool,
    errors: Vec<IssueReport>,
    warnings: Vec<IssueReport>,
}

#[derive(Debug, Serialize)]
struct IssueReport {
    path: String,
    message: String,
}

impl From<&ValidationIssue> for IssueReport {
    fn from(issue: &ValidationIssue) -> Self {
        Self {
            path: issue.path.clone(),
            message: issue.message.clone(),
        }
    }
}

impl FileReport {
    fn checked(file: &Path, result: &ValidationResult, strict: bool) -> Self {
        Self {
            file: file.display().to_string(),
            valid: result.is_valid() && (!strict || result.warnings.is_empty()),
            errors: result.errors.iter().map(IssueReport::from).collect(),
            warnings: result.warnings.iter().map(IssueReport::from).collect(),
        }
    }

    fn unreadable(file: &Path, error: &ConfigError) -> Self {
        Self {
            file: file.display().to_string(),
            valid: false,
            errors: vec![IssueReport {
                path: String::new(),
                message: error.to_string(),
            }],
            warnings: Vec::new(),
        }
    }
}

/// Validate content files without rendering.
///
/// # Errors
///
/// Returns an I/O error if any file does not exist, or
/// [`ConfigError::ValidationFailed`] if any file fails validation.
pub fn run(args: &ValidateArgs) -> Result<(), FolioError> {
    let loader = ContentLoader::default();
    let mut reports = Vec::with_capacity(args.files.len());

    for path in &args.files {
        if !path.exists() {
            return Err(FolioError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("file not found: {}", path.display()),
            )));
        }
        tracing::info!(file = %path.display(), "validating content");
        let report = match loader.check(path) {
            Ok(result) => FileReport::checked(path, &result, args.strict),
            Err(e) => FileReport::unreadable(path, &e),
        };
        reports.push(report);
    }

    print!("{}", format_reports(&reports, args.format)?);

    let count = reports.iter().filter(|r| !r.valid).count();
    if count > 0 {
        return Err(ConfigError::ValidationFailed { count }.into());
    }
    Ok(())
}

fn format_reports(reports: &[FileReport], format: OutputFormat) -> Result<String, FolioError> {
    match format {
        OutputFormat::Json => Ok(format!("{}\n", serde_json::to_string_pretty(reports)?)),
        OutputFormat::Human => {
            let mut out = String::new();
            for report in reports {
                let status = if report.valid { "ok" } else { "FAIL" };
                let _ = writeln!(out, "{status:<4} {}", report.file);
                for (label, issues) in [("error", &report.errors), ("warning", &report.warnings)] {
                    for issue in issues {
                        if issue.path.is_empty() {
                            let _ = writeln!(out, "  {label}: {}", issue.message);
                        } else {
                            let _ = writeln!(out, "  {label}: {} at {}", issue.message, issue.path);
                        }
                    }
                }
            }
            Ok(out)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::error::ExitCode;

    fn write(dir: &Path, name: &str, yaml: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, yaml).unwrap();
        path
    }

    const WARN_ONLY: &str = "profile:\n  name: Ada\n  titles: [Analyst]\n";
    const BROKEN: &str = "profile:\n  name: ''\n";

    fn args(files: Vec<PathBuf>, strict: bool) -> ValidateArgs {
        ValidateArgs {
            files,
            format: OutputFormat::Human,
            strict,
        }
    }

    #[test]
    fn test_warnings_pass_unless_strict() {
        let dir = tempfile::tempdir().unwrap();
        let file = write(dir.path(), "warn.yaml", WARN_ONLY);
        assert!(run(&args(vec![file.clone()], false)).is_ok());

        let err = run(&args(vec![file], true)).unwrap_err();
        assert_eq!(err.exit_code(), ExitCode::CONFIG_ERROR);
    }

    #[test]
    fn test_failures_are_counted() {
        let dir = tempfile::tempdir().unwrap();
        let files = vec![
            write(dir.path(), "a.yaml", BROKEN),
            write(dir.path(), "b.yaml", WARN_ONLY),
            write(dir.path(), "c.yaml", "profile: ["),
        ];
        let err = run(&args(files, false)).unwrap_err();
        assert!(matches!(
            err,
            FolioError::Config(ConfigError::ValidationFailed { count: 2 })
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = run(&args(vec![PathBuf::from("/no/such/file.yaml")], false)).unwrap_err();
        assert_eq!(err.exit_code(), ExitCode::IO_ERROR);
    }

    #[test]
    fn test_human_report_lists_issues() {
        let dir = tempfile::tempdir().unwrap();
        let file = write(dir.path(), "a.yaml", BROKEN);
        let result = ContentLoader::default().check(&file).unwrap();
        let text = format_reports(
            &[FileReport::checked(&file, &result, false)],
            OutputFormat::Human,
        )
        .unwrap();
        assert!(text.starts_with("FAIL "));
        assert!(text.contains("  error: name is empty at profile.name"));
        assert!(text.contains("  warning: "));
    }

    #[test]
    fn test_json_report_shape() {
        let dir = tempfile::tempdir().unwrap();
        let file = write(dir.path(), "w.yaml", WARN_ONLY);
        let result = ContentLoader::default().check(&file).unwrap();
        let text = format_reports(
            &[FileReport::checked(&file, &result, false)],
            OutputFormat::Json,
        )
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value[0]["valid"], true);
        assert_eq!(value[0]["errors"].as_array().unwrap().len(), 0);
        assert_eq!(value[0]["warnings"].as_array().unwrap().len(), 4);
    }
}
