//! Validation command handler and file discovery

use crate::cli::{OutputFormat, ValidateArgs};
use crate::error::{Error, Result};
use crate::output::OutputWriter;
use satchel_core::{
    DocumentParser, ParseOptions, SalvageMethod, ValidationConfig, ValidationError,
};
use serde::Serialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};
use walkdir::WalkDir;

/// Outcome of checking a single file
#[derive(Debug, Serialize)]
struct FileReport {
    path: PathBuf,
    status: FileStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    repaired: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    violations: Vec<ValidationError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// How a file fared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum FileStatus {
    /// Parsed and validated; lenient runs may still carry pruned violations
    Valid,
    /// Parsed, but the document violates the schema
    Invalid,
    /// Never reached validation (unreadable, malformed, or too deep)
    Error,
}

/// Aggregate outcome of a validation run
#[derive(Debug, Serialize)]
struct RunReport {
    total: usize,
    failed: usize,
    files: Vec<FileReport>,
}

/// Handle the validate command
#[instrument(
    skip(args, output),
    fields(paths = args.paths.len(), strict = args.strict, lenient = args.lenient)
)]
pub fn handle_validate(args: ValidateArgs, output: &mut OutputWriter) -> Result<()> {
    let files = discover_files(&args.paths)?;
    if files.is_empty() {
        return Err(Error::invalid_args(
            "no .json files found under the given paths",
        ));
    }
    info!("Validating {} file(s)", files.len());
    output.info(&format!("Checking {} file(s)", files.len()))?;

    let options = build_options(&args);
    let parser = DocumentParser::with_config(options.document.clone());

    let mut reports = Vec::with_capacity(files.len());
    for file in &files {
        let report = check_file(file, &args, &options, &parser);
        render_file_report(output, &report)?;
        reports.push(report);
    }

    let failed = reports
        .iter()
        .filter(|r| r.status != FileStatus::Valid)
        .count();
    let run = RunReport {
        total: reports.len(),
        failed,
        files: reports,
    };

    if output.format() == OutputFormat::Json {
        output.data(&run)?;
    } else {
        output.section("Summary")?;
        if run.failed == 0 {
            output.success(&format!("✓ {} document(s) valid", run.total))?;
        } else {
            output.error(&format!(
                "✗ {} of {} document(s) failed",
                run.failed, run.total
            ))?;
        }
    }

    if run.failed > 0 {
        return Err(Error::ValidationFailed {
            failed: run.failed,
            total: run.total,
        });
    }
    Ok(())
}

/// Validation settings implied by the flags
fn build_options(args: &ValidateArgs) -> ParseOptions {
    let validation = if args.strict {
        ValidationConfig::strict()
    } else {
        ValidationConfig::basic()
    };
    ParseOptions::new().with_validation(validation)
}

/// Expand the given paths into a list of collection files
///
/// Directories are walked recursively for `*.json`; explicit files are
/// taken as given, whatever their extension.
fn discover_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            collect_json_files(path, &mut files);
        } else if path.is_file() {
            files.push(path.clone());
        } else {
            return Err(Error::FileNotFound { path: path.clone() });
        }
    }
    Ok(files)
}

fn collect_json_files(dir: &Path, files: &mut Vec<PathBuf>) {
    for entry in WalkDir::new(dir)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("json") {
            files.push(path.to_path_buf());
        }
    }
}

/// Run one file through the document layer and the validator
fn check_file(
    path: &Path,
    args: &ValidateArgs,
    options: &ParseOptions,
    parser: &DocumentParser,
) -> FileReport {
    debug!(file = %path.display(), "checking");

    let (document, repaired) = match load_document(path, args.salvage, parser) {
        Ok(loaded) => loaded,
        Err(e) => {
            warn!(file = %path.display(), error = %e, "document never reached validation");
            return FileReport {
                path: path.to_path_buf(),
                status: FileStatus::Error,
                repaired: None,
                violations: Vec::new(),
                error: Some(e.to_string()),
            };
        }
    };

    if args.lenient {
        match satchel_core::parse_value_lenient(&document, options) {
            Ok(report) => FileReport {
                path: path.to_path_buf(),
                status: FileStatus::Valid,
                repaired,
                violations: report.violations.into_iter().collect(),
                error: None,
            },
            Err(e) => fatal_report(path, repaired, e),
        }
    } else {
        let violations = satchel_core::validate_with(&document, &options.validation);
        if violations.is_empty() {
            FileReport {
                path: path.to_path_buf(),
                status: FileStatus::Valid,
                repaired,
                violations: Vec::new(),
                error: None,
            }
        } else {
            FileReport {
                path: path.to_path_buf(),
                status: FileStatus::Invalid,
                repaired,
                violations: violations.into_iter().collect(),
                error: None,
            }
        }
    }
}

/// Load the raw JSON value, optionally repairing truncated text first
fn load_document(
    path: &Path,
    salvage: bool,
    parser: &DocumentParser,
) -> satchel_core::Result<(Value, Option<String>)> {
    if salvage {
        let salvaged = parser.salvage_file(path)?;
        let note = (salvaged.method != SalvageMethod::ExactObject)
            .then(|| salvaged.method.to_string());
        Ok((salvaged.value, note))
    } else {
        Ok((parser.parse_file(path)?, None))
    }
}

/// Report for a document whose required core failed even the lenient walk
fn fatal_report(path: &Path, repaired: Option<String>, error: satchel_core::Error) -> FileReport {
    let violations: Vec<ValidationError> = error
        .violations()
        .map(|v| v.iter().cloned().collect())
        .unwrap_or_default();
    let error_text = if violations.is_empty() {
        Some(error.to_string())
    } else {
        None
    };
    FileReport {
        path: path.to_path_buf(),
        status: FileStatus::Invalid,
        repaired,
        violations,
        error: error_text,
    }
}

/// Per-file lines in human mode; JSON mode defers to the final run report
fn render_file_report(output: &mut OutputWriter, report: &FileReport) -> Result<()> {
    if output.format() != OutputFormat::Human {
        return Ok(());
    }

    if let Some(method) = &report.repaired {
        output.warning(&format!("{}: {}", report.path.display(), method))?;
    }

    match report.status {
        FileStatus::Valid if report.violations.is_empty() => {
            output.success(&format!("✓ {}", report.path.display()))?;
        }
        FileStatus::Valid => {
            output.warning(&format!(
                "✓ {} ({} field(s) pruned)",
                report.path.display(),
                report.violations.len()
            ))?;
            for violation in &report.violations {
                output.violation(violation)?;
            }
        }
        FileStatus::Invalid => {
            output.error(&format!(
                "✗ {} ({} violation(s))",
                report.path.display(),
                report.violations.len()
            ))?;
            for violation in &report.violations {
                output.violation(violation)?;
            }
            if let Some(error) = &report.error {
                output.error(&format!("  {}", error))?;
            }
        }
        FileStatus::Error => {
            output.error(&format!("✗ {}", report.path.display()))?;
            if let Some(error) = &report.error {
                output.error(&format!("  {}", error))?;
            }
        }
    }
    Ok(())
}
