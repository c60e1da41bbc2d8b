//! # Check Command
//!
//! Loads a bundle, runs every rule, and writes the report.
//!
//! ## Guarantees
//!
//! - The report is written atomically: it is rendered in memory, written to
//!   a temporary file beside the destination, and renamed into place. A run
//!   that fails leaves any earlier report untouched and never leaves a
//!   partial one.
//! - A new report is created `0644`; a replaced report keeps its mode.
//! - The extraction directory is removed on success and on failure.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use mapp_bundle::load_bundle;
use mapp_rules::{render_json, run_checks, CheckOutcome, TextReport};

use crate::config::{CheckSettings, ReportFormat};

/// Exit status of a completed run.
pub const EXIT_OK: u8 = 0;

/// Exit status of a completed `--strict` run that recorded violations.
pub const EXIT_VIOLATIONS: u8 = 2;

/// Mode of a newly created report; an existing report keeps its own.
#[cfg(unix)]
pub const REPORT_MODE: u32 = 0o644;

/// Arguments selecting the bundle and where the report goes.
#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    /// Name and location of the mapp export file.
    #[arg(long, value_name = "PATH")]
    pub file: PathBuf,

    /// Report destination [default: results.txt].
    #[arg(long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Report format [default: text].
    #[arg(long, value_enum)]
    pub format: Option<ReportFormat>,

    /// Directory in which the bundle is unpacked [default: system temp dir].
    #[arg(long, value_name = "DIR")]
    pub work_dir: Option<PathBuf>,

    /// Exit with status 2 when any rule failed.
    #[arg(long)]
    pub strict: bool,
}

/// Execute one check run and return the process exit status.
pub fn run_check(settings: &CheckSettings) -> Result<u8> {
    let bundle = load_bundle(
        &settings.archive,
        &settings.layout,
        settings.work_dir.as_deref(),
    )
    .with_context(|| format!("failed to load bundle {}", settings.archive.display()))?;

    let outcome = run_checks(&bundle.metadata, &bundle.configuration)
        .with_context(|| format!("failed to check bundle {}", settings.archive.display()))?;

    let rendered = match settings.format {
        ReportFormat::Text => TextReport(&outcome).to_string(),
        ReportFormat::Json => render_json(&outcome).context("failed to encode JSON report")?,
    };
    write_report(&settings.output, rendered.as_bytes())?;

    tracing::info!(
        path = %settings.output.display(),
        format = ?settings.format,
        violations = outcome.violation_count(),
        "report written"
    );
    println!("{}", summary_line(&outcome));

    if settings.strict && !outcome.is_clean() {
        Ok(EXIT_VIOLATIONS)
    } else {
        Ok(EXIT_OK)
    }
}

/// One-line run summary for the terminal.
pub fn summary_line(outcome: &CheckOutcome) -> String {
    format!(
        "{} configuration, {} endpoint, {} service action failures",
        outcome.configuration.len(),
        outcome.endpoints.violation_count(),
        outcome.service_actions.violation_count(),
    )
}

/// Replace `path` with `contents` in a single rename.
pub fn write_report(path: &Path, contents: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut staged = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("failed to stage report in {}", dir.display()))?;
    staged
        .write_all(contents)
        .and_then(|()| staged.as_file().sync_all())
        .with_context(|| format!("failed to write report {}", path.display()))?;
    #[cfg(unix)]
    staged
        .as_file()
        .set_permissions(report_permissions(path))
        .with_context(|| format!("failed to set permissions on report {}", path.display()))?;
    staged
        .persist(path)
        .map_err(|e| e.error)
        .with_context(|| format!("failed to move report into place at {}", path.display()))?;
    Ok(())
}

// The staging file is created owner-only.
#[cfg(unix)]
fn report_permissions(path: &Path) -> std::fs::Permissions {
    use std::os::unix::fs::PermissionsExt;

    match std::fs::metadata(path) {
        Ok(existing) => existing.permissions(),
        Err(_) => std::fs::Permissions::from_mode(REPORT_MODE),
    }
}
