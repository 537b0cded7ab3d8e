//! xxdupe - duplicate file finder
//!
//! Files under the given roots are filtered by size, fingerprinted with
//! XXH64 and grouped by fingerprint. Groups with more than one member are
//! reported, smallest first, newest copy first.
//!
//! The pipeline is split into:
//! - [`scanner`]: size filtering, discovery and fingerprinting
//! - [`duplicates`]: the concurrent index and the orchestrating finder
//! - [`report`]: grouping policy and totals
//! - [`output`]: text and JSON rendering

pub mod cli;
pub mod config;
pub mod duplicates;
pub mod error;
pub mod logging;
pub mod output;
pub mod progress;
pub mod report;
pub mod scanner;
pub mod signal;

use std::io::{self, Write};
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::cli::{Cli, OutputFormat};
use crate::config::Config;
use crate::duplicates::{DuplicateFinder, FinderConfig, ScanSummary};
use crate::duplicates::FinderError;
use crate::error::{AppError, ExitCode, StructuredError};
use crate::output::{JsonOutput, TextOutput};
use crate::progress::Progress;
use crate::report::{GroupReporter, Report};

/// Printed on stderr when a run is interrupted or panics.
pub const FORCED_EXIT: &str = "Forced exit.";

/// Run the application, writing the report to stdout.
///
/// # Errors
///
/// See [`run_app_with_writer`].
pub fn run_app(cli: Cli) -> Result<ExitCode> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_app_with_writer(cli, &mut out)
}

/// Run the application, writing the report to `out`.
///
/// Nothing is written to `out` unless the scan completes.
///
/// # Errors
///
/// Returns an error if an unsupported option is given, the configuration
/// is invalid, the scan is interrupted or hits an unreadable file, or the
/// report cannot be written.
pub fn run_app_with_writer<W: Write>(cli: Cli, out: &mut W) -> Result<ExitCode> {
    if cli.del_empty {
        return Err(AppError::Unsupported("--del-empty").into());
    }

    let config = Config::resolve(&cli).context("Failed to load configuration")?;
    log::debug!("Effective configuration: {config:?}");

    let handler = signal::install_handler()?;
    let mut finder_config = FinderConfig::default()
        .with_bounds(config.bounds())
        .with_jobs(config.jobs)
        .with_skip_unreadable(config.skip_unreadable)
        .with_shutdown_flag(handler.get_flag());
    if !cli.no_progress {
        finder_config = finder_config.with_progress_callback(Arc::new(Progress::new(cli.quiet)));
    }

    let finder = DuplicateFinder::new(finder_config);
    let (index, summary) = finder.find_duplicates(&cli.paths)?;

    let report = GroupReporter::new(config.report_options()).build(index);
    let exit_code = exit_code_for(&report, &summary);
    log::info!(
        "{} duplicate groups, {} duplicate files",
        report.groups.len(),
        report.num_dupes
    );

    match config.output {
        OutputFormat::Text => TextOutput::new(&report)
            .write_to(out)
            .context("Failed to write report")?,
        OutputFormat::Json => JsonOutput::new(&report, &summary, exit_code).write_to(out, true)?,
    }

    Ok(exit_code)
}

/// Exit code for a completed scan.
///
/// Recoverable notices take precedence over the duplicate outcome.
#[must_use]
pub fn exit_code_for(report: &Report, summary: &ScanSummary) -> ExitCode {
    if summary.has_warnings() {
        ExitCode::PartialSuccess
    } else if report.has_duplicates() {
        ExitCode::Success
    } else {
        ExitCode::NoDuplicates
    }
}

/// Exit code for a run that failed with `err`.
#[must_use]
pub fn exit_code_for_error(err: &anyhow::Error) -> ExitCode {
    match err.downcast_ref::<FinderError>() {
        Some(FinderError::Interrupted) => ExitCode::Interrupted,
        _ => ExitCode::GeneralError,
    }
}

/// Exit code and stderr text for a failed run.
///
/// In JSON mode the text is a serialized [`StructuredError`], for
/// interruptions too. Otherwise an interruption prints [`FORCED_EXIT`] and
/// any other failure a `[XDnnn] Error:` line.
#[must_use]
pub fn describe_error(err: &anyhow::Error, format: OutputFormat) -> (ExitCode, String) {
    let exit_code = exit_code_for_error(err);
    let plain = if exit_code == ExitCode::Interrupted {
        FORCED_EXIT.to_string()
    } else {
        format!("[{}] Error: {err:#}", exit_code.code_prefix())
    };

    let message = match format {
        OutputFormat::Text => plain,
        OutputFormat::Json => {
            serde_json::to_string_pretty(&StructuredError::new(err, exit_code)).unwrap_or(plain)
        }
    };
    (exit_code, message)
}
