//! Output module for the correction and error reports
//!
//! This module handles:
//! - Formatting the corrections and errors reports
//! - Writing both reports once, at the end of a run
//! - Summarising a run on the console

mod report;
pub mod stats;

pub use report::{
    format_corrections_report, format_errors_report, CORRECTIONS_HEADER, ERRORS_HEADER,
};
pub use stats::{print_statistics, RunStatistics};

use crate::config::OutputConfig;
use crate::verify::RunReport;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to format output: {0}")]
    Format(#[from] serde_json::Error),

    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Where the reports of a run were written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPaths {
    pub corrections: PathBuf,
    pub errors: PathBuf,
}

/// Writes both reports into the configured output directory
///
/// The directory is created if needed. Existing reports are overwritten.
pub fn write_reports(report: &RunReport, config: &OutputConfig) -> OutputResult<ReportPaths> {
    let directory = Path::new(&config.directory);
    std::fs::create_dir_all(directory).map_err(|source| OutputError::Io {
        path: directory.to_path_buf(),
        source,
    })?;

    let paths = ReportPaths {
        corrections: directory.join(&config.corrections_file),
        errors: directory.join(&config.errors_file),
    };

    write_file(&paths.corrections, &format_corrections_report(&report.corrections)?)?;
    write_file(&paths.errors, &format_errors_report(&report.errors))?;

    Ok(paths)
}

fn write_file(path: &Path, content: &str) -> OutputResult<()> {
    std::fs::write(path, content).map_err(|source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    })
}
