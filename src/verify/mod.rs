//! Verification run
//!
//! This module ties the pipeline together:
//! - Per-record outcomes (pass, correction, error)
//! - The run report the outcomes are folded into
//! - The coordinator that processes records one at a time

mod coordinator;

pub use crate::reconcile::CorrectionEntry;
pub use coordinator::{check_page, Verifier};

use crate::config::Config;
use crate::output::write_reports;
use crate::records::{filter_records, load_records};
use std::fmt;
use std::path::Path;

/// Why a record could not be checked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorReason {
    /// The evidence link could not be opened (timeout, network, not HTML)
    CannotOpen,

    /// No registered layout matched the page
    NoSelectorMatch,

    /// A layout matched but its fields could not be read
    ExtractionFailed,
}

impl ErrorReason {
    /// Every reason, in report order
    pub const ALL: [ErrorReason; 3] = [
        ErrorReason::CannotOpen,
        ErrorReason::NoSelectorMatch,
        ErrorReason::ExtractionFailed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CannotOpen => "cannot open",
            Self::NoSelectorMatch => "selector mismatch",
            Self::ExtractionFailed => "extraction failed",
        }
    }
}

impl fmt::Display for ErrorReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A record that needs manual checking because it could not be verified
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorEntry {
    pub id: String,
    pub reason: ErrorReason,
    /// Underlying error text, kept for logs
    pub cause: String,
}

/// The single result of checking one record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Passed,
    Corrected(CorrectionEntry),
    Failed(ErrorEntry),
}

/// Everything a run found, in record order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Number of records checked
    pub checked: usize,
    /// Ids of records that matched their evidence page
    pub passed: Vec<String>,
    pub corrections: Vec<CorrectionEntry>,
    pub errors: Vec<ErrorEntry>,
}

impl RunReport {
    /// Folds one record's outcome into the report
    pub fn record(&mut self, id: &str, outcome: Outcome) {
        self.checked += 1;
        match outcome {
            Outcome::Passed => self.passed.push(id.to_string()),
            Outcome::Corrected(entry) => self.corrections.push(entry),
            Outcome::Failed(entry) => self.errors.push(entry),
        }
    }
}

/// Runs a complete verification
///
/// 1. Load the expected records (fatal on failure)
/// 2. Apply the allow-list and ignore-list
/// 3. Check every remaining record, one at a time
/// 4. Write both reports
pub async fn run_verification(config: Config) -> crate::Result<RunReport> {
    let records = load_records(Path::new(&config.input.records_path), &config.input.columns)?;
    let total = records.len();
    let records = filter_records(records, &config.filter);
    tracing::info!(
        "Loaded {} records, {} selected for checking",
        total,
        records.len()
    );

    let verifier = Verifier::launch(&config).await?;
    let report = verifier.run(&records).await;
    verifier.close().await;

    tracing::info!("Generating reports...");
    let paths = write_reports(&report, &config.output)?;
    tracing::info!(
        "Reports written to {} and {}",
        paths.corrections.display(),
        paths.errors.display()
    );

    Ok(report)
}
