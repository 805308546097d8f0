//! Verification coordinator - the per-record loop
//!
//! Records are processed strictly one after another through a single navigator:
//! open the evidence link, find the matching layout, extract the fields and
//! reconcile them. Every failure is turned into an outcome for that record; the
//! loop itself never stops early.

use crate::config::Config;
use crate::layout::LayoutRegistry;
use crate::page::{open_navigator, Navigator, Page};
use crate::reconcile::reconcile;
use crate::records::ExpectedRecord;
use crate::verify::{ErrorEntry, ErrorReason, Outcome, RunReport};
use std::time::Duration;

/// Checks records against their evidence pages
pub struct Verifier {
    navigator: Box<dyn Navigator>,
    registry: LayoutRegistry,
    selector_timeout: Duration,
}

impl Verifier {
    /// Opens the configured navigator and uses the built-in layouts
    pub async fn launch(config: &Config) -> crate::Result<Self> {
        let navigator = open_navigator(&config.fetcher).await?;
        Ok(Self::with_navigator(
            navigator,
            LayoutRegistry::with_defaults(),
            config.fetcher.selector_timeout(),
        ))
    }

    /// Creates a verifier from an already opened navigator and custom layouts
    pub fn with_navigator(
        navigator: Box<dyn Navigator>,
        registry: LayoutRegistry,
        selector_timeout: Duration,
    ) -> Self {
        Self {
            navigator,
            registry,
            selector_timeout,
        }
    }

    /// Checks every record in order and folds the outcomes into a report
    pub async fn run(&self, records: &[ExpectedRecord]) -> RunReport {
        let mut report = RunReport::default();
        let start_time = std::time::Instant::now();

        for (idx, record) in records.iter().enumerate() {
            tracing::info!(
                "[{}/{}] Processing record {}",
                idx + 1,
                records.len(),
                record.id
            );

            let outcome = self.verify_record(record).await;
            log_outcome(record, &outcome);
            report.record(&record.id, outcome);
        }

        tracing::info!(
            "Checked {} records in {:?}: {} passed, {} to correct, {} errors",
            report.checked,
            start_time.elapsed(),
            report.passed.len(),
            report.corrections.len(),
            report.errors.len()
        );

        report
    }

    /// Checks one record against its evidence page
    pub async fn verify_record(&self, record: &ExpectedRecord) -> Outcome {
        match self.navigator.open(&record.evidence_link).await {
            Ok(page) => {
                check_page(record, page.as_ref(), &self.registry, self.selector_timeout).await
            }
            Err(e) => failed(record, ErrorReason::CannotOpen, e.to_string()),
        }
    }

    /// Shuts the navigator down
    pub async fn close(mut self) {
        self.navigator.close().await;
    }
}

/// Matches, extracts and reconciles one record against an already loaded page
///
/// Each selector wait is bounded by `selector_timeout`.
pub async fn check_page(
    record: &ExpectedRecord,
    page: &dyn Page,
    registry: &LayoutRegistry,
    selector_timeout: Duration,
) -> Outcome {
    let layout = match registry.find_match(page, selector_timeout).await {
        Some(layout) => layout,
        None => {
            return failed(
                record,
                ErrorReason::NoSelectorMatch,
                format!("None of the {} layouts matched {}", registry.len(), page.url()),
            )
        }
    };

    let extracted = match layout.extract(page).await {
        Ok(fields) => fields,
        Err(e) => {
            return failed(
                record,
                ErrorReason::ExtractionFailed,
                format!("Layout {}: {}", layout.name(), e),
            )
        }
    };

    match reconcile(record, &extracted) {
        Some(correction) => Outcome::Corrected(correction),
        None => Outcome::Passed,
    }
}

fn failed(record: &ExpectedRecord, reason: ErrorReason, cause: String) -> Outcome {
    Outcome::Failed(ErrorEntry {
        id: record.id.clone(),
        reason,
        cause,
    })
}

fn log_outcome(record: &ExpectedRecord, outcome: &Outcome) {
    match outcome {
        Outcome::Passed => tracing::info!("[PASSED] Record {} matches", record.id),
        Outcome::Corrected(correction) => tracing::warn!(
            "[NOT PASSED] Record {} has a mismatch: {}",
            record.id,
            correction.message
        ),
        Outcome::Failed(error) => tracing::error!(
            "[ERROR {}] {}: {}",
            record.id,
            error.reason,
            error.cause
        ),
    }
}
