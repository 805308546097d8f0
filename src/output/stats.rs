//! Run statistics
//!
//! Summarises a finished run for the console.

use crate::verify::{ErrorReason, RunReport};
use std::collections::HashMap;

/// Run statistics summary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunStatistics {
    /// Records checked
    pub checked: usize,

    /// Records matching their evidence page
    pub passed: usize,

    /// Records needing a correction
    pub corrected: usize,

    /// Records that could not be checked, by reason
    pub errors_by_reason: HashMap<ErrorReason, usize>,
}

impl RunStatistics {
    pub fn from_report(report: &RunReport) -> Self {
        let mut errors_by_reason = HashMap::new();
        for error in &report.errors {
            *errors_by_reason.entry(error.reason).or_insert(0) += 1;
        }

        Self {
            checked: report.checked,
            passed: report.passed.len(),
            corrected: report.corrections.len(),
            errors_by_reason,
        }
    }

    pub fn total_errors(&self) -> usize {
        self.errors_by_reason.values().sum()
    }

    /// Share of checked records that passed, in percent
    pub fn pass_rate(&self) -> f64 {
        if self.checked == 0 {
            0.0
        } else {
            (self.passed as f64 / self.checked as f64) * 100.0
        }
    }
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &RunStatistics) {
    println!("=== Verification Statistics ===\n");

    println!("Overview:");
    println!("  Records checked: {}", stats.checked);
    println!("  Passed: {}", stats.passed);
    println!("  Needing correction: {}", stats.corrected);
    println!("  Errors: {}", stats.total_errors());
    println!();

    if stats.total_errors() > 0 {
        println!("Error Summary:");
        for reason in ErrorReason::ALL {
            if let Some(count) = stats.errors_by_reason.get(&reason) {
                println!("  {}: {}", reason, count);
            }
        }
        println!();
    }

    println!(
        "Pass Rate: {:.1}% ({} / {} records)",
        stats.pass_rate(),
        stats.passed,
        stats.checked
    );
}
