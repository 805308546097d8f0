//! Plain-text report formatting
//!
//! Both reports start with a header sentence followed by two blank lines.
//! Corrections are blocks separated by a blank line; errors are one per line.

use crate::output::OutputResult;
use crate::reconcile::CorrectionEntry;
use crate::verify::ErrorEntry;

pub const CORRECTIONS_HEADER: &str =
    "Please correct the following records manually based on the report below.";

pub const ERRORS_HEADER: &str =
    "The following records could not be checked, please verify them manually.";

/// Formats the corrections report
///
/// Each block looks like:
///
/// ```text
/// ID: 27
/// Original data: {"title":"Study X","year":"2022","involved_person":"Jane Doe"}
/// Correction: title differs
/// Corrected data: {
///   "title": "Study Y",
///   "year": "2022",
///   "involved_person": "Jane Doe"
/// }
/// ```
pub fn format_corrections_report(corrections: &[CorrectionEntry]) -> OutputResult<String> {
    let blocks = corrections
        .iter()
        .map(format_correction)
        .collect::<OutputResult<Vec<_>>>()?;

    Ok(format!("{}\n\n\n{}", CORRECTIONS_HEADER, blocks.join("\n\n")))
}

fn format_correction(correction: &CorrectionEntry) -> OutputResult<String> {
    Ok(format!(
        "ID: {}\nOriginal data: {}\nCorrection: {}\nCorrected data: {}",
        correction.id,
        serde_json::to_string(&correction.original)?,
        correction.message,
        serde_json::to_string_pretty(&correction.corrected)?,
    ))
}

/// Formats the errors report, one `ID <id>, Reason: <reason>` line per entry
pub fn format_errors_report(errors: &[ErrorEntry]) -> String {
    let lines: Vec<String> = errors
        .iter()
        .map(|error| format!("ID {}, Reason: {}", error.id, error.reason))
        .collect();

    format!("{}\n\n\n{}", ERRORS_HEADER, lines.join("\n"))
}
