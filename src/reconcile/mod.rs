//! Field reconciliation
//!
//! Compares what a record expects against what its evidence page shows. Values
//! are trimmed at the edges and otherwise compared exactly, case included.

use crate::layout::ExtractedFields;
use crate::records::ExpectedRecord;
use serde::Serialize;

pub const TITLE_DIFFERS: &str = "title differs";
pub const YEAR_DIFFERS: &str = "year differs";
pub const PERSON_DIFFERS: &str = "involved person differs";

/// The reconciled fields, in the shape used for report dumps
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetadataFields {
    pub title: String,
    pub year: String,
    pub involved_person: String,
}

impl MetadataFields {
    /// Fields of the record as written in the input file
    pub fn from_record(record: &ExpectedRecord) -> Self {
        Self {
            title: record.title.clone(),
            year: record.year.clone(),
            involved_person: record.involved_person.clone(),
        }
    }

    /// Fields as read from the page, trimmed
    pub fn from_extracted(fields: &ExtractedFields) -> Self {
        Self {
            title: fields.title.trim().to_string(),
            year: fields.published_year.trim().to_string(),
            involved_person: fields.first_author.trim().to_string(),
        }
    }
}

/// A record whose evidence page disagrees with it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrectionEntry {
    pub id: String,
    /// Mismatch messages joined by a single space
    pub message: String,
    /// What the input file says
    pub original: MetadataFields,
    /// What the page says; always all three fields
    pub corrected: MetadataFields,
}

/// Mismatch messages for a record, in title, year, person order
pub fn mismatches(record: &ExpectedRecord, extracted: &ExtractedFields) -> Vec<&'static str> {
    let pairs = [
        (&record.title, &extracted.title, TITLE_DIFFERS),
        (&record.year, &extracted.published_year, YEAR_DIFFERS),
        (&record.involved_person, &extracted.first_author, PERSON_DIFFERS),
    ];

    pairs
        .into_iter()
        .filter(|(expected, found, _)| expected.trim() != found.trim())
        .map(|(_, _, message)| message)
        .collect()
}

/// Reconciles one record against its extracted fields
///
/// Returns `None` when every field agrees.
pub fn reconcile(record: &ExpectedRecord, extracted: &ExtractedFields) -> Option<CorrectionEntry> {
    let messages = mismatches(record, extracted);
    if messages.is_empty() {
        return None;
    }

    Some(CorrectionEntry {
        id: record.id.clone(),
        message: messages.join(" "),
        original: MetadataFields::from_record(record),
        corrected: MetadataFields::from_extracted(extracted),
    })
}
