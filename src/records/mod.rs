//! Expected records
//!
//! This module loads the records to be verified from the input CSV and applies
//! the configured allow-list and ignore-list before any page is fetched.

mod filter;
mod loader;

pub use filter::{filter_records, normalize_id};
pub use loader::{load_records, parse_records};

/// One row of the input file: what the evidence page is expected to show
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpectedRecord {
    pub id: String,
    pub title: String,
    pub year: String,
    pub involved_person: String,
    pub output_type: String,
    pub evidence_link: String,
}
