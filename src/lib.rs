//! journal-verify: checks academic-output records against their evidence pages
//!
//! Each record in the input CSV names a title, a year, an involved person and a
//! link to the page that is supposed to host the published work. The crate
//! fetches every link, recognises the journal platform's page layout, extracts the
//! published metadata and reports the records that need a manual correction.

pub mod config;
pub mod layout;
pub mod output;
pub mod page;
pub mod reconcile;
pub mod records;
pub mod verify;

use thiserror::Error;

/// Main error type for journal-verify operations
#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Record error: {0}")]
    Records(#[from] RecordError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("Browser error: {0}")]
    Browser(#[from] BrowserError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Errors raised while loading the expected records
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("Failed to read records file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing required column '{0}'")]
    MissingColumn(String),
}

/// Errors raised while starting or driving the headless browser
#[derive(Debug, Error)]
pub enum BrowserError {
    #[error("Invalid browser configuration: {0}")]
    Config(String),

    #[error("DevTools protocol error: {0}")]
    Cdp(#[from] chromiumoxide::error::CdpError),
}

/// Why an evidence link could not be opened
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Navigation timed out after {0:?}")]
    Timeout(std::time::Duration),

    #[error("Expected HTML, got {0}")]
    ContentMismatch(String),

    #[error("{0}")]
    Network(String),
}

/// Errors raised while reading fields out of a matched page
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExtractError {
    #[error("Invalid selector '{0}'")]
    InvalidSelector(String),

    #[error("No element matches '{0}'")]
    MissingElement(String),

    #[error("Field '{0}' is empty")]
    EmptyField(&'static str),

    #[error("Cannot read a year from date '{0}'")]
    UnparsableDate(String),

    #[error("Page query failed: {0}")]
    Render(String),
}

/// Result type alias for journal-verify operations
pub type Result<T> = std::result::Result<T, VerifyError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for record loading
pub type RecordResult<T> = std::result::Result<T, RecordError>;

/// Result type alias for field extraction
pub type ExtractResult<T> = std::result::Result<T, ExtractError>;

// Re-export commonly used types
pub use config::Config;
pub use layout::{ExtractedFields, Layout, LayoutRegistry};
pub use page::Page;
pub use records::ExpectedRecord;
pub use verify::{CorrectionEntry, ErrorEntry, ErrorReason, Outcome, RunReport};
