//! Configuration module for journal-verify
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use journal_verify::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("verify.toml")).unwrap();
//! println!("Records come from: {}", config.input.records_path);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    ColumnNames, Config, FetcherConfig, FilterConfig, InputConfig, OutputConfig, RenderEngine,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
