use crate::config::types::{ColumnNames, Config, FetcherConfig, InputConfig, OutputConfig};
use crate::ConfigError;
use std::collections::HashSet;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_input_config(&config.input)?;
    validate_fetcher_config(&config.fetcher)?;
    validate_output_config(&config.output)?;
    Ok(())
}

fn validate_input_config(config: &InputConfig) -> Result<(), ConfigError> {
    if config.records_path.trim().is_empty() {
        return Err(ConfigError::Validation(
            "records_path cannot be empty".to_string(),
        ));
    }

    validate_columns(&config.columns)
}

/// Column names must be non-empty and distinct
fn validate_columns(columns: &ColumnNames) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();
    for name in columns.all() {
        if name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "column names cannot be empty".to_string(),
            ));
        }
        if !seen.insert(name) {
            return Err(ConfigError::Validation(format!(
                "column '{}' is mapped more than once",
                name
            )));
        }
    }
    Ok(())
}

fn validate_fetcher_config(config: &FetcherConfig) -> Result<(), ConfigError> {
    if config.navigation_timeout_ms < 100 || config.navigation_timeout_ms > 600_000 {
        return Err(ConfigError::Validation(format!(
            "navigation_timeout_ms must be between 100 and 600000, got {}",
            config.navigation_timeout_ms
        )));
    }

    if config.selector_timeout_ms < 100 || config.selector_timeout_ms > 60_000 {
        return Err(ConfigError::Validation(format!(
            "selector_timeout_ms must be between 100 and 60000, got {}",
            config.selector_timeout_ms
        )));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    if let Some(executable) = &config.browser_executable {
        if executable.trim().is_empty() {
            return Err(ConfigError::Validation(
                "browser_executable cannot be empty when set".to_string(),
            ));
        }
    }

    Ok(())
}

fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.directory.trim().is_empty() {
        return Err(ConfigError::Validation(
            "output directory cannot be empty".to_string(),
        ));
    }

    validate_file_name("corrections_file", &config.corrections_file)?;
    validate_file_name("errors_file", &config.errors_file)?;

    if config.corrections_file == config.errors_file {
        return Err(ConfigError::Validation(format!(
            "corrections_file and errors_file must differ, both are '{}'",
            config.errors_file
        )));
    }

    Ok(())
}

/// Report names are plain file names inside the output directory
fn validate_file_name(field: &str, name: &str) -> Result<(), ConfigError> {
    if name.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{} cannot be empty", field)));
    }

    if name.contains('/') || name.contains('\\') || name == "." || name == ".." {
        return Err(ConfigError::Validation(format!(
            "{} must be a plain file name, got '{}'",
            field, name
        )));
    }

    Ok(())
}
