use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parses and validates configuration text
pub(crate) fn parse_config(content: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(content)?;
    validate(&config)?;
    Ok(config)
}

/// Computes a SHA-256 hash of the configuration file content
///
/// Logged at startup so two report sets can be traced back to the exact
/// configuration (filters included) that produced them.
pub fn compute_config_hash(path: &Path) -> Result<String, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    let result = hasher.finalize();
    Ok(hex::encode(result))
}

/// Loads a configuration and returns both the config and its hash
pub fn load_config_with_hash(path: &Path) -> Result<(Config, String), ConfigError> {
    let config = load_config(path)?;
    let hash = compute_config_hash(path)?;
    Ok((config, hash))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::RenderEngine;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_valid_config() {
        let config_content = r#"
[input]
records-path = "./data.csv"

[fetcher]
engine = "static"
navigation-timeout-ms = 15000
selector-timeout-ms = 2000
user-agent = "TestAgent/1.0"

[output]
directory = "./result"

[filter]
only = [27, "29"]
ignore = [2, 14]
"#;

        let file = create_temp_config(config_content);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.input.records_path, "./data.csv");
        assert_eq!(config.fetcher.engine, RenderEngine::Static);
        assert_eq!(config.fetcher.navigation_timeout_ms, 15000);
        assert_eq!(config.fetcher.selector_timeout_ms, 2000);
        assert_eq!(config.fetcher.user_agent, "TestAgent/1.0");
        assert_eq!(config.output.corrections_file, "corrections.txt");
        assert_eq!(config.output.errors_file, "errors.txt");
        assert_eq!(config.filter.only, vec!["27", "29"]);
        assert_eq!(config.filter.ignore, vec!["2", "14"]);
    }

    #[test]
    fn test_defaults_for_optional_sections() {
        let config_content = r#"
[input]
records-path = "data.csv"

[output]
directory = "result"
"#;

        let file = create_temp_config(config_content);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.fetcher.engine, RenderEngine::Browser);
        assert_eq!(config.fetcher.navigation_timeout_ms, 30_000);
        assert_eq!(config.fetcher.selector_timeout_ms, 3_500);
        assert!(config.fetcher.headless);
        assert!(config.fetcher.browser_executable.is_none());
        assert!(config.fetcher.user_agent.starts_with("journal-verify/"));
        assert_eq!(config.input.columns.id, "id");
        assert_eq!(config.input.columns.evidence_link, "evidence-link");
        assert!(config.filter.only.is_empty());
        assert!(config.filter.ignore.is_empty());
    }

    #[test]
    fn test_custom_column_names() {
        let config_content = r#"
[input]
records-path = "data.csv"

[input.columns]
id = "No"
title = "Judul"

[output]
directory = "result"
"#;

        let config = parse_config(config_content).unwrap();
        assert_eq!(config.input.columns.id, "No");
        assert_eq!(config.input.columns.title, "Judul");
        assert_eq!(config.input.columns.year, "year");
    }

    #[test]
    fn test_unknown_engine_rejected() {
        let config_content = r#"
[input]
records-path = "data.csv"

[fetcher]
engine = "webkit"

[output]
directory = "result"
"#;

        assert!(matches!(
            parse_config(config_content).unwrap_err(),
            ConfigError::Parse(_)
        ));
    }

    #[test]
    fn test_load_config_with_invalid_path() {
        let result = load_config(Path::new("/nonexistent/verify.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_with_invalid_toml() {
        let config_content = "this is not valid TOML {{{";
        let file = create_temp_config(config_content);
        let result = load_config(file.path());
        assert!(matches!(result.unwrap_err(), ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_config_with_validation_error() {
        let config_content = r#"
[input]
records-path = "data.csv"

[fetcher]
navigation-timeout-ms = 0

[output]
directory = "result"
"#;

        let file = create_temp_config(config_content);
        let result = load_config(file.path());
        assert!(matches!(result.unwrap_err(), ConfigError::Validation(_)));
    }

    #[test]
    fn test_compute_config_hash() {
        let file = create_temp_config("test content");

        let hash1 = compute_config_hash(file.path()).unwrap();
        let hash2 = compute_config_hash(file.path()).unwrap();

        assert_eq!(hash1, hash2);
        assert_eq!(hash1.len(), 64);
    }

    #[test]
    fn test_different_content_different_hash() {
        let file1 = create_temp_config("content 1");
        let file2 = create_temp_config("content 2");

        let hash1 = compute_config_hash(file1.path()).unwrap();
        let hash2 = compute_config_hash(file2.path()).unwrap();

        assert_ne!(hash1, hash2);
    }
}
