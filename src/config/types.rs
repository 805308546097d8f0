use serde::{Deserialize, Deserializer};
use std::time::Duration;

/// Main configuration structure for journal-verify
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub input: InputConfig,
    #[serde(default)]
    pub fetcher: FetcherConfig,
    pub output: OutputConfig,
    #[serde(default)]
    pub filter: FilterConfig,
}

/// Where the expected records come from
#[derive(Debug, Clone, Deserialize)]
pub struct InputConfig {
    /// Path to the CSV file of expected records
    #[serde(rename = "records-path")]
    pub records_path: String,

    /// Header names of the required columns
    #[serde(default)]
    pub columns: ColumnNames,
}

/// Header names used to locate each required CSV column
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ColumnNames {
    #[serde(default = "default_id_column")]
    pub id: String,

    #[serde(default = "default_title_column")]
    pub title: String,

    #[serde(rename = "involved-person", default = "default_person_column")]
    pub involved_person: String,

    #[serde(rename = "output-type", default = "default_output_type_column")]
    pub output_type: String,

    #[serde(rename = "evidence-link", default = "default_link_column")]
    pub evidence_link: String,

    #[serde(default = "default_year_column")]
    pub year: String,
}

impl ColumnNames {
    /// All configured header names, in a fixed order
    pub fn all(&self) -> [&str; 6] {
        [
            self.id.as_str(),
            self.title.as_str(),
            self.involved_person.as_str(),
            self.output_type.as_str(),
            self.evidence_link.as_str(),
            self.year.as_str(),
        ]
    }
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            id: default_id_column(),
            title: default_title_column(),
            involved_person: default_person_column(),
            output_type: default_output_type_column(),
            evidence_link: default_link_column(),
            year: default_year_column(),
        }
    }
}

fn default_id_column() -> String {
    "id".to_string()
}

fn default_title_column() -> String {
    "title".to_string()
}

fn default_person_column() -> String {
    "involved-person".to_string()
}

fn default_output_type_column() -> String {
    "output-type".to_string()
}

fn default_link_column() -> String {
    "evidence-link".to_string()
}

fn default_year_column() -> String {
    "year".to_string()
}

/// How evidence pages are opened and rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderEngine {
    /// Headless Chromium over the DevTools protocol; scripts run before matching
    #[default]
    Browser,

    /// Plain HTTP GET; the served HTML is matched as-is
    Static,
}

impl RenderEngine {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Browser => "browser",
            Self::Static => "static",
        }
    }
}

/// Page fetching behaviour
#[derive(Debug, Clone, Deserialize)]
pub struct FetcherConfig {
    #[serde(default)]
    pub engine: RenderEngine,

    /// Upper bound for opening an evidence link (milliseconds)
    #[serde(rename = "navigation-timeout-ms", default = "default_navigation_timeout")]
    pub navigation_timeout_ms: u64,

    /// How long each layout selector may take to appear (milliseconds)
    #[serde(rename = "selector-timeout-ms", default = "default_selector_timeout")]
    pub selector_timeout_ms: u64,

    /// User agent sent with every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,

    /// Run the browser without a window
    #[serde(default = "default_headless")]
    pub headless: bool,

    /// Chromium binary to launch instead of the one found on the system
    #[serde(rename = "browser-executable", default)]
    pub browser_executable: Option<String>,
}

impl FetcherConfig {
    pub fn navigation_timeout(&self) -> Duration {
        Duration::from_millis(self.navigation_timeout_ms)
    }

    pub fn selector_timeout(&self) -> Duration {
        Duration::from_millis(self.selector_timeout_ms)
    }
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            engine: RenderEngine::default(),
            navigation_timeout_ms: default_navigation_timeout(),
            selector_timeout_ms: default_selector_timeout(),
            user_agent: default_user_agent(),
            headless: default_headless(),
            browser_executable: None,
        }
    }
}

fn default_navigation_timeout() -> u64 {
    30_000
}

fn default_selector_timeout() -> u64 {
    3_500
}

fn default_user_agent() -> String {
    format!("journal-verify/{}", env!("CARGO_PKG_VERSION"))
}

fn default_headless() -> bool {
    true
}

/// Report output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Directory the reports are written to (created if absent)
    pub directory: String,

    /// File name of the corrections report
    #[serde(rename = "corrections-file", default = "default_corrections_file")]
    pub corrections_file: String,

    /// File name of the errors report
    #[serde(rename = "errors-file", default = "default_errors_file")]
    pub errors_file: String,
}

fn default_corrections_file() -> String {
    "corrections.txt".to_string()
}

fn default_errors_file() -> String {
    "errors.txt".to_string()
}

/// Which records take part in a run
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterConfig {
    /// When non-empty, only these record ids are checked
    #[serde(default, deserialize_with = "deserialize_ids")]
    pub only: Vec<String>,

    /// Record ids that are never checked
    #[serde(default, deserialize_with = "deserialize_ids")]
    pub ignore: Vec<String>,
}

/// Ids may be written as TOML integers or strings
#[derive(Deserialize)]
#[serde(untagged)]
enum IdEntry {
    Number(i64),
    Text(String),
}

fn deserialize_ids<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries = Vec::<IdEntry>::deserialize(deserializer)?;
    Ok(entries
        .into_iter()
        .map(|entry| match entry {
            IdEntry::Number(n) => n.to_string(),
            IdEntry::Text(s) => s,
        })
        .collect())
}
