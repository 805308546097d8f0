//! journal-verify main entry point
//!
//! This is the command-line interface for checking academic-output records
//! against their evidence pages.

use anyhow::Context;
use clap::Parser;
use journal_verify::config::{load_config_with_hash, Config};
use journal_verify::layout::LayoutRegistry;
use journal_verify::output::{print_statistics, RunStatistics};
use journal_verify::records::{filter_records, load_records};
use journal_verify::verify::run_verification;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// journal-verify: checks academic-output records against their evidence pages
///
/// Each record's evidence link is opened, the journal page layout recognised and
/// the published title, first author and year compared with the record. Records
/// needing a manual correction and records that could not be checked are written
/// to two plain-text reports.
#[derive(Parser, Debug)]
#[command(name = "journal-verify")]
#[command(version)]
#[command(about = "Checks academic-output records against their evidence pages", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Load config and records and show what would be checked, without fetching
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("Failed to load configuration {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    if cli.dry_run {
        handle_dry_run(&config)
    } else {
        handle_verify(config, cli.quiet).await
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("journal_verify=info,warn"),
            1 => EnvFilter::new("journal_verify=debug,info"),
            2 => EnvFilter::new("journal_verify=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: shows which records would be checked
fn handle_dry_run(config: &Config) -> anyhow::Result<()> {
    let records = load_records(Path::new(&config.input.records_path), &config.input.columns)
        .with_context(|| format!("Failed to load records from {}", config.input.records_path))?;
    let total = records.len();
    let selected = filter_records(records, &config.filter);

    println!("=== journal-verify Dry Run ===\n");

    println!("Input:");
    println!("  Records file: {}", config.input.records_path);
    println!("  Records loaded: {}", total);
    println!("  Selected for checking: {}", selected.len());

    println!("\nFetcher:");
    println!("  Engine: {}", config.fetcher.engine.as_str());
    println!("  Navigation timeout: {}ms", config.fetcher.navigation_timeout_ms);
    println!("  Selector timeout: {}ms per layout", config.fetcher.selector_timeout_ms);
    println!("  User agent: {}", config.fetcher.user_agent);
    if let Some(executable) = &config.fetcher.browser_executable {
        println!("  Browser: {}", executable);
    }

    println!("\nOutput:");
    println!("  Directory: {}", config.output.directory);
    println!("  Corrections: {}", config.output.corrections_file);
    println!("  Errors: {}", config.output.errors_file);

    if !config.filter.only.is_empty() {
        println!("\nOnly ({}): {}", config.filter.only.len(), config.filter.only.join(", "));
    }
    if !config.filter.ignore.is_empty() {
        println!(
            "\nIgnored ({}): {}",
            config.filter.ignore.len(),
            config.filter.ignore.join(", ")
        );
    }

    let registry = LayoutRegistry::with_defaults();
    println!("\nLayouts ({}):", registry.len());
    for layout in registry.layouts() {
        println!("  - {}", layout.name());
        for selector in layout.required_selectors() {
            println!("    * {}", selector);
        }
    }

    println!("\nRecords:");
    for record in &selected {
        println!("  - {}: {}", record.id, record.evidence_link);
    }

    println!("\n✓ Configuration is valid");
    println!("✓ Would check {} records", selected.len());

    Ok(())
}

/// Handles the main verification run
async fn handle_verify(config: Config, quiet: bool) -> anyhow::Result<()> {
    let report = run_verification(config)
        .await
        .context("Verification run failed")?;

    if !quiet {
        print_statistics(&RunStatistics::from_report(&report));
    }

    Ok(())
}
