//! COVID-19 testing report per US state.
//!
//! Loads `populations.csv`, fetches daily counts from the COVID Tracking
//! Project, and prints per-capita metrics sorted by population followed by
//! worst-case nationwide extrapolations.
//!
//! Usage:
//!   covid_report [OPTIONS] [COMMAND]
//!
//! Example:
//!   covid_report --populations data/populations.csv --format json

use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use covid_report::{pipeline, AppConfig, LogFormat, ReportFormat, DEFAULT_CONFIG_PATH};

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser)]
#[command(name = "covid_report")]
#[command(version, about = "Per-state COVID-19 testing report", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Override population CSV path
    #[arg(long)]
    populations: Option<PathBuf>,

    /// Override API base URL
    #[arg(long)]
    base_url: Option<String>,

    /// Report format (text, json)
    #[arg(short, long)]
    format: Option<ReportFormat>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Log format (pretty, json, compact)
    #[arg(long)]
    log_format: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a sample config file
    GenerateConfig {
        /// Output file path
        #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
        output: PathBuf,
    },
    /// Validate config without running
    ValidateConfig,
    /// Fetch data and print the report (default)
    Run,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match &cli.command {
        Some(Commands::GenerateConfig { output }) => {
            generate_sample_config(output)?;
            return Ok(());
        }
        Some(Commands::ValidateConfig) => {
            let config = load_config(&cli)?;
            println!("Configuration is valid:\n{:#?}", config);
            return Ok(());
        }
        Some(Commands::Run) | None => {}
    }

    let config = load_config(&cli)?;
    setup_logging(&config, &cli)?;

    let report = pipeline::run(&config).await?;

    let mut stdout = std::io::stdout().lock();
    match config.report.format {
        ReportFormat::Text => report.write_text(&mut stdout)?,
        ReportFormat::Json => writeln!(stdout, "{}", report.to_json()?)?,
    }

    Ok(())
}

/// Config file merged with CLI overrides.
fn load_config(cli: &Cli) -> Result<AppConfig, Box<dyn std::error::Error>> {
    let mut config = AppConfig::load(&cli.config)?;
    if let Some(path) = &cli.populations {
        config.populations.path = path.clone();
    }
    if let Some(base_url) = &cli.base_url {
        config.source.base_url = base_url.clone();
    }
    if let Some(format) = cli.format {
        config.report.format = format;
    }
    Ok(config)
}

/// Logs go to stderr; stdout carries only the report.
fn setup_logging(config: &AppConfig, cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let level = cli.log_level.as_ref().unwrap_or(&config.logging.level);

    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level)?
            .add_directive("hyper=warn".parse()?)
            .add_directive("reqwest=warn".parse()?),
    };

    let format = cli
        .log_format
        .as_deref()
        .unwrap_or(match config.logging.format {
            LogFormat::Json => "json",
            LogFormat::Compact => "compact",
            LogFormat::Pretty => "pretty",
        });

    match format {
        "json" => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .json()
                .init();
        }
        "compact" => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .compact()
                .init();
        }
        _ => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .init();
        }
    }

    Ok(())
}

fn generate_sample_config(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    std::fs::write(path, AppConfig::sample_toml()?)?;
    println!("Sample config written to: {}", path.display());
    Ok(())
}
