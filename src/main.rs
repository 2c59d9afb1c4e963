//! Demographer - census data analyzer
//!
//! A CLI tool that loads a census-style CSV table and reports descriptive
//! statistics about it: race counts, average age of men, education and
//! salary shares, working hours, and per-country earnings.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Error (invalid arguments, unreadable data, failed statistic)

mod analysis;
mod cli;
mod config;
mod error;
mod loader;
mod models;
mod report;

use anyhow::{Context, Result};
use chrono::Utc;
use cli::{Args, OutputFormat};
use config::{Config, CONFIG_FILE_NAME};
use loader::LoadOptions;
use models::{Report, ReportMetadata};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    init_logging(&args);

    info!("Demographer v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    if let Err(e) = run(args) {
        error!("Analysis failed: {:#}", e);
        eprintln!("\n❌ Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Handle --init-config: generate a default .demographer.toml.
fn handle_init_config() -> Result<()> {
    let path = Path::new(CONFIG_FILE_NAME);

    if path.exists() {
        eprintln!(
            "⚠️  {} already exists. Remove it first or edit it manually.",
            CONFIG_FILE_NAME
        );
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", CONFIG_FILE_NAME))?;

    println!("✅ Created {} with default settings.", CONFIG_FILE_NAME);
    println!("   Edit it to customize the dataset path, labels, and report format.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
///
/// Logs go to stderr so the report on stdout stays clean.
fn init_logging(args: &Args) {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(args.log_level())
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Load the table, compute the statistics, and emit the report.
fn run(args: Args) -> Result<()> {
    let start_time = Instant::now();

    let mut config = load_config(&args)?;
    config.merge_with_args(&args);
    config.check_report_target(args.print_data())?;

    // Step 1: Load the dataset
    let data_path = PathBuf::from(&config.dataset.path);
    let load_options = LoadOptions::from_config(&config.dataset, !args.quiet)?;
    let table = loader::load_table(&data_path, &load_options)?;
    info!("Loaded {} rows from {}", table.len(), data_path.display());

    // Step 2: Compute the statistics; the text layout is printed by the analysis itself
    let format = config.report.format;
    let print_text = args.print_data() && format == OutputFormat::Text;
    let statistics = analysis::calculate_demographic_data(&table, &config.analysis, print_text)
        .context("Failed to compute demographic statistics")?;
    debug!("Race counts cover {} rows", statistics.race_total());

    let report = Report {
        metadata: ReportMetadata {
            source: data_path.display().to_string(),
            rows: table.len(),
            focus_country: config.analysis.focus_country.clone(),
            generated_at: Utc::now(),
            duration_seconds: start_time.elapsed().as_secs_f64(),
        },
        statistics,
    };

    // Step 3: Render and emit
    let rendered = match format {
        OutputFormat::Text => report::render_text(&report.statistics, &report.metadata.focus_country),
        OutputFormat::Markdown => report::generate_markdown_report(&report),
        OutputFormat::Json => report::generate_json_report(&report)?,
    };

    if args.print_data() && format != OutputFormat::Text {
        println!("{}", rendered);
    }

    if let Some(ref output) = config.report.output {
        std::fs::write(output, &rendered)
            .with_context(|| format!("Failed to write report to {}", output))?;
        info!("Report saved to: {}", output);
    }

    info!(
        "Analysis complete in {:.3}s",
        report.metadata.duration_seconds
    );
    Ok(())
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from {}", CONFIG_FILE_NAME);
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {}", e);
            Ok(Config::default())
        }
    }
}
