//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Demographer - descriptive statistics for census-style CSV data
///
/// Loads a table of individuals (race, sex, age, education, salary,
/// hours-per-week, native-country, occupation) and reports ten summary
/// statistics about it.
///
/// Examples:
///   demographer --data adult.data.csv
///   demographer --data adult.data.csv --format json --output stats.json
///   demographer --data adult.data.csv --country Japan
///   demographer --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// CSV file to analyze
    ///
    /// Defaults to the dataset path from .demographer.toml, or adult.data.csv.
    #[arg(short, long, value_name = "FILE", env = "DEMOGRAPHER_DATA")]
    pub data: Option<PathBuf>,

    /// Field delimiter of the CSV file
    #[arg(long, value_name = "CHAR")]
    pub delimiter: Option<char>,

    /// Output format (text, markdown, json)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,

    /// Also write the rendered report to this file
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Do not print the report to standard output
    #[arg(long)]
    pub no_print: bool,

    /// Country used for the top-occupation statistic
    #[arg(long, value_name = "NAME")]
    pub country: Option<String>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .demographer.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (errors only)
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a default .demographer.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Output format for the report.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Fixed ten-line text layout (default)
    #[default]
    Text,
    /// Markdown format
    Markdown,
    /// JSON format
    Json,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Whether the report should be printed to standard output.
    pub fn print_data(&self) -> bool {
        !self.no_print
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        if self.init_config {
            return Ok(());
        }

        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if let Some(ref country) = self.country {
            if country.trim().is_empty() {
                return Err("Country must not be empty".to_string());
            }
        }

        if let Some(ref data) = self.data {
            if data.is_dir() {
                return Err(format!("Data path is a directory: {}", data.display()));
            }
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn make_args() -> Args {
        Args {
            data: None,
            delimiter: None,
            format: None,
            output: None,
            no_print: false,
            country: None,
            config: None,
            verbose: false,
            quiet: false,
            init_config: false,
        }
    }

    #[test]
    fn test_defaults_are_valid() {
        let args = make_args();
        assert!(args.validate().is_ok());
        assert!(args.print_data());
    }

    #[test]
    fn test_validation_conflicting_options() {
        let mut args = make_args();
        args.verbose = true;
        args.quiet = true;
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_no_print_disables_printing() {
        let mut args = make_args();
        args.no_print = true;
        assert!(args.validate().is_ok());
        assert!(!args.print_data());
    }

    #[test]
    fn test_validation_empty_country() {
        let mut args = make_args();
        args.country = Some("  ".to_string());
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_parse_from_command_line() {
        let args = Args::try_parse_from([
            "demographer",
            "--data",
            "census.csv",
            "--format",
            "json",
            "--country",
            "Japan",
        ])
        .unwrap();

        assert_eq!(args.data, Some(PathBuf::from("census.csv")));
        assert_eq!(args.format, Some(OutputFormat::Json));
        assert_eq!(args.country.as_deref(), Some("Japan"));
    }

    #[test]
    fn test_log_level() {
        let mut args = make_args();
        assert_eq!(args.log_level(), tracing::Level::INFO);

        args.verbose = true;
        assert_eq!(args.log_level(), tracing::Level::DEBUG);

        args.verbose = false;
        args.quiet = true;
        assert_eq!(args.log_level(), tracing::Level::ERROR);
    }
}
