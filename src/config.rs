//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.demographer.toml` files.

use crate::cli::OutputFormat;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = ".demographer.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Input dataset settings.
    #[serde(default)]
    pub dataset: DatasetConfig,

    /// Category labels used by the statistics.
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// Report settings.
    #[serde(default)]
    pub report: ReportConfig,
}

/// Input dataset settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// Path of the CSV file to analyze.
    #[serde(default = "default_path")]
    pub path: String,

    /// Field delimiter.
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            delimiter: default_delimiter(),
        }
    }
}

impl DatasetConfig {
    /// The delimiter as a single byte, as the CSV reader expects.
    pub fn delimiter_byte(&self) -> Result<u8> {
        if !self.delimiter.is_ascii() {
            bail!("Delimiter must be a single ASCII character, got '{}'", self.delimiter);
        }
        Ok(self.delimiter as u8)
    }
}

fn default_path() -> String {
    "adult.data.csv".to_string()
}

fn default_delimiter() -> char {
    ','
}

/// Category labels the statistics filter on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Education levels counted as advanced education.
    #[serde(default = "default_advanced_education")]
    pub advanced_education: Vec<String>,

    /// Education level counted for the Bachelor's percentage.
    #[serde(default = "default_bachelors_label")]
    pub bachelors_label: String,

    /// Salary bracket counted as rich.
    #[serde(default = "default_high_salary_label")]
    pub high_salary_label: String,

    /// Sex label used for the average age of men.
    #[serde(default = "default_male_label")]
    pub male_label: String,

    /// Country whose top occupation among rich people is reported.
    #[serde(default = "default_focus_country")]
    pub focus_country: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            advanced_education: default_advanced_education(),
            bachelors_label: default_bachelors_label(),
            high_salary_label: default_high_salary_label(),
            male_label: default_male_label(),
            focus_country: default_focus_country(),
        }
    }
}

impl AnalysisConfig {
    /// Whether an education level belongs to the advanced group.
    pub fn is_advanced(&self, education: &str) -> bool {
        self.advanced_education.iter().any(|level| level == education)
    }
}

fn default_advanced_education() -> Vec<String> {
    vec!["Bachelors", "Masters", "Doctorate"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_bachelors_label() -> String {
    "Bachelors".to_string()
}

fn default_high_salary_label() -> String {
    ">50K".to_string()
}

fn default_male_label() -> String {
    "Male".to_string()
}

fn default_focus_country() -> String {
    "India".to_string()
}

/// Report generation settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Output format.
    #[serde(default)]
    pub format: OutputFormat,

    /// File to also write the rendered report to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(CONFIG_FILE_NAME);

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings.
    /// Only values given explicitly on the command line override the file.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref data) = args.data {
            self.dataset.path = data.display().to_string();
        }
        if let Some(delimiter) = args.delimiter {
            self.dataset.delimiter = delimiter;
        }
        if let Some(ref country) = args.country {
            self.analysis.focus_country = country.clone();
        }
        if let Some(format) = args.format {
            self.report.format = format;
        }
        if let Some(ref output) = args.output {
            self.report.output = Some(output.display().to_string());
        }
    }

    /// Ensure the report goes somewhere once printing is disabled.
    ///
    /// Checked after merging, so an output path from the config file counts.
    pub fn check_report_target(&self, print_data: bool) -> Result<()> {
        if !print_data && self.report.output.is_none() {
            bail!("--no-print requires an output file (--output or [report] output), otherwise nothing is shown");
        }
        Ok(())
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}
