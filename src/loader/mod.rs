//! CSV loading.
//!
//! Reads a delimited file with a header row into an in-memory [`Table`],
//! checking that every required column is present first.

use crate::config::DatasetConfig;
use crate::error::AnalysisError;
use crate::models::{Record, Table, REQUIRED_COLUMNS};
use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

/// Options for reading a table.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Field delimiter byte.
    pub delimiter: u8,
    /// Whether to show a spinner while reading.
    pub show_progress: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            show_progress: false,
        }
    }
}

impl LoadOptions {
    /// Build options from the dataset section of the config.
    pub fn from_config(config: &DatasetConfig, show_progress: bool) -> Result<Self> {
        Ok(Self {
            delimiter: config.delimiter_byte()?,
            show_progress,
        })
    }
}

/// Load a table from a CSV file on disk.
pub fn load_table(path: &Path, options: &LoadOptions) -> Result<Table> {
    info!("Loading dataset: {}", path.display());

    let file = File::open(path)
        .with_context(|| format!("Failed to open data file: {}", path.display()))?;

    read_table(file, options).with_context(|| format!("Failed to load {}", path.display()))
}

/// Read a table from any CSV source.
pub fn read_table<R: Read>(source: R, options: &LoadOptions) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(options.delimiter)
        .trim(csv::Trim::All)
        .from_reader(source);

    let headers = reader.headers().context("Failed to read header row")?;
    check_schema(headers)?;
    debug!("Header columns: {:?}", headers);

    let progress = options.show_progress.then(|| {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] {pos} rows read")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    });

    let mut records = Vec::new();
    for (index, result) in reader.deserialize::<Record>().enumerate() {
        // Line 1 is the header.
        let record = result.with_context(|| format!("Failed to parse line {}", index + 2))?;
        records.push(record);

        if let Some(ref pb) = progress {
            pb.inc(1);
        }
    }

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    debug!("Read {} rows", records.len());
    Ok(Table::new(records)?)
}

/// Fail on the first required column missing from the header.
fn check_schema(headers: &csv::StringRecord) -> Result<(), AnalysisError> {
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == *column) {
            return Err(AnalysisError::Schema {
                column: column.to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const HEADER: &str =
        "age,workclass,education,occupation,race,sex,hours-per-week,native-country,salary";

    fn csv_with_rows(rows: &[&str]) -> String {
        let mut content = String::from(HEADER);
        for row in rows {
            content.push('\n');
            content.push_str(row);
        }
        content.push('\n');
        content
    }

    #[test]
    fn test_read_table() {
        let content = csv_with_rows(&[
            "39,State-gov,Bachelors,Adm-clerical,White,Male,40,United-States,<=50K",
            "52,Self-emp-inc,HS-grad,Exec-managerial,White,Female,45,United-States,>50K",
        ]);

        let table = read_table(content.as_bytes(), &LoadOptions::default()).unwrap();
        assert_eq!(table.len(), 2);

        let first = table.iter().next().unwrap();
        assert_eq!(first.age, 39);
        assert_eq!(first.education, "Bachelors");
        assert_eq!(first.hours_per_week, 40);
        assert_eq!(first.native_country, "United-States");
        assert_eq!(first.salary, "<=50K");
    }

    #[test]
    fn test_fields_are_trimmed() {
        let content = csv_with_rows(&[
            "39, State-gov, Bachelors, Adm-clerical, White, Male, 40, United-States, <=50K",
        ]);

        let table = read_table(content.as_bytes(), &LoadOptions::default()).unwrap();
        let first = table.iter().next().unwrap();
        assert_eq!(first.race, "White");
        assert_eq!(first.salary, "<=50K");
    }

    #[test]
    fn test_missing_column_is_schema_error() {
        let content = "age,race,sex\n30,White,Male\n";

        let err = read_table(content.as_bytes(), &LoadOptions::default()).unwrap_err();
        assert_eq!(
            err.downcast_ref::<AnalysisError>(),
            Some(&AnalysisError::Schema {
                column: "education".to_string()
            })
        );
    }

    #[test]
    fn test_header_only_is_empty_table() {
        let content = csv_with_rows(&[]);

        let err = read_table(content.as_bytes(), &LoadOptions::default()).unwrap_err();
        assert_eq!(
            err.downcast_ref::<AnalysisError>(),
            Some(&AnalysisError::EmptyTable)
        );
    }

    #[test]
    fn test_custom_delimiter() {
        let content = csv_with_rows(&[
            "39;State-gov;Bachelors;Adm-clerical;White;Male;40;Cuba;>50K",
        ])
        .replace(',', ";");
        let options = LoadOptions {
            delimiter: b';',
            ..LoadOptions::default()
        };

        let table = read_table(content.as_bytes(), &options).unwrap();
        assert_eq!(table.iter().next().unwrap().native_country, "Cuba");
    }

    #[test]
    fn test_load_table_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "{}",
            csv_with_rows(&["28,Private,Masters,Prof-specialty,Asian-Pac-Islander,Female,40,India,>50K"])
        )
        .unwrap();

        let table = load_table(file.path(), &LoadOptions::default()).unwrap();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_table(Path::new("does/not/exist.csv"), &LoadOptions::default());
        assert!(result.is_err());
    }
}
