//! Data models for the demographic analyzer.
//!
//! This module contains the input record and table types, and the
//! structures returned by the analysis and written to reports.

use crate::error::AnalysisError;
use chrono::{DateTime, Utc};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// Header names every input table must provide.
pub const REQUIRED_COLUMNS: &[&str] = &[
    "race",
    "sex",
    "age",
    "education",
    "salary",
    "hours-per-week",
    "native-country",
    "occupation",
];

/// One individual from the census table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Race category.
    pub race: String,
    /// Sex category ("Male" / "Female").
    pub sex: String,
    /// Age in years.
    pub age: u32,
    /// Highest education level, e.g. "Bachelors".
    pub education: String,
    /// Salary bracket ("<=50K" / ">50K").
    pub salary: String,
    /// Weekly working hours.
    #[serde(rename = "hours-per-week")]
    pub hours_per_week: u32,
    /// Country of origin.
    #[serde(rename = "native-country")]
    pub native_country: String,
    /// Occupation category.
    pub occupation: String,
}

/// An immutable, non-empty collection of records.
#[derive(Debug, Clone)]
pub struct Table {
    records: Vec<Record>,
}

impl Table {
    /// Builds a table, rejecting an empty record set.
    pub fn new(records: Vec<Record>) -> Result<Self, AnalysisError> {
        if records.is_empty() {
            return Err(AnalysisError::EmptyTable);
        }
        Ok(Self { records })
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Iterates rows in their original order.
    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }
}

/// The ten statistics computed over a table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DemographicReport {
    /// Rows per race, most common first.
    #[serde(serialize_with = "serialize_ordered_counts")]
    pub race_count: Vec<(String, usize)>,
    /// Mean age of men, one decimal.
    pub average_age_men: f64,
    /// Percentage of rows with a Bachelor's degree.
    pub percentage_bachelors: f64,
    /// Percentage earning >50K among advanced-education rows.
    pub higher_education_rich: f64,
    /// Percentage earning >50K among the remaining rows.
    pub lower_education_rich: f64,
    /// Smallest hours-per-week value.
    pub min_work_hours: u32,
    /// Percentage earning >50K among rows working `min_work_hours`.
    pub rich_percentage: f64,
    /// Country with the highest share of >50K earners.
    pub highest_earning_country: String,
    /// That country's share of >50K earners.
    pub highest_earning_country_percentage: f64,
    /// Most common occupation among >50K earners from the focus country.
    #[serde(rename = "top_IN_occupation")]
    pub top_in_occupation: String,
}

impl DemographicReport {
    /// Total rows covered by `race_count`.
    pub fn race_total(&self) -> usize {
        self.race_count.iter().map(|(_, count)| count).sum()
    }

    /// All percentage-valued fields, labelled.
    #[cfg(test)]
    pub fn percentages(&self) -> [(&'static str, f64); 5] {
        [
            ("percentage_bachelors", self.percentage_bachelors),
            ("higher_education_rich", self.higher_education_rich),
            ("lower_education_rich", self.lower_education_rich),
            ("rich_percentage", self.rich_percentage),
            (
                "highest_earning_country_percentage",
                self.highest_earning_country_percentage,
            ),
        ]
    }
}

/// Serialize `(key, count)` pairs as a map, keeping their order.
fn serialize_ordered_counts<S>(counts: &[(String, usize)], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_map(counts.iter().map(|(key, count)| (key, count)))
}

/// Metadata about a single analysis run.
#[derive(Debug, Clone, Serialize)]
pub struct ReportMetadata {
    /// Path of the analyzed data file.
    pub source: String,
    /// Number of rows in the table.
    pub rows: usize,
    /// Country used for the occupation statistic.
    pub focus_country: String,
    /// When the report was generated.
    pub generated_at: DateTime<Utc>,
    /// Time spent loading and analyzing, in seconds.
    pub duration_seconds: f64,
}

/// A complete report: run metadata plus statistics.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub metadata: ReportMetadata,
    pub statistics: DemographicReport,
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    #[allow(clippy::too_many_arguments)]
    pub(crate) fn record(
        race: &str,
        sex: &str,
        age: u32,
        education: &str,
        salary: &str,
        hours_per_week: u32,
        native_country: &str,
        occupation: &str,
    ) -> Record {
        Record {
            race: race.to_string(),
            sex: sex.to_string(),
            age,
            education: education.to_string(),
            salary: salary.to_string(),
            hours_per_week,
            native_country: native_country.to_string(),
            occupation: occupation.to_string(),
        }
    }

    pub(crate) fn sample_report() -> DemographicReport {
        DemographicReport {
            race_count: vec![("White".to_string(), 2), ("Black".to_string(), 1)],
            average_age_men: 35.0,
            percentage_bachelors: 25.0,
            higher_education_rich: 50.0,
            lower_education_rich: 12.5,
            min_work_hours: 20,
            rich_percentage: 100.0,
            highest_earning_country: "FR".to_string(),
            highest_earning_country_percentage: 50.0,
            top_in_occupation: "Prof-specialty".to_string(),
        }
    }

    #[test]
    fn test_empty_table_rejected() {
        assert_eq!(Table::new(Vec::new()).unwrap_err(), AnalysisError::EmptyTable);
    }

    #[test]
    fn test_table_keeps_row_order() {
        let table = Table::new(vec![
            record("White", "Male", 30, "HS-grad", "<=50K", 40, "US", "Sales"),
            record("Black", "Female", 41, "Masters", ">50K", 45, "US", "Tech-support"),
        ])
        .unwrap();

        assert_eq!(table.len(), 2);
        let races: Vec<_> = table.iter().map(|r| r.race.as_str()).collect();
        assert_eq!(races, vec!["White", "Black"]);
    }

    #[test]
    fn test_report_json_keeps_race_order() {
        let json = serde_json::to_string(&sample_report()).unwrap();

        let white = json.find("\"White\":2").unwrap();
        let black = json.find("\"Black\":1").unwrap();
        assert!(white < black);
        assert!(json.contains("\"top_IN_occupation\":\"Prof-specialty\""));
    }

    #[test]
    fn test_race_total() {
        assert_eq!(sample_report().race_total(), 3);
    }
}
