//! Report generation.
//!
//! Renders the computed statistics as the fixed text layout printed by the
//! analyzer, as a Markdown document, or as JSON.

use crate::models::{DemographicReport, Report, ReportMetadata};
use anyhow::Result;
use std::fmt::Write;

/// Render the fixed text report.
///
/// The race listing takes one line per race; every other statistic gets a
/// single labelled line.
pub fn render_text(stats: &DemographicReport, focus_country: &str) -> String {
    let mut output = String::new();

    output.push_str("Number of each race:\n");
    output.push_str(&render_race_listing(&stats.race_count));

    let _ = writeln!(output, "Average age of men: {:.1}", stats.average_age_men);
    let _ = writeln!(
        output,
        "Percentage with Bachelors degrees: {:.1}%",
        stats.percentage_bachelors
    );
    let _ = writeln!(
        output,
        "Percentage with higher education that earn >50K: {:.1}%",
        stats.higher_education_rich
    );
    let _ = writeln!(
        output,
        "Percentage without higher education that earn >50K: {:.1}%",
        stats.lower_education_rich
    );
    let _ = writeln!(output, "Min work time: {} hours/week", stats.min_work_hours);
    let _ = writeln!(
        output,
        "Percentage of rich among those who work fewest hours: {:.1}%",
        stats.rich_percentage
    );
    let _ = writeln!(
        output,
        "Country with highest percentage of rich: {}",
        stats.highest_earning_country
    );
    let _ = writeln!(
        output,
        "Highest percentage of rich people in country: {:.1}%",
        stats.highest_earning_country_percentage
    );
    let _ = writeln!(
        output,
        "Top occupations in {}: {}",
        focus_country, stats.top_in_occupation
    );

    output
}

/// Race names left-aligned, counts right-aligned in a shared column.
fn render_race_listing(race_count: &[(String, usize)]) -> String {
    let name_width = race_count
        .iter()
        .map(|(race, _)| race.chars().count())
        .max()
        .unwrap_or(0);
    let count_width = race_count
        .iter()
        .map(|(_, count)| count.to_string().len())
        .max()
        .unwrap_or(0);

    let mut listing = String::new();
    for (race, count) in race_count {
        let _ = writeln!(
            listing,
            "{:<name_width$}    {:>count_width$}",
            race,
            count,
            name_width = name_width,
            count_width = count_width
        );
    }
    listing
}

/// Generate a complete Markdown report.
pub fn generate_markdown_report(report: &Report) -> String {
    let mut output = String::new();

    output.push_str("# Demographic Report\n\n");
    output.push_str(&generate_metadata_section(&report.metadata));
    output.push_str(&generate_statistics_section(
        &report.statistics,
        &report.metadata.focus_country,
    ));
    output.push_str(&generate_race_section(&report.statistics));

    output
}

/// Generate the metadata section.
fn generate_metadata_section(metadata: &ReportMetadata) -> String {
    let mut section = String::new();

    section.push_str("## Metadata\n\n");
    section.push_str(&format!("- **Source:** `{}`\n", metadata.source));
    section.push_str(&format!("- **Rows:** {}\n", metadata.rows));
    section.push_str(&format!(
        "- **Generated:** {}\n",
        metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    section.push_str(&format!(
        "- **Duration:** {:.3}s\n",
        metadata.duration_seconds
    ));
    section.push('\n');

    section
}

/// Generate the statistics table.
fn generate_statistics_section(stats: &DemographicReport, focus_country: &str) -> String {
    let mut section = String::new();

    section.push_str("## Statistics\n\n");
    section.push_str("| Statistic | Value |\n");
    section.push_str("|:---|---:|\n");

    let rows = [
        ("Average age of men".to_string(), format!("{:.1}", stats.average_age_men)),
        (
            "Bachelors degrees".to_string(),
            format!("{:.1}%", stats.percentage_bachelors),
        ),
        (
            "Higher education earning >50K".to_string(),
            format!("{:.1}%", stats.higher_education_rich),
        ),
        (
            "Other education earning >50K".to_string(),
            format!("{:.1}%", stats.lower_education_rich),
        ),
        (
            "Min work time".to_string(),
            format!("{} hours/week", stats.min_work_hours),
        ),
        (
            "Rich among fewest-hours workers".to_string(),
            format!("{:.1}%", stats.rich_percentage),
        ),
        (
            "Highest earning country".to_string(),
            stats.highest_earning_country.clone(),
        ),
        (
            "Rich share in that country".to_string(),
            format!("{:.1}%", stats.highest_earning_country_percentage),
        ),
        (
            format!("Top occupation in {} (>50K)", focus_country),
            stats.top_in_occupation.clone(),
        ),
    ];

    for (label, value) in rows {
        section.push_str(&format!("| {} | {} |\n", label, value));
    }
    section.push('\n');

    section
}

/// Generate the race breakdown table.
fn generate_race_section(stats: &DemographicReport) -> String {
    let mut section = String::new();
    let total = stats.race_total();

    section.push_str("## Race Breakdown\n\n");
    section.push_str("| Race | Count | Share |\n");
    section.push_str("|:---|---:|---:|\n");

    for (race, count) in &stats.race_count {
        let share = if total > 0 {
            100.0 * *count as f64 / total as f64
        } else {
            0.0
        };
        section.push_str(&format!("| {} | {} | {:.1}% |\n", race, count, share));
    }
    section.push('\n');

    section
}

/// Generate a JSON report.
pub fn generate_json_report(report: &Report) -> Result<String> {
    serde_json::to_string_pretty(report).map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::tests::sample_report;
    use chrono::Utc;

    fn create_test_report() -> Report {
        Report {
            metadata: ReportMetadata {
                source: "adult.data.csv".to_string(),
                rows: 3,
                focus_country: "India".to_string(),
                generated_at: Utc::now(),
                duration_seconds: 0.25,
            },
            statistics: sample_report(),
        }
    }

    #[test]
    fn test_render_text_layout() {
        let text = render_text(&sample_report(), "India");
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Number of each race:");
        assert_eq!(lines[1], "White    2");
        assert_eq!(lines[2], "Black    1");
        assert_eq!(lines[3], "Average age of men: 35.0");
        assert_eq!(lines[4], "Percentage with Bachelors degrees: 25.0%");
        assert_eq!(
            lines[5],
            "Percentage with higher education that earn >50K: 50.0%"
        );
        assert_eq!(
            lines[6],
            "Percentage without higher education that earn >50K: 12.5%"
        );
        assert_eq!(lines[7], "Min work time: 20 hours/week");
        assert_eq!(
            lines[8],
            "Percentage of rich among those who work fewest hours: 100.0%"
        );
        assert_eq!(lines[9], "Country with highest percentage of rich: FR");
        assert_eq!(
            lines[10],
            "Highest percentage of rich people in country: 50.0%"
        );
        assert_eq!(lines[11], "Top occupations in India: Prof-specialty");
        assert_eq!(lines.len(), 12);
    }

    #[test]
    fn test_race_listing_alignment() {
        let listing = render_race_listing(&[
            ("White".to_string(), 27816),
            ("Amer-Indian-Eskimo".to_string(), 311),
        ]);

        assert_eq!(
            listing,
            "White                 27816\nAmer-Indian-Eskimo      311\n"
        );
    }

    #[test]
    fn test_generate_markdown_report() {
        let markdown = generate_markdown_report(&create_test_report());

        assert!(markdown.contains("# Demographic Report"));
        assert!(markdown.contains("## Metadata"));
        assert!(markdown.contains("`adult.data.csv`"));
        assert!(markdown.contains("## Statistics"));
        assert!(markdown.contains("| Top occupation in India (>50K) | Prof-specialty |"));
        assert!(markdown.contains("| White | 2 | 66.7% |"));
    }

    #[test]
    fn test_generate_json_report() {
        let json = generate_json_report(&create_test_report()).unwrap();

        assert!(json.contains("\"metadata\""));
        assert!(json.contains("\"race_count\""));
        assert!(json.contains("\"top_IN_occupation\""));
        assert!(json.contains("\"highest_earning_country_percentage\": 50.0"));
    }
}
