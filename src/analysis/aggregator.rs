//! Demographic statistics.
//!
//! Each statistic is an independent query over the same immutable table.
//! [`calculate_demographic_data`] runs all of them and bundles the results.

use crate::config::AnalysisConfig;
use crate::error::AnalysisError;
use crate::models::{DemographicReport, Table};
use crate::report::render_text;
use std::cmp::{Ordering, Reverse};
use std::collections::{BTreeMap, HashMap};
use std::io::{self, Write};
use tracing::debug;

/// Round to one decimal place, ties to even.
pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}

/// `part / whole` as a percentage rounded to one decimal.
fn percentage(part: usize, whole: usize, statistic: &'static str) -> Result<f64, AnalysisError> {
    if whole == 0 {
        return Err(AnalysisError::empty_partition(statistic));
    }
    let ratio = part as f64 / whole as f64;
    Ok(round_one_decimal(100.0 * ratio))
}

/// Count occurrences of each value, most common first.
///
/// Values with equal counts keep the order in which they were first seen.
fn value_counts<'a>(values: impl Iterator<Item = &'a str>) -> Vec<(String, usize)> {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(String, usize)> = Vec::new();

    for value in values {
        match positions.get(value) {
            Some(&idx) => counts[idx].1 += 1,
            None => {
                positions.insert(value, counts.len());
                counts.push((value.to_string(), 1));
            }
        }
    }

    counts.sort_by_key(|(_, count)| Reverse(*count));
    counts
}

/// Number of rows per race, most common first.
pub fn race_count(table: &Table) -> Vec<(String, usize)> {
    value_counts(table.iter().map(|r| r.race.as_str()))
}

/// Mean age of rows whose sex matches `male_label`.
pub fn average_age_men(table: &Table, male_label: &str) -> Result<f64, AnalysisError> {
    let (sum, count) = table
        .iter()
        .filter(|r| r.sex == male_label)
        .fold((0u64, 0usize), |(sum, count), r| (sum + u64::from(r.age), count + 1));

    if count == 0 {
        return Err(AnalysisError::empty_partition("average_age_men"));
    }
    Ok(round_one_decimal(sum as f64 / count as f64))
}

/// Percentage of all rows whose education matches `bachelors_label`.
pub fn percentage_bachelors(table: &Table, bachelors_label: &str) -> Result<f64, AnalysisError> {
    let bachelors = table
        .iter()
        .filter(|r| r.education == bachelors_label)
        .count();
    percentage(bachelors, table.len(), "percentage_bachelors")
}

/// `(rich, total)` counts for the advanced and the remaining education groups.
fn education_partitions(
    table: &Table,
    config: &AnalysisConfig,
) -> ((usize, usize), (usize, usize)) {
    let mut higher = (0usize, 0usize);
    let mut lower = (0usize, 0usize);

    for record in table.iter() {
        let group = if config.is_advanced(&record.education) {
            &mut higher
        } else {
            &mut lower
        };
        group.1 += 1;
        if record.salary == config.high_salary_label {
            group.0 += 1;
        }
    }
    (higher, lower)
}

/// Percentage of rich rows with and without advanced education.
///
/// Returns `(higher_education_rich, lower_education_rich)`.
pub fn education_rich(table: &Table, config: &AnalysisConfig) -> Result<(f64, f64), AnalysisError> {
    let (higher, lower) = education_partitions(table, config);
    debug!(
        "Advanced education: {} rows, other: {} rows",
        higher.1, lower.1
    );

    Ok((
        percentage(higher.0, higher.1, "higher_education_rich")?,
        percentage(lower.0, lower.1, "lower_education_rich")?,
    ))
}

/// Smallest hours-per-week value in the table.
pub fn min_work_hours(table: &Table) -> Result<u32, AnalysisError> {
    table
        .iter()
        .map(|r| r.hours_per_week)
        .min()
        .ok_or_else(|| AnalysisError::empty_result("min_work_hours"))
}

/// Percentage of rich rows among those working exactly `hours` per week.
pub fn rich_percentage(
    table: &Table,
    hours: u32,
    high_salary_label: &str,
) -> Result<f64, AnalysisError> {
    let (rich, total) = table
        .iter()
        .filter(|r| r.hours_per_week == hours)
        .fold((0usize, 0usize), |(rich, total), r| {
            (rich + usize::from(r.salary == high_salary_label), total + 1)
        });
    percentage(rich, total, "rich_percentage")
}

/// Country with the highest share of rich rows, and that share as a percentage.
///
/// Ratios are compared exactly; on a tie the lexicographically smallest
/// country wins.
pub fn highest_earning_country(
    table: &Table,
    high_salary_label: &str,
) -> Result<(String, f64), AnalysisError> {
    // country -> (rich, total)
    let mut by_country: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
    for record in table.iter() {
        let entry = by_country.entry(record.native_country.as_str()).or_default();
        entry.1 += 1;
        if record.salary == high_salary_label {
            entry.0 += 1;
        }
    }

    let mut best: Option<(&str, usize, usize)> = None;
    for (country, (rich, total)) in by_country {
        let better = match best {
            None => true,
            Some((_, best_rich, best_total)) => {
                compare_ratios(rich, total, best_rich, best_total) == Ordering::Greater
            }
        };
        if better {
            best = Some((country, rich, total));
        }
    }

    let (country, rich, total) =
        best.ok_or_else(|| AnalysisError::empty_result("highest_earning_country"))?;
    debug!("Highest earning country: {} ({}/{})", country, rich, total);

    Ok((
        country.to_string(),
        percentage(rich, total, "highest_earning_country_percentage")?,
    ))
}

/// Compare `a_num / a_den` with `b_num / b_den` without floating point.
fn compare_ratios(a_num: usize, a_den: usize, b_num: usize, b_den: usize) -> Ordering {
    let lhs = a_num as u128 * b_den as u128;
    let rhs = b_num as u128 * a_den as u128;
    lhs.cmp(&rhs)
}

/// Most common occupation among rich rows from `country`.
pub fn top_occupation(
    table: &Table,
    country: &str,
    high_salary_label: &str,
) -> Result<String, AnalysisError> {
    let occupations = value_counts(
        table
            .iter()
            .filter(|r| r.native_country == country && r.salary == high_salary_label)
            .map(|r| r.occupation.as_str()),
    );

    occupations
        .into_iter()
        .next()
        .map(|(occupation, _)| occupation)
        .ok_or_else(|| AnalysisError::empty_result("top_IN_occupation"))
}

/// Compute all ten statistics over `table`.
///
/// When `print_data` is set the text report is written to standard output
/// before returning. Any failing statistic aborts the whole computation.
pub fn calculate_demographic_data(
    table: &Table,
    config: &AnalysisConfig,
    print_data: bool,
) -> Result<DemographicReport, AnalysisError> {
    let stdout = io::stdout();
    calculate_demographic_data_to(table, config, print_data, &mut stdout.lock())
}

/// Same as [`calculate_demographic_data`], printing to `out` instead of stdout.
pub fn calculate_demographic_data_to<W: Write>(
    table: &Table,
    config: &AnalysisConfig,
    print_data: bool,
    out: &mut W,
) -> Result<DemographicReport, AnalysisError> {
    debug!("Computing statistics over {} rows", table.len());

    let race_count = race_count(table);
    let average_age_men = average_age_men(table, &config.male_label)?;
    let percentage_bachelors = percentage_bachelors(table, &config.bachelors_label)?;
    let (higher_education_rich, lower_education_rich) = education_rich(table, config)?;
    let min_work_hours = min_work_hours(table)?;
    let rich_percentage = rich_percentage(table, min_work_hours, &config.high_salary_label)?;
    let (highest_earning_country, highest_earning_country_percentage) =
        highest_earning_country(table, &config.high_salary_label)?;
    let top_in_occupation =
        top_occupation(table, &config.focus_country, &config.high_salary_label)?;

    let report = DemographicReport {
        race_count,
        average_age_men,
        percentage_bachelors,
        higher_education_rich,
        lower_education_rich,
        min_work_hours,
        rich_percentage,
        highest_earning_country,
        highest_earning_country_percentage,
        top_in_occupation,
    };

    if print_data {
        out.write_all(render_text(&report, &config.focus_country).as_bytes())
            .and_then(|_| out.flush())
            .map_err(|e| AnalysisError::Print(e.to_string()))?;
    }

    Ok(report)
}
