//! Year validation and missing-value imputation.

use crate::types::{CleanedDataset, CleanedRecord, Dataset, Kpi, StatValue, Year, FIRST_SEASON};
use chrono::{Datelike, Utc};
use std::collections::{BTreeSet, HashSet};
use tracing::{info, warn};


/// Check that every raw year cell is an integer.
pub fn validate_year_cells(cells: &[&str]) -> (bool, String) {
    match cells.iter().find(|cell| cell.trim().parse::<i32>().is_err()) {
        Some(bad) => (
            false,
            format!("Year format wrong: It should be int, found '{bad}'."),
        ),
        None => (true, format!("{} year values are integers", cells.len())),
    }
}

/// Validate the dataset's years against the current calendar year.
pub fn validate_years(dataset: &Dataset) -> (bool, String) {
    validate_years_at(dataset, Utc::now().year())
}

/// Validate years: in `1992..=current_year` and contiguous.
pub fn validate_years_at(dataset: &Dataset, current_year: i32) -> (bool, String) {
    check_years(&dataset.years(), current_year)
}

fn check_years(years: &BTreeSet<Year>, current_year: i32) -> (bool, String) {
    let (Some(min), Some(max)) = (years.first(), years.last()) else {
        return (false, "No data to validate".to_string());
    };
    let found: Vec<i32> = years.iter().map(Year::as_i32).collect();

    if min.as_i32() < FIRST_SEASON {
        return (
            false,
            format!(
                "Year out of range: year {min} is earlier than the start of the Premier League {FIRST_SEASON}"
            ),
        );
    }
    if max.as_i32() > current_year {
        return (
            false,
            format!("Year out of range: newest year {max} is later than the current year {current_year}"),
        );
    }

    let expected: Vec<i32> = (min.as_i32()..=max.as_i32()).collect();
    if found != expected {
        return (
            false,
            format!("Years are not consecutive: found {found:?}, expected {expected:?}"),
        );
    }

    (true, format!("Year verification passed: {found:?}"))
}

/// Validate, then fill missing statistics with their column median.
///
/// Returns `None` when validation fails or a column has no values at all.
pub fn clean_data(dataset: &Dataset) -> Option<CleanedDataset> {
    let (valid, message) = validate_years(dataset);
    if !valid {
        warn!("year validation failed: {message}");
        return None;
    }
    info!("{message}");
    impute(dataset)
}

fn impute(dataset: &Dataset) -> Option<CleanedDataset> {
    let mut fills = [None; 5];
    let mut imputed = Vec::new();

    for kpi in Kpi::ALL {
        let present: Vec<f64> = dataset
            .records()
            .iter()
            .filter_map(|r| r.stat(kpi))
            .map(f64::from)
            .collect();
        let missing = dataset.len() - present.len();
        if missing == 0 {
            continue;
        }

        info!(column = %kpi, missing, "missing values");
        let Some(median) = median(present) else {
            warn!(column = %kpi, "column has no values to impute from");
            return None;
        };
        info!(column = %kpi, "filling with median {median:.2}");
        fills[kpi.index()] = Some(median);
        imputed.push((kpi, median));
    }

    if imputed.is_empty() {
        info!("there are no missing values in the data");
    }

    let records = dataset
        .records()
        .iter()
        .map(|r| {
            let stats = Kpi::ALL.map(|kpi| match fills[kpi.index()] {
                Some(median) => StatValue::Float(r.stat(kpi).map_or(median, f64::from)),
                // Unfilled columns have no missing values.
                None => StatValue::Count(r.stat(kpi).unwrap_or_default()),
            });
            CleanedRecord {
                year: r.year,
                start_date: r.start_date,
                end_date: r.end_date,
                team_name: r.team_name.clone(),
                stats,
            }
        })
        .collect();

    Some(CleanedDataset::new(records, imputed))
}

fn median(mut values: Vec<f64>) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(f64::total_cmp);
    let mid = values.len() / 2;
    Some(if values.len() % 2 == 0 {
        (values[mid - 1] + values[mid]) / 2.0
    } else {
        values[mid]
    })
}

/// Keep only teams that appear in every season. `None` if no team does.
pub fn align_teams(dataset: &CleanedDataset) -> Option<CleanedDataset> {
    let mut common: Option<HashSet<&str>> = None;
    for year in dataset.years() {
        let teams: HashSet<&str> = dataset
            .records()
            .iter()
            .filter(|r| r.year == year)
            .map(|r| r.team_name.as_str())
            .collect();
        common = Some(match common {
            Some(acc) => acc.intersection(&teams).copied().collect(),
            None => teams,
        });
    }

    let common = common.filter(|teams| !teams.is_empty());
    let Some(common) = common else {
        warn!("no common teams found across all years");
        return None;
    };

    let mut names: Vec<&str> = common.iter().copied().collect();
    names.sort_unstable();
    info!(teams = ?names, "teams present in all years");

    let records = dataset
        .records()
        .iter()
        .filter(|r| common.contains(r.team_name.as_str()))
        .cloned()
        .collect();
    Some(CleanedDataset::new(records, dataset.imputed().to_vec()))
}
