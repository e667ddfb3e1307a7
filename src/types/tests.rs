//! Unit tests for core data types

use super::*;
use serde_json::json;

fn record(year: i32, team: &str, won: u32) -> SeasonTeamRecord {
    SeasonTeamRecord {
        year: Year::new(year),
        start_date: NaiveDate::from_ymd_opt(year, 8, 1).unwrap(),
        end_date: NaiveDate::from_ymd_opt(year + 1, 5, 20).unwrap(),
        team_name: team.to_string(),
        won: Some(won),
        draw: Some(5),
        lost: Some(3),
        goals_for: Some(60),
        goals_against: Some(25),
    }
}

#[test]
fn test_year_display_and_parse() {
    let year: Year = "2023".parse().unwrap();
    assert_eq!(year, Year::new(2023));
    assert_eq!(year.to_string(), "2023");
    assert!("twenty".parse::<Year>().is_err());
}

#[test]
fn test_year_deserializes_from_number_and_string() {
    let from_number: Year = serde_json::from_value(json!(2023)).unwrap();
    let from_string: Year = serde_json::from_value(json!("2023")).unwrap();
    assert_eq!(from_number, from_string);
}

#[test]
fn test_year_rejects_fractional_value() {
    assert!(serde_json::from_value::<Year>(json!(2023.5)).is_err());
}

#[test]
fn test_kpi_round_trip_names() {
    for kpi in Kpi::ALL {
        assert_eq!(kpi.as_str().parse::<Kpi>().unwrap(), kpi);
    }
    assert_eq!(Kpi::GoalsAgainst.to_string(), "goalsAgainst");
}

#[test]
fn test_kpi_unknown_name() {
    match "points".parse::<Kpi>().unwrap_err() {
        StandingsError::UnknownKpi { name } => assert_eq!(name, "points"),
        other => panic!("Expected UnknownKpi, got {other:?}"),
    }
}

#[test]
fn test_kpi_indexes_are_distinct() {
    let indexes: HashSet<usize> = Kpi::ALL.iter().map(Kpi::index).collect();
    assert_eq!(indexes.len(), Kpi::ALL.len());
}

#[test]
fn test_record_stat_accessors() {
    let mut r = record(2023, "Arsenal FC", 20);
    assert_eq!(r.stat(Kpi::Won), Some(20));
    assert_eq!(r.stat(Kpi::GoalsFor), Some(60));

    r.set_stat(Kpi::Draw, None);
    assert_eq!(r.stat(Kpi::Draw), None);
}

#[test]
fn test_dedup_key_format() {
    assert_eq!(record(2023, "Arsenal FC", 20).dedup_key(), "2023_Arsenal FC");
}

#[test]
fn test_record_serializes_with_column_names() {
    let value = serde_json::to_value(record(2023, "Arsenal FC", 20)).unwrap();
    let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
    for column in COLUMNS {
        assert!(keys.contains(&column), "missing column {column}");
    }
}

#[test]
fn test_dataset_years_sorted_and_distinct() {
    let dataset = Dataset::new(vec![
        record(2022, "Arsenal FC", 1),
        record(2020, "Arsenal FC", 2),
        record(2022, "Chelsea FC", 3),
    ]);
    let years: Vec<i32> = dataset.years().into_iter().map(|y| y.as_i32()).collect();
    assert_eq!(years, vec![2020, 2022]);
}

#[test]
fn test_merged_with_keeps_existing_rows() {
    let existing = Dataset::new(vec![record(2023, "Arsenal FC", 20)]);
    let incoming = Dataset::new(vec![
        record(2023, "Arsenal FC", 99),
        record(2024, "Arsenal FC", 22),
    ]);

    let merged = existing.merged_with(&incoming);
    assert_eq!(merged.len(), 2);
    assert_eq!(merged.records()[0].won, Some(20));
    assert_eq!(merged.records()[1].year, Year::new(2024));
}

#[test]
fn test_merged_with_drops_repeated_incoming_keys() {
    let incoming = Dataset::new(vec![
        record(2023, "Arsenal FC", 20),
        record(2023, "Chelsea FC", 18),
        record(2023, "Arsenal FC", 21),
    ]);

    let merged = Dataset::default().merged_with(&incoming);
    assert_eq!(merged.len(), 2);
    assert_eq!(merged.dedup_keys().len(), merged.len());
    assert_eq!(merged.records()[0].won, Some(20));
}

#[test]
fn test_new_records_empty_when_all_known() {
    let existing = Dataset::new(vec![record(2023, "Arsenal FC", 20)]);
    let incoming = Dataset::new(vec![record(2023, "Arsenal FC", 20)]);
    assert!(existing.new_records(&incoming).is_empty());
}
