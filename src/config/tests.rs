//! Unit tests for configuration loading

use super::*;
use std::collections::HashMap;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}

fn years(values: &[i32]) -> Vec<Year> {
    values.iter().copied().map(Year::new).collect()
}

#[test]
fn test_parse_seasons_range() {
    assert_eq!(
        parse_seasons("2020-2024").unwrap(),
        years(&[2020, 2021, 2022, 2023, 2024])
    );
}

#[test]
fn test_parse_seasons_mixed() {
    assert_eq!(
        parse_seasons("2021, 2016-2017,2021").unwrap(),
        years(&[2016, 2017, 2021])
    );
}

#[test]
fn test_parse_seasons_rejects_reversed_range() {
    assert!(matches!(
        parse_seasons("2024-2020"),
        Err(StandingsError::InvalidSeasons { .. })
    ));
}

#[test]
fn test_parse_seasons_rejects_garbage() {
    assert!(parse_seasons("abc").is_err());
    assert!(parse_seasons(" , ").is_err());
}

#[test]
fn test_defaults_without_environment() {
    let config = Config::from_lookup(lookup_from(&[])).unwrap();

    assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
    assert_eq!(config.seasons, years(&[2020, 2021, 2022, 2023, 2024]));
    assert_eq!(config.csv_filename, DEFAULT_CSV_FILENAME);
    assert_eq!(config.storage, StorageConfig::local("."));
    assert!(!config.common_teams_only);
}

#[test]
fn test_runtime_marker_selects_bucket_storage() {
    let config = Config::from_lookup(lookup_from(&[
        (RUNTIME_MARKER_ENV_VAR, "pl-standings"),
        (BUCKET_ENV_VAR, "my-bucket"),
    ]))
    .unwrap();

    assert_eq!(
        config.storage,
        StorageConfig::Bucket {
            bucket: "my-bucket".to_string(),
            data_prefix: DEFAULT_BUCKET_DATA_PREFIX.to_string(),
            plots_prefix: DEFAULT_BUCKET_PLOTS_PREFIX.to_string(),
        }
    );
}

#[test]
fn test_local_data_dir_override() {
    let config = Config::from_lookup(lookup_from(&[
        (DATA_DIR_ENV_VAR, "/srv/pl"),
        (SEASONS_ENV_VAR, "2023"),
        (COMMON_TEAMS_ENV_VAR, "true"),
        (API_TOKEN_ENV_VAR, "secret"),
    ]))
    .unwrap();

    assert_eq!(
        config.storage,
        StorageConfig::Local {
            data_dir: PathBuf::from("/srv/pl/data"),
            plots_dir: PathBuf::from("/srv/pl/premier_league_plots"),
        }
    );
    assert_eq!(config.seasons, years(&[2023]));
    assert!(config.common_teams_only);
    assert_eq!(config.api_token, "secret");
}

#[test]
fn test_invalid_seasons_env_is_an_error() {
    let result = Config::from_lookup(lookup_from(&[(SEASONS_ENV_VAR, "2024-2020")]));
    assert!(result.is_err());
}

#[test]
fn test_local_storage_builds() {
    let dir = tempfile::tempdir().unwrap();
    let (data, plots) = StorageConfig::local(dir.path()).build().unwrap();

    assert!(data.location("x.csv").ends_with("data/x.csv"));
    assert!(plots.location("y.svg").ends_with("premier_league_plots/y.svg"));
}
