//! Runtime configuration.
//!
//! Everything the pipeline needs to know about its surroundings lives in one
//! [`Config`] value built at startup and handed to each component.

use crate::{
    error::{Result, StandingsError},
    storage::{BlobStore, BucketStore, LocalStore},
    types::Year,
};
use std::{path::PathBuf, sync::Arc};
use tracing::{info, warn};

#[cfg(test)]
mod tests;

pub const API_TOKEN_ENV_VAR: &str = "FOOTBALL_API_TOKEN";
pub const API_BASE_URL_ENV_VAR: &str = "FOOTBALL_API_BASE_URL";
pub const SEASONS_ENV_VAR: &str = "PL_SEASONS";
pub const DATA_DIR_ENV_VAR: &str = "PL_DATA_DIR";
pub const BUCKET_ENV_VAR: &str = "PL_S3_BUCKET";
pub const BUCKET_DATA_PREFIX_ENV_VAR: &str = "PL_S3_DATA_PREFIX";
pub const BUCKET_PLOTS_PREFIX_ENV_VAR: &str = "PL_S3_PLOTS_PREFIX";
pub const COMMON_TEAMS_ENV_VAR: &str = "PL_COMMON_TEAMS_ONLY";

/// Set by the serverless runtime; selects object storage.
pub const RUNTIME_MARKER_ENV_VAR: &str = "AWS_LAMBDA_FUNCTION_NAME";

pub const DEFAULT_API_BASE_URL: &str = "https://api.football-data.org/v4/competitions/PL";
pub const DEFAULT_CSV_FILENAME: &str = "premier_league_stats.csv";
pub const DEFAULT_SEASONS: &str = "2020-2024";
pub const DEFAULT_BUCKET: &str = "zsbtest";
pub const DEFAULT_BUCKET_DATA_PREFIX: &str = "football/data/";
pub const DEFAULT_BUCKET_PLOTS_PREFIX: &str = "football/premier_league_plots/";
pub const DEFAULT_DATA_SUBDIR: &str = "data";
pub const DEFAULT_PLOTS_SUBDIR: &str = "premier_league_plots";

/// Where the dataset and chart artifacts live.
#[derive(Debug, Clone, PartialEq)]
pub enum StorageConfig {
    Local {
        data_dir: PathBuf,
        plots_dir: PathBuf,
    },
    Bucket {
        bucket: String,
        data_prefix: String,
        plots_prefix: String,
    },
}

impl StorageConfig {
    /// Local layout rooted at `root`: `<root>/data` and `<root>/premier_league_plots`.
    pub fn local(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        StorageConfig::Local {
            data_dir: root.join(DEFAULT_DATA_SUBDIR),
            plots_dir: root.join(DEFAULT_PLOTS_SUBDIR),
        }
    }

    pub fn bucket(bucket: impl Into<String>) -> Self {
        StorageConfig::Bucket {
            bucket: bucket.into(),
            data_prefix: DEFAULT_BUCKET_DATA_PREFIX.to_string(),
            plots_prefix: DEFAULT_BUCKET_PLOTS_PREFIX.to_string(),
        }
    }

    /// Build the (dataset, charts) blob stores.
    pub fn build(&self) -> Result<(Arc<dyn BlobStore>, Arc<dyn BlobStore>)> {
        match self {
            StorageConfig::Local {
                data_dir,
                plots_dir,
            } => Ok((
                Arc::new(LocalStore::new(data_dir)),
                Arc::new(LocalStore::new(plots_dir)),
            )),
            StorageConfig::Bucket {
                bucket,
                data_prefix,
                plots_prefix,
            } => {
                let s3 = Arc::new(
                    object_store::aws::AmazonS3Builder::from_env()
                        .with_bucket_name(bucket)
                        .build()?,
                );
                Ok((
                    Arc::new(BucketStore::new(s3.clone(), bucket, data_prefix)),
                    Arc::new(BucketStore::new(s3, bucket, plots_prefix)),
                ))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_base_url: String,
    pub api_token: String,
    pub seasons: Vec<Year>,
    pub csv_filename: String,
    pub storage: StorageConfig,
    /// Restrict charts to teams present in every season.
    pub common_teams_only: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            api_token: String::new(),
            seasons: (2020..=2024).map(Year::new).collect(),
            csv_filename: DEFAULT_CSV_FILENAME.to_string(),
            storage: StorageConfig::local("."),
            common_teams_only: false,
        }
    }
}

impl Config {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let api_token = lookup(API_TOKEN_ENV_VAR).unwrap_or_else(|| {
            warn!("{API_TOKEN_ENV_VAR} not set; requests will be unauthenticated");
            String::new()
        });

        let seasons = match lookup(SEASONS_ENV_VAR) {
            Some(spec) => parse_seasons(&spec)?,
            None => defaults.seasons,
        };

        let storage = if lookup(RUNTIME_MARKER_ENV_VAR).is_some() {
            StorageConfig::Bucket {
                bucket: lookup(BUCKET_ENV_VAR).unwrap_or_else(|| DEFAULT_BUCKET.to_string()),
                data_prefix: lookup(BUCKET_DATA_PREFIX_ENV_VAR)
                    .unwrap_or_else(|| DEFAULT_BUCKET_DATA_PREFIX.to_string()),
                plots_prefix: lookup(BUCKET_PLOTS_PREFIX_ENV_VAR)
                    .unwrap_or_else(|| DEFAULT_BUCKET_PLOTS_PREFIX.to_string()),
            }
        } else {
            StorageConfig::local(lookup(DATA_DIR_ENV_VAR).unwrap_or_else(|| ".".to_string()))
        };

        let common_teams_only = lookup(COMMON_TEAMS_ENV_VAR)
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        let config = Self {
            api_base_url: lookup(API_BASE_URL_ENV_VAR).unwrap_or(defaults.api_base_url),
            api_token,
            seasons,
            csv_filename: defaults.csv_filename,
            storage,
            common_teams_only,
        };
        info!(storage = ?config.storage, seasons = config.seasons.len(), "configuration loaded");
        Ok(config)
    }
}

/// Parse a season list: `2020`, `2019,2021`, `2020-2024`, `2016-2018,2020`.
pub fn parse_seasons(spec: &str) -> Result<Vec<Year>> {
    let invalid = || StandingsError::InvalidSeasons {
        spec: spec.to_string(),
    };

    let mut seasons = Vec::new();
    for part in spec.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        match part.split_once('-') {
            Some((start, end)) => {
                let start: Year = start.parse()?;
                let end: Year = end.parse()?;
                if start > end {
                    return Err(invalid());
                }
                seasons.extend((start.as_i32()..=end.as_i32()).map(Year::new));
            }
            None => seasons.push(part.parse()?),
        }
    }

    seasons.sort();
    seasons.dedup();
    if seasons.is_empty() {
        return Err(invalid());
    }
    Ok(seasons)
}
