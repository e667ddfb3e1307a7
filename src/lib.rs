//! Premier League standings pipeline
//!
//! Fetches per-season team standings from the football-data.org API, keeps
//! them in one CSV dataset, and serves three operations over it.
//!
//! ## Features
//!
//! - **Incremental fetch**: only `(year, teamName)` pairs not already stored
//!   trigger a save
//! - **Cleaning**: year validation and median imputation of missing statistics
//! - **Charts**: one grouped bar chart (SVG) per tracked statistic
//! - **KPI query**: one statistic filtered by year range and team names
//! - **Storage**: local directory or S3-compatible bucket, chosen at startup
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pl_standings::{commands::Pipeline, query::KpiQuery, Config};
//!
//! # async fn example() -> pl_standings::Result<()> {
//! let pipeline = Pipeline::new(Config::from_env()?)?;
//! pipeline.fetch_and_persist().await?;
//!
//! let rows = pipeline.query_kpi(&KpiQuery::default()).await?;
//! println!("{}", serde_json::to_string(&rows)?);
//! # Ok(())
//! # }
//! ```
//!
//! ## Environment Configuration
//!
//! ```bash
//! export FOOTBALL_API_TOKEN=...
//! export PL_SEASONS=2020-2024
//! ```

pub mod charts;
pub mod clean;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod query;
pub mod router;
pub mod server;
pub mod standings;
pub mod storage;
pub mod types;

// Re-export commonly used types
pub use config::{Config, StorageConfig};
pub use error::{Result, StandingsError};
pub use types::{CleanedDataset, Dataset, Kpi, SeasonTeamRecord, StatValue, Year};
