//! Error types for the Premier League standings pipeline

use thiserror::Error;


pub type Result<T> = std::result::Result<T, StandingsError>;

#[derive(Error, Debug)]
pub enum StandingsError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Object storage error: {0}")]
    ObjectStore(#[from] object_store::Error),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    #[error("Failed to parse number: {0}")]
    ParseInt(#[from] std::num::ParseIntError),

    #[error("Permission denied when saving to {location}")]
    PermissionDenied { location: String },

    #[error("Standings API returned no data")]
    NoData,

    #[error("No stored dataset at {location}")]
    DatasetMissing { location: String },

    #[error("Stored dataset at {location} is empty")]
    EmptyDataset { location: String },

    #[error("Malformed dataset: {message}")]
    MalformedDataset { message: String },

    #[error("Missing field in standings response: {field}")]
    MissingField { field: &'static str },

    #[error("Unknown KPI: {name}")]
    UnknownKpi { name: String },

    #[error("Invalid season list: {spec}")]
    InvalidSeasons { spec: String },

    #[error("Chart rendering failed: {message}")]
    Render { message: String },
}

impl From<anyhow::Error> for StandingsError {
    fn from(err: anyhow::Error) -> Self {
        StandingsError::Render {
            message: format!("{err:#}"),
        }
    }
}
