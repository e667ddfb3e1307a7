//! Standings fetcher for the football-data competition API.
//!
//! - `http`: client, per-season fetch and response parsing
//! - `types`: response payload shapes

pub mod http;
pub mod types;

pub use http::{parse_standings, SeasonFetch, StandingsClient};
