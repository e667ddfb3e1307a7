//! Response shapes of the football-data standings endpoint.

use crate::types::Year;
use serde::Deserialize;
use serde_json::Value;

/// Top-level standings payload. Only `standings` is required up front; the
/// other blocks are checked per team row.
#[derive(Debug, Deserialize)]
pub struct StandingsEnvelope {
    #[serde(default)]
    pub filters: Option<Filters>,
    #[serde(default)]
    pub season: Option<SeasonInfo>,
    pub standings: Vec<StandingBlock>,
}

#[derive(Debug, Deserialize)]
pub struct Filters {
    #[serde(default)]
    pub season: Option<Year>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonInfo {
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
}

/// One standings table (`TOTAL`, `HOME`, `AWAY`).
#[derive(Debug, Deserialize)]
pub struct StandingBlock {
    #[serde(rename = "type")]
    pub kind: String,
    /// Rows are kept raw so a bad row can be skipped on its own.
    #[serde(default)]
    pub table: Option<Vec<Value>>,
}

impl StandingBlock {
    pub const TOTAL: &'static str = "TOTAL";
}

#[derive(Debug, Deserialize)]
pub struct TeamRef {
    pub name: String,
}

/// One team row of a standings table.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRow {
    pub team: TeamRef,
    pub won: u32,
    pub draw: u32,
    pub lost: u32,
    pub goals_for: u32,
    pub goals_against: u32,
}
