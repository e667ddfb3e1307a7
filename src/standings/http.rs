use chrono::NaiveDate;
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT},
    Client, StatusCode,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use super::types::{StandingBlock, StandingsEnvelope, TableRow};
use crate::{
    error::StandingsError,
    types::{SeasonTeamRecord, Year},
    Result,
};


/// Sent as `X-Auth-Token`; header names are case-insensitive.
pub const AUTH_HEADER: &str = "x-auth-token";

/// Outcome of fetching one season.
#[derive(Debug, Clone, PartialEq)]
pub enum SeasonFetch {
    /// Rows of the TOTAL table; empty when the API had nothing usable.
    Records(Vec<SeasonTeamRecord>),
    /// The request or the response body failed outright.
    NoData,
}

impl SeasonFetch {
    pub fn is_no_data(&self) -> bool {
        matches!(self, SeasonFetch::NoData)
    }
}

/// Client for the competition standings endpoint.
#[derive(Debug, Clone)]
pub struct StandingsClient {
    http: Client,
    base_url: String,
    headers: HeaderMap,
}

impl StandingsClient {
    pub fn new(base_url: impl Into<String>, token: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(AUTH_HEADER, HeaderValue::from_str(token)?);

        let http = Client::builder().user_agent("pl-standings/0.1").build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            headers,
        })
    }

    /// `GET {base}/standings?season={season}`.
    pub async fn fetch_season(&self, season: Year) -> SeasonFetch {
        let url = format!("{}/standings", self.base_url);
        let params = [("season", season.to_string())];

        let response = match self
            .http
            .get(&url)
            .headers(self.headers.clone())
            .query(&params)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!(%season, error = %e, "error making standings request");
                return SeasonFetch::NoData;
            }
        };

        let status = response.status();
        if status != StatusCode::OK {
            warn!(%season, %status, "get season data failed");
            return SeasonFetch::Records(Vec::new());
        }

        match response.text().await {
            Ok(body) => parse_standings(season, &body),
            Err(e) => {
                warn!(%season, error = %e, "error reading standings response");
                SeasonFetch::NoData
            }
        }
    }

    /// Fetch each season in turn and concatenate the rows. Seasons without
    /// data are logged and skipped.
    pub async fn fetch_seasons(&self, seasons: &[Year]) -> Vec<SeasonTeamRecord> {
        let mut all = Vec::new();
        for &season in seasons {
            match self.fetch_season(season).await {
                SeasonFetch::Records(records) => {
                    info!(%season, teams = records.len(), "season fetched");
                    all.extend(records);
                }
                SeasonFetch::NoData => warn!(%season, "failed to get data for season"),
            }
        }
        all
    }
}

/// Turn a 200 response body into records.
pub fn parse_standings(season: Year, body: &str) -> SeasonFetch {
    let envelope: StandingsEnvelope = match serde_json::from_str(body) {
        Ok(envelope) => envelope,
        Err(e) => {
            warn!(%season, error = %e, "error decoding standings response");
            return SeasonFetch::NoData;
        }
    };

    let Some(total) = envelope
        .standings
        .iter()
        .find(|block| block.kind == StandingBlock::TOTAL)
    else {
        warn!(%season, "can't find TOTAL standings data");
        return SeasonFetch::Records(Vec::new());
    };

    let Some(table) = &total.table else {
        warn!(%season, "TOTAL standings have no table");
        return SeasonFetch::NoData;
    };

    let records = table
        .iter()
        .filter_map(|row| match extract_record(&envelope, row) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(%season, error = %e, "error processing team data, skipping row");
                None
            }
        })
        .collect::<Vec<_>>();

    debug!(%season, teams = records.len(), "parsed standings table");
    SeasonFetch::Records(records)
}

fn extract_record(envelope: &StandingsEnvelope, row: &Value) -> Result<SeasonTeamRecord> {
    let year = envelope
        .filters
        .as_ref()
        .and_then(|f| f.season)
        .ok_or(StandingsError::MissingField {
            field: "filters.season",
        })?;
    let season = envelope.season.as_ref();
    let start_date = parse_date(
        season.and_then(|s| s.start_date.as_deref()),
        "season.startDate",
    )?;
    let end_date = parse_date(season.and_then(|s| s.end_date.as_deref()), "season.endDate")?;

    let row = TableRow::deserialize(row)?;

    Ok(SeasonTeamRecord {
        year,
        start_date,
        end_date,
        team_name: row.team.name,
        won: Some(row.won),
        draw: Some(row.draw),
        lost: Some(row.lost),
        goals_for: Some(row.goals_for),
        goals_against: Some(row.goals_against),
    })
}

fn parse_date(raw: Option<&str>, field: &'static str) -> Result<NaiveDate> {
    raw.and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
        .ok_or(StandingsError::MissingField { field })
}
