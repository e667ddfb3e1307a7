//! Fetch every configured season and persist the new rows.

use super::Pipeline;
use crate::{
    error::StandingsError,
    types::{Dataset, Kpi, Year},
    Result,
};
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// What a fetch produced.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchOutcome {
    /// Rows returned by the API across all seasons.
    pub records: usize,
    /// Whether the stored dataset was (re)written.
    pub saved: bool,
}

impl Pipeline {
    /// Fetch the configured seasons and merge them into the stored dataset.
    ///
    /// Fails with [`StandingsError::NoData`] when no season returned a row,
    /// and with the storage error when the save itself fails.
    pub async fn fetch_and_persist(&self) -> Result<FetchOutcome> {
        info!(seasons = ?self.config.seasons, "fetching standings");
        let incoming = Dataset::new(self.client.fetch_seasons(&self.config.seasons).await);

        if incoming.is_empty() {
            warn!("failed to get any season data");
            return Err(StandingsError::NoData);
        }
        log_season_summary(&incoming);

        if !self.store.merge_check(&incoming).await {
            return Ok(FetchOutcome {
                records: incoming.len(),
                saved: false,
            });
        }

        let existing = match self.store.load().await {
            Ok(existing) => existing.unwrap_or_default(),
            Err(e) => {
                warn!(error = %e, "replacing unreadable stored dataset");
                Dataset::default()
            }
        };
        let merged = existing.merged_with(&incoming);
        self.store.save(&merged).await?;

        Ok(FetchOutcome {
            records: incoming.len(),
            saved: true,
        })
    }
}

fn log_season_summary(dataset: &Dataset) {
    let mut by_season: BTreeMap<Year, Vec<&str>> = BTreeMap::new();
    for record in dataset.records() {
        by_season
            .entry(record.year)
            .or_default()
            .push(record.team_name.as_str());
    }

    for (season, teams) in &by_season {
        debug!(%season, teams = teams.len(), "season summary");
        for record in dataset.records().iter().filter(|r| r.year == *season) {
            let stats: Vec<String> = Kpi::ALL
                .iter()
                .map(|kpi| match record.stat(*kpi) {
                    Some(v) => format!("{kpi}={v}"),
                    None => format!("{kpi}=-"),
                })
                .collect();
            debug!(%season, team = %record.team_name, "{}", stats.join(" "));
        }
    }
}
