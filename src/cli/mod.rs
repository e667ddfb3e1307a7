//! CLI argument definitions and parsing.

use crate::{query::KpiQuery, types::Year};
use clap::{Parser, Subcommand};
use std::net::SocketAddr;

#[cfg(test)]
mod tests;

#[derive(Debug, Parser)]
#[clap(
    name = "pl-standings",
    about = "Premier League standings: fetch, chart and query"
)]
pub struct PlStandings {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Fetch the configured seasons and merge them into the stored CSV.
    Fetch,

    /// Clean the stored CSV and render one chart per statistic.
    Summarize,

    /// Print one statistic for a year range and set of teams as JSON.
    Query {
        /// First season (inclusive).
        #[clap(long, default_value_t = Year::new(2023))]
        start_year: Year,

        /// Last season (inclusive).
        #[clap(long, default_value_t = Year::new(2024))]
        end_year: Year,

        /// Team name (repeatable): `--team "Arsenal FC" --team "Chelsea FC"`.
        #[clap(long = "team", default_values_t = ["Manchester City FC".to_string(), "Arsenal FC".to_string()])]
        teams: Vec<String>,

        /// Include every team, ignoring `--team`.
        #[clap(long, conflicts_with = "teams")]
        all_teams: bool,

        /// One of won, draw, lost, goalsFor, goalsAgainst.
        #[clap(long, default_value = "won")]
        kpi: String,
    },

    /// Serve the three operations over HTTP.
    Serve {
        /// Listen address.
        #[clap(long, default_value = "127.0.0.1:3000")]
        addr: SocketAddr,
    },
}

impl Commands {
    /// The KPI query described by a `query` invocation.
    pub fn kpi_query(&self) -> Option<KpiQuery> {
        match self {
            Commands::Query {
                start_year,
                end_year,
                teams,
                all_teams,
                kpi,
            } => Some(KpiQuery {
                start_year: *start_year,
                end_year: *end_year,
                team_names: (!all_teams).then(|| teams.clone()),
                kpi_name: kpi.clone(),
            }),
            _ => None,
        }
    }
}
