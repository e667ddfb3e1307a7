//! Core data types: seasons, tracked statistics and standings records.

use crate::error::{Result, StandingsError};
use chrono::NaiveDate;
use serde::{de, Deserialize, Deserializer, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::str::FromStr;

#[cfg(test)]
mod tests;

/// First season of the Premier League.
pub const FIRST_SEASON: i32 = 1992;

/// Column order of the persisted dataset.
pub const COLUMNS: [&str; 9] = [
    "year",
    "startDate",
    "endDate",
    "teamName",
    "won",
    "draw",
    "lost",
    "goalsFor",
    "goalsAgainst",
];

/// Type-safe wrapper for a season start year
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Year(pub i32);

impl Year {
    pub fn new(year: i32) -> Self {
        Self(year)
    }

    pub fn as_i32(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Year {
    type Err = StandingsError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(Self(s.trim().parse()?))
    }
}

/// The API reports `filters.season` as a string while stored data carries plain
/// integers, so both are accepted. Fractional values are rejected.
impl<'de> Deserialize<'de> for Year {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct YearVisitor;

        impl de::Visitor<'_> for YearVisitor {
            type Value = Year;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an integer season year")
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Year, E> {
                i32::try_from(v).map(Year).map_err(E::custom)
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Year, E> {
                i32::try_from(v).map(Year).map_err(E::custom)
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<Year, E> {
                Err(E::custom(format!("year {v} is not an integer")))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Year, E> {
                v.trim().parse().map(Year).map_err(E::custom)
            }
        }

        deserializer.deserialize_any(YearVisitor)
    }
}

/// One of the tracked per-team statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Kpi {
    #[serde(rename = "won")]
    Won,
    #[serde(rename = "draw")]
    Draw,
    #[serde(rename = "lost")]
    Lost,
    #[serde(rename = "goalsFor")]
    GoalsFor,
    #[serde(rename = "goalsAgainst")]
    GoalsAgainst,
}

impl Kpi {
    pub const ALL: [Kpi; 5] = [
        Kpi::Won,
        Kpi::Draw,
        Kpi::Lost,
        Kpi::GoalsFor,
        Kpi::GoalsAgainst,
    ];

    /// Column name, as used in the API payload and the CSV header.
    pub fn as_str(&self) -> &'static str {
        match self {
            Kpi::Won => "won",
            Kpi::Draw => "draw",
            Kpi::Lost => "lost",
            Kpi::GoalsFor => "goalsFor",
            Kpi::GoalsAgainst => "goalsAgainst",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Kpi::Won => 0,
            Kpi::Draw => 1,
            Kpi::Lost => 2,
            Kpi::GoalsFor => 3,
            Kpi::GoalsAgainst => 4,
        }
    }
}

impl fmt::Display for Kpi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Kpi {
    type Err = StandingsError;

    fn from_str(s: &str) -> Result<Self> {
        Kpi::ALL
            .into_iter()
            .find(|kpi| kpi.as_str() == s)
            .ok_or_else(|| StandingsError::UnknownKpi {
                name: s.to_string(),
            })
    }
}

/// One team's standing in one season.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonTeamRecord {
    pub year: Year,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub team_name: String,
    pub won: Option<u32>,
    pub draw: Option<u32>,
    pub lost: Option<u32>,
    pub goals_for: Option<u32>,
    pub goals_against: Option<u32>,
}

impl SeasonTeamRecord {
    pub fn stat(&self, kpi: Kpi) -> Option<u32> {
        match kpi {
            Kpi::Won => self.won,
            Kpi::Draw => self.draw,
            Kpi::Lost => self.lost,
            Kpi::GoalsFor => self.goals_for,
            Kpi::GoalsAgainst => self.goals_against,
        }
    }

    pub fn set_stat(&mut self, kpi: Kpi, value: Option<u32>) {
        match kpi {
            Kpi::Won => self.won = value,
            Kpi::Draw => self.draw = value,
            Kpi::Lost => self.lost = value,
            Kpi::GoalsFor => self.goals_for = value,
            Kpi::GoalsAgainst => self.goals_against = value,
        }
    }

    /// Incremental-merge key: `"{year}_{teamName}"`.
    pub fn dedup_key(&self) -> String {
        format!("{}_{}", self.year, self.team_name)
    }
}

/// Collection of standings records, in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Vec<SeasonTeamRecord>,
}

impl Dataset {
    pub fn new(records: Vec<SeasonTeamRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[SeasonTeamRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct years, ascending.
    pub fn years(&self) -> BTreeSet<Year> {
        self.records.iter().map(|r| r.year).collect()
    }

    pub fn dedup_keys(&self) -> HashSet<String> {
        self.records.iter().map(SeasonTeamRecord::dedup_key).collect()
    }

    /// Records of `incoming` whose key is not already present here.
    pub fn new_records<'a>(&self, incoming: &'a Dataset) -> Vec<&'a SeasonTeamRecord> {
        let existing = self.dedup_keys();
        incoming
            .records
            .iter()
            .filter(|r| !existing.contains(&r.dedup_key()))
            .collect()
    }

    /// Existing rows followed by the new rows of `incoming`; existing rows are
    /// never replaced. The first row wins for any repeated key, so the result
    /// holds each `(year, teamName)` once.
    pub fn merged_with(&self, incoming: &Dataset) -> Dataset {
        let mut seen = HashSet::new();
        let records = self
            .records
            .iter()
            .chain(&incoming.records)
            .filter(|r| seen.insert(r.dedup_key()))
            .cloned()
            .collect();
        Dataset::new(records)
    }
}

impl From<Vec<SeasonTeamRecord>> for Dataset {
    fn from(records: Vec<SeasonTeamRecord>) -> Self {
        Self::new(records)
    }
}

/// One cleaned statistic. Columns that needed no filling keep their integer
/// counts; a median-filled column holds floats throughout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StatValue {
    Count(u32),
    Float(f64),
}

impl StatValue {
    pub fn as_f64(&self) -> f64 {
        match self {
            StatValue::Count(v) => f64::from(*v),
            StatValue::Float(v) => *v,
        }
    }
}

/// A record whose statistics are all populated.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanedRecord {
    pub year: Year,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub team_name: String,
    pub stats: [StatValue; 5],
}

impl CleanedRecord {
    pub fn value(&self, kpi: Kpi) -> StatValue {
        self.stats[kpi.index()]
    }

    pub fn stat(&self, kpi: Kpi) -> f64 {
        self.value(kpi).as_f64()
    }
}

/// Dataset after median imputation. Never persisted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CleanedDataset {
    records: Vec<CleanedRecord>,
    imputed: Vec<(Kpi, f64)>,
}

impl CleanedDataset {
    pub fn new(records: Vec<CleanedRecord>, imputed: Vec<(Kpi, f64)>) -> Self {
        Self { records, imputed }
    }

    pub fn records(&self) -> &[CleanedRecord] {
        &self.records
    }

    /// Columns that had missing values, with the median used to fill them.
    pub fn imputed(&self) -> &[(Kpi, f64)] {
        &self.imputed
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn years(&self) -> BTreeSet<Year> {
        self.records.iter().map(|r| r.year).collect()
    }
}
