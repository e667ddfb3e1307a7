//! KPI query over the stored dataset.

use crate::{
    types::{Dataset, Kpi, Year},
    Result,
};
use serde::{ser::SerializeMap, Deserialize, Serialize, Serializer};


/// Body of `/query_kpi_from_csv`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiQuery {
    #[serde(rename = "StartYear")]
    pub start_year: Year,
    #[serde(rename = "EndYear")]
    pub end_year: Year,
    #[serde(rename = "TeamNameList", default)]
    pub team_names: Option<Vec<String>>,
    #[serde(rename = "KPIName")]
    pub kpi_name: String,
}

impl Default for KpiQuery {
    fn default() -> Self {
        Self {
            start_year: Year::new(2023),
            end_year: Year::new(2024),
            team_names: Some(vec![
                "Manchester City FC".to_string(),
                "Arsenal FC".to_string(),
            ]),
            kpi_name: Kpi::Won.as_str().to_string(),
        }
    }
}

/// One projected row: `{"year": .., "teamName": .., "<kpi>": ..}`.
#[derive(Debug, Clone, PartialEq)]
pub struct KpiRow {
    pub year: Year,
    pub team_name: String,
    pub kpi: Kpi,
    pub value: Option<u32>,
}

impl Serialize for KpiRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(3))?;
        map.serialize_entry("year", &self.year)?;
        map.serialize_entry("teamName", &self.team_name)?;
        map.serialize_entry(self.kpi.as_str(), &self.value)?;
        map.end()
    }
}

/// Filter by inclusive year range and (if given) team names, then project to
/// year, team and the requested statistic. Row order follows the dataset.
pub fn query_kpi(dataset: &Dataset, query: &KpiQuery) -> Result<Vec<KpiRow>> {
    let kpi: Kpi = query.kpi_name.parse()?;
    let teams = query.team_names.as_deref().unwrap_or_default();

    Ok(dataset
        .records()
        .iter()
        .filter(|r| query.start_year <= r.year && r.year <= query.end_year)
        .filter(|r| teams.is_empty() || teams.contains(&r.team_name))
        .map(|r| KpiRow {
            year: r.year,
            team_name: r.team_name.clone(),
            kpi,
            value: r.stat(kpi),
        })
        .collect())
}
