//! Query one statistic from the stored dataset.

use super::Pipeline;
use crate::{
    error::StandingsError,
    query::{query_kpi, KpiQuery, KpiRow},
    Result,
};
use tracing::info;

impl Pipeline {
    pub async fn query_kpi(&self, query: &KpiQuery) -> Result<Vec<KpiRow>> {
        let dataset = self
            .store
            .load()
            .await?
            .ok_or_else(|| StandingsError::DatasetMissing {
                location: self.store.location(),
            })?;

        let rows = query_kpi(&dataset, query)?;
        info!(
            kpi = %query.kpi_name,
            start = %query.start_year,
            end = %query.end_year,
            rows = rows.len(),
            "kpi query"
        );
        Ok(rows)
    }
}
