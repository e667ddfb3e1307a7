//! Clean the stored dataset and render one chart per statistic.

use super::Pipeline;
use crate::{
    charts::RenderReport,
    clean::{align_teams, clean_data},
    Result,
};
use tracing::{info, warn};

impl Pipeline {
    /// Load, clean and chart the stored dataset.
    ///
    /// A missing dataset or one that fails validation renders nothing but is
    /// not an error; an unreadable dataset is.
    pub async fn summarize(&self) -> Result<RenderReport> {
        let Some(dataset) = self.store.load().await? else {
            warn!(location = %self.store.location(), "no stored dataset to summarize");
            return Ok(self.charts.render_all(None).await);
        };

        let mut cleaned = clean_data(&dataset);
        if self.config.common_teams_only {
            cleaned = cleaned.as_ref().and_then(align_teams);
        }

        let report = self.charts.render_all(cleaned.as_ref()).await;
        info!(
            rendered = report.rendered.len(),
            failed = report.failed.len(),
            "summary charts done"
        );
        Ok(report)
    }
}
