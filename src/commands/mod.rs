//! Pipeline operations: fetch and persist, summarize into charts, query a KPI.

pub mod get_csv;
pub mod query_kpi;
pub mod summarize;

use crate::{
    charts::ChartRenderer,
    config::Config,
    standings::StandingsClient,
    storage::{BlobStore, DatasetStore},
    Result,
};
use std::sync::Arc;

pub use get_csv::FetchOutcome;

/// Everything the three operations share: configuration, the API client and
/// the dataset and chart stores.
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: Config,
    client: StandingsClient,
    store: DatasetStore,
    charts: ChartRenderer,
}

impl Pipeline {
    /// Build a pipeline with the stores selected by `config.storage`.
    pub fn new(config: Config) -> Result<Self> {
        let (data, plots) = config.storage.build()?;
        Self::with_stores(config, data, plots)
    }

    /// Build a pipeline over explicit dataset and chart stores.
    pub fn with_stores(
        config: Config,
        data: Arc<dyn BlobStore>,
        plots: Arc<dyn BlobStore>,
    ) -> Result<Self> {
        let client = StandingsClient::new(config.api_base_url.clone(), &config.api_token)?;
        let store = DatasetStore::new(data, config.csv_filename.clone());
        Ok(Self {
            config,
            client,
            store,
            charts: ChartRenderer::new(plots),
        })
    }

    pub fn store(&self) -> &DatasetStore {
        &self.store
    }
}
