//! CSV persistence of the standings dataset.

use super::BlobStore;
use crate::{
    clean::validate_year_cells,
    error::StandingsError,
    types::{Dataset, SeasonTeamRecord, COLUMNS},
    Result,
};
use std::sync::Arc;
use tracing::{error, info, warn};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// The standings dataset stored under one key of a [`BlobStore`].
#[derive(Debug, Clone)]
pub struct DatasetStore {
    blobs: Arc<dyn BlobStore>,
    key: String,
}

impl DatasetStore {
    pub fn new(blobs: Arc<dyn BlobStore>, key: impl Into<String>) -> Self {
        Self {
            blobs,
            key: key.into(),
        }
    }

    pub fn location(&self) -> String {
        self.blobs.location(&self.key)
    }

    /// Load the stored dataset; `Ok(None)` when nothing has been saved yet.
    pub async fn load(&self) -> Result<Option<Dataset>> {
        let Some(bytes) = self.blobs.get(&self.key).await? else {
            return Ok(None);
        };
        let dataset = decode_csv(&bytes, &self.location())?;
        info!(location = %self.location(), records = dataset.len(), "loaded dataset");
        Ok(Some(dataset))
    }

    pub async fn save(&self, dataset: &Dataset) -> Result<()> {
        let location = self.location();
        let bytes = encode_csv(dataset)?;

        match self.blobs.put(&self.key, bytes).await {
            Ok(()) => {
                info!(%location, records = dataset.len(), "dataset saved");
                Ok(())
            }
            Err(e @ StandingsError::PermissionDenied { .. }) => {
                error!(%location, "permission denied when saving dataset");
                Err(e)
            }
            Err(e) => {
                error!(%location, error = %e, "error saving dataset");
                Err(e)
            }
        }
    }

    /// Whether `incoming` holds any `(year, teamName)` not yet stored.
    ///
    /// An absent or unreadable stored dataset counts as "save needed".
    pub async fn merge_check(&self, incoming: &Dataset) -> bool {
        let existing = match self.load().await {
            Ok(Some(existing)) => existing,
            Ok(None) => {
                info!(location = %self.location(), "no stored dataset, will create it");
                return true;
            }
            Err(e) => {
                warn!(location = %self.location(), error = %e, "could not read stored dataset, saving anyway");
                return true;
            }
        };

        let new_records = existing.new_records(incoming).len();
        if new_records > 0 {
            info!(new_records, "found new records to add");
            true
        } else {
            info!("no new records found, skipping save");
            false
        }
    }
}

/// Encode as BOM-prefixed UTF-8 CSV with the canonical header.
pub fn encode_csv(dataset: &Dataset) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(UTF8_BOM.to_vec());

    writer.write_record(COLUMNS)?;
    for record in dataset.records() {
        writer.serialize(record)?;
    }

    writer
        .into_inner()
        .map_err(|e| StandingsError::Io(e.into_error()))
}

/// Decode stored CSV bytes. Empty content, missing columns and non-integer
/// years are errors.
pub fn decode_csv(bytes: &[u8], location: &str) -> Result<Dataset> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(StandingsError::EmptyDataset {
            location: location.to_string(),
        });
    }

    let mut reader = csv::ReaderBuilder::new().from_reader(bytes);
    let headers = reader.headers()?.clone();

    if let Some(missing) = COLUMNS
        .iter()
        .find(|column| !headers.iter().any(|h| h == **column))
    {
        return Err(StandingsError::MalformedDataset {
            message: format!("{location} has no '{missing}' column"),
        });
    }

    let rows = reader.records().collect::<std::result::Result<Vec<_>, _>>()?;
    if rows.is_empty() {
        return Err(StandingsError::EmptyDataset {
            location: location.to_string(),
        });
    }

    let year_index = headers.iter().position(|h| h == "year").unwrap_or(0);
    let year_cells: Vec<&str> = rows.iter().map(|row| row.get(year_index).unwrap_or("")).collect();
    let (valid, message) = validate_year_cells(&year_cells);
    if !valid {
        return Err(StandingsError::MalformedDataset { message });
    }

    let records = rows
        .iter()
        .map(|row| row.deserialize::<SeasonTeamRecord>(Some(&headers)))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(Dataset::new(records))
}
