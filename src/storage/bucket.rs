//! Object-storage blob store

use super::BlobStore;
use crate::{error::StandingsError, Result};
use async_trait::async_trait;
use object_store::{path::Path as ObjectPath, ObjectStore, PutPayload};
use std::{fmt, sync::Arc};

/// Stores each key as `<prefix><key>` in a bucket.
#[derive(Clone)]
pub struct BucketStore {
    store: Arc<dyn ObjectStore>,
    bucket: String,
    prefix: String,
}

impl BucketStore {
    pub fn new(
        store: Arc<dyn ObjectStore>,
        bucket: impl Into<String>,
        prefix: impl Into<String>,
    ) -> Self {
        Self {
            store,
            bucket: bucket.into(),
            prefix: prefix.into(),
        }
    }

    pub fn object_path(&self, key: &str) -> ObjectPath {
        ObjectPath::from(self.object_key(key))
    }

    /// Access failures become [`StandingsError::PermissionDenied`], as for
    /// local files.
    pub(crate) fn map_error(&self, key: &str, err: object_store::Error) -> StandingsError {
        match err {
            object_store::Error::PermissionDenied { .. }
            | object_store::Error::Unauthenticated { .. } => StandingsError::PermissionDenied {
                location: self.location(key),
            },
            other => StandingsError::ObjectStore(other),
        }
    }

    fn object_key(&self, key: &str) -> String {
        let prefix = self.prefix.trim_matches('/');
        if prefix.is_empty() {
            key.to_string()
        } else {
            format!("{prefix}/{key}")
        }
    }
}

impl fmt::Debug for BucketStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BucketStore")
            .field("bucket", &self.bucket)
            .field("prefix", &self.prefix)
            .finish()
    }
}

#[async_trait]
impl BlobStore for BucketStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        match self.store.get(&self.object_path(key)).await {
            Ok(result) => match result.bytes().await {
                Ok(bytes) => Ok(Some(bytes.to_vec())),
                Err(e) => Err(self.map_error(key, e)),
            },
            Err(object_store::Error::NotFound { .. }) => Ok(None),
            Err(e) => Err(self.map_error(key, e)),
        }
    }

    async fn put(&self, key: &str, bytes: Vec<u8>) -> Result<()> {
        self.store
            .put(&self.object_path(key), PutPayload::from(bytes))
            .await
            .map_err(|e| self.map_error(key, e))?;
        Ok(())
    }

    fn location(&self, key: &str) -> String {
        format!("s3://{}/{}", self.bucket, self.object_key(key))
    }
}
