//! Storage layer for the standings pipeline
//!
//! Persistence is split in two levels:
//! - `BlobStore`: raw bytes by key, with a local-filesystem and an
//!   object-storage implementation
//! - `dataset`: the CSV codec and the incremental-merge logic on top of a blob store

pub mod bucket;
pub mod dataset;
pub mod local;


use crate::Result;
use async_trait::async_trait;
use std::fmt::Debug;

pub use bucket::BucketStore;
pub use dataset::{decode_csv, encode_csv, DatasetStore};
pub use local::LocalStore;

/// Key/value byte storage the dataset and charts are written through.
#[async_trait]
pub trait BlobStore: Debug + Send + Sync {
    /// Read a blob. `Ok(None)` when nothing is stored under `key`.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Write a blob, replacing any previous content.
    async fn put(&self, key: &str, bytes: Vec<u8>) -> Result<()>;

    /// Human-readable location of `key`, for logs and error messages.
    fn location(&self, key: &str) -> String;
}
