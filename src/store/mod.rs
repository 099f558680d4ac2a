//! Object store access, narrowed to the three calls the archiving pipeline
//! needs: paginated listing by prefix, streamed reads, and whole-body writes.
//!
//! The trait is the seam the orchestrator is tested through; `s3` holds the
//! real client.

pub mod s3;

#[cfg(test)]
pub mod memory;

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::BoxStream;
use std::io;
use thiserror::Error;

/// One page of a listing. `next_token` is `Some` while further pages remain.
#[derive(Debug, Default)]
pub struct ListPage {
    pub keys: Vec<String>,
    pub next_token: Option<String>,
}

/// Streamed object content.
pub type ObjectBody = BoxStream<'static, io::Result<Bytes>>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("object `{0}` not found")]
    NotFound(String),
    #[error("store request failed: {0}")]
    Unavailable(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Minimal object-store contract: list a prefix page by page, open an object
/// for reading, write an object (overwriting any existing one at that key).
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn list_page(&self, prefix: &str, token: Option<&str>) -> StoreResult<ListPage>;

    async fn get(&self, key: &str) -> StoreResult<ObjectBody>;

    async fn put(&self, key: &str, body: Bytes) -> StoreResult<()>;
}
