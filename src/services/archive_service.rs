//! src/services/archive_service.rs
//!
//! ArchiveService — the aggregation pipeline. One call walks a folder's key
//! prefix in the store, streams every object into a zip entry, and uploads
//! the finished archive to `<base>/<folder>.zip`. Every stage is fail-fast:
//! any listing, read, build, or upload error aborts the request before the
//! destination key is touched, so a failed run never leaves a partial
//! archive behind.

use crate::models::folder::{FolderName, InvalidFolderName};
use crate::services::zip_builder::{BuildError, ZipBuilder};
use crate::store::{ObjectStore, StoreError};
use futures::StreamExt;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error(transparent)]
    InvalidFolderName(#[from] InvalidFolderName),
    #[error("no objects found under prefix `{0}`")]
    FolderNotFound(String),
    #[error("listing objects under `{prefix}` failed: {source}")]
    ListFailed {
        prefix: String,
        source: StoreError,
    },
    #[error("reading object `{key}` failed: {source}")]
    ObjectReadFailed {
        key: String,
        source: StoreError,
    },
    #[error(transparent)]
    Build(#[from] BuildError),
    #[error("uploading archive to `{key}` failed: {source}")]
    UploadFailed {
        key: String,
        source: StoreError,
    },
}

pub type ArchiveResult<T> = Result<T, ArchiveError>;

/// Result of a successful archiving run.
#[derive(Debug)]
pub struct ArchiveOutcome {
    pub destination_key: String,
    pub entry_count: usize,
    pub size_bytes: usize,
}

impl ArchiveOutcome {
    pub fn message(&self) -> String {
        format!(
            "archived {} objects to `{}` ({} bytes)",
            self.entry_count, self.destination_key, self.size_bytes
        )
    }
}

/// ArchiveService drives the whole pipeline for one folder:
/// - validate the folder name and derive prefix + destination key
/// - list every page of keys under the prefix
/// - stream each object into a zip entry, in listing order
/// - upload the finished archive
///
/// Holds no per-request state; a clone per request is cheap and requests
/// never share mutable data.
#[derive(Clone)]
pub struct ArchiveService {
    store: Arc<dyn ObjectStore>,
    base_path: String,
    fetch_concurrency: usize,
}

impl ArchiveService {
    pub fn new(
        store: Arc<dyn ObjectStore>,
        base_path: impl Into<String>,
        fetch_concurrency: usize,
    ) -> Self {
        Self {
            store,
            base_path: base_path.into(),
            fetch_concurrency: fetch_concurrency.max(1),
        }
    }

    pub fn store(&self) -> &Arc<dyn ObjectStore> {
        &self.store
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Archive every object under the folder's prefix into a single zip and
    /// write it to the folder's destination key. All-or-nothing: on any
    /// failure the destination key is left exactly as it was.
    pub async fn archive_folder(&self, name: &str) -> ArchiveResult<ArchiveOutcome> {
        let folder = FolderName::parse(name)?;
        let prefix = folder.key_prefix(&self.base_path);
        let destination_key = folder.destination_key(&self.base_path);
        info!("archiving folder `{}` (prefix `{}`)", folder, prefix);

        let keys = self.collect_keys(&prefix).await?;
        if keys.is_empty() {
            return Err(ArchiveError::FolderNotFound(prefix));
        }

        let (archive, entry_count) = self.build_archive(&keys).await?;
        let size_bytes = archive.len();

        self.store
            .put(&destination_key, archive.into())
            .await
            .map_err(|source| ArchiveError::UploadFailed {
                key: destination_key.clone(),
                source,
            })?;

        let outcome = ArchiveOutcome {
            destination_key,
            entry_count,
            size_bytes,
        };
        info!("{}", outcome.message());
        Ok(outcome)
    }

    /// Drain the listing, page by page, in the order the store returns keys.
    /// Zero-byte directory-marker keys (trailing `/`) are not real objects
    /// and are dropped here.
    async fn collect_keys(&self, prefix: &str) -> ArchiveResult<Vec<String>> {
        let mut keys = Vec::new();
        let mut token: Option<String> = None;

        loop {
            let page = self
                .store
                .list_page(prefix, token.as_deref())
                .await
                .map_err(|source| ArchiveError::ListFailed {
                    prefix: prefix.to_string(),
                    source,
                })?;

            for key in page.keys {
                if key.ends_with('/') {
                    debug!("skipping directory marker `{}`", key);
                    continue;
                }
                keys.push(key);
            }

            match page.next_token {
                Some(next) => token = Some(next),
                None => break,
            }
        }

        Ok(keys)
    }

    /// Copy every object into the archive, entry names equal to full keys so
    /// the folder structure survives extraction. Object bodies are opened
    /// with bounded prefetch; `buffered` yields them back in listing order
    /// and short-circuits on the first failure, dropping (and thereby
    /// cancelling) any fetches still in flight.
    async fn build_archive(&self, keys: &[String]) -> ArchiveResult<(Vec<u8>, usize)> {
        let mut builder = ZipBuilder::new();

        let mut bodies = futures::stream::iter(keys.iter().cloned().map(|key| {
            let store = Arc::clone(&self.store);
            async move {
                let body = store.get(&key).await;
                (key, body)
            }
        }))
        .buffered(self.fetch_concurrency);

        while let Some((key, body)) = bodies.next().await {
            let mut body = body.map_err(|source| ArchiveError::ObjectReadFailed {
                key: key.clone(),
                source,
            })?;

            builder.start_entry(&key)?;
            let mut written = 0usize;
            while let Some(chunk) = body.next().await {
                let chunk = chunk.map_err(|source| ArchiveError::ObjectReadFailed {
                    key: key.clone(),
                    source: StoreError::Io(source),
                })?;
                builder.write_chunk(&chunk)?;
                written += chunk.len();
            }
            debug!("added `{}` to archive ({} bytes)", key, written);
        }

        let entry_count = builder.entry_count();
        Ok((builder.finish()?, entry_count))
    }
}
