//! In-memory `ObjectStore` used by unit tests. Supports page-size control,
//! listing overrides, per-key read faults, and call counting so tests can
//! assert which store calls a failed request made.

use crate::store::{ListPage, ObjectBody, ObjectStore, StoreError, StoreResult};
use async_trait::async_trait;
use bytes::Bytes;
use futures::StreamExt;
use std::collections::{BTreeMap, HashSet};
use std::io;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

#[derive(Default)]
pub struct MemoryStore {
    objects: Mutex<BTreeMap<String, Vec<u8>>>,
    // When set, listings return these keys verbatim instead of the map's.
    listing_override: Mutex<Option<Vec<String>>>,
    page_size: Option<usize>,
    failing_reads: Mutex<HashSet<String>>,
    fail_listing: AtomicBool,
    fail_puts: AtomicBool,
    pub list_calls: AtomicUsize,
    pub get_calls: AtomicUsize,
    pub put_calls: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            page_size: Some(page_size),
            ..Self::default()
        }
    }

    pub fn insert(&self, key: &str, body: &[u8]) {
        self.objects
            .lock()
            .unwrap()
            .insert(key.to_string(), body.to_vec());
    }

    pub fn contents(&self, key: &str) -> Option<Vec<u8>> {
        self.objects.lock().unwrap().get(key).cloned()
    }

    pub fn override_listing(&self, keys: &[&str]) {
        *self.listing_override.lock().unwrap() =
            Some(keys.iter().map(|k| k.to_string()).collect());
    }

    pub fn fail_read_of(&self, key: &str) {
        self.failing_reads.lock().unwrap().insert(key.to_string());
    }

    pub fn fail_listing(&self) {
        self.fail_listing.store(true, Ordering::SeqCst);
    }

    pub fn fail_puts(&self) {
        self.fail_puts.store(true, Ordering::SeqCst);
    }

    fn keys_under(&self, prefix: &str) -> Vec<String> {
        if let Some(keys) = self.listing_override.lock().unwrap().clone() {
            return keys;
        }
        self.objects
            .lock()
            .unwrap()
            .keys()
            .filter(|key| key.starts_with(prefix))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn list_page(&self, prefix: &str, token: Option<&str>) -> StoreResult<ListPage> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_listing.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("listing unavailable".into()));
        }

        let keys = self.keys_under(prefix);
        let offset = token.map(|t| t.parse::<usize>().unwrap()).unwrap_or(0);
        let page_size = self.page_size.unwrap_or(usize::MAX);
        let page: Vec<String> = keys.iter().skip(offset).take(page_size).cloned().collect();
        let consumed = offset + page.len();
        let next_token = (consumed < keys.len()).then(|| consumed.to_string());

        Ok(ListPage {
            keys: page,
            next_token,
        })
    }

    async fn get(&self, key: &str) -> StoreResult<ObjectBody> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing_reads.lock().unwrap().contains(key) {
            return Err(StoreError::Unavailable(format!("read of `{}` failed", key)));
        }
        let body = self
            .objects
            .lock()
            .unwrap()
            .get(key)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(key.to_string()))?;

        // Split into small chunks so copy loops see more than one item.
        let chunks: Vec<io::Result<Bytes>> = body
            .chunks(3)
            .map(|chunk| Ok(Bytes::copy_from_slice(chunk)))
            .collect();
        Ok(futures::stream::iter(chunks).boxed())
    }

    async fn put(&self, key: &str, body: Bytes) -> StoreResult<()> {
        self.put_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_puts.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("put unavailable".into()));
        }
        self.objects
            .lock()
            .unwrap()
            .insert(key.to_string(), body.to_vec());
        Ok(())
    }
}
