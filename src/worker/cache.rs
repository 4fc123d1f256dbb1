//! Cache storage seam and in-memory implementation
//!
//! The browser exposes cache storage as named buckets of request/response
//! pairs. [`CacheStorage`] and [`CacheBucket`] mirror that surface; the
//! worker only ever opens its versioned bucket, looks up normalized keys,
//! stores responses, and deletes whole buckets during activation.
//!
//! [`MemoryCacheStorage`] is the shipped implementation. Consistency is the
//! storage's concern (a `tokio::sync::RwLock` here); the worker takes no
//! locks of its own.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::errors::CacheResult;
use crate::models::{CacheEntry, CachedResponse};

/// A single named bucket of key -> response entries
#[async_trait]
pub trait CacheBucket: Send + Sync {
    async fn lookup(&self, key: &str) -> CacheResult<Option<CachedResponse>>;

    async fn put(&self, key: &str, response: CachedResponse) -> CacheResult<()>;
}

/// Named-bucket cache storage
#[async_trait]
pub trait CacheStorage: Send + Sync {
    type Bucket: CacheBucket + Clone + Send + Sync + 'static;

    /// Open the named bucket, creating it if absent.
    async fn open(&self, name: &str) -> CacheResult<Self::Bucket>;

    /// Names of all existing buckets.
    async fn bucket_names(&self) -> CacheResult<Vec<String>>;

    /// Delete a bucket wholesale; returns whether it existed.
    async fn delete(&self, name: &str) -> CacheResult<bool>;
}

type EntryMap = Arc<RwLock<HashMap<String, CacheEntry>>>;

/// Handle to one in-memory bucket
///
/// Clones share the same entry map, so a handle moved into a background
/// revalidation task writes into the same bucket the worker reads.
#[derive(Debug, Clone)]
pub struct MemoryCacheBucket {
    name: String,
    entries: EntryMap,
}

impl MemoryCacheBucket {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Full entry (response plus bookkeeping) for a key.
    pub async fn entry(&self, key: &str) -> Option<CacheEntry> {
        self.entries.read().await.get(key).cloned()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl CacheBucket for MemoryCacheBucket {
    async fn lookup(&self, key: &str) -> CacheResult<Option<CachedResponse>> {
        Ok(self
            .entries
            .read()
            .await
            .get(key)
            .map(|entry| entry.response.clone()))
    }

    async fn put(&self, key: &str, response: CachedResponse) -> CacheResult<()> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), CacheEntry::new(response));
        Ok(())
    }
}

/// In-memory cache storage
#[derive(Debug, Default)]
pub struct MemoryCacheStorage {
    buckets: RwLock<HashMap<String, MemoryCacheBucket>>,
}

impl MemoryCacheStorage {
    pub fn new() -> Self {
        Self {
            buckets: RwLock::new(HashMap::new()),
        }
    }

    pub async fn contains(&self, name: &str) -> bool {
        self.buckets.read().await.contains_key(name)
    }
}

#[async_trait]
impl CacheStorage for MemoryCacheStorage {
    type Bucket = MemoryCacheBucket;

    async fn open(&self, name: &str) -> CacheResult<MemoryCacheBucket> {
        let mut buckets = self.buckets.write().await;
        let bucket = buckets
            .entry(name.to_string())
            .or_insert_with(|| MemoryCacheBucket::new(name));
        Ok(bucket.clone())
    }

    async fn bucket_names(&self) -> CacheResult<Vec<String>> {
        Ok(self.buckets.read().await.keys().cloned().collect())
    }

    async fn delete(&self, name: &str) -> CacheResult<bool> {
        Ok(self.buckets.write().await.remove(name).is_some())
    }
}
