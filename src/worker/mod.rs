//! Image cache worker
//!
//! Reimplements the podcast site's service worker against injected seams:
//! fetch interception for image-like URLs, a versioned cache bucket with
//! query-stripped keys, and lifecycle handlers that retire stale cache
//! generations and claim page clients on activation.

pub mod cache;
pub mod fetch;
pub mod host;
pub mod matcher;

pub use cache::{CacheBucket, CacheStorage, MemoryCacheBucket, MemoryCacheStorage};
pub use fetch::{Fetch, HttpFetcher};
pub use host::{MemoryHost, WorkerHost};
pub use matcher::ImageRequestMatcher;

use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, warn};

use crate::config::{CacheConfig, CachePolicy};
use crate::errors::AppResult;
use crate::models::{CachedResponse, FetchRequest};

/// The service worker's event handlers
///
/// One instance handles all events for the worker's lifetime. Storage,
/// network, and lifecycle control are injected; the worker holds no state
/// beyond its configuration, so concurrent fetch events need no coordination
/// (and duplicate in-flight fetches for the same image are possible, as in
/// the original).
pub struct ImageCacheWorker<S, F, H>
where
    S: CacheStorage,
    F: Fetch + 'static,
    H: WorkerHost,
{
    config: CacheConfig,
    matcher: ImageRequestMatcher,
    storage: Arc<S>,
    fetcher: Arc<F>,
    host: Arc<H>,
}

impl<S, F, H> ImageCacheWorker<S, F, H>
where
    S: CacheStorage,
    F: Fetch + 'static,
    H: WorkerHost,
{
    pub fn new(
        config: CacheConfig,
        storage: Arc<S>,
        fetcher: Arc<F>,
        host: Arc<H>,
    ) -> AppResult<Self> {
        let matcher = ImageRequestMatcher::new(&config)?;
        Ok(Self {
            config,
            matcher,
            storage,
            fetcher,
            host,
        })
    }

    /// Install handler.
    pub async fn handle_install(&self) {
        if self.config.skip_waiting {
            self.host.skip_waiting().await;
            debug!("Skipping waiting phase on install");
        }
    }

    /// Activate handler: delete every bucket from another generation, then
    /// claim existing clients.
    ///
    /// Deletions run concurrently, and the invariant holds afterwards: the
    /// configured bucket is the only live generation.
    pub async fn handle_activate(&self) -> AppResult<()> {
        let names = self.storage.bucket_names().await?;
        let stale: Vec<String> = names
            .into_iter()
            .filter(|name| *name != self.config.cache_name)
            .collect();

        let deletions = stale.iter().map(|name| {
            let storage = Arc::clone(&self.storage);
            async move {
                debug!("Deleting old cache: {}", name);
                storage.delete(name).await
            }
        });
        for result in join_all(deletions).await {
            result?;
        }

        self.host.claim_clients().await;
        Ok(())
    }

    /// Fetch handler.
    ///
    /// Returns `None` for requests the worker does not intercept, leaving
    /// them to default browser behavior. For intercepted requests the result
    /// carries either a response (cached or freshly fetched) or the
    /// underlying fetch failure.
    pub async fn handle_fetch(&self, request: &FetchRequest) -> Option<AppResult<CachedResponse>> {
        if !self.matcher.matches(request.url()) {
            return None;
        }
        Some(self.respond(request).await)
    }

    async fn respond(&self, request: &FetchRequest) -> AppResult<CachedResponse> {
        let bucket = self.storage.open(&self.config.cache_name).await?;
        let key = request.cache_key();

        if let Some(cached) = bucket.lookup(&key).await? {
            debug!("Cache hit for: {}", key);
            if self.config.policy == CachePolicy::StaleWhileRevalidate {
                self.spawn_revalidation(bucket, request.clone(), key);
            }
            return Ok(cached);
        }

        let response = self.fetcher.fetch(request).await?;
        bucket.put(&key, response.clone()).await?;
        debug!("Cached image: {}", key);
        Ok(response)
    }

    /// Refresh a stale entry off the response path. Failures are logged and
    /// dropped; the page already got the cached response.
    fn spawn_revalidation(&self, bucket: S::Bucket, request: FetchRequest, key: String) {
        let fetcher = Arc::clone(&self.fetcher);
        tokio::spawn(async move {
            match fetcher.fetch(&request).await {
                Ok(response) => {
                    if let Err(e) = bucket.put(&key, response).await {
                        warn!("Failed to refresh cache entry {}: {}", key, e);
                    } else {
                        debug!("Refreshed cache entry: {}", key);
                    }
                }
                Err(e) => warn!("Background revalidation failed for {}: {}", key, e),
            }
        });
    }
}
