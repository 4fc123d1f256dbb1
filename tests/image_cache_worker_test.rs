use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use podcast_web::config::{CacheConfig, CachePolicy};
use podcast_web::errors::{FetchError, FetchResult};
use podcast_web::models::{CachedResponse, FetchRequest};
use podcast_web::worker::{
    CacheBucket, CacheStorage, Fetch, ImageCacheWorker, MemoryCacheStorage, MemoryHost,
};

/// Fetcher serving a fixed body, counting network trips.
struct StubFetcher {
    body: Vec<u8>,
    calls: AtomicUsize,
    fail: bool,
}

impl StubFetcher {
    fn serving(body: Vec<u8>) -> Self {
        Self {
            body,
            calls: AtomicUsize::new(0),
            fail: false,
        }
    }

    fn failing() -> Self {
        Self {
            body: Vec::new(),
            calls: AtomicUsize::new(0),
            fail: true,
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Fetch for StubFetcher {
    async fn fetch(&self, request: &FetchRequest) -> FetchResult<CachedResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(FetchError::Status {
                status: 502,
                url: request.url().to_string(),
            });
        }
        Ok(CachedResponse::ok("image/jpeg", self.body.clone()))
    }
}

type TestWorker = ImageCacheWorker<MemoryCacheStorage, StubFetcher, MemoryHost>;

fn worker_with(
    config: CacheConfig,
    fetcher: StubFetcher,
) -> (TestWorker, Arc<MemoryCacheStorage>, Arc<StubFetcher>, Arc<MemoryHost>) {
    let storage = Arc::new(MemoryCacheStorage::new());
    let fetcher = Arc::new(fetcher);
    let host = Arc::new(MemoryHost::new());
    let worker = ImageCacheWorker::new(
        config,
        Arc::clone(&storage),
        Arc::clone(&fetcher),
        Arc::clone(&host),
    )
    .unwrap();
    (worker, storage, fetcher, host)
}

fn request(url: &str) -> FetchRequest {
    FetchRequest::parse(url).unwrap()
}

#[tokio::test]
async fn image_fetch_is_cached_under_query_stripped_key() {
    let (worker, storage, fetcher, _) =
        worker_with(CacheConfig::default(), StubFetcher::serving(vec![1, 2, 3]));

    let response = worker
        .handle_fetch(&request("https://cdn.example.com/photo.jpg?w=300"))
        .await
        .expect("image request must be intercepted")
        .unwrap();
    assert_eq!(response.body, vec![1, 2, 3]);
    assert_eq!(fetcher.calls(), 1);

    let bucket = storage.open("podcast-image-cache-v1").await.unwrap();
    assert!(bucket
        .entry("https://cdn.example.com/photo.jpg")
        .await
        .is_some());
    assert_eq!(bucket.len().await, 1);
}

#[tokio::test]
async fn query_variants_hit_the_same_entry() {
    let (worker, _, fetcher, _) =
        worker_with(CacheConfig::default(), StubFetcher::serving(vec![7]));

    worker
        .handle_fetch(&request("https://cdn.example.com/photo.jpg"))
        .await
        .unwrap()
        .unwrap();
    let second = worker
        .handle_fetch(&request("https://cdn.example.com/photo.jpg?x=1"))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(second.body, vec![7]);
    // Second request was a cache hit; no extra network trip.
    assert_eq!(fetcher.calls(), 1);
}

#[tokio::test]
async fn non_image_requests_pass_through() {
    let (worker, _, fetcher, _) =
        worker_with(CacheConfig::default(), StubFetcher::serving(vec![0]));

    let result = worker
        .handle_fetch(&request("https://example.com/page.html"))
        .await;
    assert!(result.is_none());
    assert_eq!(fetcher.calls(), 0);
}

#[tokio::test]
async fn cdn_hosts_are_intercepted_without_extension() {
    let (worker, _, fetcher, _) =
        worker_with(CacheConfig::default(), StubFetcher::serving(vec![9]));

    let response = worker
        .handle_fetch(&request("https://podcast.imgix.net/artwork"))
        .await
        .expect("CDN request must be intercepted")
        .unwrap();
    assert_eq!(response.body, vec![9]);
    assert_eq!(fetcher.calls(), 1);
}

#[tokio::test]
async fn network_failure_propagates_and_caches_nothing() {
    let (worker, storage, _, _) = worker_with(CacheConfig::default(), StubFetcher::failing());

    let result = worker
        .handle_fetch(&request("https://cdn.example.com/photo.jpg"))
        .await
        .unwrap();
    assert!(result.is_err());

    let bucket = storage.open("podcast-image-cache-v1").await.unwrap();
    assert!(bucket.is_empty().await);
}

#[tokio::test]
async fn activation_deletes_stale_generations() {
    let (worker, storage, _, host) =
        worker_with(CacheConfig::default(), StubFetcher::serving(vec![0]));

    storage.open("podcast-image-cache-v0").await.unwrap();
    storage.open("podcast-image-cache-v1").await.unwrap();

    worker.handle_activate().await.unwrap();

    assert!(!storage.contains("podcast-image-cache-v0").await);
    assert!(storage.contains("podcast-image-cache-v1").await);
    assert!(host.clients_claimed());
}

#[tokio::test]
async fn install_skips_waiting_when_configured() {
    let (worker, _, _, host) =
        worker_with(CacheConfig::default(), StubFetcher::serving(vec![0]));
    worker.handle_install().await;
    assert!(host.waiting_skipped());

    let config = CacheConfig {
        skip_waiting: false,
        ..CacheConfig::default()
    };
    let (worker, _, _, host) = worker_with(config, StubFetcher::serving(vec![0]));
    worker.handle_install().await;
    assert!(!host.waiting_skipped());
}

#[tokio::test]
async fn stale_while_revalidate_serves_stale_then_refreshes() {
    let config = CacheConfig {
        policy: CachePolicy::StaleWhileRevalidate,
        ..CacheConfig::default()
    };
    let (worker, storage, fetcher, _) = worker_with(config, StubFetcher::serving(vec![2]));

    // Seed the bucket with an older body for the same key.
    let bucket = storage.open("podcast-image-cache-v1").await.unwrap();
    bucket
        .put(
            "https://cdn.example.com/photo.jpg",
            CachedResponse::ok("image/jpeg", vec![1]),
        )
        .await
        .unwrap();

    let response = worker
        .handle_fetch(&request("https://cdn.example.com/photo.jpg"))
        .await
        .unwrap()
        .unwrap();
    // The stale body is returned immediately.
    assert_eq!(response.body, vec![1]);

    // Let the spawned refresh task run.
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    assert_eq!(fetcher.calls(), 1);
    let refreshed = bucket
        .entry("https://cdn.example.com/photo.jpg")
        .await
        .unwrap();
    assert_eq!(refreshed.response.body, vec![2]);
}

#[tokio::test]
async fn cache_first_miss_under_stale_while_revalidate_fetches_once() {
    let config = CacheConfig {
        policy: CachePolicy::StaleWhileRevalidate,
        ..CacheConfig::default()
    };
    let (worker, storage, fetcher, _) = worker_with(config, StubFetcher::serving(vec![4]));

    let response = worker
        .handle_fetch(&request("https://cdn.example.com/new.png"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(response.body, vec![4]);
    assert_eq!(fetcher.calls(), 1);

    let bucket = storage.open("podcast-image-cache-v1").await.unwrap();
    assert!(bucket.entry("https://cdn.example.com/new.png").await.is_some());
}
