//! Network fetch seam and HTTP implementation
//!
//! Cache misses go to the network through the [`Fetch`] trait. Failures
//! propagate to the caller as the underlying fetch error: no retry, no
//! fallback image, no placeholder.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;

use crate::errors::{FetchError, FetchResult};
use crate::models::{CachedResponse, FetchRequest};

/// Fetches a request from the network
#[async_trait]
pub trait Fetch: Send + Sync {
    async fn fetch(&self, request: &FetchRequest) -> FetchResult<CachedResponse>;
}

/// HTTP fetcher backed by `reqwest`
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> FetchResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .user_agent(concat!("podcast-web/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn fetch(&self, request: &FetchRequest) -> FetchResult<CachedResponse> {
        // The original, un-normalized URL goes to the network; only the
        // cache key drops query parameters.
        let response = self.client.get(request.url().clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: request.url().to_string(),
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_string());
        let body = response.bytes().await?.to_vec();

        Ok(CachedResponse {
            status: status.as_u16(),
            content_type,
            body,
        })
    }
}
