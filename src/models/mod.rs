//! Data models shared by the image cache worker
//!
//! Host-independent stand-ins for the browser's `Request`/`Response` pair:
//! just enough structure for interception decisions, cache keying, and
//! serving a stored body back to the page.

use chrono::{DateTime, Utc};
use url::Url;

use crate::utils::url::cache_key;

/// An intercepted network request
///
/// Only the URL participates in interception and cache keying; method and
/// headers are left to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    url: Url,
}

impl FetchRequest {
    pub fn new(url: Url) -> Self {
        Self { url }
    }

    /// Parse a request from a raw URL string.
    pub fn parse(url: &str) -> Result<Self, url::ParseError> {
        Ok(Self { url: Url::parse(url)? })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Cache key for this request: origin + path, query and fragment
    /// stripped, so `photo.jpg` and `photo.jpg?x=1` share one entry.
    pub fn cache_key(&self) -> String {
        cache_key(&self.url)
    }
}

/// A captured network response, storable in a cache bucket
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl CachedResponse {
    /// Build a 200 response with the given content type and body.
    pub fn ok<C: Into<String>>(content_type: C, body: Vec<u8>) -> Self {
        Self {
            status: 200,
            content_type: Some(content_type.into()),
            body,
        }
    }
}

/// A cache bucket entry: the stored response plus bookkeeping
///
/// The timestamp is diagnostic only; nothing evicts on age.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub response: CachedResponse,
    pub cached_at: DateTime<Utc>,
}

impl CacheEntry {
    pub fn new(response: CachedResponse) -> Self {
        Self {
            response,
            cached_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_key_strips_query() {
        let request = FetchRequest::parse("https://cdn.example.com/art/photo.jpg?w=300&h=300")
            .unwrap();
        assert_eq!(request.cache_key(), "https://cdn.example.com/art/photo.jpg");
    }

    #[test]
    fn test_cache_key_identical_with_and_without_query() {
        let plain = FetchRequest::parse("https://cdn.example.com/photo.jpg").unwrap();
        let with_query = FetchRequest::parse("https://cdn.example.com/photo.jpg?x=1").unwrap();
        assert_eq!(plain.cache_key(), with_query.cache_key());
    }
}
