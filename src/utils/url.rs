//! URL utilities for consistent URL handling
//!
//! This module provides the cache-key normalization used by the image cache
//! worker: keys are the URL's origin plus path, with query parameters and
//! fragments stripped so resized/busted variants of an image share one entry.

use url::Url;

/// Normalize a URL into its cache key (origin + path)
///
/// # Examples
///
/// ```rust
/// use podcast_web::utils::url::cache_key;
/// use url::Url;
///
/// let url = Url::parse("https://images.example.com/cover.png?width=200#top").unwrap();
/// assert_eq!(cache_key(&url), "https://images.example.com/cover.png");
/// ```
pub fn cache_key(url: &Url) -> String {
    let mut normalized = url.clone();
    normalized.set_query(None);
    normalized.set_fragment(None);
    normalized.to_string()
}
