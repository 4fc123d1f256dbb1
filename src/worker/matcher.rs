//! Interception matching for image requests
//!
//! A request is handled by the image cache worker when its URL path ends in a
//! known image extension (case-insensitive) or its hostname contains one of
//! the configured CDN substrings. Everything else passes through untouched.

use regex::Regex;
use url::Url;

use crate::config::CacheConfig;
use crate::errors::{AppError, AppResult};

/// Decides which requests the worker intercepts
#[derive(Debug, Clone)]
pub struct ImageRequestMatcher {
    extension_pattern: Option<Regex>,
    cdn_hosts: Vec<String>,
}

impl ImageRequestMatcher {
    /// Build a matcher from the cache configuration.
    ///
    /// The extension list is compiled into a single anchored, case-insensitive
    /// pattern. An empty list disables extension matching entirely.
    pub fn new(config: &CacheConfig) -> AppResult<Self> {
        let extension_pattern = if config.image_extensions.is_empty() {
            None
        } else {
            let alternatives = config
                .image_extensions
                .iter()
                .map(|ext| regex::escape(ext))
                .collect::<Vec<_>>()
                .join("|");
            let pattern = format!(r"(?i)\.({alternatives})$");
            Some(Regex::new(&pattern).map_err(|e| {
                AppError::configuration(format!("invalid image extension pattern: {e}"))
            })?)
        };

        Ok(Self {
            extension_pattern,
            cdn_hosts: config.cdn_hosts.clone(),
        })
    }

    pub fn matches(&self, url: &Url) -> bool {
        if let Some(pattern) = &self.extension_pattern {
            if pattern.is_match(url.path()) {
                return true;
            }
        }
        match url.host_str() {
            Some(host) => self.cdn_hosts.iter().any(|cdn| host.contains(cdn.as_str())),
            None => false,
        }
    }
}
