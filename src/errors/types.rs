//! Error type definitions for the podcast web components
//!
//! This module defines all error types used throughout the crate, providing a
//! hierarchical error system that makes debugging and error handling more
//! straightforward.

use thiserror::Error;

/// Top-level application error type
///
/// This enum represents all possible errors that can occur in the crate. It
/// uses `thiserror` to provide automatic error trait implementations and
/// proper error chaining.
#[derive(Error, Debug)]
pub enum AppError {
    /// DOM lookup errors
    #[error("DOM error: {0}")]
    Dom(#[from] DomError),

    /// Cache storage errors
    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),

    /// Network fetch errors
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// DOM layer specific errors
///
/// These never escape the description toggle operations; they are logged and
/// absorbed at the call site, matching browser behavior where a missing
/// element produces a console error rather than an exception.
#[derive(Error, Debug)]
pub enum DomError {
    /// No element matched the given identifier
    #[error("Element not found: {selector}")]
    ElementNotFound { selector: String },

    /// A container exists but its nested control is missing
    #[error("Control not found: {control} inside {container}")]
    ControlNotFound { control: String, container: String },
}

/// Cache storage specific errors
#[derive(Error, Debug)]
pub enum CacheError {
    /// Bucket open/create failures
    #[error("Failed to open cache bucket: {name} - {message}")]
    OpenFailed { name: String, message: String },

    /// Read/write failures inside a bucket
    #[error("Cache storage failed: {message}")]
    StorageFailed { message: String },
}

/// Network fetch specific errors
#[derive(Error, Debug)]
pub enum FetchError {
    /// Transport-level failures from the HTTP client
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success status codes from the upstream server
    #[error("Unexpected status: {status} for {url}")]
    Status { status: u16, url: String },
}

/// Convenience methods for creating common error types
impl AppError {
    /// Create a configuration error with a custom message
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

impl DomError {
    /// Create an element-not-found error
    pub fn element_not_found<S: Into<String>>(selector: S) -> Self {
        Self::ElementNotFound {
            selector: selector.into(),
        }
    }

    /// Create a control-not-found error
    pub fn control_not_found<C: Into<String>, K: Into<String>>(control: C, container: K) -> Self {
        Self::ControlNotFound {
            control: control.into(),
            container: container.into(),
        }
    }
}

impl CacheError {
    /// Create a bucket open failure
    pub fn open_failed<N: Into<String>, M: Into<String>>(name: N, message: M) -> Self {
        Self::OpenFailed {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create a storage failure
    pub fn storage_failed<M: Into<String>>(message: M) -> Self {
        Self::StorageFailed {
            message: message.into(),
        }
    }
}
