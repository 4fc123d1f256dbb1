//! Centralized error handling for the podcast web components
//!
//! This module provides a unified error system across the DOM, cache, and
//! network layers, with convenience type aliases for each layer's results.
//!
//! # Error Categories
//!
//! - **Dom Errors**: missing containers or controls in the injected document
//! - **Cache Errors**: cache bucket storage failures
//! - **Fetch Errors**: network failures while populating the image cache
//! - **Configuration Errors**: invalid settings (bad extension patterns, etc.)

pub mod types;

pub use types::*;

/// Convenience type alias for Results using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Convenience type alias for DOM Results
pub type DomResult<T> = Result<T, DomError>;

/// Convenience type alias for cache storage Results
pub type CacheResult<T> = Result<T, CacheError>;

/// Convenience type alias for network fetch Results
pub type FetchResult<T> = Result<T, FetchError>;
