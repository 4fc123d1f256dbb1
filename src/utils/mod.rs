//! Utility functions for the podcast web components

pub mod url;
