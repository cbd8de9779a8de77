//! Utility functions.

pub mod env;
pub mod format;

pub use format::{format_bytes, truncate, wrap};
