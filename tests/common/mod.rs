//! Common test utilities for integration tests.
//!
//! # Modules
//!
//! - `fixtures`: HTML fixture loading, page builders and wiremock helpers
//! - `log_capture`: tracing capture for log assertions
//! - `logger`: structured progress output for tests

#![allow(dead_code)]

pub mod fixtures;
pub mod log_capture;
pub mod logger;
