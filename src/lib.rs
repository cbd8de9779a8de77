//! pma-export: log into phpMyAdmin, page through a table and export it.
//!
//! The library holds the whole pipeline so it can be driven without a
//! terminal; the binary only parses flags and wires stdin/stdout in.

#![deny(unsafe_code)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod core;
pub mod error;
pub mod export;
pub mod render;
pub mod storage;
pub mod util;

pub use error::{ExitCode, PmaError, Result};
