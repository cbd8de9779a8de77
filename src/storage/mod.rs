//! Configuration file and platform paths.

pub mod config;
pub mod paths;

pub use config::{
    Config, ConfigSource, ConnectionConfig, ENV_CONFIG, ExportConfig, MAX_TIMEOUT_SECS,
};
pub use paths::AppPaths;
