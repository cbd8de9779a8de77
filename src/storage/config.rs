//! Configuration file loading.
//!
//! Loads configuration from:
//! - Linux: `~/.config/pma-export/config.toml`
//! - macOS: `~/Library/Application Support/pma-export/config.toml`
//! - Windows: `%APPDATA%/pma-export/config/config.toml`
//!
//! ## Precedence
//!
//! Settings are resolved with the following precedence (highest first):
//! 1. CLI flags
//! 2. Environment variables
//! 3. Config file
//! 4. Interactive prompt or built-in default
//!
//! The password is never read from the config file.
//!
//! ## Example
//!
//! ```toml
//! [connection]
//! scheme = "https"
//! host = "db.example.com"
//! username = "report"
//! database = "shop"
//! table = "users"
//! timeout_secs = 30
//!
//! [export]
//! format = "excel"
//! output_dir = "/tmp/exports"
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::AppPaths;
use crate::core::http::DEFAULT_TIMEOUT;
use crate::error::{PmaError, Result};
use crate::export::ExportFormat;

/// Environment variable to override config file path.
pub const ENV_CONFIG: &str = "PMA_EXPORT_CONFIG";

/// Upper bound for the request timeout.
pub const MAX_TIMEOUT_SECS: u64 = 300;

/// Where a resolved setting came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConfigSource {
    /// Value from CLI flag or its environment variable.
    Cli,
    /// Value from config file.
    ConfigFile,
    /// Answer to an interactive prompt.
    Prompt,
    /// Built-in default.
    #[default]
    Default,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cli => write!(f, "CLI flag"),
            Self::ConfigFile => write!(f, "config file"),
            Self::Prompt => write!(f, "prompt"),
            Self::Default => write!(f, "default"),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where and how to connect.
    pub connection: ConnectionConfig,
    /// Export defaults.
    pub export: ExportConfig,
}

/// Connection defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionConfig {
    /// `http` or `https`.
    pub scheme: Option<String>,
    /// Domain or IP, optionally with port.
    pub host: Option<String>,
    pub username: Option<String>,
    pub database: Option<String>,
    /// Table to read; `users` when unset.
    pub table: Option<String>,
    /// Request timeout in seconds.
    pub timeout_secs: Option<u64>,
}

/// Export defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// `excel`, `word`, `pdf` or `none`.
    pub format: Option<String>,
    /// Directory output files are written to.
    pub output_dir: Option<PathBuf>,
}

impl Config {
    /// Load configuration, respecting the `PMA_EXPORT_CONFIG` override.
    ///
    /// # Errors
    ///
    /// Returns error only if the file exists but is invalid.
    pub fn load() -> Result<Self> {
        let path = std::env::var_os(ENV_CONFIG)
            .map_or_else(|| AppPaths::new().config_file(), PathBuf::from);
        let config = Self::load_from(&path)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific path.
    ///
    /// Returns default config if the file doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns error only if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(?path, "Config file not found, using defaults");
            return Ok(Self::default());
        }

        tracing::debug!(?path, "Loading config file");
        let content = fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| PmaError::ConfigParse {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns [`PmaError::ConfigInvalid`] for the first bad value.
    pub fn validate(&self) -> Result<()> {
        let invalid = |key: &str, message: String| PmaError::ConfigInvalid {
            key: key.to_string(),
            message,
        };

        if let Some(scheme) = &self.connection.scheme {
            if !matches!(scheme.to_ascii_lowercase().as_str(), "http" | "https") {
                return Err(invalid(
                    "connection.scheme",
                    format!("\"{scheme}\" is not http or https"),
                ));
            }
        }

        if let Some(secs) = self.connection.timeout_secs {
            if secs == 0 || secs > MAX_TIMEOUT_SECS {
                return Err(invalid(
                    "connection.timeout_secs",
                    format!("must be between 1 and {MAX_TIMEOUT_SECS} seconds"),
                ));
            }
        }

        if self.connection.table.as_deref().is_some_and(|t| t.trim().is_empty()) {
            return Err(invalid("connection.table", "must not be empty".to_string()));
        }

        // Parsed strictly, unlike the interactive answer.
        if let Some(format) = &self.export.format {
            if ExportFormat::from_name(format).is_none() {
                return Err(invalid(
                    "export.format",
                    format!("\"{format}\" is not one of excel, word, pdf, none"),
                ));
            }
        }

        Ok(())
    }

    /// `Some(true)` for https, `Some(false)` for http.
    #[must_use]
    pub fn https(&self) -> Option<bool> {
        self.connection
            .scheme
            .as_deref()
            .map(|s| s.eq_ignore_ascii_case("https"))
    }

    /// Configured timeout, or the default.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.connection
            .timeout_secs
            .map_or(DEFAULT_TIMEOUT, Duration::from_secs)
    }

    /// Configured export format, if any.
    #[must_use]
    pub fn export_format(&self) -> Option<ExportFormat> {
        self.export.format.as_deref().and_then(ExportFormat::from_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn missing_file_gives_defaults() {
        let config = Config::load_from(Path::new("/nonexistent/pma-export.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.timeout(), DEFAULT_TIMEOUT);
        assert_eq!(config.https(), None);
    }

    #[test]
    fn full_file_parses() {
        let file = write_config(
            r#"
            [connection]
            scheme = "HTTPS"
            host = "db.example.com"
            username = "report"
            database = "shop"
            table = "customers"
            timeout_secs = 12

            [export]
            format = "pdf"
            output_dir = "/tmp/out"
            "#,
        );
        let config = Config::load_from(file.path()).unwrap();
        config.validate().unwrap();
        assert_eq!(config.https(), Some(true));
        assert_eq!(config.connection.host.as_deref(), Some("db.example.com"));
        assert_eq!(config.connection.table.as_deref(), Some("customers"));
        assert_eq!(config.timeout(), Duration::from_secs(12));
        assert_eq!(config.export_format(), Some(ExportFormat::Pdf));
        assert_eq!(config.export.output_dir, Some(PathBuf::from("/tmp/out")));
    }

    #[test]
    fn partial_file_parses() {
        let file = write_config("[connection]\nhost = \"10.0.0.2\"\n");
        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.connection.host.as_deref(), Some("10.0.0.2"));
        assert!(config.export.format.is_none());
    }

    #[test]
    fn garbage_is_parse_error() {
        let file = write_config("[connection\nhost = ");
        let err = Config::load_from(file.path()).unwrap_err();
        assert!(matches!(err, PmaError::ConfigParse { .. }));
    }

    #[test]
    fn validate_rejects_bad_values() {
        let mut config = Config::default();
        config.connection.scheme = Some("ftp".to_string());
        assert!(matches!(config.validate(), Err(PmaError::ConfigInvalid { key, .. }) if key == "connection.scheme"));

        let mut config = Config::default();
        config.connection.timeout_secs = Some(0);
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.export.format = Some("exel".to_string());
        assert!(matches!(config.validate(), Err(PmaError::ConfigInvalid { key, .. }) if key == "export.format"));

        let mut config = Config::default();
        config.connection.table = Some("  ".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn source_display() {
        assert_eq!(ConfigSource::Prompt.to_string(), "prompt");
        assert_eq!(ConfigSource::default(), ConfigSource::Default);
    }
}
