//! Diagnostic logging via `tracing`.
//!
//! Logs go to stderr (or a file) and default to `error` so they stay out of
//! the way of the interactive prompts. User-facing progress lines go through
//! [`crate::render::Reporter`] instead.
//!
//! Settings come from flags first, then these environment variables:
//!
//! - `PMA_EXPORT_LOG`: level (`trace`, `debug`/`verbose`, `info`, `warn`, `error`)
//! - `PMA_EXPORT_LOG_FORMAT`: `human`, `compact` or `json`
//! - `PMA_EXPORT_LOG_FILE`: append logs to this file instead of stderr
//!
//! `RUST_LOG`, when set, replaces the level-derived filter entirely.

use std::fs::OpenOptions;
use std::path::PathBuf;

use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

pub const LOG_LEVEL_ENV: &str = "PMA_EXPORT_LOG";
pub const LOG_FORMAT_ENV: &str = "PMA_EXPORT_LOG_FORMAT";
pub const LOG_FILE_ENV: &str = "PMA_EXPORT_LOG_FILE";

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Human,
    /// One JSON object per event.
    Json,
    Compact,
}

impl LogFormat {
    /// Parse from string (case-insensitive).
    #[must_use]
    pub fn from_arg(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "human" => Some(Self::Human),
            "json" => Some(Self::Json),
            "compact" => Some(Self::Compact),
            _ => None,
        }
    }
}

/// Parse a level name. `verbose` and `critical` are accepted as aliases.
#[must_use]
pub fn parse_level(s: &str) -> Option<Level> {
    match s.trim().to_ascii_lowercase().as_str() {
        "trace" => Some(Level::TRACE),
        "verbose" | "debug" => Some(Level::DEBUG),
        "info" => Some(Level::INFO),
        "warn" | "warning" => Some(Level::WARN),
        "error" | "critical" | "crit" => Some(Level::ERROR),
        _ => None,
    }
}

/// Resolved logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub level: Level,
    pub format: LogFormat,
    pub file: Option<PathBuf>,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: Level::ERROR,
            format: LogFormat::Human,
            file: None,
        }
    }
}

impl LogSettings {
    /// Resolve from flags and the process environment.
    #[must_use]
    pub fn from_env(level_flag: Option<&str>, json: bool, verbose: bool) -> Self {
        Self::resolve(level_flag, json, verbose, |key| std::env::var(key).ok())
    }

    /// Resolve from flags and an arbitrary variable lookup.
    ///
    /// Blank or unparsable values are ignored. `verbose` only raises the
    /// default level; an explicit level wins.
    pub fn resolve(
        level_flag: Option<&str>,
        json: bool,
        verbose: bool,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let explicit = level_flag
            .and_then(parse_level)
            .or_else(|| non_blank(LOG_LEVEL_ENV).as_deref().and_then(parse_level));
        let level = match explicit {
            Some(level) => level,
            None if verbose => Level::DEBUG,
            None => Level::ERROR,
        };

        let format = if json {
            LogFormat::Json
        } else {
            non_blank(LOG_FORMAT_ENV)
                .as_deref()
                .and_then(LogFormat::from_arg)
                .unwrap_or_default()
        };

        let file = non_blank(LOG_FILE_ENV).map(|v| PathBuf::from(v.trim()));

        Self {
            level,
            format,
            file,
        }
    }

    fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "pma_export={}",
                self.level.as_str().to_ascii_lowercase()
            ))
        })
    }

    /// Writer for the configured file, falling back to stderr when the file
    /// cannot be opened.
    fn writer(&self) -> BoxMakeWriter {
        let file = self
            .file
            .as_ref()
            .and_then(|path| OpenOptions::new().create(true).append(true).open(path).ok());
        match file {
            Some(file) => BoxMakeWriter::new(file),
            None => BoxMakeWriter::new(std::io::stderr),
        }
    }
}

/// Install the global subscriber. A second call is a no-op.
pub fn init(settings: &LogSettings) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(settings.filter())
        .with_writer(settings.writer());

    let installed = match settings.format {
        LogFormat::Json => builder
            .json()
            .with_span_events(FmtSpan::CLOSE)
            .try_init(),
        LogFormat::Compact => builder.compact().with_target(true).try_init(),
        LogFormat::Human => builder.with_target(false).without_time().try_init(),
    };
    if installed.is_err() {
        tracing::debug!("subscriber already installed");
    }
}
