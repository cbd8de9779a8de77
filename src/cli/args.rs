//! CLI argument definitions using clap.
//!
//! Every connection value has a flag; whatever is not supplied by flag,
//! environment variable or config file is asked for interactively.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::export::ExportFormat;

/// Log into phpMyAdmin, page through a table and export it.
#[derive(Parser, Debug, Default)]
#[command(name = "pma-export")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Connection scheme
    #[arg(long, value_enum, value_name = "SCHEME")]
    pub scheme: Option<Scheme>,

    /// phpMyAdmin domain or IP (phpMyAdmin is expected under /phpmyadmin/)
    #[arg(long, env = "PMA_HOST", value_name = "HOST")]
    pub host: Option<String>,

    /// phpMyAdmin username
    #[arg(long, env = "PMA_USER", value_name = "USER")]
    pub user: Option<String>,

    /// phpMyAdmin password
    #[arg(long, env = "PMA_PASSWORD", value_name = "PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Database name
    #[arg(long, value_name = "DB")]
    pub db: Option<String>,

    /// Table to read [default: users]
    #[arg(long, value_name = "TABLE")]
    pub table: Option<String>,

    /// Total number of rows to fetch [default: 250]
    #[arg(long, value_name = "N")]
    pub limit: Option<usize>,

    /// Comma-separated column names to keep
    #[arg(long, value_name = "A,B,..")]
    pub columns: Option<String>,

    /// Export format
    #[arg(long, value_enum, value_name = "FORMAT")]
    pub format: Option<FormatArg>,

    /// Directory the output file is written to [default: .]
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// HTTP timeout in seconds
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// Never prompt; unset optional values use their defaults
    #[arg(long)]
    pub batch: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Log level
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Emit JSONL logs to stderr
    #[arg(long)]
    pub json_output: bool,

    /// Verbose output (sets log level to debug)
    #[arg(short, long)]
    pub verbose: bool,
}

/// Connection scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Scheme {
    Http,
    Https,
}

impl Scheme {
    #[must_use]
    pub const fn is_https(self) -> bool {
        matches!(self, Self::Https)
    }
}

/// Export format flag values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Excel,
    Word,
    Pdf,
    None,
}

impl From<FormatArg> for ExportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Excel => Self::Excel,
            FormatArg::Word => Self::Word,
            FormatArg::Pdf => Self::Pdf,
            FormatArg::None => Self::None,
        }
    }
}

impl Cli {
    /// Validate argument combinations.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::PmaError::InvalidInput`] for unusable values.
    pub fn validate(&self) -> crate::error::Result<()> {
        use crate::error::PmaError;
        use crate::storage::MAX_TIMEOUT_SECS;

        if let Some(secs) = self.timeout {
            if secs == 0 || secs > MAX_TIMEOUT_SECS {
                return Err(PmaError::InvalidInput(format!(
                    "--timeout must be between 1 and {MAX_TIMEOUT_SECS} seconds"
                )));
            }
        }
        if self.table.as_deref().is_some_and(|t| t.trim().is_empty()) {
            return Err(PmaError::InvalidInput("--table must not be empty".to_string()));
        }
        Ok(())
    }
}
