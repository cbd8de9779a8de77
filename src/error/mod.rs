//! Error types for pma-export.
//!
//! Uses `thiserror` for structured error types that map to exit codes.
//!
//! ## Error Taxonomy
//!
//! Errors are categorized into six main categories:
//! - **Authentication**: missing CSRF token, rejected credentials, login transport failure
//! - **Data**: the paginated fetch produced no headers or no rows, or an inconsistent table
//! - **Export**: a backend was compiled out or failed while writing
//! - **Network**: transport, timeout or HTTP status failures while fetching pages
//! - **Input**: bad interactive answers, flags or config file contents
//! - **Internal**: I/O errors
//!
//! Each error has a stable error code (e.g., `PMA-A001`) for programmatic handling.
//! Every error is fatal: nothing is retried, and the binary exits with code 1.

pub mod suggestions;

use thiserror::Error;

pub use suggestions::FixSuggestion;

// =============================================================================
// Error Categories
// =============================================================================

/// High-level error categories for classification and routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Login failed (token, credentials, transport during login).
    Authentication,
    /// The table came back empty.
    Data,
    /// Export backend missing or failed.
    Export,
    /// Network issues while paging through results.
    Network,
    /// Invalid user input or configuration.
    Input,
    /// Internal errors (I/O).
    Internal,
}

impl ErrorCategory {
    /// Returns a human-readable description of the category.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Authentication => "Authentication error",
            Self::Data => "Data error",
            Self::Export => "Export error",
            Self::Network => "Network error",
            Self::Input => "Input error",
            Self::Internal => "Internal error",
        }
    }

    /// Returns a short code prefix for this category.
    #[must_use]
    pub const fn code_prefix(&self) -> &'static str {
        match self {
            Self::Authentication => "A",
            Self::Data => "D",
            Self::Export => "E",
            Self::Network => "N",
            Self::Input => "I",
            Self::Internal => "X",
        }
    }
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

// =============================================================================
// Exit Codes
// =============================================================================

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Success, including an explicit or implicit "no export".
    Success = 0,
    /// Any caught error.
    GeneralError = 1,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as Self
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        Self::from(code as u8)
    }
}

/// Main error type for pma-export operations.
#[derive(Error, Debug)]
pub enum PmaError {
    // ==========================================================================
    // Authentication errors (Category: Authentication)
    // ==========================================================================
    /// The login page carried no `token` input.
    #[error("failed to retrieve CSRF token from {url}")]
    TokenMissing { url: String },

    /// The server answered the login POST with another login form.
    #[error("invalid username or password")]
    InvalidCredentials,

    /// Transport or HTTP status failure during the login exchange.
    #[error("login request failed: {reason}")]
    LoginTransport { reason: String },

    // ==========================================================================
    // Data errors (Category: Data)
    // ==========================================================================
    /// Pagination finished without headers or rows.
    #[error("no data found in `{database}`.{table}")]
    NoData { database: String, table: String },

    /// A row does not have one cell per column.
    #[error("row {row} has {found} cells, expected {expected}")]
    ShapeMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Two columns share one header name.
    #[error("column name `{name}` appears more than once")]
    DuplicateColumn { name: String },

    // ==========================================================================
    // Export errors (Category: Export)
    // ==========================================================================
    /// The export backend was not compiled into this binary.
    #[error("{format} export is unavailable: built without the `{feature}` feature")]
    ExportDependency {
        format: &'static str,
        feature: &'static str,
    },

    /// The export backend failed while writing.
    #[error("{format} export failed: {reason}")]
    ExportFailed {
        format: &'static str,
        reason: String,
    },

    // ==========================================================================
    // Network errors (Category: Network)
    // ==========================================================================
    /// Request timed out.
    #[error("request timeout after {0} seconds")]
    Timeout(u64),

    /// Non-success HTTP status.
    #[error("HTTP {status} from {url}")]
    HttpStatus { status: u16, url: String },

    /// Generic transport error.
    #[error("network error: {0}")]
    Network(String),

    // ==========================================================================
    // Input errors (Category: Input)
    // ==========================================================================
    /// An interactive answer or flag value could not be used.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Error parsing configuration file.
    #[error("config parse error at {path}: {message}")]
    ConfigParse { path: String, message: String },

    /// Invalid value in configuration.
    #[error("invalid config value for '{key}': {message}")]
    ConfigInvalid { key: String, message: String },

    // ==========================================================================
    // Internal errors (Category: Internal)
    // ==========================================================================
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PmaError {
    /// Every caught error terminates the run with exit code 1.
    #[must_use]
    pub const fn exit_code(&self) -> ExitCode {
        ExitCode::GeneralError
    }

    /// Returns the error category for classification and routing.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::TokenMissing { .. } | Self::InvalidCredentials | Self::LoginTransport { .. } => {
                ErrorCategory::Authentication
            }

            Self::NoData { .. } | Self::ShapeMismatch { .. } | Self::DuplicateColumn { .. } => {
                ErrorCategory::Data
            },

            Self::ExportDependency { .. } | Self::ExportFailed { .. } => ErrorCategory::Export,

            Self::Timeout(_) | Self::HttpStatus { .. } | Self::Network(_) => {
                ErrorCategory::Network
            }

            Self::InvalidInput(_)
            | Self::ConfigParse { .. }
            | Self::ConfigInvalid { .. } => ErrorCategory::Input,

            Self::Io(_) => ErrorCategory::Internal,
        }
    }

    /// Returns a stable error code for programmatic handling.
    ///
    /// Format: `PMA-{category}{number}`.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::TokenMissing { .. } => "PMA-A001",
            Self::InvalidCredentials => "PMA-A002",
            Self::LoginTransport { .. } => "PMA-A003",

            Self::NoData { .. } => "PMA-D001",
            Self::ShapeMismatch { .. } => "PMA-D002",
            Self::DuplicateColumn { .. } => "PMA-D003",

            Self::ExportDependency { .. } => "PMA-E001",
            Self::ExportFailed { .. } => "PMA-E002",

            Self::Timeout(_) => "PMA-N001",
            Self::HttpStatus { .. } => "PMA-N002",
            Self::Network(_) => "PMA-N099",

            Self::InvalidInput(_) => "PMA-I001",
            Self::ConfigParse { .. } => "PMA-I002",
            Self::ConfigInvalid { .. } => "PMA-I003",

            Self::Io(_) => "PMA-X001",
        }
    }

    /// Whether this error came out of the login exchange.
    #[must_use]
    pub const fn is_auth_error(&self) -> bool {
        matches!(self.category(), ErrorCategory::Authentication)
    }

    /// Returns actionable fix suggestions for this error.
    #[must_use]
    pub fn fix_suggestions(&self) -> Vec<FixSuggestion> {
        match self {
            Self::TokenMissing { url } => suggestions::token_missing_suggestions(url),
            Self::InvalidCredentials => suggestions::invalid_credentials_suggestions(),
            Self::LoginTransport { reason } => suggestions::login_transport_suggestions(reason),
            Self::NoData { database, table } => suggestions::no_data_suggestions(database, table),
            Self::ExportDependency { format, feature } => {
                suggestions::export_dependency_suggestions(format, feature)
            }
            Self::ExportFailed { format, reason } => {
                vec![FixSuggestion::new(
                    vec!["pma-export --output-dir <writable-dir>".to_string()],
                    format!("Writing the {format} file failed: {reason}."),
                )]
            }
            Self::Timeout(seconds) => suggestions::timeout_suggestions(*seconds),
            Self::HttpStatus { status, url } => suggestions::http_status_suggestions(*status, url),
            Self::Network(msg) => {
                vec![FixSuggestion::new(
                    Vec::new(),
                    format!("Network error: {msg}. The session is not re-established mid-run; start again."),
                )]
            }
            Self::InvalidInput(msg) => {
                vec![FixSuggestion::new(
                    vec!["pma-export --help".to_string()],
                    format!("The value could not be used: {msg}."),
                )]
            }
            Self::ConfigParse { path, message } => {
                suggestions::config_parse_suggestions(path, message)
            }
            Self::ConfigInvalid { key, message } => {
                suggestions::config_invalid_suggestions(key, message)
            }
            Self::DuplicateColumn { .. } => suggestions::duplicate_column_suggestions(),
            Self::ShapeMismatch { .. } | Self::Io(_) => Vec::new(),
        }
    }
}

/// Result type alias for pma-export operations.
pub type Result<T> = std::result::Result<T, PmaError>;
