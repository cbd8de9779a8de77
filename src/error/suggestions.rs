//! Fix suggestion database for pma-export errors.
//!
//! Provides actionable fix suggestions mapped to specific error types,
//! including commands, context explanations, and prevention tips.

// =============================================================================
// Fix Suggestion Types
// =============================================================================

/// A fix suggestion for an error.
#[derive(Debug, Clone)]
pub struct FixSuggestion {
    /// Commands to try, copy-paste ready.
    pub commands: Vec<String>,

    /// Explanation of why this error occurred.
    pub context: String,

    /// Tips to prevent this error in the future.
    pub prevention: Option<String>,
}

impl FixSuggestion {
    /// Creates a new fix suggestion with required fields.
    #[must_use]
    pub fn new(commands: Vec<String>, context: impl Into<String>) -> Self {
        Self {
            commands,
            context: context.into(),
            prevention: None,
        }
    }

    /// Builder: adds prevention tips.
    #[must_use]
    pub fn with_prevention(mut self, prevention: impl Into<String>) -> Self {
        self.prevention = Some(prevention.into());
        self
    }
}

// =============================================================================
// Suggestion Generators
// =============================================================================

/// Suggestions when the login form has no CSRF token.
#[must_use]
pub fn token_missing_suggestions(url: &str) -> Vec<FixSuggestion> {
    vec![
        FixSuggestion::new(
            vec![format!("curl -s '{url}' | grep 'name=\"token\"'")],
            format!(
                "The page at {url} did not contain a hidden `token` input. Either the \
                 address does not point at a phpMyAdmin login page or the server uses \
                 a different authentication mode (config/http auth)."
            ),
        )
        .with_prevention("phpMyAdmin is expected under /phpmyadmin/ on the given host."),
    ]
}

/// Suggestions when the server rejects the credentials.
#[must_use]
pub fn invalid_credentials_suggestions() -> Vec<FixSuggestion> {
    vec![FixSuggestion::new(
        Vec::new(),
        "phpMyAdmin answered the login request with its login form again. Check the \
         username and password; accounts limited by AllowDeny rules are rejected the same way.",
    )]
}

/// Suggestions for transport failures during login.
#[must_use]
pub fn login_transport_suggestions(reason: &str) -> Vec<FixSuggestion> {
    vec![
        FixSuggestion::new(
            vec!["pma-export --scheme https".to_string()],
            format!(
                "The login exchange failed before credentials were checked: {reason}. \
                 Verify the host, the scheme and that the server is reachable."
            ),
        )
        .with_prevention("Use --timeout to allow slow servers more time."),
    ]
}

/// Suggestions when pagination yielded nothing.
#[must_use]
pub fn no_data_suggestions(database: &str, table: &str) -> Vec<FixSuggestion> {
    vec![FixSuggestion::new(
        vec![format!("pma-export --db {database} --table {table}")],
        format!(
            "No result rows were found for `{database}`.{table}. The database or table \
             name may be wrong, the account may not see any rows, or the column \
             selection matched nothing."
        ),
    )]
}

/// Suggestions for a table built with repeated header names.
#[must_use]
pub fn duplicate_column_suggestions() -> Vec<FixSuggestion> {
    vec![FixSuggestion::new(
        vec!["pma-export --columns <id,name,...>".to_string()],
        "Each exported column needs its own header name. Select columns by their \
         internal names to tell them apart.",
    )]
}

/// Suggestions for a compiled-out export backend.
#[must_use]
pub fn export_dependency_suggestions(format: &str, feature: &str) -> Vec<FixSuggestion> {
    vec![FixSuggestion::new(
        vec![format!("cargo install pma-export --features {feature}")],
        format!("This binary was built without {format} support."),
    )]
}

/// Suggestions for timeouts.
#[must_use]
pub fn timeout_suggestions(seconds: u64) -> Vec<FixSuggestion> {
    vec![
        FixSuggestion::new(
            vec![format!("pma-export --timeout {}", seconds * 2)],
            format!("The server did not respond within {seconds}s."),
        )
        .with_prevention("Fetch fewer rows with --limit for very slow servers."),
    ]
}

/// Suggestions for non-success HTTP status codes.
#[must_use]
pub fn http_status_suggestions(status: u16, url: &str) -> Vec<FixSuggestion> {
    let context = match status {
        401 | 403 => format!("Access to {url} was refused (HTTP {status}); the session may have expired."),
        404 => format!("{url} does not exist (HTTP 404). Check the host and the /phpmyadmin/ path."),
        500..=599 => format!("The server failed to render {url} (HTTP {status})."),
        _ => format!("Unexpected HTTP {status} from {url}."),
    };
    vec![FixSuggestion::new(Vec::new(), context)]
}

/// Suggestions for an unparseable config file.
#[must_use]
pub fn config_parse_suggestions(path: &str, message: &str) -> Vec<FixSuggestion> {
    vec![FixSuggestion::new(
        vec![format!("$EDITOR {path}")],
        format!("The config file could not be parsed: {message}"),
    )]
}

/// Suggestions for an invalid config value.
#[must_use]
pub fn config_invalid_suggestions(key: &str, message: &str) -> Vec<FixSuggestion> {
    vec![FixSuggestion::new(
        Vec::new(),
        format!("The config value '{key}' is invalid: {message}"),
    )]
}
