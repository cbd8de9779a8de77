//! phpMyAdmin cookie login.
//!
//! The login is a form replay: GET the login page, read its CSRF token, POST
//! the credentials back with a matching referer. A rejected login shows the
//! login form again.

use std::fmt;
use std::time::Duration;

use reqwest::header::HeaderValue;
use reqwest::{Client, Url};

use super::extract;
use super::http;
use crate::error::{PmaError, Result};
use crate::render::Reporter;

/// Relative path of the login route under the phpMyAdmin base URL.
pub const LOGIN_PATH: &str = "index.php?route=/";

/// Username and password for the phpMyAdmin cookie login.
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    password: String,
}

impl Credentials {
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Build the phpMyAdmin base URL from a scheme and a host.
///
/// A host that already carries `http://` or `https://` keeps its own scheme.
///
/// # Errors
///
/// Returns [`PmaError::InvalidInput`] when the result is not a valid URL.
pub fn base_url(https: bool, host: &str) -> Result<Url> {
    let host = host.trim().trim_end_matches('/');
    if host.is_empty() {
        return Err(PmaError::InvalidInput("host must not be empty".to_string()));
    }
    let raw = if host.starts_with("http://") || host.starts_with("https://") {
        format!("{host}/phpmyadmin/")
    } else {
        let scheme = if https { "https" } else { "http" };
        format!("{scheme}://{host}/phpmyadmin/")
    };
    Url::parse(&raw).map_err(|e| PmaError::InvalidInput(format!("invalid host '{host}': {e}")))
}

/// Authenticated HTTP state: cookie jar, referer and base URL.
#[derive(Debug)]
pub struct Session {
    client: Client,
    base_url: Url,
    referer: Option<HeaderValue>,
    timeout: Duration,
}

impl Session {
    /// Create an unauthenticated session.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be built.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: http::build_client(timeout)?,
            base_url,
            referer: None,
            timeout,
        })
    }

    /// Log in and return the authenticated session.
    ///
    /// # Errors
    ///
    /// - [`PmaError::TokenMissing`] when the login page has no token input
    /// - [`PmaError::InvalidCredentials`] when the login form comes back
    /// - [`PmaError::LoginTransport`] for transport or HTTP status failures
    pub async fn login(
        base_url: Url,
        credentials: &Credentials,
        timeout: Duration,
        reporter: &Reporter,
    ) -> Result<Self> {
        let mut session = Self::new(base_url, timeout)?;
        session.authenticate(credentials, reporter).await?;
        Ok(session)
    }

    /// Run the two-step login exchange on this session.
    ///
    /// # Errors
    ///
    /// See [`Session::login`].
    pub async fn authenticate(&mut self, credentials: &Credentials, reporter: &Reporter) -> Result<()> {
        let login_url = self.login_url()?;
        reporter.info(format!("Logging in to {login_url}"));
        tracing::debug!(url = %login_url, user = %credentials.username, "fetching login page");

        let page = http::get_text(&self.client, &login_url, None, self.timeout)
            .await
            .map_err(login_transport)?;

        self.referer = HeaderValue::from_str(login_url.as_str()).ok();
        let token = extract::extract_token(&page).ok_or_else(|| PmaError::TokenMissing {
            url: login_url.to_string(),
        })?;
        tracing::debug!("login token found");

        let fields = [
            ("pma_username", credentials.username.as_str()),
            ("pma_password", credentials.password()),
            ("server", "1"),
            ("set_session", "1"),
            ("token", token.as_str()),
            ("route", "/"),
        ];
        let body = http::post_form(
            &self.client,
            &login_url,
            &fields,
            self.referer.as_ref(),
            self.timeout,
        )
        .await
        .map_err(login_transport)?;

        if extract::has_login_form(&body) {
            tracing::warn!(user = %credentials.username, "login rejected");
            return Err(PmaError::InvalidCredentials);
        }

        reporter.info("Logged in successfully");
        Ok(())
    }

    /// The login route URL.
    ///
    /// # Errors
    ///
    /// Returns error if the base URL cannot be joined.
    pub fn login_url(&self) -> Result<Url> {
        self.base_url
            .join(LOGIN_PATH)
            .map_err(|e| PmaError::InvalidInput(format!("invalid base URL: {e}")))
    }

    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    #[must_use]
    pub const fn referer(&self) -> Option<&HeaderValue> {
        self.referer.as_ref()
    }

    /// GET a page with the session's cookies and referer.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure or a non-success status.
    pub async fn get_html(&self, url: &Url) -> Result<String> {
        http::get_text(&self.client, url, self.referer.as_ref(), self.timeout).await
    }
}

fn login_transport(err: PmaError) -> PmaError {
    PmaError::LoginTransport {
        reason: err.to_string(),
    }
}
