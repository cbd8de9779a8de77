//! HTTP client utilities.
//!
//! One cookie-carrying client is built per run and shared by the login
//! exchange and every page request.

use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, HeaderValue, REFERER};
use reqwest::{Client, ClientBuilder, Url};

use crate::error::{PmaError, Result};

/// Default timeout for HTTP requests.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Build a configured HTTP client with a cookie store.
///
/// # Errors
///
/// Returns error if client construction fails.
pub fn build_client(timeout: Duration) -> Result<Client> {
    ClientBuilder::new()
        .timeout(timeout)
        .cookie_store(true)
        .user_agent(format!("pma-export/{}", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| PmaError::Network(e.to_string()))
}

/// Map a transport error, distinguishing timeouts.
fn transport_error(err: &reqwest::Error, timeout: Duration) -> PmaError {
    if err.is_timeout() {
        PmaError::Timeout(timeout.as_secs())
    } else {
        PmaError::Network(err.to_string())
    }
}

/// Encode form fields as `application/x-www-form-urlencoded`.
#[must_use]
pub fn encode_form(fields: &[(&str, &str)]) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(fields)
        .finish()
}

/// GET a page and return its body as text.
///
/// # Errors
///
/// Returns error on transport failure or a non-success status.
pub async fn get_text(
    client: &Client,
    url: &Url,
    referer: Option<&HeaderValue>,
    timeout: Duration,
) -> Result<String> {
    let mut request = client.get(url.clone());
    if let Some(referer) = referer {
        request = request.header(REFERER, referer.clone());
    }
    let response = request
        .send()
        .await
        .map_err(|e| transport_error(&e, timeout))?;
    read_body(response, url, timeout).await
}

/// POST url-encoded form fields and return the response body as text.
///
/// # Errors
///
/// Returns error on transport failure or a non-success status.
pub async fn post_form(
    client: &Client,
    url: &Url,
    fields: &[(&str, &str)],
    referer: Option<&HeaderValue>,
    timeout: Duration,
) -> Result<String> {
    let mut request = client
        .post(url.clone())
        .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
        .body(encode_form(fields));
    if let Some(referer) = referer {
        request = request.header(REFERER, referer.clone());
    }
    let response = request
        .send()
        .await
        .map_err(|e| transport_error(&e, timeout))?;
    read_body(response, url, timeout).await
}

async fn read_body(response: reqwest::Response, url: &Url, timeout: Duration) -> Result<String> {
    let status = response.status();
    if !status.is_success() {
        return Err(PmaError::HttpStatus {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }
    response
        .text()
        .await
        .map_err(|e| transport_error(&e, timeout))
}
