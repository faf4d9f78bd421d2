//! HTTP transport shared by the node and indexer clients.
//!
//! Clients talk to the network through the [`Transport`] trait so tests can
//! swap in a recording fake. [`ReqwestTransport`] is the production
//! implementation and is the only code that sees `reqwest` errors; it turns
//! them into a [`TransportFailure`].

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

use crate::domain::TransportFailure;

// ============================================================================
// Constants
// ============================================================================

/// Default timeout for HTTP requests in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Idle connections kept per host
const POOL_MAX_IDLE_PER_HOST: usize = 4;

/// How long an idle pooled connection is kept
const POOL_IDLE_TIMEOUT_SECS: u64 = 30;

// ============================================================================
// Configuration
// ============================================================================

/// HTTP client configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpConfig {
    /// Request timeout
    pub timeout: Duration,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl HttpConfig {
    /// Create config with custom timeout
    #[must_use]
    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout }
    }
}

// ============================================================================
// Transport
// ============================================================================

/// A completed HTTP exchange, whatever its status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    /// Canonical reason phrase of the status, empty when unknown.
    pub status_text: String,
    pub body: String,
}

impl HttpResponse {
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The status reason, or `HTTP <code>` when the reason is unknown.
    #[must_use]
    pub fn reason(&self) -> String {
        if self.status_text.is_empty() {
            format!("HTTP {}", self.status)
        } else {
            self.status_text.clone()
        }
    }
}

/// Issues JSON POST requests.
///
/// Implementations return `Ok` for every response that arrived, successful
/// or not, and `Err` only when no response could be obtained.
#[async_trait]
pub trait Transport: Send + Sync {
    /// POSTs `body` as JSON to `url`, with `Authorization: Bearer` when
    /// `bearer` is set.
    async fn post_json(
        &self,
        url: &str,
        bearer: Option<&str>,
        body: &Value,
    ) -> Result<HttpResponse, TransportFailure>;
}

// ============================================================================
// Reqwest Transport
// ============================================================================

/// [`Transport`] backed by a pooled `reqwest` client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    inner: Client,
    config: HttpConfig,
}

impl ReqwestTransport {
    /// Create a transport with default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize (e.g., TLS
    /// backend unavailable).
    pub fn new() -> Result<Self, reqwest::Error> {
        Self::with_config(HttpConfig::default())
    }

    /// Create a transport with custom configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn with_config(config: HttpConfig) -> Result<Self, reqwest::Error> {
        let inner = Client::builder()
            .pool_max_idle_per_host(POOL_MAX_IDLE_PER_HOST)
            .pool_idle_timeout(Duration::from_secs(POOL_IDLE_TIMEOUT_SECS))
            .timeout(config.timeout)
            .build()?;

        Ok(Self { inner, config })
    }

    /// Get the configuration
    #[must_use]
    pub fn config(&self) -> &HttpConfig {
        &self.config
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn post_json(
        &self,
        url: &str,
        bearer: Option<&str>,
        body: &Value,
    ) -> Result<HttpResponse, TransportFailure> {
        let mut request = self
            .inner
            .post(url)
            .header("accept", "application/json")
            .json(body);

        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }

        tracing::trace!("POST {url}");
        let response = request.send().await.map_err(failure_from_reqwest)?;

        let status = response.status();
        let body = response.text().await.map_err(failure_from_reqwest)?;

        Ok(HttpResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            body,
        })
    }
}

/// Maps a `reqwest` error onto the transport failure variants.
fn failure_from_reqwest(err: reqwest::Error) -> TransportFailure {
    tracing::debug!("HTTP transport error: {err}");
    if err.is_timeout() {
        TransportFailure::Timeout
    } else if err.is_connect() {
        TransportFailure::ConnectionRefused
    } else {
        TransportFailure::Malformed(err.to_string())
    }
}

// ============================================================================
// Tests
// ============================================================================
