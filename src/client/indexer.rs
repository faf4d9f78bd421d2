//! Indexer GraphQL gateway.
//!
//! One request/response cycle against the indexer, with every failure path
//! folded into a [`NormalizedError`]. The capability gate runs first so a
//! network without an indexer fails without any I/O.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::sync::Arc;

use super::classify::classify_backend;
use super::http::Transport;
use crate::domain::{
    ErrorKind, MISSING_DATA_MESSAGE, NetworkDescriptor, NormalizedError, QueryResult,
    TransportFailure,
};

/// Diagnostic for an error list whose entries carry no message.
pub const ERRORS_WITHOUT_MESSAGES: &str = "Indexer returned errors without messages";

// ============================================================================
// Capability Gate
// ============================================================================

/// Whether the network has an indexer endpoint configured.
#[must_use]
pub fn is_indexer_supported(network: &NetworkDescriptor) -> bool {
    indexer_endpoint(network).is_some()
}

fn indexer_endpoint(network: &NetworkDescriptor) -> Option<&str> {
    network
        .indexer_url
        .as_deref()
        .filter(|url| !url.trim().is_empty())
}

// ============================================================================
// Wire Types
// ============================================================================

#[derive(Debug, Deserialize)]
struct GraphqlResponse {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Option<Vec<GraphqlError>>,
}

#[derive(Debug, Deserialize)]
struct GraphqlError {
    #[serde(default)]
    message: Option<String>,
}

impl GraphqlResponse {
    fn has_errors(&self) -> bool {
        self.errors.as_ref().is_some_and(|errors| !errors.is_empty())
    }

    /// Non-blank error messages joined with spaces, `None` when there are none.
    fn joined_errors(&self) -> Option<String> {
        let messages: Vec<_> = self
            .errors
            .iter()
            .flatten()
            .filter_map(|e| e.message.as_deref())
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .collect();
        (!messages.is_empty()).then(|| messages.join(" "))
    }
}

// ============================================================================
// Indexer Client
// ============================================================================

/// GraphQL client for the indexer.
#[derive(Clone)]
pub struct IndexerClient {
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for IndexerClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndexerClient").finish_non_exhaustive()
    }
}

impl IndexerClient {
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Runs `query` with `variables` and decodes the `data` payload as `T`.
    ///
    /// # Errors
    ///
    /// - `IndexerUnavailable` when the network has no indexer, the request
    ///   could not be delivered, the backend reports a missing index, or the
    ///   response carries no data.
    /// - `TooManyRequests` when the backend rate-limits the call.
    /// - `Unhandled` for any other backend error, with the backend text.
    pub async fn fetch_graphql<T: DeserializeOwned>(
        &self,
        network: &NetworkDescriptor,
        query: &str,
        variables: Value,
    ) -> QueryResult<T> {
        let Some(url) = indexer_endpoint(network) else {
            tracing::debug!("No indexer configured for {}", network.network);
            return Err(NormalizedError::indexer_unavailable());
        };

        let body = json!({ "query": query, "variables": variables });
        let response = match self
            .transport
            .post_json(url, network.credential(), &body)
            .await
        {
            Ok(response) => response,
            Err(failure) => {
                tracing::warn!("Indexer at {url} unreachable: {failure}");
                return Err(NormalizedError::indexer_unavailable());
            }
        };

        let payload = serde_json::from_str::<GraphqlResponse>(&response.body)
            .inspect_err(|e| tracing::debug!("Indexer body is not a GraphQL response: {e}"));

        if !response.is_success() {
            let message = payload
                .as_ref()
                .ok()
                .and_then(GraphqlResponse::joined_errors)
                .unwrap_or_else(|| response.reason());
            return Err(classify_backend(&TransportFailure::HttpStatus {
                status: response.status,
                message,
            }));
        }

        let payload = payload.map_err(|e| {
            classify_backend(&TransportFailure::Malformed(format!(
                "Malformed indexer response: {e}"
            )))
        })?;

        if payload.has_errors() {
            let message = payload
                .joined_errors()
                .unwrap_or_else(|| ERRORS_WITHOUT_MESSAGES.to_string());
            return Err(classify_backend(&TransportFailure::Backend(message)));
        }

        let data = match payload.data {
            Some(data) if !data.is_null() => data,
            _ => {
                return Err(NormalizedError::new(
                    ErrorKind::IndexerUnavailable,
                    Some(MISSING_DATA_MESSAGE.to_string()),
                ));
            }
        };

        serde_json::from_value(data).map_err(|e| {
            NormalizedError::unhandled(format!("Unexpected indexer response shape: {e}"))
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
