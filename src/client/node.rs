//! Node REST client.
//!
//! Only view-function calls are needed. The node's payloads are opaque here;
//! failures go through the full classifier so a 404 becomes `NotFound`.
//! Requests carry no credential: the API key belongs to the indexer.

use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

use super::classify::normalize;
use super::http::{HttpResponse, Transport};
use crate::domain::{NetworkDescriptor, QueryResult, TransportFailure};

/// Body of a `POST /view` call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewRequest {
    /// `address::module::function`
    pub function: String,
    pub type_arguments: Vec<String>,
    pub arguments: Vec<Value>,
}

/// Node REST client
#[derive(Clone)]
pub struct NodeClient {
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for NodeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeClient").finish_non_exhaustive()
    }
}

impl NodeClient {
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Calls a view function and returns the node's result array.
    ///
    /// # Errors
    ///
    /// Any failure, classified by [`normalize`].
    pub async fn view(
        &self,
        network: &NetworkDescriptor,
        request: &ViewRequest,
    ) -> QueryResult<Value> {
        let url = format!("{}/view", network.node_url.trim_end_matches('/'));
        let body = serde_json::to_value(request)
            .map_err(|e| normalize(&TransportFailure::Malformed(e.to_string())))?;

        let response = self
            .transport
            .post_json(&url, None, &body)
            .await
            .map_err(|failure| normalize(&failure))?;

        if !response.is_success() {
            return Err(normalize(&TransportFailure::HttpStatus {
                status: response.status,
                message: node_error_message(&response),
            }));
        }

        serde_json::from_str(&response.body).map_err(|e| {
            normalize(&TransportFailure::Malformed(format!(
                "Malformed node response: {e}"
            )))
        })
    }
}

/// The `message` of a node error body, else the raw body, else the reason.
fn node_error_message(response: &HttpResponse) -> String {
    let message = serde_json::from_str::<Value>(&response.body)
        .ok()
        .and_then(|body| body.get("message")?.as_str().map(String::from));
    if let Some(message) = message {
        return message;
    }

    let raw = response.body.trim();
    if raw.is_empty() {
        response.reason()
    } else {
        raw.to_string()
    }
}
