//! Shared test utilities and Mother pattern factories.
//!
//! [`MockTransport`] records every request and replays scripted responses, so
//! tests can assert both on results and on what was (or was not) sent.
#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::{Value, json};
use std::collections::VecDeque;
use std::sync::Mutex;

use crate::client::{HttpResponse, Transport};
use crate::domain::{Network, NetworkDescriptor, TransportFailure};

// ============================================================================
// Mock Transport
// ============================================================================

/// One request seen by [`MockTransport`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub url: String,
    pub bearer: Option<String>,
    pub body: Value,
}

/// Scripted [`Transport`]. Responses are consumed in order; once exhausted
/// every call fails with `ConnectionRefused`.
#[derive(Debug, Default)]
pub struct MockTransport {
    script: Mutex<VecDeque<Result<HttpResponse, TransportFailure>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockTransport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_response(self, response: HttpResponse) -> Self {
        self.script.lock().unwrap().push_back(Ok(response));
        self
    }

    #[must_use]
    pub fn with_failure(self, failure: TransportFailure) -> Self {
        self.script.lock().unwrap().push_back(Err(failure));
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn post_json(
        &self,
        url: &str,
        bearer: Option<&str>,
        body: &Value,
    ) -> Result<HttpResponse, TransportFailure> {
        self.calls.lock().unwrap().push(RecordedCall {
            url: url.to_string(),
            bearer: bearer.map(String::from),
            body: body.clone(),
        });
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(TransportFailure::ConnectionRefused))
    }
}

// ============================================================================
// Mother Pattern Factories
// ============================================================================

pub struct ResponseMother;

impl ResponseMother {
    /// 200 with an arbitrary JSON body.
    #[must_use]
    pub fn ok_json(body: Value) -> HttpResponse {
        Self::status(200, body.to_string())
    }

    /// 200 GraphQL response carrying `data`.
    #[must_use]
    pub fn data(data: Value) -> HttpResponse {
        Self::ok_json(json!({ "data": data }))
    }

    /// 200 GraphQL response carrying only errors.
    #[must_use]
    pub fn errors(messages: &[&str]) -> HttpResponse {
        let errors: Vec<Value> = messages.iter().map(|m| json!({ "message": m })).collect();
        Self::ok_json(json!({ "errors": errors }))
    }

    /// Any status with a raw body; the reason phrase matches the status.
    #[must_use]
    pub fn status(status: u16, body: String) -> HttpResponse {
        let status_text = match status {
            200 => "OK",
            400 => "Bad Request",
            404 => "Not Found",
            429 => "Too Many Requests",
            500 => "Internal Server Error",
            502 => "Bad Gateway",
            503 => "Service Unavailable",
            _ => "",
        };
        HttpResponse {
            status,
            status_text: status_text.to_string(),
            body,
        }
    }
}

pub struct NetworkMother;

impl NetworkMother {
    pub const INDEXER_URL: &'static str = "https://indexer.test/v1/graphql";
    pub const NODE_URL: &'static str = "https://node.test/v1";

    #[must_use]
    pub fn with_indexer() -> NetworkDescriptor {
        Self::without_indexer().with_indexer_url(Self::INDEXER_URL)
    }

    #[must_use]
    pub fn without_indexer() -> NetworkDescriptor {
        NetworkDescriptor::new(Network::Testnet).with_node_url(Self::NODE_URL)
    }
}

pub struct PayloadMother;

impl PayloadMother {
    #[must_use]
    pub fn resource(resource_type: &str, data: Value) -> Value {
        json!({ "type": resource_type, "data": data })
    }

    #[must_use]
    pub fn module(name: &str) -> Value {
        json!({
            "bytecode": "0xa11ceb0b0600000009",
            "abi": { "address": "0x1", "name": name, "exposed_functions": [] }
        })
    }

    #[must_use]
    pub fn package(name: &str, modules: &[&str]) -> Value {
        let modules: Vec<Value> = modules
            .iter()
            .map(|m| json!({ "name": m, "source": "" }))
            .collect();
        json!({
            "name": name,
            "modules": modules,
            "upgrade_policy": { "policy": 1 },
            "upgrade_number": "0",
            "source_digest": "D1",
            "manifest": "0x"
        })
    }
}
