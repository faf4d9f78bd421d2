//! Typed explorer reads.
//!
//! `ExplorerClient` bundles a [`NetworkDescriptor`] with the indexer and node
//! clients. Each read validates its input, goes through the indexer gateway
//! (or the node for balances) and shapes the result. Every method returns a
//! [`QueryResult`]; nothing is retried or cached here.
//!
//! # Example
//!
//! ```ignore
//! use explorer_data::client::ExplorerClient;
//! use explorer_data::config::ExplorerConfig;
//!
//! let client = ExplorerClient::from_config(&ExplorerConfig::from_env())?;
//! let modules = client.account_modules("0x1").await?;
//! ```

use std::sync::Arc;

use super::http::{ReqwestTransport, Transport};
use super::indexer::{IndexerClient, is_indexer_supported};
use super::node::NodeClient;
use crate::config::ExplorerConfig;
use crate::domain::{Address, NetworkDescriptor, NormalizedError, QueryResult};

mod balance;
mod modules;
mod resources;
mod transactions;

#[cfg(test)]
mod tests;

pub use balance::DEFAULT_COIN_TYPE;

// ============================================================================
// Explorer Client
// ============================================================================

#[derive(Debug, Clone)]
pub struct ExplorerClient {
    network: NetworkDescriptor,
    indexer: IndexerClient,
    node: NodeClient,
}

impl ExplorerClient {
    /// Creates a client for `network` on top of `transport`.
    #[must_use]
    pub fn new(network: NetworkDescriptor, transport: Arc<dyn Transport>) -> Self {
        Self {
            network,
            indexer: IndexerClient::new(transport.clone()),
            node: NodeClient::new(transport),
        }
    }

    /// Creates a client for the configured network using `reqwest`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn from_config(config: &ExplorerConfig) -> Result<Self, reqwest::Error> {
        let transport = ReqwestTransport::with_config(config.http.clone())?;
        Ok(Self::new(config.descriptor(), Arc::new(transport)))
    }

    #[must_use]
    pub fn network(&self) -> &NetworkDescriptor {
        &self.network
    }

    /// Whether indexer-backed reads can succeed on this network at all.
    #[must_use]
    pub fn supports_indexer(&self) -> bool {
        is_indexer_supported(&self.network)
    }

    /// Standardizes a caller-supplied address or rejects it as invalid input.
    pub(crate) fn standardize(input: &str) -> QueryResult<Address> {
        Address::standardize(input).map_err(|e| {
            tracing::debug!("Rejected address '{input}': {e}");
            NormalizedError::invalid_input(format!("Invalid address '{input}'"))
        })
    }
}
