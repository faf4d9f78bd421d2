//! Clients for the explorer's two backends.
//!
//! This module provides:
//! - [`http`] - the `Transport` seam and its `reqwest` implementation
//! - [`classify`] - the failure classifier shared by both backends
//! - [`indexer`] - the indexer GraphQL gateway and its capability gate
//! - [`node`] - node view-function calls
//! - [`explorer`] - typed account reads built on the above
//!
//! # Example
//!
//! ```ignore
//! use explorer_data::client::ExplorerClient;
//! use explorer_data::domain::{Network, NetworkDescriptor};
//!
//! let network = NetworkDescriptor::new(Network::Mainnet)
//!     .with_indexer_url("https://indexer.libra2.org/v1/graphql");
//! let client = ExplorerClient::new(network, Arc::new(ReqwestTransport::new()?));
//! let resource = client.account_resource("0x1", "0x1::account::Account").await;
//! ```

pub mod classify;
pub mod explorer;
pub mod http;
pub mod indexer;
pub mod node;

// ============================================================================
// Re-exports
// ============================================================================

pub use classify::{
    classify_backend, classify_message, is_indexer_unavailable_message, normalize,
};
pub use explorer::{DEFAULT_COIN_TYPE, ExplorerClient};
pub use http::{HttpConfig, HttpResponse, ReqwestTransport, Transport};
pub use indexer::{IndexerClient, is_indexer_supported};
pub use node::{NodeClient, ViewRequest};
