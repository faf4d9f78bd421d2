//! Explorer configuration.
//!
//! Endpoints and credentials are resolved here, once, and handed to clients as
//! a read-only [`NetworkDescriptor`]. Environment variables are read through an
//! injected lookup function so resolution is testable without touching the
//! process environment.
//!
//! # Indexer URL precedence
//!
//! For each network the first non-empty value wins:
//! 1. an explicit per-network override (`--indexer-url`, [`IndexerConfig::with_override`])
//! 2. the network-specific environment default (only the local network has one:
//!    `EXPLORER_LOCAL_INDEXER_URL`, `LOCAL_INDEXER_URL`, then
//!    `LIBRA2_LOCAL_INDEXER_HTTP`)
//! 3. the global default (`EXPLORER_INDEXER_URL`, `INDEXER_URL`,
//!    `LIBRA2_INDEXER_HTTP`, then [`DEFAULT_INDEXER_URL`])
//!
//! The winning base URL is turned into a GraphQL endpoint by [`graphql_uri`].

use std::collections::HashMap;
use std::time::Duration;

use crate::client::HttpConfig;
use crate::domain::{Network, NetworkDescriptor};

// ============================================================================
// Constants
// ============================================================================

/// Indexer used when nothing else is configured.
pub const DEFAULT_INDEXER_URL: &str = "https://indexer.libra2.org";

/// Path appended to indexer base URLs that do not name a GraphQL endpoint.
pub const DEFAULT_GRAPHQL_PATH: &str = "/v1/graphql";

/// Suffixes that mark a base URL as already pointing at GraphQL.
const GRAPHQL_SUFFIXES: [&str; 2] = ["/v1/graphql", "/graphql"];

const ENV_NETWORK: &str = "EXPLORER_NETWORK";
const ENV_INDEXER_URL: [&str; 3] = [
    "EXPLORER_INDEXER_URL",
    "INDEXER_URL",
    "LIBRA2_INDEXER_HTTP",
];
const ENV_LOCAL_INDEXER_URL: [&str; 3] = [
    "EXPLORER_LOCAL_INDEXER_URL",
    "LOCAL_INDEXER_URL",
    "LIBRA2_LOCAL_INDEXER_HTTP",
];
const ENV_API_KEY: &str = "EXPLORER_API_KEY";
const ENV_TIMEOUT_SECS: &str = "EXPLORER_TIMEOUT_SECS";

// ============================================================================
// GraphQL URI
// ============================================================================

/// Turns an indexer base URL into its GraphQL endpoint.
///
/// One trailing slash is stripped. URLs already ending in `/v1/graphql` or
/// `/graphql` are kept, anything else gets [`DEFAULT_GRAPHQL_PATH`]. Blank
/// input yields `None`.
#[must_use]
pub fn graphql_uri(base: &str) -> Option<String> {
    let base = base.trim();
    let base = base.strip_suffix('/').unwrap_or(base);
    if base.is_empty() {
        return None;
    }

    if GRAPHQL_SUFFIXES.iter().any(|suffix| base.ends_with(suffix)) {
        Some(base.to_string())
    } else {
        Some(format!("{base}{DEFAULT_GRAPHQL_PATH}"))
    }
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(|v| v.trim()).filter(|v| !v.is_empty())
}

fn first_set(lookup: &impl Fn(&str) -> Option<String>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|&key| lookup(key))
        .find(|value| !value.trim().is_empty())
}

// ============================================================================
// Indexer Configuration
// ============================================================================

/// Where each network's indexer lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexerConfig {
    /// Explicit per-network base URLs.
    pub overrides: HashMap<Network, String>,
    /// Per-network defaults taken from the environment.
    pub network_defaults: HashMap<Network, String>,
    /// Fallback for every network; `None` disables the indexer wherever no
    /// other value is set.
    pub default_url: Option<String>,
}

impl Default for IndexerConfig {
    fn default() -> Self {
        Self {
            overrides: HashMap::new(),
            network_defaults: HashMap::new(),
            default_url: Some(DEFAULT_INDEXER_URL.to_string()),
        }
    }
}

impl IndexerConfig {
    /// Reads the indexer settings from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the indexer settings through `lookup`.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(url) = first_set(&lookup, &ENV_INDEXER_URL) {
            config.default_url = Some(url);
        }
        if let Some(url) = first_set(&lookup, &ENV_LOCAL_INDEXER_URL) {
            config.network_defaults.insert(Network::Local, url);
        }

        config
    }

    /// Sets an explicit base URL for `network`.
    #[must_use]
    pub fn with_override(mut self, network: Network, url: impl Into<String>) -> Self {
        self.overrides.insert(network, url.into());
        self
    }

    /// Removes the global fallback.
    #[must_use]
    pub fn without_default(mut self) -> Self {
        self.default_url = None;
        self
    }

    /// The base URL that wins for `network`, before GraphQL normalization.
    #[must_use]
    pub fn base_url(&self, network: Network) -> Option<&str> {
        non_empty(self.overrides.get(&network))
            .or_else(|| non_empty(self.network_defaults.get(&network)))
            .or_else(|| non_empty(self.default_url.as_ref()))
    }

    /// The GraphQL endpoint for `network`, if any.
    #[must_use]
    pub fn graphql_uri(&self, network: Network) -> Option<String> {
        self.base_url(network).and_then(graphql_uri)
    }
}

// ============================================================================
// Explorer Configuration
// ============================================================================

/// Everything needed to build an [`crate::client::ExplorerClient`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExplorerConfig {
    /// The selected network.
    pub network: Network,
    pub indexer: IndexerConfig,
    /// Per-network node URL overrides.
    pub node_overrides: HashMap<Network, String>,
    /// Per-network API keys.
    pub api_keys: HashMap<Network, String>,
    /// API key used where no per-network key is set.
    pub default_api_key: Option<String>,
    pub http: HttpConfig,
}

impl ExplorerConfig {
    /// Reads the configuration from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`.
    ///
    /// Unparseable values are logged and ignored.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self {
            indexer: IndexerConfig::from_lookup(&lookup),
            ..Self::default()
        };

        if let Some(raw) = lookup(ENV_NETWORK) {
            match raw.parse::<Network>() {
                Ok(network) => config.network = network,
                Err(e) => tracing::warn!("Ignoring {ENV_NETWORK}: {e}"),
            }
        }

        for network in Network::ALL {
            let key = format!("{ENV_API_KEY}_{}", network.as_str().to_ascii_uppercase());
            if let Some(api_key) = first_set(&lookup, &[key.as_str()]) {
                config.api_keys.insert(network, api_key);
            }
        }
        config.default_api_key = first_set(&lookup, &[ENV_API_KEY]);

        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            match raw.trim().parse::<u64>() {
                Ok(secs) => config.http = HttpConfig::with_timeout(Duration::from_secs(secs)),
                Err(e) => tracing::warn!("Ignoring {ENV_TIMEOUT_SECS}: {e}"),
            }
        }

        config
    }

    /// The descriptor of the selected network.
    #[must_use]
    pub fn descriptor(&self) -> NetworkDescriptor {
        self.descriptor_for(self.network)
    }

    /// The descriptor of `network`.
    #[must_use]
    pub fn descriptor_for(&self, network: Network) -> NetworkDescriptor {
        let node_url = non_empty(self.node_overrides.get(&network))
            .unwrap_or(network.node_url())
            .to_string();
        let api_key = non_empty(self.api_keys.get(&network))
            .or_else(|| non_empty(self.default_api_key.as_ref()))
            .map(String::from);

        NetworkDescriptor {
            network,
            node_url,
            indexer_url: self.indexer.graphql_uri(network),
            api_key,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
