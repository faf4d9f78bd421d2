//! Network identities and the resolved endpoints handed to clients.
//!
//! [`Network`] names a chain network. [`NetworkDescriptor`] is the read-only
//! bundle of endpoints and credentials produced by configuration; clients only
//! ever read it.

use serde::{Deserialize, Serialize};

// ============================================================================
// Network
// ============================================================================

/// Supported chain networks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    /// The production network.
    #[default]
    Mainnet,
    /// The public test network.
    Testnet,
    /// The developer network, reset periodically.
    Devnet,
    /// A node running on the local machine.
    Local,
}

impl Network {
    /// All networks, in declaration order.
    pub const ALL: [Network; 4] = [Self::Mainnet, Self::Testnet, Self::Devnet, Self::Local];

    /// Returns the lowercase name of the network.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Mainnet => "mainnet",
            Self::Testnet => "testnet",
            Self::Devnet => "devnet",
            Self::Local => "local",
        }
    }

    /// Returns the built-in node REST endpoint, including its `/v1` prefix.
    #[must_use]
    pub const fn node_url(&self) -> &'static str {
        match self {
            Self::Mainnet => "https://api.mainnet.libra2.org/v1",
            Self::Testnet => "https://api.testnet.libra2.org/v1",
            Self::Devnet => "https://api.devnet.libra2.org/v1",
            Self::Local => "http://127.0.0.1:8080/v1",
        }
    }

    /// Whether this network runs on the local machine.
    #[must_use]
    pub const fn is_local(&self) -> bool {
        matches!(self, Self::Local)
    }
}

impl std::fmt::Display for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Network {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mainnet" => Ok(Self::Mainnet),
            "testnet" => Ok(Self::Testnet),
            "devnet" => Ok(Self::Devnet),
            "local" | "localnet" => Ok(Self::Local),
            other => Err(format!("unknown network '{other}'")),
        }
    }
}

// ============================================================================
// Network Descriptor
// ============================================================================

/// Resolved endpoints and credentials for one network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkDescriptor {
    /// The network these endpoints belong to.
    pub network: Network,
    /// Node REST base URL.
    pub node_url: String,
    /// Indexer GraphQL endpoint, if one is configured.
    pub indexer_url: Option<String>,
    /// Credential sent as a bearer token to the indexer.
    pub api_key: Option<String>,
}

impl NetworkDescriptor {
    /// Creates a descriptor with the built-in node URL and no indexer.
    #[must_use]
    pub fn new(network: Network) -> Self {
        Self {
            network,
            node_url: network.node_url().to_string(),
            indexer_url: None,
            api_key: None,
        }
    }

    #[must_use]
    pub fn with_node_url(mut self, url: impl Into<String>) -> Self {
        self.node_url = url.into();
        self
    }

    #[must_use]
    pub fn with_indexer_url(mut self, url: impl Into<String>) -> Self {
        self.indexer_url = Some(url.into());
        self
    }

    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// The API key, ignoring blank values.
    #[must_use]
    pub fn credential(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|key| !key.trim().is_empty())
    }
}

// ============================================================================
// Tests
// ============================================================================
