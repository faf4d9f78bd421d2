//! On-chain account data returned by the explorer reads.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Type tag of the resource holding an account's published packages.
pub const PACKAGE_REGISTRY_TYPE: &str = "0x1::code::PackageRegistry";

// ============================================================================
// Resources and Modules
// ============================================================================

/// A Move resource stored under an account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveResource {
    /// Fully qualified struct tag, e.g. `0x1::account::Account`.
    #[serde(rename = "type")]
    pub resource_type: String,
    /// Resource fields as stored by the indexer.
    #[serde(default)]
    pub data: Value,
}

/// A published Move module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveModuleBytecode {
    /// Hex encoded bytecode.
    pub bytecode: String,
    /// Module ABI, absent for modules the indexer could not decode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abi: Option<Value>,
}

impl MoveModuleBytecode {
    /// Module name taken from the ABI, when present.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.abi.as_ref()?.get("name")?.as_str()
    }
}

// ============================================================================
// Package Registry
// ============================================================================

/// Source metadata of one module inside a package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleMetadata {
    pub name: String,
    /// Gzipped source, hex encoded. Empty when sources were not uploaded.
    #[serde(default)]
    pub source: String,
}

/// Upgrade policy of a package.
///
/// `0` arbitrary, `1` compatible, `2` immutable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradePolicy {
    pub policy: u8,
}

impl UpgradePolicy {
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self.policy {
            0 => "arbitrary",
            1 => "compatible",
            2 => "immutable",
            _ => "unknown",
        }
    }
}

/// A package published under an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageMetadata {
    pub name: String,
    #[serde(default)]
    pub modules: Vec<ModuleMetadata>,
    pub upgrade_policy: UpgradePolicy,
    /// Times the package was upgraded; doubles as its on-chain version.
    #[serde(default, deserialize_with = "string_or_number")]
    pub upgrade_number: String,
    /// Digest over the sorted per-source sha256 digests.
    #[serde(default)]
    pub source_digest: String,
    /// The package's `Move.toml`.
    #[serde(default)]
    pub manifest: String,
}

/// u64 fields arrive as strings from the node but as numbers from some
/// indexers.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(u64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(text) => text,
        Raw::Number(number) => number.to_string(),
    })
}

#[derive(Debug, Default, Deserialize)]
struct PackageRegistry {
    #[serde(default)]
    packages: Vec<Value>,
}

/// Extracts the packages of a `PackageRegistry` resource.
///
/// Packages are sorted by name, and so are the modules of each package. Each
/// package is read on its own; unreadable ones are skipped. A registry
/// without a readable `packages` field yields an empty list.
#[must_use]
pub fn packages_from_registry(registry: &MoveResource) -> Vec<PackageMetadata> {
    let registry: PackageRegistry = serde_json::from_value(registry.data.clone())
        .inspect_err(|e| tracing::debug!("Package registry did not parse: {e}"))
        .unwrap_or_default();

    let mut packages: Vec<PackageMetadata> = registry
        .packages
        .into_iter()
        .filter_map(|raw| {
            serde_json::from_value::<PackageMetadata>(raw)
                .inspect_err(|e| tracing::debug!("Skipping unreadable package: {e}"))
                .ok()
        })
        .collect();
    for package in &mut packages {
        package.modules.sort_by(|a, b| a.name.cmp(&b.name));
    }
    packages.sort_by(|a, b| a.name.cmp(&b.name));
    packages
}
