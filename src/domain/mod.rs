//! Domain types for the explorer data layer.
//!
//! # Module Organization
//!
//! - [`error`] - Error taxonomy (`ErrorKind`, `NormalizedError`, `TransportFailure`)
//! - [`network`] - Networks and their resolved endpoints
//! - [`address`] - Canonical account addresses
//! - [`resource`] - Resources, modules and package metadata

// ============================================================================
// Module Declarations
// ============================================================================

pub mod address;
pub mod error;
pub mod network;
pub mod resource;

// ============================================================================
// Re-exports
// ============================================================================

pub use address::{Address, AddressError};
pub use error::{
    ErrorKind, INDEXER_UNAVAILABLE_MESSAGE, MISSING_DATA_MESSAGE, NormalizedError, QueryResult,
    TransportFailure,
};
pub use network::{Network, NetworkDescriptor};
pub use resource::{
    ModuleMetadata, MoveModuleBytecode, MoveResource, PACKAGE_REGISTRY_TYPE, PackageMetadata,
    UpgradePolicy, packages_from_registry,
};
