//! Data-access layer for a Move blockchain explorer.
//!
//! Reads account data from a node and from an indexer GraphQL service, and
//! folds every failure of either backend into one [`domain::ErrorKind`].
//!
//! - [`domain`] - data types and the error taxonomy
//! - [`client`] - transports, classification and the typed reads
//! - [`config`] - endpoint resolution
//! - [`render`] - user-facing error presentation

pub mod client;
pub mod config;
pub mod domain;
pub mod render;

#[cfg(test)]
mod test_utils;
