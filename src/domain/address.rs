//! Account addresses and their canonical form.
//!
//! The indexer stores addresses as `0x` followed by 64 lowercase hex digits, so
//! `0x1` must be sent as `0x000…0001`.

use serde::Serialize;
use thiserror::Error;

/// Number of hex digits in a canonical address.
pub const ADDRESS_HEX_LEN: usize = 64;

/// Why an input could not be read as an address.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    #[error("address is empty")]
    Empty,

    #[error("address has {0} hex digits, at most 64 are allowed")]
    TooLong(usize),

    #[error("address contains non-hex character '{0}'")]
    InvalidCharacter(char),
}

/// A canonical, zero-padded account address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    /// Standardizes `input` into the canonical form.
    ///
    /// Accepts an optional `0x` prefix, surrounding whitespace and any hex
    /// case.
    ///
    /// # Errors
    ///
    /// Returns an [`AddressError`] when the input is empty, longer than 64 hex
    /// digits or contains a non-hex character.
    pub fn standardize(input: &str) -> Result<Self, AddressError> {
        let trimmed = input.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);

        if digits.is_empty() {
            return Err(AddressError::Empty);
        }
        if let Some(bad) = digits.chars().find(|c| !c.is_ascii_hexdigit()) {
            return Err(AddressError::InvalidCharacter(bad));
        }
        if digits.len() > ADDRESS_HEX_LEN {
            return Err(AddressError::TooLong(digits.len()));
        }

        Ok(Self(format!(
            "0x{:0>width$}",
            digits.to_ascii_lowercase(),
            width = ADDRESS_HEX_LEN
        )))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::standardize(s)
    }
}
