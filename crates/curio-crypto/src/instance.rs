// Content-derived instance address

use std::fmt;
use std::str::FromStr;

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error types for instance address parsing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InstanceAddressError {
    /// Invalid format for an encoded address
    #[error("invalid instance address format")]
    InvalidFormat,
    /// Encoded address does not decode to 32 bytes
    #[error("invalid instance address length")]
    InvalidLength,
}

/// A content-derived identifier for a collection instance.
///
/// The address is a pure function of (template fingerprint, salt, registry
/// seed), so it is computable before the instance it names exists. It plays
/// the role a deployment address plays on a chain host: the stable handle by
/// which the instance is reached.
#[derive(
    Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, BorshSerialize, BorshDeserialize,
)]
pub struct InstanceAddress([u8; 32]);

impl InstanceAddress {
    /// Create an address from raw hash bytes
    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes of the address
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert the address to a bare hex string
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Convert the address to its prefixed string form
    pub fn to_hex_string(&self) -> String {
        format!("inst:{}", self.to_hex())
    }

    /// Parse an address from its prefixed string form
    pub fn parse(s: &str) -> Result<Self, InstanceAddressError> {
        let hex_part = s.strip_prefix("inst:").ok_or(InstanceAddressError::InvalidFormat)?;
        let bytes = hex::decode(hex_part).map_err(|_| InstanceAddressError::InvalidFormat)?;

        if bytes.len() != 32 {
            return Err(InstanceAddressError::InvalidLength);
        }

        let mut data = [0u8; 32];
        data.copy_from_slice(&bytes);
        Ok(Self(data))
    }
}

impl fmt::Debug for InstanceAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "InstanceAddress({})", self.to_hex())
    }
}

impl fmt::Display for InstanceAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex_string())
    }
}

impl FromStr for InstanceAddress {
    type Err = InstanceAddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
