// Salt type for deterministic instantiation

use std::fmt;

use borsh::{BorshDeserialize, BorshSerialize};
use rand::RngCore;
use serde::{Deserialize, Serialize};

/// Caller-supplied salt that fixes the identity of a not-yet-created
/// instance.
///
/// Two creations against the same template with the same salt derive the
/// same instance address, which is why salt reuse is a hard error at the
/// instantiator.
#[derive(
    Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, BorshSerialize, BorshDeserialize,
)]
pub struct Salt([u8; 32]);

impl Salt {
    /// Create a salt from raw bytes
    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Create a salt by hashing an arbitrary label
    ///
    /// Useful when callers want a human-meaningful salt ("my-collection-v2")
    /// rather than raw bytes.
    pub fn from_label(label: &str) -> Self {
        Self(*blake3::hash(label.as_bytes()).as_bytes())
    }

    /// Generate a random salt
    pub fn random() -> Self {
        let mut bytes = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// Get the raw bytes of the salt
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert the salt to a hex string
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for Salt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Salt({})", self.to_hex())
    }
}

impl fmt::Display for Salt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl From<[u8; 32]> for Salt {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}
