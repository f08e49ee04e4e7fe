// Caller identity type

use std::fmt;

use serde::{Deserialize, Serialize};

/// Address represents an authenticated caller identity, such as a user,
/// account, or system component.
///
/// The registry trusts that an `Address` handed to it has already been
/// authenticated by the host; no verification happens here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address {
    /// The string representation of the address
    inner: String,
}

impl Address {
    /// Create a new address from a string
    pub fn new(address: impl Into<String>) -> Self {
        Self { inner: address.into() }
    }

    /// Get the string representation of the address
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Get the byte representation of the address
    pub fn as_bytes(&self) -> &[u8] {
        self.inner.as_bytes()
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl From<String> for Address {
    fn from(address: String) -> Self {
        Self { inner: address }
    }
}

impl From<&str> for Address {
    fn from(address: &str) -> Self {
        Self { inner: address.to_string() }
    }
}
