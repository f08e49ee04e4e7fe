// Access control gate
//
// Two independent permissions, not a hierarchy: the administrative role may
// swap the template future clones are instantiated from, and the top-level
// authority may change contract-level descriptive metadata. Ownership of an
// individual entry is a separate per-record concept handled by the
// ownership ledger.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::info;

use curio_types::{Address, RegistryError, RegistryResult};

/// Identifier for a supported capability, in the style of an interface id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CapabilityId(String);

impl CapabilityId {
    /// Capability: template administration and role management
    pub const ACCESS_CONTROL: &'static str = "curio/access-control";
    /// Capability: contract-level metadata management
    pub const CONTRACT_METADATA: &'static str = "curio/contract-metadata";
    /// Capability: transferable ownership tokens over registry entries
    pub const OWNERSHIP_TOKEN: &'static str = "curio/ownership-token";
    /// Capability: per-owner enumeration of ownership tokens
    pub const OWNERSHIP_ENUMERATION: &'static str = "curio/ownership-enumeration";

    /// Create a capability id
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// String form of the id
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CapabilityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CapabilityId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// A layer that can answer whether it supports a capability.
///
/// The registry combines several providers with a short-circuit OR: a
/// capability is supported if any underlying layer supports it.
pub trait CapabilityProvider: Send + Sync {
    /// Does this layer support `capability`?
    fn supports(&self, capability: &CapabilityId) -> bool;
}

/// The two-role gate guarding template swaps and metadata changes.
#[derive(Debug, Clone)]
pub struct AccessGate {
    admin: Address,
    top_authority: Address,
}

impl AccessGate {
    /// Create a gate with both roles granted to the deployer.
    pub fn new(deployer: &Address) -> Self {
        Self {
            admin: deployer.clone(),
            top_authority: deployer.clone(),
        }
    }

    /// Is `caller` the administrative role?
    pub fn is_admin(&self, caller: &Address) -> bool {
        caller == &self.admin
    }

    /// Is `caller` the top-level authority?
    pub fn is_top_authority(&self, caller: &Address) -> bool {
        caller == &self.top_authority
    }

    /// Reject `caller` unless they hold the administrative role.
    pub fn require_admin(&self, caller: &Address) -> RegistryResult<()> {
        if !self.is_admin(caller) {
            return Err(RegistryError::PermissionDenied {
                caller: caller.to_string(),
                required: "admin",
            });
        }
        Ok(())
    }

    /// Reject `caller` unless they hold the top-level authority.
    pub fn require_top_authority(&self, caller: &Address) -> RegistryResult<()> {
        if !self.is_top_authority(caller) {
            return Err(RegistryError::PermissionDenied {
                caller: caller.to_string(),
                required: "top authority",
            });
        }
        Ok(())
    }

    /// Hand the administrative role to `new_admin`. Admin only.
    pub fn set_admin(&mut self, caller: &Address, new_admin: Address) -> RegistryResult<()> {
        self.require_admin(caller)?;
        info!(from = %self.admin, to = %new_admin, "admin role reassigned");
        self.admin = new_admin;
        Ok(())
    }

    /// Hand the top-level authority to `new_authority`. Authority only.
    pub fn set_top_authority(
        &mut self,
        caller: &Address,
        new_authority: Address,
    ) -> RegistryResult<()> {
        self.require_top_authority(caller)?;
        info!(from = %self.top_authority, to = %new_authority, "top authority reassigned");
        self.top_authority = new_authority;
        Ok(())
    }
}

impl CapabilityProvider for AccessGate {
    fn supports(&self, capability: &CapabilityId) -> bool {
        matches!(
            capability.as_str(),
            CapabilityId::ACCESS_CONTROL | CapabilityId::CONTRACT_METADATA
        )
    }
}
