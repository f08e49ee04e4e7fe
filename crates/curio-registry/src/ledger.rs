// Ownership token ledger
//
// Each registry entry id doubles as an ownership token id. The ledger and
// the registry entry table are independent maps over the same integer key,
// so transfer semantics and creation-time registry data evolve separately.
// Transfers here do not touch the ownership index; that staleness is a
// documented property of the index, not of the ledger.

use std::collections::HashMap;

use tracing::debug;

use curio_types::{Address, EntryId, RegistryError, RegistryResult};

use crate::access::{CapabilityId, CapabilityProvider};

/// Transferable ledger mapping entry ids to their current holder.
#[derive(Debug, Default)]
pub struct OwnershipLedger {
    owners: HashMap<EntryId, Address>,
    holdings: HashMap<Address, Vec<EntryId>>,
}

impl OwnershipLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint token `id` to `owner`.
    ///
    /// Ids come from the registry's monotonic counter, so a mint collision
    /// means an invariant broke upstream; it is rejected, never overwritten.
    pub fn mint(&mut self, id: EntryId, owner: &Address) -> RegistryResult<()> {
        if self.owners.contains_key(&id) {
            return Err(RegistryError::TokenAlreadyMinted { id });
        }
        self.owners.insert(id, owner.clone());
        self.holdings.entry(owner.clone()).or_default().push(id);
        debug!(id, owner = %owner, "ownership token minted");
        Ok(())
    }

    /// Current holder of token `id`.
    pub fn owner_of(&self, id: EntryId) -> RegistryResult<&Address> {
        self.owners.get(&id).ok_or(RegistryError::TokenNotFound { id })
    }

    /// Token ids currently held by `owner`.
    pub fn tokens_of_owner(&self, owner: &Address) -> &[EntryId] {
        self.holdings.get(owner).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Move token `id` from its current holder to `to`.
    ///
    /// Only the current holder may transfer.
    pub fn transfer(&mut self, caller: &Address, id: EntryId, to: &Address) -> RegistryResult<()> {
        let holder = self.owner_of(id)?.clone();
        if &holder != caller {
            return Err(RegistryError::PermissionDenied {
                caller: caller.to_string(),
                required: "token holder",
            });
        }

        if let Some(held) = self.holdings.get_mut(&holder) {
            held.retain(|&held_id| held_id != id);
        }
        self.owners.insert(id, to.clone());
        self.holdings.entry(to.clone()).or_default().push(id);
        debug!(id, from = %holder, to = %to, "ownership token transferred");
        Ok(())
    }

    /// Number of tokens ever minted
    pub fn len(&self) -> usize {
        self.owners.len()
    }

    /// Whether no token has been minted yet
    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }
}

impl CapabilityProvider for OwnershipLedger {
    fn supports(&self, capability: &CapabilityId) -> bool {
        matches!(
            capability.as_str(),
            CapabilityId::OWNERSHIP_TOKEN | CapabilityId::OWNERSHIP_ENUMERATION
        )
    }
}
