// Collection collaborator surface
//
// The registry treats each provisioned collection as an external
// collaborator: it calls the one-shot initialization entry and a handful of
// read-only accessors, and stays out of the collection's own token
// semantics (minting, balances, transfer).

use std::any::Any;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};

use curio_types::{Address, EntryId, RegistryError, RegistryResult};

/// Collection-internal token identifier.
pub type TokenId = u64;

/// Shared handle to a live collection instance.
pub type CollectionHandle = Arc<RwLock<Box<dyn Collection>>>;

/// Parameters handed to a collection exactly once, at creation time.
///
/// The registry seed and entry id form a back-reference: the collection can
/// later answer authorization questions against the registry that
/// provisioned it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionInit {
    /// Human-readable collection name
    pub name: String,
    /// Short symbol for the collection
    pub symbol: String,
    /// Collection-level descriptive metadata URI
    pub contract_uri: String,
    /// Seed identifying the registry that provisioned this instance
    pub registry_seed: [u8; 32],
    /// The registry entry id this instance is bound to
    pub entry_id: EntryId,
    /// Creator of the registry entry
    pub owner: Address,
    /// Opaque initialization payload, exposed later through `data()`
    pub init_data: Vec<u8>,
}

/// One token row as returned by the paginated token queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRecord {
    /// Collection-internal token id
    pub token_id: TokenId,
    /// Per-token metadata URI
    pub uri: String,
    /// Opaque per-token payload
    pub data: Vec<u8>,
}

/// Read surface the registry requires from every collection instance.
///
/// `initialize` must succeed exactly once per instance; everything else is
/// read-only and queried live (never cached by the registry).
pub trait Collection: Send + Sync + std::fmt::Debug {
    /// One-shot initialization, called by the registry inside `create`.
    fn initialize(&mut self, init: CollectionInit) -> RegistryResult<()>;

    /// Concrete-type escape hatch so hosts can reach collection surfaces
    /// the registry does not abstract (minting, transfer, and the rest of
    /// the collection's own token semantics).
    fn as_any(&self) -> &dyn Any;

    /// Mutable form of [`Collection::as_any`].
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Opaque collection metadata blob.
    fn data(&self) -> Vec<u8>;

    /// Number of tokens `owner` currently holds in this collection.
    fn balance_of(&self, owner: &Address) -> u64;

    /// The `index`-th token held by `owner`, in the collection's own
    /// enumeration order.
    fn token_of_owner_by_index(&self, owner: &Address, index: u64) -> Option<TokenId>;

    /// Per-token metadata URI.
    fn token_uri(&self, token_id: TokenId) -> Option<String>;

    /// Opaque per-token payload.
    fn token_data(&self, token_id: TokenId) -> Option<Vec<u8>>;
}

/// Source of new collection instances.
///
/// The fingerprint feeds the deterministic address derivation, so two
/// templates with different fingerprints can never occupy the same derived
/// address for the same salt.
pub trait CollectionTemplate: Send + Sync {
    /// Stable fingerprint of this template's behavior/version.
    fn fingerprint(&self) -> [u8; 32];

    /// Produce a fresh, uninitialized instance.
    fn instantiate(&self) -> Box<dyn Collection>;
}

/// In-memory reference collection.
///
/// Implements the collaborator surface over plain maps. The `mint` helper
/// exists so the paginated query surface has live balances to read; full
/// token semantics (transfer, burn) are out of scope for the registry.
#[derive(Debug, Default)]
pub struct MemoryCollection {
    init: Option<CollectionInit>,
    tokens: Vec<MemoryToken>,
    per_owner: HashMap<Address, Vec<TokenId>>,
}

#[derive(Debug, Clone)]
struct MemoryToken {
    owner: Address,
    uri: String,
    data: Vec<u8>,
}

impl MemoryCollection {
    /// Create a fresh, uninitialized collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Collection name, once initialized
    pub fn name(&self) -> Option<&str> {
        self.init.as_ref().map(|i| i.name.as_str())
    }

    /// Collection symbol, once initialized
    pub fn symbol(&self) -> Option<&str> {
        self.init.as_ref().map(|i| i.symbol.as_str())
    }

    /// Entry id this instance is bound to, once initialized
    pub fn entry_id(&self) -> Option<EntryId> {
        self.init.as_ref().map(|i| i.entry_id)
    }

    /// Mint a token to `owner`, returning its id.
    ///
    /// Test/demo surface only; the registry never calls this.
    pub fn mint(&mut self, owner: &Address, uri: impl Into<String>, data: Vec<u8>) -> TokenId {
        let token_id = self.tokens.len() as TokenId;
        self.tokens.push(MemoryToken {
            owner: owner.clone(),
            uri: uri.into(),
            data,
        });
        self.per_owner.entry(owner.clone()).or_default().push(token_id);
        token_id
    }
}

impl Collection for MemoryCollection {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn initialize(&mut self, init: CollectionInit) -> RegistryResult<()> {
        if let Some(existing) = &self.init {
            return Err(RegistryError::AlreadyInitialized { id: existing.entry_id });
        }
        self.init = Some(init);
        Ok(())
    }

    fn data(&self) -> Vec<u8> {
        self.init.as_ref().map(|i| i.init_data.clone()).unwrap_or_default()
    }

    fn balance_of(&self, owner: &Address) -> u64 {
        self.per_owner.get(owner).map(|ids| ids.len() as u64).unwrap_or(0)
    }

    fn token_of_owner_by_index(&self, owner: &Address, index: u64) -> Option<TokenId> {
        self.per_owner.get(owner)?.get(index as usize).copied()
    }

    fn token_uri(&self, token_id: TokenId) -> Option<String> {
        self.tokens.get(token_id as usize).map(|t| t.uri.clone())
    }

    fn token_data(&self, token_id: TokenId) -> Option<Vec<u8>> {
        self.tokens.get(token_id as usize).map(|t| t.data.clone())
    }
}

/// Template producing [`MemoryCollection`] instances, fingerprinted by a
/// version label.
#[derive(Debug, Clone)]
pub struct MemoryCollectionTemplate {
    fingerprint: [u8; 32],
}

impl MemoryCollectionTemplate {
    /// Create a template whose fingerprint is derived from `label`.
    ///
    /// Two templates with the same label are interchangeable for address
    /// derivation; bump the label to model deploying a new template.
    pub fn new(label: &str) -> Self {
        Self {
            fingerprint: *blake3::hash(label.as_bytes()).as_bytes(),
        }
    }
}

impl CollectionTemplate for MemoryCollectionTemplate {
    fn fingerprint(&self) -> [u8; 32] {
        self.fingerprint
    }

    fn instantiate(&self) -> Box<dyn Collection> {
        Box::new(MemoryCollection::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init_for(entry_id: EntryId, owner: &Address) -> CollectionInit {
        CollectionInit {
            name: "Test".to_string(),
            symbol: "TST".to_string(),
            contract_uri: "ipfs://contract".to_string(),
            registry_seed: [0u8; 32],
            entry_id,
            owner: owner.clone(),
            init_data: vec![1, 2, 3],
        }
    }

    #[test]
    fn test_initialize_is_one_shot() {
        let alice = Address::from("alice");
        let mut collection = MemoryCollection::new();

        collection.initialize(init_for(4, &alice)).unwrap();
        assert_eq!(collection.entry_id(), Some(4));
        assert_eq!(collection.data(), vec![1, 2, 3]);

        let err = collection.initialize(init_for(4, &alice)).unwrap_err();
        assert_eq!(err, RegistryError::AlreadyInitialized { id: 4 });
    }

    #[test]
    fn test_owner_enumeration() {
        let alice = Address::from("alice");
        let bob = Address::from("bob");
        let mut collection = MemoryCollection::new();
        collection.initialize(init_for(0, &alice)).unwrap();

        let t0 = collection.mint(&alice, "ipfs://t0", vec![0]);
        let _t1 = collection.mint(&bob, "ipfs://t1", vec![1]);
        let t2 = collection.mint(&alice, "ipfs://t2", vec![2]);

        assert_eq!(collection.balance_of(&alice), 2);
        assert_eq!(collection.balance_of(&bob), 1);
        assert_eq!(collection.token_of_owner_by_index(&alice, 0), Some(t0));
        assert_eq!(collection.token_of_owner_by_index(&alice, 1), Some(t2));
        assert_eq!(collection.token_of_owner_by_index(&alice, 2), None);
        assert_eq!(collection.token_uri(t2).as_deref(), Some("ipfs://t2"));
    }

    #[test]
    fn test_template_fingerprint_follows_label() {
        let a = MemoryCollectionTemplate::new("v1");
        let b = MemoryCollectionTemplate::new("v1");
        let c = MemoryCollectionTemplate::new("v2");
        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_ne!(a.fingerprint(), c.fingerprint());
    }
}
