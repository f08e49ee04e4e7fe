// Curio collection registry
//
// This crate implements the registry core: deterministic provisioning of
// collection instances from a shared template, an ownership index over the
// provisioned entries, a bounded paginated query surface, and the two-role
// access gate protecting the template pointer and contract metadata.
//
// The registry assumes the host serializes state-mutating calls. On a
// multi-threaded host, wrap the registry with [`Registry::shared`] so the
// template pointer, global counter, and ownership index stay behind one
// lock.

pub mod access;
pub mod collection;
pub mod config;
pub mod index;
pub mod instantiator;
pub mod ledger;
pub mod pagination;
pub mod registry;

pub use access::{AccessGate, CapabilityId, CapabilityProvider};
pub use collection::{
    Collection, CollectionHandle, CollectionInit, CollectionTemplate, MemoryCollection,
    MemoryCollectionTemplate, TokenId, TokenRecord,
};
pub use config::RegistryConfig;
pub use index::OwnershipIndex;
pub use instantiator::Instantiator;
pub use ledger::OwnershipLedger;
pub use pagination::{page_bounds, MAX_PAGE_SIZE};
pub use registry::{CollectionRow, CreateParams, CreateReceipt, Registry, RegistryEntry};

// Re-export the identity primitives callers need at the API boundary.
pub use curio_crypto::{derive_instance_address, InstanceAddress, Salt};
pub use curio_types::{Address, EntryId, RegistryError, RegistryResult};
