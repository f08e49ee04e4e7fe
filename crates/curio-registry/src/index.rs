// Ownership index
//
// Per-caller, insertion-ordered record of the entry ids each caller has
// created, plus the global entry counter. The index is a mint-time
// snapshot: it is deliberately not updated when an ownership token is later
// transferred, so a caller's list can include ids they no longer hold.

use std::collections::HashMap;

use curio_types::{Address, EntryId};

/// Append-only index of created entries, keyed by creator.
#[derive(Debug, Default)]
pub struct OwnershipIndex {
    created: HashMap<Address, Vec<EntryId>>,
    tokens_count: u64,
}

impl OwnershipIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Total entries ever created; also the next id to assign.
    pub fn tokens_count(&self) -> u64 {
        self.tokens_count
    }

    /// Record a newly created entry for `creator`.
    ///
    /// Appending and bumping the counter are one step so `tokens_count`
    /// always equals the number of recorded entries.
    pub fn insert(&mut self, creator: &Address, id: EntryId) {
        self.created.entry(creator.clone()).or_default().push(id);
        self.tokens_count += 1;
    }

    /// Entry ids `creator` has created, in insertion order.
    pub fn created_by(&self, creator: &Address) -> &[EntryId] {
        self.created.get(creator).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of entries `creator` has created.
    pub fn count_for(&self, creator: &Address) -> u64 {
        self.created_by(creator).len() as u64
    }
}
