// Registry core and paginated query surface
//
// Orchestrates creation: assigns the next entry id, creates and initializes
// the clone through the instantiator, mints the ownership token, records
// the immutable entry row, and appends to the ownership index. Every call
// is all-or-nothing; the host is assumed to serialize mutating calls (see
// [`Registry::shared`] for multi-threaded hosts).

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use curio_crypto::{InstanceAddress, Salt};
use curio_types::{Address, EntryId, RegistryError, RegistryResult};

use crate::access::{AccessGate, CapabilityId, CapabilityProvider};
use crate::collection::{CollectionHandle, CollectionInit, CollectionTemplate, TokenRecord};
use crate::config::RegistryConfig;
use crate::index::OwnershipIndex;
use crate::instantiator::Instantiator;
use crate::ledger::OwnershipLedger;
use crate::pagination::page_bounds;

/// Immutable creation-time record of one provisioned collection.
pub struct RegistryEntry {
    /// Registry-scoped id; also the ownership token id
    pub id: EntryId,
    /// Address of the created instance
    pub address: InstanceAddress,
    /// Entry-level descriptive metadata URI, write-once
    pub metadata_uri: String,
    handle: CollectionHandle,
}

impl RegistryEntry {
    /// Live handle to the instance behind this entry.
    pub fn handle(&self) -> &CollectionHandle {
        &self.handle
    }
}

/// Caller-supplied parameters for [`Registry::create`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateParams {
    /// Collection name, forwarded to initialization
    pub name: String,
    /// Collection symbol, forwarded to initialization
    pub symbol: String,
    /// Collection-level metadata URI, forwarded to initialization
    pub contract_uri: String,
    /// Registry-entry metadata URI, recorded write-once on the entry
    pub entry_uri: String,
    /// Opaque initialization payload for the collection
    pub init_data: Vec<u8>,
}

/// Outcome of a successful [`Registry::create`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateReceipt {
    /// Assigned entry id
    pub id: EntryId,
    /// Address the instance was created at
    pub address: InstanceAddress,
}

/// One row of a `get_self_collections` page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionRow {
    /// Entry id
    pub id: EntryId,
    /// Instance address
    pub address: InstanceAddress,
    /// Live metadata blob read from the collection
    pub data: Vec<u8>,
}

/// The collection registry.
pub struct Registry {
    seed: [u8; 32],
    instantiator: Instantiator,
    entries: HashMap<EntryId, RegistryEntry>,
    ledger: OwnershipLedger,
    index: OwnershipIndex,
    gate: AccessGate,
    contract_uri: String,
    page_cap: u64,
}

impl Registry {
    /// Build a registry from configuration and an initial template.
    pub fn new(config: RegistryConfig, template: Arc<dyn CollectionTemplate>) -> Self {
        let seed = config.seed.unwrap_or_else(rand::random);
        info!(
            deployer = %config.deployer,
            seed = %hex::encode(seed),
            "registry deployed"
        );
        Self {
            seed,
            instantiator: Instantiator::new(seed, template),
            entries: HashMap::new(),
            ledger: OwnershipLedger::new(),
            index: OwnershipIndex::new(),
            gate: AccessGate::new(&config.deployer),
            contract_uri: config.contract_uri,
            page_cap: config.page_cap,
        }
    }

    /// Wrap a registry for use from multiple threads.
    ///
    /// The host's call-level serialization guarantee is reproduced by
    /// funneling every call through this lock.
    pub fn shared(config: RegistryConfig, template: Arc<dyn CollectionTemplate>) -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(Self::new(config, template)))
    }

    // --- creation path ---

    /// Provision a new collection for `caller`.
    ///
    /// Assigns `id = tokens_count`, creates and initializes the clone at the
    /// predicted address, mints ownership token `id` to the caller, records
    /// the entry row, and appends `id` to the caller's index. Fails as a
    /// whole: a `DuplicateSalt` (or any initialization failure) leaves no
    /// minted token, no entry, and no index row behind.
    pub fn create(
        &mut self,
        caller: &Address,
        salt: &Salt,
        params: CreateParams,
    ) -> RegistryResult<CreateReceipt> {
        let id = self.index.tokens_count();

        // All fallible work happens inside the instantiator, before any
        // registry state is touched.
        let init = CollectionInit {
            name: params.name,
            symbol: params.symbol,
            contract_uri: params.contract_uri,
            registry_seed: self.seed,
            entry_id: id,
            owner: caller.clone(),
            init_data: params.init_data,
        };
        let (address, handle) = self.instantiator.create_instance(salt, init)?;

        self.ledger.mint(id, caller)?;
        self.entries.insert(
            id,
            RegistryEntry {
                id,
                address,
                metadata_uri: params.entry_uri,
                handle,
            },
        );
        self.index.insert(caller, id);

        info!(id, caller = %caller, address = %address, "collection registered");
        Ok(CreateReceipt { id, address })
    }

    /// Address `create` would use for `salt` under the current template.
    ///
    /// Read-only; safe to call any number of times.
    pub fn predict_deterministic_address(&self, salt: &Salt) -> InstanceAddress {
        self.instantiator.predict_address(salt)
    }

    /// Swap the template future creations clone from. Admin only.
    ///
    /// Already-created entries are unaffected.
    pub fn set_implementation(
        &mut self,
        caller: &Address,
        template: Arc<dyn CollectionTemplate>,
    ) -> RegistryResult<()> {
        self.gate.require_admin(caller)?;
        info!(fingerprint = %hex::encode(template.fingerprint()), "template replaced");
        self.instantiator.set_template(template);
        Ok(())
    }

    // --- durable state accessors ---

    /// Total entries ever created.
    pub fn tokens_count(&self) -> u64 {
        self.index.tokens_count()
    }

    /// Full entry row for `id`.
    pub fn entry(&self, id: EntryId) -> RegistryResult<&RegistryEntry> {
        self.entries.get(&id).ok_or(RegistryError::UnknownEntry { id })
    }

    /// Instance address recorded for `id`.
    pub fn collection_of(&self, id: EntryId) -> RegistryResult<InstanceAddress> {
        Ok(self.entry(id)?.address)
    }

    /// Entry metadata URI recorded for `id`.
    pub fn token_uri_of(&self, id: EntryId) -> RegistryResult<&str> {
        Ok(self.entry(id)?.metadata_uri.as_str())
    }

    /// Fingerprint of the current template.
    pub fn implementation_fingerprint(&self) -> [u8; 32] {
        self.instantiator.template_fingerprint()
    }

    /// Contract-level descriptive metadata URI.
    pub fn contract_uri(&self) -> &str {
        &self.contract_uri
    }

    /// Change the contract-level metadata URI. Top authority only.
    pub fn set_contract_uri(
        &mut self,
        caller: &Address,
        uri: impl Into<String>,
    ) -> RegistryResult<()> {
        self.gate.require_top_authority(caller)?;
        self.contract_uri = uri.into();
        info!(uri = %self.contract_uri, "contract metadata updated");
        Ok(())
    }

    /// The access gate (role queries and reassignment).
    pub fn gate(&self) -> &AccessGate {
        &self.gate
    }

    /// Mutable access to the gate for role reassignment.
    pub fn gate_mut(&mut self) -> &mut AccessGate {
        &mut self.gate
    }

    /// The ownership token ledger (owner lookups, transfer).
    pub fn ledger(&self) -> &OwnershipLedger {
        &self.ledger
    }

    /// Mutable access to the ledger for token transfer.
    pub fn ledger_mut(&mut self) -> &mut OwnershipLedger {
        &mut self.ledger
    }

    /// Does any layer of this registry support `capability`?
    ///
    /// Providers are consulted in order with a short-circuit OR.
    pub fn supports_capability(&self, capability: &CapabilityId) -> bool {
        let providers: [&dyn CapabilityProvider; 2] = [&self.gate, &self.ledger];
        providers.iter().any(|provider| provider.supports(capability))
    }

    // --- paginated query surface ---

    /// One page of the caller's created collections.
    ///
    /// Enumerates the caller's ownership index (mint-time snapshot; not
    /// transfer-aware) and, for each entry in the page, reads the
    /// collection's metadata blob and the caller's live token balance.
    /// Returns the rows and the balances as parallel vectors.
    pub fn get_self_collections(
        &self,
        caller: &Address,
        page: u64,
        size: u64,
    ) -> RegistryResult<(Vec<CollectionRow>, Vec<u64>)> {
        let created = self.index.created_by(caller);
        let range = page_bounds(created.len() as u64, page, size, self.page_cap)?;

        let mut rows = Vec::with_capacity(range.end as usize - range.start as usize);
        let mut owned_counts = Vec::with_capacity(rows.capacity());
        for &id in &created[range.start as usize..range.end as usize] {
            let entry = self.entry(id)?;
            let collection = entry.handle().read().unwrap();
            rows.push(CollectionRow {
                id,
                address: entry.address,
                data: collection.data(),
            });
            owned_counts.push(collection.balance_of(caller));
        }

        debug!(caller = %caller, page, size, rows = rows.len(), "self collections page served");
        Ok((rows, owned_counts))
    }

    /// Token listings for the caller across several owned collections.
    ///
    /// `ids`, `pages`, and `sizes` are parallel arrays; each id is paged
    /// independently over the caller's live balance in that collection.
    /// Validation happens up front in this order: array lengths must match,
    /// the array length itself must not exceed the page cap, every id must
    /// have an entry, each per-id request must satisfy the pagination
    /// contract, and the sum of the *effective* page lengths (after the
    /// short-last-page rule) must not exceed the cap. The call either fully
    /// succeeds for every id or fails with no records fetched.
    pub fn get_self_tokens(
        &self,
        caller: &Address,
        ids: &[EntryId],
        pages: &[u64],
        sizes: &[u64],
    ) -> RegistryResult<Vec<Vec<TokenRecord>>> {
        if ids.len() != pages.len() || ids.len() != sizes.len() {
            return Err(RegistryError::LengthMismatch {
                ids: ids.len(),
                pages: pages.len(),
                sizes: sizes.len(),
            });
        }
        if ids.len() as u64 > self.page_cap {
            return Err(RegistryError::PageTooLarge {
                requested: ids.len() as u64,
                cap: self.page_cap,
            });
        }

        // Every id must resolve to an entry before any collection is read.
        let mut entries = Vec::with_capacity(ids.len());
        for &id in ids {
            entries.push(self.entry(id)?);
        }

        // Resolve each request to its effective range, then cap the true
        // aggregate work, not the nominal one.
        let mut ranges = Vec::with_capacity(ids.len());
        let mut total_len: u64 = 0;
        for (entry, (&page, &size)) in entries.iter().zip(pages.iter().zip(sizes)) {
            let balance = entry.handle().read().unwrap().balance_of(caller);
            let range = page_bounds(balance, page, size, self.page_cap)?;
            total_len += range.end - range.start;
            ranges.push(range);
        }
        if total_len > self.page_cap {
            return Err(RegistryError::PageTooLarge {
                requested: total_len,
                cap: self.page_cap,
            });
        }

        let mut listings = Vec::with_capacity(ids.len());
        for (entry, range) in entries.iter().zip(ranges) {
            let collection = entry.handle().read().unwrap();
            let mut records = Vec::with_capacity((range.end - range.start) as usize);
            for index in range {
                // The range was derived from the live balance above, so the
                // enumeration and metadata lookups cannot miss.
                let token_id = collection
                    .token_of_owner_by_index(caller, index)
                    .ok_or(RegistryError::OutOfBounds {
                        page: index,
                        size: 1,
                        total: collection.balance_of(caller),
                    })?;
                records.push(TokenRecord {
                    token_id,
                    uri: collection.token_uri(token_id).unwrap_or_default(),
                    data: collection.token_data(token_id).unwrap_or_default(),
                });
            }
            listings.push(records);
        }

        debug!(caller = %caller, requests = ids.len(), total = total_len, "self tokens served");
        Ok(listings)
    }
}
