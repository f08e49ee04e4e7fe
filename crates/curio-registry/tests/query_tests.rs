// Paginated query surface: bounds, idempotence, completeness, and the
// aggregate work cap of the multi-collection token listing.

use std::sync::Arc;

use curio_registry::{
    Address, CreateParams, EntryId, MemoryCollection, MemoryCollectionTemplate, Registry,
    RegistryConfig, RegistryError, Salt,
};

fn registry() -> Registry {
    let config = RegistryConfig::new(Address::from("deployer"), "ipfs://registry").with_seed([7u8; 32]);
    Registry::new(config, Arc::new(MemoryCollectionTemplate::new("v1")))
}

fn params(label: &str) -> CreateParams {
    CreateParams {
        name: label.to_string(),
        symbol: label.to_uppercase(),
        contract_uri: format!("ipfs://contract/{label}"),
        entry_uri: format!("ipfs://entry/{label}"),
        init_data: label.as_bytes().to_vec(),
    }
}

/// Create `n` entries for `caller`, returning the assigned ids.
fn create_many(registry: &mut Registry, caller: &Address, n: u64) -> Vec<EntryId> {
    (0..n)
        .map(|i| {
            registry
                .create(caller, &Salt::from_label(&format!("{caller}-{i}")), params("c"))
                .unwrap()
                .id
        })
        .collect()
}

/// Mint `count` tokens to `caller` inside the collection behind `id`.
fn mint_tokens(registry: &Registry, id: EntryId, caller: &Address, count: u64) {
    let entry = registry.entry(id).unwrap();
    let mut guard = entry.handle().write().unwrap();
    let collection = guard
        .as_any_mut()
        .downcast_mut::<MemoryCollection>()
        .expect("memory collection");
    for t in 0..count {
        collection.mint(caller, format!("ipfs://token/{id}/{t}"), vec![t as u8]);
    }
}

#[test]
fn three_entry_paging_scenario() {
    let alice = Address::from("alice");
    let mut registry = registry();
    let ids = create_many(&mut registry, &alice, 3);
    assert_eq!(ids, vec![0, 1, 2]);

    let (page0, counts0) = registry.get_self_collections(&alice, 0, 2).unwrap();
    assert_eq!(page0.iter().map(|r| r.id).collect::<Vec<_>>(), vec![0, 1]);
    assert_eq!(counts0, vec![0, 0]);

    // Short last page, never padded.
    let (page1, _) = registry.get_self_collections(&alice, 1, 2).unwrap();
    assert_eq!(page1.iter().map(|r| r.id).collect::<Vec<_>>(), vec![2]);

    // 1*3 = 3 is not < 3.
    let err = registry.get_self_collections(&alice, 1, 3).unwrap_err();
    assert_eq!(err, RegistryError::OutOfBounds { page: 1, size: 3, total: 3 });
}

#[test]
fn pagination_is_idempotent_without_mutation() {
    let alice = Address::from("alice");
    let mut registry = registry();
    create_many(&mut registry, &alice, 7);

    let first = registry.get_self_collections(&alice, 1, 3).unwrap();
    let second = registry.get_self_collections(&alice, 1, 3).unwrap();
    assert_eq!(first, second);
}

#[test]
fn concatenated_pages_reproduce_the_index_in_order() {
    let alice = Address::from("alice");
    let mut registry = registry();
    let ids = create_many(&mut registry, &alice, 10);

    let mut seen = Vec::new();
    for page in 0..4 {
        let (rows, _) = registry.get_self_collections(&alice, page, 3).unwrap();
        if page < 3 {
            assert_eq!(rows.len(), 3);
        } else {
            // 10 is not a multiple of 3: short last page.
            assert_eq!(rows.len(), 1);
        }
        seen.extend(rows.iter().map(|r| r.id));
    }
    assert_eq!(seen, ids);

    let err = registry.get_self_collections(&alice, 4, 3).unwrap_err();
    assert!(matches!(err, RegistryError::OutOfBounds { .. }));
}

#[test]
fn empty_index_allows_only_page_zero() {
    let nobody = Address::from("nobody");
    let registry = registry();

    let (rows, counts) = registry.get_self_collections(&nobody, 0, 1000).unwrap();
    assert!(rows.is_empty());
    assert!(counts.is_empty());

    let err = registry.get_self_collections(&nobody, 1, 1).unwrap_err();
    assert_eq!(err, RegistryError::OutOfBounds { page: 1, size: 1, total: 0 });
}

#[test]
fn page_size_cap_applies_to_self_collections() {
    let alice = Address::from("alice");
    let registry = registry();

    let err = registry.get_self_collections(&alice, 0, 1001).unwrap_err();
    assert_eq!(err, RegistryError::PageTooLarge { requested: 1001, cap: 1000 });
}

#[test]
fn owned_counts_are_read_live() {
    let alice = Address::from("alice");
    let mut registry = registry();
    let ids = create_many(&mut registry, &alice, 2);
    mint_tokens(&registry, ids[0], &alice, 3);

    let (_, counts) = registry.get_self_collections(&alice, 0, 10).unwrap();
    assert_eq!(counts, vec![3, 0]);

    // Not cached: a later mint shows up on the next call.
    mint_tokens(&registry, ids[1], &alice, 2);
    let (_, counts) = registry.get_self_collections(&alice, 0, 10).unwrap();
    assert_eq!(counts, vec![3, 2]);
}

#[test]
fn self_tokens_pages_each_collection_independently() {
    let alice = Address::from("alice");
    let mut registry = registry();
    let ids = create_many(&mut registry, &alice, 2);
    mint_tokens(&registry, ids[0], &alice, 5);
    mint_tokens(&registry, ids[1], &alice, 2);

    let listings = registry
        .get_self_tokens(&alice, &[ids[0], ids[1]], &[1, 0], &[3, 10])
        .unwrap();

    // Collection 0, page 1 of size 3 over 5 tokens: the short tail [3, 4].
    assert_eq!(
        listings[0].iter().map(|t| t.token_id).collect::<Vec<_>>(),
        vec![3, 4]
    );
    assert_eq!(listings[0][0].uri, format!("ipfs://token/{}/3", ids[0]));

    // Collection 1, page 0 of size 10 over 2 tokens.
    assert_eq!(
        listings[1].iter().map(|t| t.token_id).collect::<Vec<_>>(),
        vec![0, 1]
    );
}

#[test]
fn self_tokens_rejects_mismatched_arrays_first() {
    let alice = Address::from("alice");
    let registry = registry();

    let err = registry.get_self_tokens(&alice, &[0, 1], &[0], &[1, 1]).unwrap_err();
    assert_eq!(err, RegistryError::LengthMismatch { ids: 2, pages: 1, sizes: 2 });
}

#[test]
fn self_tokens_rejects_unknown_ids_before_reading_collections() {
    let alice = Address::from("alice");
    let mut registry = registry();
    create_many(&mut registry, &alice, 1);

    let err = registry
        .get_self_tokens(&alice, &[0, 99], &[0, 0], &[1, 1])
        .unwrap_err();
    assert_eq!(err, RegistryError::UnknownEntry { id: 99 });
}

#[test]
fn self_tokens_caps_true_aggregate_work() {
    let alice = Address::from("alice");
    let mut registry = registry();
    let ids = create_many(&mut registry, &alice, 2);
    mint_tokens(&registry, ids[0], &alice, 600);
    mint_tokens(&registry, ids[1], &alice, 600);

    // Each size is within the cap, but the effective lengths sum to 1200.
    let err = registry
        .get_self_tokens(&alice, &[ids[0], ids[1]], &[0, 0], &[600, 600])
        .unwrap_err();
    assert_eq!(err, RegistryError::PageTooLarge { requested: 1200, cap: 1000 });
}

#[test]
fn self_tokens_cap_uses_effective_lengths_not_nominal_sizes() {
    let alice = Address::from("alice");
    let mut registry = registry();
    let ids = create_many(&mut registry, &alice, 2);
    mint_tokens(&registry, ids[0], &alice, 600);
    mint_tokens(&registry, ids[1], &alice, 300);

    // Nominal 1000 + 1000 would be rejected, but the short-last-page rule
    // resolves the true work to 600 + 300.
    let listings = registry
        .get_self_tokens(&alice, &[ids[0], ids[1]], &[0, 0], &[1000, 1000])
        .unwrap();
    assert_eq!(listings[0].len(), 600);
    assert_eq!(listings[1].len(), 300);
}

#[test]
fn self_tokens_rejects_oversized_request_batches() {
    let alice = Address::from("alice");
    let registry = registry();

    let ids = vec![0u64; 1001];
    let pages = vec![0u64; 1001];
    let sizes = vec![1u64; 1001];
    let err = registry.get_self_tokens(&alice, &ids, &pages, &sizes).unwrap_err();
    assert_eq!(err, RegistryError::PageTooLarge { requested: 1001, cap: 1000 });
}

#[test]
fn self_tokens_on_empty_balance_yields_empty_listing() {
    let alice = Address::from("alice");
    let mut registry = registry();
    let ids = create_many(&mut registry, &alice, 1);

    let listings = registry.get_self_tokens(&alice, &ids, &[0], &[50]).unwrap();
    assert_eq!(listings, vec![Vec::new()]);

    let err = registry.get_self_tokens(&alice, &ids, &[1], &[1]).unwrap_err();
    assert!(matches!(err, RegistryError::OutOfBounds { .. }));
}
