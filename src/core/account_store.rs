//! Thread-safe in-memory account store
//!
//! This module provides `InMemoryAccountStore`, an [`AccountStore`] backed by
//! concurrent maps so the account service can be shared across request
//! handlers without a global lock.
//!
//! # Design
//!
//! Records live in a `DashMap` keyed by identifier. Two more `DashMap`s act as
//! unique indexes from contact address and display name to the owning
//! identifier. A write reserves its index keys through the entry API before
//! the record is written, so two concurrent writers racing for the same key
//! cannot both win: the loser receives [`StoreError::Conflict`] and any key it
//! had already reserved is released again. An update holds the record's guard
//! while it reserves, swaps and releases, so concurrent updates of one account
//! never leave a stale key behind.
//!
//! Keys are matched exactly (case-sensitive).
//!
//! # Identifiers
//!
//! Identifiers come from an atomic counter starting at 1. A counter value is
//! consumed even when the insert is rejected, and deleted identifiers are
//! never handed out again.

use crate::core::traits::AccountStore;
use crate::types::{Account, AccountId, NewAccount, StoreError, UniqueField};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// Concurrent in-memory account store
///
/// All methods take `&self` and may be called from many threads at once.
/// Operations on different accounts do not block each other.
#[derive(Debug)]
pub struct InMemoryAccountStore {
    /// Records by identifier
    accounts: DashMap<AccountId, Account>,

    /// Unique index: contact address -> owner
    contact_index: DashMap<String, AccountId>,

    /// Unique index: display name -> owner
    name_index: DashMap<String, AccountId>,

    /// Next identifier to hand out
    next_id: AtomicU64,
}

impl InMemoryAccountStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            accounts: DashMap::new(),
            contact_index: DashMap::new(),
            name_index: DashMap::new(),
            next_id: AtomicU64::new(1),
        }
    }

    /// Number of stored accounts
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// True when no account is stored
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    fn index(&self, field: UniqueField) -> &DashMap<String, AccountId> {
        match field {
            UniqueField::ContactAddress => &self.contact_index,
            UniqueField::DisplayName => &self.name_index,
        }
    }

    /// Claim `key` in the index of `field` for `owner`
    ///
    /// Returns `Ok(true)` when the key was newly reserved and `Ok(false)` when
    /// `owner` already held it.
    fn reserve(&self, field: UniqueField, key: &str, owner: AccountId) -> Result<bool, StoreError> {
        match self.index(field).entry(key.to_string()) {
            Entry::Occupied(entry) if *entry.get() == owner => Ok(false),
            Entry::Occupied(_) => Err(StoreError::conflict(field, key)),
            Entry::Vacant(entry) => {
                entry.insert(owner);
                Ok(true)
            }
        }
    }

    /// Drop `key` from the index of `field` if `owner` still holds it
    fn release(&self, field: UniqueField, key: &str, owner: AccountId) {
        self.index(field)
            .remove_if(key, |_, holder| *holder == owner);
    }

    /// Resolve an index key to a full record
    fn find_indexed(&self, field: UniqueField, key: &str) -> Option<Account> {
        // Copy the id out so the index guard is released before touching records
        let id = *self.index(field).get(key)?.value();
        self.accounts.get(&id).map(|entry| entry.value().clone())
    }
}

impl Default for InMemoryAccountStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AccountStore for InMemoryAccountStore {
    fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, StoreError> {
        Ok(self.accounts.get(&id).map(|entry| entry.value().clone()))
    }

    fn find_by_display_name(&self, display_name: &str) -> Result<Option<Account>, StoreError> {
        Ok(self.find_indexed(UniqueField::DisplayName, display_name))
    }

    fn find_by_contact_address(&self, address: &str) -> Result<Option<Account>, StoreError> {
        Ok(self.find_indexed(UniqueField::ContactAddress, address))
    }

    fn exists_by_id(&self, id: AccountId) -> Result<bool, StoreError> {
        Ok(self.accounts.contains_key(&id))
    }

    fn exists_by_display_name(&self, display_name: &str) -> Result<bool, StoreError> {
        Ok(self
            .find_indexed(UniqueField::DisplayName, display_name)
            .is_some())
    }

    fn exists_by_contact_address(&self, address: &str) -> Result<bool, StoreError> {
        Ok(self
            .find_indexed(UniqueField::ContactAddress, address)
            .is_some())
    }

    /// Insert a new account
    ///
    /// Reserves the contact address, then the display name. If the second
    /// reservation fails the first one is rolled back before returning the
    /// conflict.
    fn insert(&self, account: NewAccount) -> Result<Account, StoreError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);

        self.reserve(UniqueField::ContactAddress, &account.contact_address, id)?;
        if let Err(e) = self.reserve(UniqueField::DisplayName, &account.display_name, id) {
            self.release(UniqueField::ContactAddress, &account.contact_address, id);
            return Err(e);
        }

        let account = account.into_account(id);
        self.accounts.insert(id, account.clone());
        Ok(account)
    }

    /// Replace an existing account
    ///
    /// The record's map guard is held for the whole write, so updates to the
    /// same account are serialized. Changed unique keys are reserved under
    /// that guard, and the keys released afterwards are taken from the record
    /// actually replaced.
    fn update(&self, account: Account) -> Result<Account, StoreError> {
        let id = account.id;
        let mut entry = self
            .accounts
            .get_mut(&id)
            .ok_or(StoreError::NotFound { id })?;

        // Lock order is record, then index; nothing takes them the other way
        let contact_reserved =
            self.reserve(UniqueField::ContactAddress, &account.contact_address, id)?;
        if let Err(e) = self.reserve(UniqueField::DisplayName, &account.display_name, id) {
            if contact_reserved {
                self.release(UniqueField::ContactAddress, &account.contact_address, id);
            }
            return Err(e);
        }

        let previous = std::mem::replace(entry.value_mut(), account.clone());

        if previous.contact_address != account.contact_address {
            self.release(UniqueField::ContactAddress, &previous.contact_address, id);
        }
        if previous.display_name != account.display_name {
            self.release(UniqueField::DisplayName, &previous.display_name, id);
        }
        drop(entry);

        Ok(account)
    }

    fn delete_by_id(&self, id: AccountId) -> Result<(), StoreError> {
        let (_, removed) = self
            .accounts
            .remove(&id)
            .ok_or(StoreError::NotFound { id })?;

        self.release(UniqueField::ContactAddress, &removed.contact_address, id);
        self.release(UniqueField::DisplayName, &removed.display_name, id);
        Ok(())
    }

    /// All accounts ordered by identifier, i.e. creation order
    fn list_all(&self) -> Result<Vec<Account>, StoreError> {
        let mut accounts: Vec<Account> = self
            .accounts
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        accounts.sort_by_key(|account| account.id);
        Ok(accounts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rstest::{fixture, rstest};

    fn new_account(contact: &str, name: &str) -> NewAccount {
        let now = Utc::now();
        NewAccount {
            given_name: "Test".to_string(),
            family_name: "User".to_string(),
            contact_address: contact.to_string(),
            display_name: name.to_string(),
            secret: "password123".to_string(),
            created_at: now,
            updated_at: now,
            active: true,
        }
    }

    #[fixture]
    fn store() -> InMemoryAccountStore {
        InMemoryAccountStore::new()
    }

    #[rstest]
    fn test_insert_assigns_sequential_ids(store: InMemoryAccountStore) {
        let first = store.insert(new_account("a@example.com", "alice")).unwrap();
        let second = store.insert(new_account("b@example.com", "bobby")).unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(store.len(), 2);
    }

    #[rstest]
    fn test_find_by_each_key(store: InMemoryAccountStore) {
        let saved = store.insert(new_account("test@example.com", "testuser")).unwrap();

        assert_eq!(store.find_by_id(saved.id).unwrap(), Some(saved.clone()));
        assert_eq!(
            store.find_by_display_name("testuser").unwrap(),
            Some(saved.clone())
        );
        assert_eq!(
            store.find_by_contact_address("test@example.com").unwrap(),
            Some(saved)
        );
        assert!(store.exists_by_display_name("testuser").unwrap());
        assert!(store.exists_by_contact_address("test@example.com").unwrap());
        assert!(!store.exists_by_contact_address("TEST@example.com").unwrap());
    }

    #[rstest]
    #[case::same_contact("a@example.com", "other", UniqueField::ContactAddress)]
    #[case::same_display_name("other@example.com", "alice", UniqueField::DisplayName)]
    fn test_insert_rejects_duplicates(
        store: InMemoryAccountStore,
        #[case] contact: &str,
        #[case] name: &str,
        #[case] field: UniqueField,
    ) {
        store.insert(new_account("a@example.com", "alice")).unwrap();

        let err = store.insert(new_account(contact, name)).unwrap_err();

        assert!(matches!(err, StoreError::Conflict { field: f, .. } if f == field));
        assert_eq!(store.len(), 1);
    }

    #[rstest]
    fn test_rejected_insert_releases_contact_reservation(store: InMemoryAccountStore) {
        store.insert(new_account("a@example.com", "alice")).unwrap();

        // Contact is free but the name is taken: the contact must not stay reserved
        store
            .insert(new_account("free@example.com", "alice"))
            .unwrap_err();

        assert!(!store.exists_by_contact_address("free@example.com").unwrap());
        assert!(store
            .insert(new_account("free@example.com", "freeuser"))
            .is_ok());
    }

    #[rstest]
    fn test_update_moves_contact_index(store: InMemoryAccountStore) {
        let mut account = store.insert(new_account("old@example.com", "mover")).unwrap();
        account.contact_address = "new@example.com".to_string();

        store.update(account.clone()).unwrap();

        assert!(store.find_by_contact_address("old@example.com").unwrap().is_none());
        assert_eq!(
            store.find_by_contact_address("new@example.com").unwrap(),
            Some(account)
        );
        // The old address is free again
        assert!(store.insert(new_account("old@example.com", "taker")).is_ok());
    }

    #[rstest]
    fn test_update_with_unchanged_keys_succeeds(store: InMemoryAccountStore) {
        let mut account = store.insert(new_account("same@example.com", "same")).unwrap();
        account.given_name = "Changed".to_string();

        let updated = store.update(account).unwrap();

        assert_eq!(updated.given_name, "Changed");
        assert!(store.exists_by_contact_address("same@example.com").unwrap());
    }

    #[rstest]
    fn test_update_rejects_taken_contact(store: InMemoryAccountStore) {
        store.insert(new_account("taken@example.com", "first")).unwrap();
        let mut second = store.insert(new_account("second@example.com", "second")).unwrap();
        second.contact_address = "taken@example.com".to_string();

        let err = store.update(second.clone()).unwrap_err();

        assert!(matches!(
            err,
            StoreError::Conflict {
                field: UniqueField::ContactAddress,
                ..
            }
        ));
        let stored = store.find_by_id(second.id).unwrap().unwrap();
        assert_eq!(stored.contact_address, "second@example.com");
    }

    #[rstest]
    fn test_update_missing_record(store: InMemoryAccountStore) {
        let ghost = new_account("ghost@example.com", "ghost").into_account(99);

        let err = store.update(ghost).unwrap_err();

        assert_eq!(err, StoreError::NotFound { id: 99 });
        assert!(!store.exists_by_contact_address("ghost@example.com").unwrap());
    }

    #[rstest]
    fn test_delete_releases_keys_and_never_reuses_id(store: InMemoryAccountStore) {
        let first = store.insert(new_account("a@example.com", "alice")).unwrap();

        store.delete_by_id(first.id).unwrap();

        assert!(!store.exists_by_id(first.id).unwrap());
        assert!(store.find_by_display_name("alice").unwrap().is_none());
        let again = store.insert(new_account("a@example.com", "alice")).unwrap();
        assert_ne!(again.id, first.id);
    }

    #[rstest]
    fn test_delete_missing_record(store: InMemoryAccountStore) {
        assert_eq!(
            store.delete_by_id(7).unwrap_err(),
            StoreError::NotFound { id: 7 }
        );
    }

    #[rstest]
    fn test_list_all_in_id_order(store: InMemoryAccountStore) {
        for i in 0..5 {
            store
                .insert(new_account(&format!("user{}@example.com", i), &format!("user{}", i)))
                .unwrap();
        }

        let ids: Vec<AccountId> = store.list_all().unwrap().iter().map(|a| a.id).collect();

        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    // ========================================================================
    // Concurrency Tests
    // ========================================================================

    #[test]
    fn test_concurrent_inserts_same_contact_single_winner() {
        use std::sync::Arc;
        use std::thread;

        let store = Arc::new(InMemoryAccountStore::new());
        let mut handles = vec![];

        // 16 threads race for one contact address with distinct display names
        for i in 0..16 {
            let store_clone = Arc::clone(&store);
            handles.push(thread::spawn(move || {
                store_clone
                    .insert(new_account("race@example.com", &format!("racer{}", i)))
                    .is_ok()
            }));
        }

        let winners = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|won| *won)
            .count();

        assert_eq!(winners, 1);
        assert_eq!(store.len(), 1);
        // Losers must not leave display-name reservations behind
        let winner = store.find_by_contact_address("race@example.com").unwrap().unwrap();
        for i in 0..16 {
            let name = format!("racer{}", i);
            assert_eq!(
                store.exists_by_display_name(&name).unwrap(),
                name == winner.display_name
            );
        }
    }

    #[test]
    fn test_concurrent_updates_of_one_account_keep_index_consistent() {
        use std::sync::{Arc, Barrier};
        use std::thread;

        for round in 0..500 {
            let store = Arc::new(InMemoryAccountStore::new());
            let original = store.insert(new_account("orig@x.io", "mover")).unwrap();
            let barrier = Arc::new(Barrier::new(2));

            let handles: Vec<_> = ["x@x.io", "y@x.io"]
                .into_iter()
                .map(|address| {
                    let store = Arc::clone(&store);
                    let barrier = Arc::clone(&barrier);
                    let mut account = original.clone();
                    account.contact_address = address.to_string();
                    thread::spawn(move || {
                        barrier.wait();
                        store.update(account).unwrap();
                    })
                })
                .collect();
            for handle in handles {
                handle.join().unwrap();
            }

            let stored = store.find_by_id(original.id).unwrap().unwrap();
            assert_eq!(
                store.find_by_contact_address(&stored.contact_address).unwrap(),
                Some(stored.clone()),
                "round {}",
                round
            );
            for address in ["orig@x.io", "x@x.io", "y@x.io"] {
                if address != stored.contact_address {
                    assert!(
                        store.find_by_contact_address(address).unwrap().is_none(),
                        "round {}: {} still indexed",
                        round,
                        address
                    );
                    assert!(store.insert(new_account(address, &format!("taker{}", address))).is_ok());
                }
            }
        }
    }

    #[test]
    fn test_concurrent_inserts_distinct_accounts() {
        use std::sync::Arc;
        use std::thread;

        let store = Arc::new(InMemoryAccountStore::new());
        let mut handles = vec![];

        for i in 0..10 {
            let store_clone = Arc::clone(&store);
            handles.push(thread::spawn(move || {
                store_clone
                    .insert(new_account(&format!("u{}@example.com", i), &format!("user{}", i)))
                    .unwrap()
                    .id
            }));
        }

        let mut ids: Vec<AccountId> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        ids.sort_unstable();
        ids.dedup();

        assert_eq!(ids.len(), 10);
        assert_eq!(store.list_all().unwrap().len(), 10);
    }
}
