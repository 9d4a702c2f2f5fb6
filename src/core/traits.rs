//! Core traits for account persistence and time
//!
//! This module defines the seams the account service depends on, so that the
//! backing store and the clock can be substituted (in-memory store in tests
//! and the default binary, a fixed clock in tests).

use crate::types::{Account, AccountId, NewAccount, StoreError};
use chrono::{DateTime, Utc};

/// Persistence contract for accounts
///
/// The store is the sole system of record. Implementations must be safe to
/// share across threads and must enforce the contact-address and
/// display-name uniqueness constraints on `insert` and `update`, rejecting a
/// duplicate with [`StoreError::Conflict`].
pub trait AccountStore: Send + Sync {
    /// Get an account by identifier
    fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, StoreError>;

    /// Get an account by its unique display name
    fn find_by_display_name(&self, display_name: &str) -> Result<Option<Account>, StoreError>;

    /// Get an account by its unique contact address
    fn find_by_contact_address(&self, address: &str) -> Result<Option<Account>, StoreError>;

    /// Check whether an account with this identifier exists
    fn exists_by_id(&self, id: AccountId) -> Result<bool, StoreError>;

    /// Check whether the display name is taken
    fn exists_by_display_name(&self, display_name: &str) -> Result<bool, StoreError>;

    /// Check whether the contact address is taken
    fn exists_by_contact_address(&self, address: &str) -> Result<bool, StoreError>;

    /// Persist a new account and assign its identifier
    fn insert(&self, account: NewAccount) -> Result<Account, StoreError>;

    /// Replace the stored record with the same identifier
    fn update(&self, account: Account) -> Result<Account, StoreError>;

    /// Remove the record with this identifier
    fn delete_by_id(&self, id: AccountId) -> Result<(), StoreError>;

    /// Every stored account, in the store's own order
    fn list_all(&self) -> Result<Vec<Account>, StoreError>;
}

/// Source of timestamps for account records
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
