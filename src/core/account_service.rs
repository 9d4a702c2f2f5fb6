//! Account service
//!
//! This module provides `AccountService`, the component that owns the
//! account-management rules:
//!
//! - contact address and display name are unique across all accounts
//! - updates are partial: only fields present in the request are written
//! - an account never conflicts with itself when its contact address is
//!   "changed" to the value it already has
//! - store outcomes are translated into [`AccountError`] kinds
//!
//! The service keeps no state of its own. Every operation loads from and
//! writes to the injected [`AccountStore`], which is the only system of
//! record. Its uniqueness pre-checks are not atomic with the following write;
//! the store rejects a duplicate that slips through a race, and that
//! rejection comes back to the caller as a `Conflict` without any retry.

use crate::core::traits::{AccountStore, Clock, SystemClock};
use crate::types::{
    Account, AccountError, AccountId, AccountResponse, CreateAccountRequest, LookupKey,
    NewAccount, UniqueField, UpdateAccountRequest,
};
use std::sync::Arc;
use tracing::{debug, warn};

/// Account-management service
///
/// Cheap to clone; clones share the same store and clock.
pub struct AccountService<S> {
    store: Arc<S>,
    clock: Arc<dyn Clock>,
}

impl<S> Clone for AccountService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<S: AccountStore> AccountService<S> {
    /// Create a service over `store` using wall-clock time
    pub fn new(store: Arc<S>) -> Self {
        Self::with_clock(store, Arc::new(SystemClock))
    }

    /// Create a service with an explicit time source
    pub fn with_clock(store: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Register a new account
    ///
    /// # Errors
    ///
    /// - `Conflict` if the contact address or display name is already in use
    ///   (checked in that order)
    /// - `Store` if the store fails for any other reason
    pub fn create(&self, request: CreateAccountRequest) -> Result<AccountResponse, AccountError> {
        if self
            .store
            .exists_by_contact_address(&request.contact_address)?
        {
            warn!(contact_address = %request.contact_address, "create rejected: contact address in use");
            return Err(AccountError::conflict(
                UniqueField::ContactAddress,
                &request.contact_address,
            ));
        }

        if self.store.exists_by_display_name(&request.display_name)? {
            warn!(display_name = %request.display_name, "create rejected: display name in use");
            return Err(AccountError::conflict(
                UniqueField::DisplayName,
                &request.display_name,
            ));
        }

        let now = self.clock.now();
        // The secret is kept exactly as supplied
        let account = NewAccount {
            given_name: request.given_name,
            family_name: request.family_name,
            contact_address: request.contact_address,
            display_name: request.display_name,
            secret: request.secret,
            created_at: now,
            updated_at: now,
            active: true,
        };

        let saved = self.store.insert(account)?;
        debug!(account_id = saved.id, display_name = %saved.display_name, "account created");
        Ok(saved.into())
    }

    /// Look up an account by identifier
    pub fn get_by_id(&self, id: AccountId) -> Result<AccountResponse, AccountError> {
        self.store
            .find_by_id(id)?
            .map(AccountResponse::from)
            .ok_or_else(|| AccountError::not_found(LookupKey::Id(id)))
    }

    /// Look up an account by display name
    pub fn get_by_display_name(&self, display_name: &str) -> Result<AccountResponse, AccountError> {
        self.store
            .find_by_display_name(display_name)?
            .map(AccountResponse::from)
            .ok_or_else(|| AccountError::not_found(LookupKey::DisplayName(display_name.to_string())))
    }

    /// Look up an account by contact address
    pub fn get_by_contact_address(&self, address: &str) -> Result<AccountResponse, AccountError> {
        self.store
            .find_by_contact_address(address)?
            .map(AccountResponse::from)
            .ok_or_else(|| AccountError::not_found(LookupKey::ContactAddress(address.to_string())))
    }

    /// Every account, in the order the store returns them
    pub fn list_all(&self) -> Result<Vec<AccountResponse>, AccountError> {
        Ok(self
            .store
            .list_all()?
            .into_iter()
            .map(AccountResponse::from)
            .collect())
    }

    /// Apply a partial update
    ///
    /// Fields absent from `request` keep their stored value. The last-modified
    /// timestamp is always advanced, and never moves backwards even if the
    /// clock does.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no account has this identifier; the store is untouched
    /// - `Conflict` if the new contact address belongs to a different account;
    ///   the stored address is untouched
    /// - `Store` if the store fails for any other reason
    pub fn update(
        &self,
        id: AccountId,
        request: UpdateAccountRequest,
    ) -> Result<AccountResponse, AccountError> {
        let mut account = self
            .store
            .find_by_id(id)?
            .ok_or_else(|| AccountError::not_found(LookupKey::Id(id)))?;

        if request.is_empty() {
            debug!(account_id = id, "update carries no fields; only last-modified changes");
        }

        if let Some(address) = request.contact_address {
            if address != account.contact_address {
                self.ensure_contact_available(id, &address)?;
                account.contact_address = address;
            }
        }

        if let Some(given_name) = request.given_name {
            account.given_name = given_name;
        }
        if let Some(family_name) = request.family_name {
            account.family_name = family_name;
        }
        if let Some(secret) = request.secret {
            account.secret = secret;
        }
        if let Some(active) = request.active {
            account.active = active;
        }

        account.updated_at = self.clock.now().max(account.updated_at);

        let saved = self.store.update(account)?;
        debug!(account_id = saved.id, "account updated");
        Ok(saved.into())
    }

    /// Remove an account
    ///
    /// # Errors
    ///
    /// - `NotFound` if no account has this identifier; the store is untouched
    /// - `Store` if the store fails for any other reason
    pub fn delete(&self, id: AccountId) -> Result<(), AccountError> {
        if !self.store.exists_by_id(id)? {
            return Err(AccountError::not_found(LookupKey::Id(id)));
        }

        self.store.delete_by_id(id)?;
        debug!(account_id = id, "account deleted");
        Ok(())
    }

    /// Fail with `Conflict` if `address` belongs to an account other than `id`
    fn ensure_contact_available(&self, id: AccountId, address: &str) -> Result<(), AccountError> {
        match self.store.find_by_contact_address(address)? {
            Some(Account { id: holder, .. }) if holder != id => {
                warn!(account_id = id, contact_address = %address, "update rejected: contact address in use");
                Err(AccountError::conflict(UniqueField::ContactAddress, address))
            }
            _ => Ok(()),
        }
    }
}
