//! Account-related types for the account registry
//!
//! This module defines the stored `Account` record, the `NewAccount` shape
//! handed to the store for insertion, and the `AccountResponse` payload that
//! leaves the service. The secret credential lives only on the first two.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Account identifier
///
/// Assigned by the store on insert, never changed and never reused.
pub type AccountId = u64;

/// A registered account as held by the store
///
/// The `secret` is stored exactly as provided. `Debug` output redacts it so
/// the record can appear in logs.
#[derive(Clone, PartialEq)]
pub struct Account {
    /// Store-assigned identifier
    pub id: AccountId,

    pub given_name: String,

    pub family_name: String,

    /// Unique across all accounts
    pub contact_address: String,

    /// Unique across all accounts
    pub display_name: String,

    /// Opaque credential, stored verbatim
    pub secret: String,

    /// Set once at creation
    pub created_at: DateTime<Utc>,

    /// Advanced on every successful create or update
    pub updated_at: DateTime<Utc>,

    /// User-settable flag; unrelated to deletion
    pub active: bool,
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("id", &self.id)
            .field("given_name", &self.given_name)
            .field("family_name", &self.family_name)
            .field("contact_address", &self.contact_address)
            .field("display_name", &self.display_name)
            .field("secret", &"<redacted>")
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .field("active", &self.active)
            .finish()
    }
}

/// An account that has not been persisted yet
///
/// The store turns this into an [`Account`] by assigning an identifier.
#[derive(Clone, PartialEq)]
pub struct NewAccount {
    pub given_name: String,
    pub family_name: String,
    pub contact_address: String,
    pub display_name: String,
    pub secret: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub active: bool,
}

impl NewAccount {
    /// Attach a store-assigned identifier
    pub fn into_account(self, id: AccountId) -> Account {
        Account {
            id,
            given_name: self.given_name,
            family_name: self.family_name,
            contact_address: self.contact_address,
            display_name: self.display_name,
            secret: self.secret,
            created_at: self.created_at,
            updated_at: self.updated_at,
            active: self.active,
        }
    }
}

impl fmt::Debug for NewAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewAccount")
            .field("given_name", &self.given_name)
            .field("family_name", &self.family_name)
            .field("contact_address", &self.contact_address)
            .field("display_name", &self.display_name)
            .field("secret", &"<redacted>")
            .field("active", &self.active)
            .finish()
    }
}

/// Account as returned to callers
///
/// Mirrors [`Account`] without the secret credential.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    pub id: AccountId,
    pub given_name: String,
    pub family_name: String,
    pub contact_address: String,
    pub display_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub active: bool,
}

impl From<&Account> for AccountResponse {
    fn from(account: &Account) -> Self {
        AccountResponse {
            id: account.id,
            given_name: account.given_name.clone(),
            family_name: account.family_name.clone(),
            contact_address: account.contact_address.clone(),
            display_name: account.display_name.clone(),
            created_at: account.created_at,
            updated_at: account.updated_at,
            active: account.active,
        }
    }
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        AccountResponse {
            id: account.id,
            given_name: account.given_name,
            family_name: account.family_name,
            contact_address: account.contact_address,
            display_name: account.display_name,
            created_at: account.created_at,
            updated_at: account.updated_at,
            active: account.active,
        }
    }
}
