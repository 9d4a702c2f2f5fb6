//! Error types for the account registry
//!
//! Two layers of errors are defined here:
//!
//! - [`StoreError`]: failures reported by an [`AccountStore`](crate::core::AccountStore)
//!   implementation. A uniqueness rejection at write time is distinguishable
//!   from every other backend failure.
//! - [`AccountError`]: the failures returned by the account service. Each one
//!   carries a machine-checkable [`ErrorKind`] so the transport layer can pick
//!   a status signal without matching on messages.
//!
//! Messages name the offending key (id, contact address or display name) and
//! never include the secret credential.

use super::account::AccountId;
use std::fmt;
use thiserror::Error;

/// The two attributes that must be unique across all accounts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueField {
    ContactAddress,
    DisplayName,
}

impl fmt::Display for UniqueField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UniqueField::ContactAddress => write!(f, "contact address"),
            UniqueField::DisplayName => write!(f, "display name"),
        }
    }
}

/// The key a lookup or mutation was addressed by
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupKey {
    Id(AccountId),
    DisplayName(String),
    ContactAddress(String),
}

impl fmt::Display for LookupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupKey::Id(id) => write!(f, "id {}", id),
            LookupKey::DisplayName(name) => write!(f, "display name {}", name),
            LookupKey::ContactAddress(address) => write!(f, "contact address {}", address),
        }
    }
}

/// Failure reported by an account store
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    /// A write would break a uniqueness constraint
    ///
    /// Raised by the store itself, independently of any pre-check done by
    /// the service, so a lost race still cannot produce duplicates.
    #[error("{field} already in use: {value}")]
    Conflict {
        /// The constrained attribute
        field: UniqueField,
        /// The value that is already taken
        value: String,
    },

    /// An update or delete addressed a record that does not exist
    #[error("no record with id {id}")]
    NotFound {
        /// Identifier that was not found
        id: AccountId,
    },

    /// Any other backend failure (connectivity, corruption, ...)
    #[error("store unavailable: {message}")]
    Unavailable {
        /// Description of the failure
        message: String,
    },
}

/// Classification of an [`AccountError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Lookup or mutation target is absent
    NotFound,
    /// Uniqueness violation on contact address or display name
    Conflict,
    /// Payload failed boundary validation
    BadRequest,
    /// Unclassified store failure
    Internal,
}

/// Failure returned by the account service
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AccountError {
    /// No account matches the key
    #[error("no account for {key}")]
    NotFound {
        /// The key the caller asked for
        key: LookupKey,
    },

    /// The contact address or display name is held by another account
    #[error("{field} already in use: {value}")]
    Conflict {
        /// The constrained attribute
        field: UniqueField,
        /// The value that is already taken
        value: String,
    },

    /// The request failed field-level validation
    ///
    /// Raised at the boundary before the service runs.
    #[error("invalid request: {message}")]
    BadRequest {
        /// Every violated constraint, joined
        message: String,
    },

    /// A store failure the service does not classify
    #[error(transparent)]
    Store(StoreError),
}

impl AccountError {
    /// Machine-checkable kind of this failure
    pub fn kind(&self) -> ErrorKind {
        match self {
            AccountError::NotFound { .. } => ErrorKind::NotFound,
            AccountError::Conflict { .. } => ErrorKind::Conflict,
            AccountError::BadRequest { .. } => ErrorKind::BadRequest,
            AccountError::Store(_) => ErrorKind::Internal,
        }
    }

    /// Create a NotFound error
    pub fn not_found(key: LookupKey) -> Self {
        AccountError::NotFound { key }
    }

    /// Create a Conflict error
    pub fn conflict(field: UniqueField, value: &str) -> Self {
        AccountError::Conflict {
            field,
            value: value.to_string(),
        }
    }

    /// Create a BadRequest error
    pub fn bad_request(message: impl Into<String>) -> Self {
        AccountError::BadRequest {
            message: message.into(),
        }
    }
}

// Write-time uniqueness rejections and vanished records keep their meaning;
// everything else is passed through unchanged as an internal failure.
impl From<StoreError> for AccountError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::Conflict { field, value } => AccountError::Conflict { field, value },
            StoreError::NotFound { id } => AccountError::not_found(LookupKey::Id(id)),
            other => AccountError::Store(other),
        }
    }
}

impl StoreError {
    /// Create a Conflict error
    pub fn conflict(field: UniqueField, value: &str) -> Self {
        StoreError::Conflict {
            field,
            value: value.to_string(),
        }
    }

    /// Create an Unavailable error
    pub fn unavailable(message: impl Into<String>) -> Self {
        StoreError::Unavailable {
            message: message.into(),
        }
    }
}
