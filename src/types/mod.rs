//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `account`: the stored record, insertion shape and response payload
//! - `request`: create and partial-update payloads
//! - `error`: store and service error types

pub mod account;
pub mod error;
pub mod request;

pub use account::{Account, AccountId, AccountResponse, NewAccount};
pub use error::{AccountError, ErrorKind, LookupKey, StoreError, UniqueField};
pub use request::{CreateAccountRequest, UpdateAccountRequest};
