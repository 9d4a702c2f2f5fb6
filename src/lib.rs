//! Account Registry Library
//! # Overview
//!
//! This library manages registered accounts: create, read (by id, display
//! name or contact address, or all at once), partial update and delete, with
//! contact address and display name kept unique across all accounts.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Account, requests, errors)
//! - [`core`] - Business logic components:
//!   - [`core::account_service`] - Uniqueness rules, partial updates, error translation
//!   - [`core::account_store`] - Concurrent in-memory store
//!   - [`core::validation`] - Field-level checks run before the service
//! - [`http`] - JSON routes over the service
//! - [`io`] - CSV seed import and snapshot export
//! - [`cli`], [`config`], [`logging`] - Binary wiring
//!
//! # Error Kinds
//!
//! Every service failure carries an [`ErrorKind`]:
//!
//! - **NotFound**: the addressed account does not exist
//! - **Conflict**: the contact address or display name is taken
//! - **BadRequest**: the payload failed validation at the boundary
//! - **Internal**: the store failed for some other reason
//!
//! # Secrets
//!
//! The secret credential is stored exactly as supplied. It is never part of
//! a response, a log line, an error message or a snapshot.

// Module declarations
pub mod cli;
pub mod config;
pub mod core;
pub mod http;
pub mod io;
pub mod logging;
pub mod types;

pub use core::{AccountService, AccountStore, InMemoryAccountStore};
pub use types::{
    Account, AccountError, AccountId, AccountResponse, CreateAccountRequest, ErrorKind,
    StoreError, UpdateAccountRequest,
};
