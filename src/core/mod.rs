//! Core business logic module
//!
//! This module contains the account-management components:
//! - `traits` - Store and clock abstractions
//! - `account_service` - Uniqueness rules, partial updates, error translation
//! - `account_store` - Concurrent in-memory store with unique indexes
//! - `validation` - Field-level checks applied before the service runs

pub mod account_service;
pub mod account_store;
pub mod traits;
pub mod validation;

pub use account_service::AccountService;
pub use account_store::InMemoryAccountStore;
pub use traits::{AccountStore, Clock, SystemClock};
pub use validation::Validate;
