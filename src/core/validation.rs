//! Field-level request validation
//!
//! Shape checks run at the boundary, before a request reaches the account
//! service. Every violated constraint is collected so the caller sees all of
//! them at once in a single `BadRequest`. Messages describe the rule, never
//! the rejected secret.
//!
//! Constraints:
//!
//! | field           | rule                                      |
//! |-----------------|-------------------------------------------|
//! | given name      | not blank, at most 50 characters          |
//! | family name     | not blank, at most 50 characters          |
//! | contact address | `local@domain.tld` shape, at most 100     |
//! | display name    | 4 to 50 characters (create only)          |
//! | secret          | at least 8 characters                     |
//!
//! On update, names carry only the length limit. A present empty name is a
//! value and is stored as such.

use crate::types::{AccountError, CreateAccountRequest, UpdateAccountRequest};

pub const MAX_NAME_LEN: usize = 50;
pub const MAX_CONTACT_LEN: usize = 100;
pub const MIN_DISPLAY_NAME_LEN: usize = 4;
pub const MAX_DISPLAY_NAME_LEN: usize = 50;
pub const MIN_SECRET_LEN: usize = 8;

/// Boundary validation for request payloads
pub trait Validate {
    /// Check every field constraint
    ///
    /// # Errors
    ///
    /// `BadRequest` listing all violations, separated by `"; "`.
    fn validate(&self) -> Result<(), AccountError>;
}

impl Validate for CreateAccountRequest {
    fn validate(&self) -> Result<(), AccountError> {
        let mut violations = Vec::new();

        check_name("givenName", &self.given_name, &mut violations);
        check_name("familyName", &self.family_name, &mut violations);
        check_contact_address(&self.contact_address, &mut violations);
        check_display_name(&self.display_name, &mut violations);
        check_secret(&self.secret, &mut violations);

        into_result(violations)
    }
}

impl Validate for UpdateAccountRequest {
    fn validate(&self) -> Result<(), AccountError> {
        let mut violations = Vec::new();

        if let Some(given_name) = &self.given_name {
            check_name_length("givenName", given_name, &mut violations);
        }
        if let Some(family_name) = &self.family_name {
            check_name_length("familyName", family_name, &mut violations);
        }
        if let Some(address) = &self.contact_address {
            check_contact_address(address, &mut violations);
        }
        if let Some(secret) = &self.secret {
            check_secret(secret, &mut violations);
        }

        into_result(violations)
    }
}

fn into_result(violations: Vec<String>) -> Result<(), AccountError> {
    if violations.is_empty() {
        Ok(())
    } else {
        Err(AccountError::bad_request(violations.join("; ")))
    }
}

fn char_len(value: &str) -> usize {
    value.chars().count()
}

fn check_name(field: &str, value: &str, violations: &mut Vec<String>) {
    if value.trim().is_empty() {
        violations.push(format!("{} must not be blank", field));
    } else {
        check_name_length(field, value, violations);
    }
}

fn check_name_length(field: &str, value: &str, violations: &mut Vec<String>) {
    if char_len(value) > MAX_NAME_LEN {
        violations.push(format!(
            "{} must be at most {} characters",
            field, MAX_NAME_LEN
        ));
    }
}

fn check_display_name(value: &str, violations: &mut Vec<String>) {
    let len = char_len(value.trim());
    if !(MIN_DISPLAY_NAME_LEN..=MAX_DISPLAY_NAME_LEN).contains(&len) {
        violations.push(format!(
            "displayName must be between {} and {} characters",
            MIN_DISPLAY_NAME_LEN, MAX_DISPLAY_NAME_LEN
        ));
    }
}

fn check_contact_address(value: &str, violations: &mut Vec<String>) {
    if !is_well_formed_address(value) {
        violations.push("contactAddress must be a valid email address".to_string());
    } else if char_len(value) > MAX_CONTACT_LEN {
        violations.push(format!(
            "contactAddress must be at most {} characters",
            MAX_CONTACT_LEN
        ));
    }
}

fn check_secret(value: &str, violations: &mut Vec<String>) {
    if char_len(value) < MIN_SECRET_LEN {
        violations.push(format!(
            "secret must be at least {} characters",
            MIN_SECRET_LEN
        ));
    }
}

/// `local@domain` with exactly one `@`, no whitespace, and a domain holding
/// at least one inner dot
fn is_well_formed_address(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };

    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !domain.contains("..")
}
