//! Request payloads accepted by the account service
//!
//! Both requests carry the plaintext secret, so their `Debug` output is
//! written by hand to keep it out of logs.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Payload for creating an account
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccountRequest {
    pub given_name: String,
    pub family_name: String,
    pub contact_address: String,
    pub display_name: String,
    pub secret: String,
}

impl fmt::Debug for CreateAccountRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreateAccountRequest")
            .field("given_name", &self.given_name)
            .field("family_name", &self.family_name)
            .field("contact_address", &self.contact_address)
            .field("display_name", &self.display_name)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Payload for a partial account update
///
/// Every field is optional: `None` leaves the stored value untouched, while
/// `Some` (even of an empty string) overwrites it. The display name cannot be
/// changed through an update.
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAccountRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub given_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_address: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

impl UpdateAccountRequest {
    /// True when the request carries no field at all
    pub fn is_empty(&self) -> bool {
        self.given_name.is_none()
            && self.family_name.is_none()
            && self.contact_address.is_none()
            && self.secret.is_none()
            && self.active.is_none()
    }
}

impl fmt::Debug for UpdateAccountRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpdateAccountRequest")
            .field("given_name", &self.given_name)
            .field("family_name", &self.family_name)
            .field("contact_address", &self.contact_address)
            .field("secret", &self.secret.as_ref().map(|_| "<redacted>"))
            .field("active", &self.active)
            .finish()
    }
}
