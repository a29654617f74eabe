//! Customer account domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use boutique_core::{Email, Phone, UserId};

/// A customer account.
///
/// `password_hash` is never serialized; list and detail responses match the
/// dashboard contract which excludes the password outright.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// First name.
    pub firstname: String,
    /// Last name.
    pub lastname: String,
    /// Email address (unique).
    pub email: Email,
    /// Phone number.
    pub phone: Phone,
    /// Street address.
    pub address: String,
    /// City.
    pub city: String,
    /// Postal code.
    pub zip: Option<String>,
    /// Country.
    pub country: Option<String>,
    /// Bcrypt hash of the password. Never exposed.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// When the account was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Field set for creating a user after a verified registration.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// First name.
    pub firstname: String,
    /// Last name.
    pub lastname: String,
    /// Email address.
    pub email: Email,
    /// Phone number.
    pub phone: Phone,
    /// Street address.
    pub address: String,
    /// City.
    pub city: String,
    /// Postal code.
    pub zip: Option<String>,
    /// Country.
    pub country: Option<String>,
    /// Bcrypt hash of the password (hashed before this struct is built).
    pub password_hash: String,
}
