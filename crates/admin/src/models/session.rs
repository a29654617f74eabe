//! Session-related types for admin authentication.
//!
//! Types stored in the session for authentication state.

use serde::{Deserialize, Serialize};

use boutique_core::{Email, UserId};

/// Session-stored identity.
///
/// Minimal data stored in the session to identify the logged-in admin.
/// Every authenticated session has full administrative rights; there is no
/// role distinction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    /// User's database ID.
    pub id: UserId,
    /// User's email address.
    pub email: Email,
    /// User's first name.
    pub firstname: String,
    /// User's last name.
    pub lastname: String,
}

/// Session keys for authentication data.
pub mod keys {
    /// Key for storing the current logged-in user.
    pub const CURRENT_USER: &str = "current_user";
}
