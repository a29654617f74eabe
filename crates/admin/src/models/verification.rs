//! Pending phone-verification records.

use chrono::{DateTime, Utc};

use boutique_core::{Email, Phone, VerificationId};

/// A pending OTP verification created when a signup code is sent.
///
/// The code itself lives with the external provider; this row only tracks
/// that a code was requested and when it stops being honored locally. Rows
/// are deleted on successful verification and expired rows are purged
/// opportunistically.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct VerificationCode {
    /// Unique row ID.
    pub id: VerificationId,
    /// Email the signup was requested for.
    pub email: Email,
    /// Phone number the code was sent to.
    pub phone: Phone,
    /// When this verification stops being honored.
    pub expires_at: DateTime<Utc>,
    /// When the code was requested.
    pub created_at: DateTime<Utc>,
}
