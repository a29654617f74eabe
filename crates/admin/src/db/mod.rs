//! Database operations for the store `PostgreSQL` database.
//!
//! # Schema: `store`
//!
//! ## Tables
//!
//! - `user` - Customer accounts (admins log in with these credentials)
//! - `product` - Catalog products
//! - `order` - Orders with JSONB checkout snapshots
//! - `newsletter` - Newsletter subscribers
//! - `verification_code` - Pending OTP verifications
//! - `session` - Session storage (tower-sessions `PostgresStore`)
//!
//! # Migrations
//!
//! Migrations live in `crates/admin/migrations/` and are applied at startup
//! via `sqlx::migrate!`.
//!
//! All queries use the runtime sqlx API (`query`/`query_as`); single-row
//! updates rely on `UPDATE ... RETURNING` so status changes are atomic
//! without multi-statement transactions.

pub mod newsletter;
pub mod orders;
pub mod products;
pub mod users;
pub mod verification_codes;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use newsletter::SubscriberRepository;
pub use orders::OrderRepository;
pub use products::ProductRepository;
pub use users::UserRepository;
pub use verification_codes::VerificationRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique email).
    #[error("{0}")]
    Conflict(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Build an `ILIKE` pattern for case-insensitive substring search.
///
/// The LIKE metacharacters `%`, `_`, and `\` in the user's input are escaped
/// so a search for `100%` does not match everything.
#[must_use]
pub fn like_pattern(search: &str) -> String {
    let escaped = search
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

/// Treat the filter value `"all"` (or blank) as "no filter".
#[must_use]
pub fn normalize_filter(value: Option<&str>) -> Option<&str> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case("all"))
}
