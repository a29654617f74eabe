//! Pending OTP verification queries.

use sqlx::PgPool;

use boutique_core::{Email, Phone};

use crate::models::VerificationCode;

use super::RepositoryError;

/// How long a sent code is honored locally.
pub const CODE_TTL_MINUTES: i32 = 30;

/// Repository for pending phone verifications.
pub struct VerificationRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> VerificationRepository<'a> {
    /// Create a new repository backed by the given pool.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Record that a code was sent for this signup, replacing any earlier
    /// pending verification for the same email. Expired rows are purged on
    /// the way in.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` on query failure.
    pub async fn create(
        &self,
        email: &Email,
        phone: &Phone,
    ) -> Result<VerificationCode, RepositoryError> {
        sqlx::query("DELETE FROM store.verification_code WHERE expires_at < now() OR email = $1")
            .bind(email)
            .execute(self.pool)
            .await?;

        let code = sqlx::query_as::<_, VerificationCode>(
            r"
            INSERT INTO store.verification_code (email, phone, expires_at)
            VALUES ($1, $2, now() + make_interval(mins => $3))
            RETURNING id, email, phone, expires_at, created_at
            ",
        )
        .bind(email)
        .bind(phone)
        .bind(CODE_TTL_MINUTES)
        .fetch_one(self.pool)
        .await?;

        Ok(code)
    }

    /// Fetch the live pending verification for this email, if any.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` on query failure.
    pub async fn find_pending(
        &self,
        email: &Email,
    ) -> Result<Option<VerificationCode>, RepositoryError> {
        let code = sqlx::query_as::<_, VerificationCode>(
            r"
            SELECT id, email, phone, expires_at, created_at
            FROM store.verification_code
            WHERE email = $1 AND expires_at >= now()
            ",
        )
        .bind(email)
        .fetch_optional(self.pool)
        .await?;

        Ok(code)
    }

    /// Drop the pending verification for this email after a successful
    /// verify.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` on query failure.
    pub async fn consume(&self, email: &Email) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM store.verification_code WHERE email = $1")
            .bind(email)
            .execute(self.pool)
            .await?;

        Ok(())
    }
}
