//! Newsletter subscriber queries.

use sqlx::PgPool;

use boutique_core::{ListParams, Page, PageMeta, SubscriberId};

use crate::models::Subscriber;

use super::{RepositoryError, like_pattern};

/// Repository for newsletter subscribers.
pub struct SubscriberRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SubscriberRepository<'a> {
    /// Create a new repository backed by the given pool.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List subscribers, newest first, with optional substring search on
    /// the email address.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` on query failure.
    pub async fn list(&self, params: &ListParams) -> Result<Page<Subscriber>, RepositoryError> {
        let pattern = params.search().map(like_pattern);

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM store.newsletter WHERE $1::text IS NULL OR email ILIKE $1",
        )
        .bind(&pattern)
        .fetch_one(self.pool)
        .await?;

        let records = sqlx::query_as::<_, Subscriber>(
            r"
            SELECT id, email, created_at
            FROM store.newsletter
            WHERE $1::text IS NULL OR email ILIKE $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            ",
        )
        .bind(&pattern)
        .bind(params.limit())
        .bind(params.offset())
        .fetch_all(self.pool)
        .await?;

        Ok(Page {
            records,
            meta: PageMeta::new(total, params),
        })
    }

    /// Remove a subscriber.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no subscriber has this ID,
    /// `RepositoryError::Database` on query failure.
    pub async fn delete(&self, id: SubscriberId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM store.newsletter WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
