//! Customer account queries.

use sqlx::PgPool;

use boutique_core::{Email, ListParams, Page, PageMeta, Phone, UserId};

use crate::models::{NewUser, User};

use super::{RepositoryError, like_pattern};

const USER_COLUMNS: &str = "id, firstname, lastname, email, phone, address, city, zip, country, \
     password_hash, created_at, updated_at";

/// Repository for customer accounts.
pub struct UserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepository<'a> {
    /// Create a new repository backed by the given pool.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List customers, newest first, with optional substring search on
    /// first name, last name, email, and phone.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` on query failure.
    pub async fn list(&self, params: &ListParams) -> Result<Page<User>, RepositoryError> {
        let pattern = params.search().map(like_pattern);

        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM store."user"
            WHERE $1::text IS NULL
               OR firstname ILIKE $1
               OR lastname ILIKE $1
               OR email ILIKE $1
               OR phone ILIKE $1
            "#,
        )
        .bind(&pattern)
        .fetch_one(self.pool)
        .await?;

        let records = sqlx::query_as::<_, User>(&format!(
            r#"
            SELECT {USER_COLUMNS}
            FROM store."user"
            WHERE $1::text IS NULL
               OR firstname ILIKE $1
               OR lastname ILIKE $1
               OR email ILIKE $1
               OR phone ILIKE $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#
        ))
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

    /// Fetch a customer by email, if one exists.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` on query failure.
    pub async fn find_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"SELECT {USER_COLUMNS} FROM store."user" WHERE email = $1"#
        ))
        .bind(email)
        .fetch_optional(self.pool)
        .await?;

        Ok(user)
    }

    /// Whether any account already uses this email.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` on query failure.
    pub async fn email_exists(&self, email: &Email) -> Result<bool, RepositoryError> {
        let exists: bool =
            sqlx::query_scalar(r#"SELECT EXISTS (SELECT 1 FROM store."user" WHERE email = $1)"#)
                .bind(email)
                .fetch_one(self.pool)
                .await?;

        Ok(exists)
    }

    /// Whether any account already uses this phone number.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` on query failure.
    pub async fn phone_exists(&self, phone: &Phone) -> Result<bool, RepositoryError> {
        let exists: bool =
            sqlx::query_scalar(r#"SELECT EXISTS (SELECT 1 FROM store."user" WHERE phone = $1)"#)
                .bind(phone)
                .fetch_one(self.pool)
                .await?;

        Ok(exists)
    }

    /// Insert a new customer account.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` when the email is already taken,
    /// `RepositoryError::Database` on any other failure.
    pub async fn create(&self, new_user: &NewUser) -> Result<User, RepositoryError> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO store."user"
                (firstname, lastname, email, phone, address, city, zip, country, password_hash)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(&new_user.firstname)
        .bind(&new_user.lastname)
        .bind(&new_user.email)
        .bind(&new_user.phone)
        .bind(&new_user.address)
        .bind(&new_user.city)
        .bind(&new_user.zip)
        .bind(&new_user.country)
        .bind(&new_user.password_hash)
        .fetch_one(self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                RepositoryError::Conflict("This email address is already in use".to_owned())
            }
            _ => RepositoryError::Database(e),
        })?;

        Ok(user)
    }

    /// Delete a customer account.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no account has this ID,
    /// `RepositoryError::Database` on query failure.
    pub async fn delete(&self, id: UserId) -> Result<(), RepositoryError> {
        let result = sqlx::query(r#"DELETE FROM store."user" WHERE id = $1"#)
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
