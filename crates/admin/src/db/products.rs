//! Catalog product queries.

use sqlx::PgPool;

use boutique_core::{ListParams, Page, PageMeta, ProductId};

use crate::models::{Product, ProductInput};

use super::{RepositoryError, like_pattern};

const PRODUCT_COLUMNS: &str = "id, title, description, price, category, sub_category, discount, \
     image_url, benefits, stock, brand, sku, etiquette, usage, created_at, updated_at";

/// Repository for catalog products.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new repository backed by the given pool.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List products, most recently updated first, with optional substring
    /// search on title, description, brand, and SKU plus an optional exact
    /// category filter.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` on query failure.
    pub async fn list(
        &self,
        params: &ListParams,
        category: Option<&str>,
    ) -> Result<Page<Product>, RepositoryError> {
        let pattern = params.search().map(like_pattern);

        let total: i64 = sqlx::query_scalar(
            r"
            SELECT COUNT(*)
            FROM store.product
            WHERE ($1::text IS NULL OR title ILIKE $1 OR description ILIKE $1 OR brand ILIKE $1 OR sku ILIKE $1)
              AND ($2::text IS NULL OR category = $2)
            ",
        )
        .bind(&pattern)
        .bind(category)
        .fetch_one(self.pool)
        .await?;

        let records = sqlx::query_as::<_, Product>(&format!(
            r"
            SELECT {PRODUCT_COLUMNS}
            FROM store.product
            WHERE ($1::text IS NULL OR title ILIKE $1 OR description ILIKE $1 OR brand ILIKE $1 OR sku ILIKE $1)
              AND ($2::text IS NULL OR category = $2)
            ORDER BY updated_at DESC
            LIMIT $3 OFFSET $4
            "
        ))
        .bind(&pattern)
        .bind(category)
        .bind(params.limit())
        .bind(params.offset())
        .fetch_all(self.pool)
        .await?;

        Ok(Page {
            records,
            meta: PageMeta::new(total, params),
        })
    }

    /// Fetch a single product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no product has this ID,
    /// `RepositoryError::Database` on query failure.
    pub async fn get(&self, id: ProductId) -> Result<Product, RepositoryError> {
        sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM store.product WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)
    }

    /// Insert a new product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` when the SKU is already taken,
    /// `RepositoryError::Database` on any other failure.
    pub async fn create(&self, input: &ProductInput) -> Result<Product, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            r"
            INSERT INTO store.product
                (title, description, price, category, sub_category, discount,
                 image_url, benefits, stock, brand, sku, etiquette, usage)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING {PRODUCT_COLUMNS}
            "
        ))
        .bind(&input.title)
        .bind(&input.description)
        .bind(input.price)
        .bind(&input.category)
        .bind(&input.sub_category)
        .bind(input.discount)
        .bind(&input.image_url)
        .bind(&input.benefits)
        .bind(input.stock)
        .bind(&input.brand)
        .bind(&input.sku)
        .bind(&input.etiquette)
        .bind(&input.usage)
        .fetch_one(self.pool)
        .await
        .map_err(map_sku_conflict)?;

        Ok(product)
    }

    /// Replace a product's fields wholesale.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no product has this ID,
    /// `RepositoryError::Conflict` on SKU collision,
    /// `RepositoryError::Database` on any other failure.
    pub async fn update(
        &self,
        id: ProductId,
        input: &ProductInput,
    ) -> Result<Product, RepositoryError> {
        sqlx::query_as::<_, Product>(&format!(
            r"
            UPDATE store.product
            SET title = $2, description = $3, price = $4, category = $5,
                sub_category = $6, discount = $7, image_url = $8, benefits = $9,
                stock = $10, brand = $11, sku = $12, etiquette = $13, usage = $14,
                updated_at = now()
            WHERE id = $1
            RETURNING {PRODUCT_COLUMNS}
            "
        ))
        .bind(id)
        .bind(&input.title)
        .bind(&input.description)
        .bind(input.price)
        .bind(&input.category)
        .bind(&input.sub_category)
        .bind(input.discount)
        .bind(&input.image_url)
        .bind(&input.benefits)
        .bind(input.stock)
        .bind(&input.brand)
        .bind(&input.sku)
        .bind(&input.etiquette)
        .bind(&input.usage)
        .fetch_optional(self.pool)
        .await
        .map_err(map_sku_conflict)?
        .ok_or(RepositoryError::NotFound)
    }

    /// Delete a product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no product has this ID,
    /// `RepositoryError::Database` on query failure.
    pub async fn delete(&self, id: ProductId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM store.product WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}

fn map_sku_conflict(e: sqlx::Error) -> RepositoryError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            RepositoryError::Conflict("A product with this SKU already exists".to_owned())
        }
        _ => RepositoryError::Database(e),
    }
}
