//! Order queries and statistics aggregation.

use rust_decimal::Decimal;
use sqlx::PgPool;

use boutique_core::{ListParams, OrderId, OrderStatus, Page, PageMeta};

use crate::models::{Order, OrderCustomer, OrderWithCustomer};

use super::{RepositoryError, like_pattern};

const ORDER_COLUMNS: &str = "o.id, o.order_number, o.user_id, o.products, o.shipping_info, \
     o.shipping_cost, o.total, o.payment_method, o.status, o.created_at, o.updated_at";

/// Per-status order totals.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct StatusStat {
    /// The status bucket.
    pub status: OrderStatus,
    /// Number of orders in this status.
    pub count: i64,
    /// Sum of order totals in this status.
    pub total_amount: Decimal,
}

/// Per-calendar-month order totals.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MonthlyStat {
    /// Month key in `YYYY-MM` form.
    pub month: String,
    /// Number of orders placed that month.
    pub count: i64,
    /// Sum of order totals that month.
    pub total_amount: Decimal,
}

/// Per-delivery-zone order totals.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ZoneStat {
    /// Delivery zone from the shipping snapshot.
    pub zone: String,
    /// Number of orders shipped to this zone.
    pub count: i64,
    /// Sum of order totals shipped to this zone.
    pub total_amount: Decimal,
}

#[derive(sqlx::FromRow)]
struct OrderWithCustomerRow {
    #[sqlx(flatten)]
    order: Order,
    customer_firstname: Option<String>,
    customer_lastname: Option<String>,
    customer_email: Option<String>,
}

impl From<OrderWithCustomerRow> for OrderWithCustomer {
    fn from(row: OrderWithCustomerRow) -> Self {
        let user = match (
            row.customer_firstname,
            row.customer_lastname,
            row.customer_email,
        ) {
            (Some(firstname), Some(lastname), Some(email)) => Some(OrderCustomer {
                firstname,
                lastname,
                email,
            }),
            _ => None,
        };
        Self {
            order: row.order,
            user,
        }
    }
}

/// Repository for orders.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new repository backed by the given pool.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List orders, newest first, each joined with its customer's basic
    /// fields. Optional substring search on the order number and the
    /// customer's name and email, plus an optional status filter.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` on query failure.
    pub async fn list(
        &self,
        params: &ListParams,
        status: Option<OrderStatus>,
    ) -> Result<Page<OrderWithCustomer>, RepositoryError> {
        let pattern = params.search().map(like_pattern);
        let status = status.map(|s| s.as_str());

        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM store."order" o
            LEFT JOIN store."user" u ON u.id = o.user_id
            WHERE ($1::text IS NULL
                   OR o.order_number ILIKE $1
                   OR u.firstname ILIKE $1
                   OR u.lastname ILIKE $1
                   OR u.email ILIKE $1)
              AND ($2::text IS NULL OR o.status = $2)
            "#,
        )
        .bind(&pattern)
        .bind(status)
        .fetch_one(self.pool)
        .await?;

        let rows = sqlx::query_as::<_, OrderWithCustomerRow>(&format!(
            r#"
            SELECT {ORDER_COLUMNS},
                   u.firstname AS customer_firstname,
                   u.lastname  AS customer_lastname,
                   u.email     AS customer_email
            FROM store."order" o
            LEFT JOIN store."user" u ON u.id = o.user_id
            WHERE ($1::text IS NULL
                   OR o.order_number ILIKE $1
                   OR u.firstname ILIKE $1
                   OR u.lastname ILIKE $1
                   OR u.email ILIKE $1)
              AND ($2::text IS NULL OR o.status = $2)
            ORDER BY o.created_at DESC
            LIMIT $3 OFFSET $4
            "#
        ))
        .bind(&pattern)
        .bind(status)
        .bind(params.limit())
        .bind(params.offset())
        .fetch_all(self.pool)
        .await?;

        Ok(Page {
            records: rows.into_iter().map(Into::into).collect(),
            meta: PageMeta::new(total, params),
        })
    }

    /// Move an order to a new status and return the updated order joined
    /// with its customer.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no order has this ID,
    /// `RepositoryError::Database` on query failure.
    pub async fn update_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<OrderWithCustomer, RepositoryError> {
        let row = sqlx::query_as::<_, OrderWithCustomerRow>(&format!(
            r#"
            WITH updated AS (
                UPDATE store."order"
                SET status = $2, updated_at = now()
                WHERE id = $1
                RETURNING *
            )
            SELECT {ORDER_COLUMNS},
                   u.firstname AS customer_firstname,
                   u.lastname  AS customer_lastname,
                   u.email     AS customer_email
            FROM updated o
            LEFT JOIN store."user" u ON u.id = o.user_id
            "#
        ))
        .bind(id)
        .bind(status)
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        Ok(row.into())
    }

    /// Order count and revenue per status, over all orders.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` on query failure.
    pub async fn status_stats(&self) -> Result<Vec<StatusStat>, RepositoryError> {
        let stats = sqlx::query_as::<_, StatusStat>(
            r#"
            SELECT status, COUNT(*) AS count, COALESCE(SUM(total), 0) AS total_amount
            FROM store."order"
            GROUP BY status
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(stats)
    }

    /// Order count and revenue per calendar month, for months inside the
    /// trailing six-month window that have at least one order. Ascending by
    /// month; callers zero-fill the gaps. Months are bucketed in UTC
    /// regardless of the database server's time zone.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` on query failure.
    pub async fn monthly_stats(&self) -> Result<Vec<MonthlyStat>, RepositoryError> {
        let stats = sqlx::query_as::<_, MonthlyStat>(
            r#"
            SELECT to_char(date_trunc('month', created_at AT TIME ZONE 'UTC'), 'YYYY-MM') AS month,
                   COUNT(*) AS count,
                   COALESCE(SUM(total), 0) AS total_amount
            FROM store."order"
            WHERE (created_at AT TIME ZONE 'UTC')
                  >= date_trunc('month', now() AT TIME ZONE 'UTC') - INTERVAL '5 months'
            GROUP BY 1
            ORDER BY 1
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(stats)
    }

    /// Order counts grouped by the shipping snapshot's delivery zone, busiest
    /// first. Orders without a zone land in the `unspecified` bucket.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` on query failure.
    pub async fn shipping_zone_stats(&self) -> Result<Vec<ZoneStat>, RepositoryError> {
        let stats = sqlx::query_as::<_, ZoneStat>(
            r#"
            SELECT COALESCE(NULLIF(shipping_info->>'delivery', ''), 'unspecified') AS zone,
                   COUNT(*) AS count,
                   COALESCE(SUM(total), 0) AS total_amount
            FROM store."order"
            GROUP BY 1
            ORDER BY count DESC, zone
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(stats)
    }
}
