//! Order route handlers and dashboard statistics.

use std::collections::HashMap;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::{get, patch},
};
use chrono::{Months, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;

use boutique_core::{ListParams, OrderId, OrderStatus};

use crate::db::orders::{MonthlyStat, StatusStat, ZoneStat};
use crate::db::{OrderRepository, normalize_filter};
use crate::error::AppError;
use crate::middleware::RequireAuth;
use crate::state::AppState;

/// How many trailing calendar months the dashboard chart shows.
const MONTHLY_WINDOW: u32 = 6;

/// Build the orders router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/orders", get(index))
        .route("/orders/stats", get(stats))
        .route("/orders/{id}", patch(update_status))
}

/// Query parameters for the order listing.
#[derive(Debug, Deserialize)]
pub struct OrderListQuery {
    page: Option<i64>,
    limit: Option<i64>,
    search: Option<String>,
    status: Option<String>,
}

impl OrderListQuery {
    fn list_params(&self) -> ListParams {
        ListParams {
            page: self.page,
            limit: self.limit,
            search: self.search.clone(),
        }
    }

    fn status(&self) -> Result<Option<OrderStatus>, AppError> {
        normalize_filter(self.status.as_deref())
            .map(|s| s.parse().map_err(AppError::BadRequest))
            .transpose()
    }
}

/// Status update request body.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    status: String,
}

/// `GET /api/orders`
async fn index(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Query(query): Query<OrderListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let params = query.list_params();
    let status = query.status()?;

    let page = OrderRepository::new(state.pool())
        .list(&params, status)
        .await?;

    Ok(Json(json!({
        "orders": page.records,
        "pagination": page.meta,
    })))
}

/// `PATCH /api/orders/{id}`
///
/// Any status can move to any other; repeating the current status is a
/// no-op that still answers 200.
async fn update_status(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
    Json(body): Json<UpdateStatusRequest>,
) -> Result<impl IntoResponse, AppError> {
    let status: OrderStatus = body.status.parse().map_err(AppError::BadRequest)?;

    let order = OrderRepository::new(state.pool())
        .update_status(id, status)
        .await?;

    tracing::info!(order_id = %id, status = %status, "order status updated");

    if status == OrderStatus::Delivered && state.config().otp.delivery_sms_enabled {
        notify_delivery(&state, &order.order.shipping_info, &order.order.order_number).await;
    }

    Ok(Json(order))
}

/// Best-effort delivery confirmation SMS. A provider failure is logged and
/// never fails the status update itself.
async fn notify_delivery(
    state: &AppState,
    shipping: &crate::models::ShippingInfo,
    order_number: &str,
) {
    let phone = match boutique_core::Phone::parse(&shipping.phone) {
        Ok(phone) => phone,
        Err(e) => {
            tracing::warn!(order_number, error = %e, "invalid shipping phone, skipping SMS");
            return;
        }
    };

    let message = format!(
        "Hello {}, your order {order_number} has been delivered. Thank you for your trust!",
        shipping.firstname
    );
    if let Err(e) = state.otp().send_sms(&phone, &message).await {
        tracing::warn!(order_number, error = %e, "delivery SMS failed");
    }
}

/// `GET /api/orders/stats`
async fn stats(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let orders = OrderRepository::new(state.pool());

    let by_status = orders.status_stats().await?;
    let by_month = orders.monthly_stats().await?;
    let by_zone = orders.shipping_zone_stats().await?;

    let months = month_keys(Utc::now().date_naive());

    Ok(Json(json!({
        "statusStats": status_stats_object(&by_status),
        "monthlyStats": fill_monthly(&months, by_month),
        "shippingZoneStats": zone_stats_array(&by_zone),
    })))
}

/// Object keyed by status name; every status appears even with no orders.
fn status_stats_object(stats: &[StatusStat]) -> serde_json::Value {
    let mut by_status: HashMap<OrderStatus, &StatusStat> =
        stats.iter().map(|s| (s.status, s)).collect();

    let mut object = serde_json::Map::new();
    for status in OrderStatus::ALL {
        let (count, total) = by_status
            .remove(&status)
            .map_or((0, Decimal::ZERO), |s| (s.count, s.total_amount));
        object.insert(
            status.as_str().to_owned(),
            json!({ "count": count, "totalAmount": total }),
        );
    }
    serde_json::Value::Object(object)
}

/// The trailing window of month keys ending with the current month,
/// ascending.
fn month_keys(today: NaiveDate) -> Vec<String> {
    (0..MONTHLY_WINDOW)
        .rev()
        .filter_map(|back| today.checked_sub_months(Months::new(back)))
        .map(|d| d.format("%Y-%m").to_string())
        .collect()
}

/// Zero-fill the month window with the aggregated rows.
fn fill_monthly(months: &[String], stats: Vec<MonthlyStat>) -> Vec<serde_json::Value> {
    let mut by_month: HashMap<String, MonthlyStat> =
        stats.into_iter().map(|s| (s.month.clone(), s)).collect();

    months
        .iter()
        .map(|month| {
            let (count, total) = by_month
                .remove(month)
                .map_or((0, Decimal::ZERO), |s| (s.count, s.total_amount));
            json!({ "month": month, "count": count, "totalAmount": total })
        })
        .collect()
}

fn zone_stats_array(stats: &[ZoneStat]) -> Vec<serde_json::Value> {
    stats
        .iter()
        .map(|s| json!({ "zone": s.zone, "count": s.count, "totalAmount": s.total_amount }))
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_month_keys_trailing_window() {
        let keys = month_keys(NaiveDate::from_ymd_opt(2026, 8, 30).unwrap());
        assert_eq!(
            keys,
            vec!["2026-03", "2026-04", "2026-05", "2026-06", "2026-07", "2026-08"]
        );
    }

    #[test]
    fn test_month_keys_cross_year() {
        let keys = month_keys(NaiveDate::from_ymd_opt(2026, 2, 1).unwrap());
        assert_eq!(
            keys,
            vec!["2025-09", "2025-10", "2025-11", "2025-12", "2026-01", "2026-02"]
        );
    }

    #[test]
    fn test_fill_monthly_zero_fills_gaps() {
        let months: Vec<String> = ["2026-07", "2026-08"].iter().map(|s| (*s).to_owned()).collect();
        let rows = vec![MonthlyStat {
            month: "2026-08".to_owned(),
            count: 3,
            total_amount: Decimal::new(15000, 0),
        }];

        let filled = fill_monthly(&months, rows);
        assert_eq!(filled[0]["month"], "2026-07");
        assert_eq!(filled[0]["count"], 0);
        assert_eq!(filled[1]["month"], "2026-08");
        assert_eq!(filled[1]["count"], 3);
    }

    #[test]
    fn test_status_stats_object_covers_all_statuses() {
        let rows = vec![StatusStat {
            status: OrderStatus::Pending,
            count: 2,
            total_amount: Decimal::new(9000, 0),
        }];

        let object = status_stats_object(&rows);
        assert_eq!(object["pending"]["count"], 2);
        assert_eq!(object["cancelled"]["count"], 0);
        assert!(object.get("delivered").is_some());
        assert!(object.get("processing").is_some());
    }

    #[test]
    fn test_status_filter_parsing() {
        let query = OrderListQuery {
            page: None,
            limit: None,
            search: None,
            status: Some("all".to_owned()),
        };
        assert!(query.status().unwrap().is_none());

        let query = OrderListQuery {
            status: Some("delivered".to_owned()),
            ..query
        };
        assert_eq!(query.status().unwrap(), Some(OrderStatus::Delivered));

        let query = OrderListQuery {
            status: Some("shipped".to_owned()),
            ..query
        };
        assert!(query.status().is_err());
    }
}
