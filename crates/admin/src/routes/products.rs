//! Product catalog route handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use serde::Deserialize;
use serde_json::json;

use boutique_core::{ListParams, ProductId};

use crate::db::{ProductRepository, normalize_filter};
use crate::error::AppError;
use crate::middleware::RequireAuth;
use crate::models::ProductInput;
use crate::state::AppState;

/// Build the products router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/products", get(index).post(create))
        .route("/products/{id}", get(show).put(update).delete(remove))
}

/// Query parameters for the product listing.
#[derive(Debug, Deserialize)]
pub struct ProductListQuery {
    page: Option<i64>,
    limit: Option<i64>,
    search: Option<String>,
    category: Option<String>,
}

impl ProductListQuery {
    fn list_params(&self) -> ListParams {
        ListParams {
            page: self.page,
            limit: self.limit,
            search: self.search.clone(),
        }
    }
}

/// `GET /api/products`
async fn index(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Query(query): Query<ProductListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let params = query.list_params();
    let category = normalize_filter(query.category.as_deref());

    let page = ProductRepository::new(state.pool())
        .list(&params, category)
        .await?;

    Ok(Json(json!({
        "products": page.records,
        "pagination": page.meta,
    })))
}

/// `POST /api/products`
async fn create(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Json(input): Json<ProductInput>,
) -> Result<impl IntoResponse, AppError> {
    input.validate().map_err(AppError::BadRequest)?;

    let product = ProductRepository::new(state.pool()).create(&input).await?;

    tracing::info!(product_id = %product.id, "product created");

    Ok((StatusCode::CREATED, Json(product)))
}

/// `GET /api/products/{id}`
async fn show(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<impl IntoResponse, AppError> {
    let product = ProductRepository::new(state.pool()).get(id).await?;

    Ok(Json(product))
}

/// `PUT /api/products/{id}`
async fn update(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    Json(input): Json<ProductInput>,
) -> Result<impl IntoResponse, AppError> {
    input.validate().map_err(AppError::BadRequest)?;

    let product = ProductRepository::new(state.pool())
        .update(id, &input)
        .await?;

    Ok(Json(product))
}

/// `DELETE /api/products/{id}`
async fn remove(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<impl IntoResponse, AppError> {
    ProductRepository::new(state.pool()).delete(id).await?;

    tracing::info!(product_id = %id, "product deleted");

    Ok(Json(json!({ "message": "Product deleted successfully" })))
}
