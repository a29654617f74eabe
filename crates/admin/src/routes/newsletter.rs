//! Newsletter subscriber route handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::{delete, get},
};
use serde_json::json;

use boutique_core::{ListParams, SubscriberId};

use crate::db::SubscriberRepository;
use crate::error::AppError;
use crate::middleware::RequireAuth;
use crate::state::AppState;

/// Build the newsletter router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/newsletter", get(index))
        .route("/newsletter/{id}", delete(remove))
}

/// `GET /api/newsletter`
async fn index(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, AppError> {
    let page = SubscriberRepository::new(state.pool()).list(&params).await?;

    Ok(Json(json!({
        "subscribers": page.records,
        "pagination": page.meta,
    })))
}

/// `DELETE /api/newsletter/{id}`
async fn remove(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<SubscriberId>,
) -> Result<impl IntoResponse, AppError> {
    SubscriberRepository::new(state.pool()).delete(id).await?;

    Ok(Json(json!({ "message": "Subscriber deleted successfully" })))
}
