//! Customer route handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::{delete, get},
};
use serde_json::json;

use boutique_core::{ListParams, UserId};

use crate::db::UserRepository;
use crate::error::AppError;
use crate::middleware::RequireAuth;
use crate::state::AppState;

/// Build the customers router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(index))
        .route("/users/{id}", delete(remove))
}

/// `GET /api/users`
async fn index(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, AppError> {
    let page = UserRepository::new(state.pool()).list(&params).await?;

    Ok(Json(json!({
        "users": page.records,
        "pagination": page.meta,
    })))
}

/// `DELETE /api/users/{id}`
async fn remove(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<UserId>,
) -> Result<impl IntoResponse, AppError> {
    UserRepository::new(state.pool()).delete(id).await?;

    tracing::info!(user_id = %id, "customer deleted");

    Ok(Json(json!({ "message": "User deleted successfully" })))
}
