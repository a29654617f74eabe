//! HTTP route handlers for the admin API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                     - Health check
//!
//! # Auth (session cookie, no auth required)
//! POST /api/auth/login             - Log in with email and password
//! POST /api/auth/logout            - Log out
//! POST /api/auth/register          - Start signup (sends SMS code)
//! POST /api/auth/register/verify   - Finish signup (checks SMS code)
//!
//! # Customers
//! GET    /api/users                - Customer listing
//! DELETE /api/users/{id}           - Delete customer
//!
//! # Products
//! GET    /api/products             - Product listing
//! POST   /api/products             - Create product
//! GET    /api/products/{id}        - Product detail
//! PUT    /api/products/{id}        - Replace product
//! DELETE /api/products/{id}        - Delete product
//!
//! # Orders
//! GET   /api/orders                - Order listing
//! GET   /api/orders/stats          - Dashboard statistics
//! PATCH /api/orders/{id}           - Move order status
//!
//! # Newsletter
//! GET    /api/newsletter           - Subscriber listing
//! DELETE /api/newsletter/{id}      - Remove subscriber
//! ```
//!
//! Everything under `/api` except the auth routes requires a logged-in
//! session and answers 401 otherwise.

pub mod auth;
pub mod health;
pub mod newsletter;
pub mod orders;
pub mod products;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the full application router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .nest(
            "/api",
            Router::new()
                .merge(auth::router())
                .merge(users::router())
                .merge(products::router())
                .merge(orders::router())
                .merge(newsletter::router()),
        )
}
