//! Shared application state.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::AdminConfig;
use crate::services::OtpClient;

/// Shared state handed to every handler.
///
/// Cheap to clone; the fields live behind a single `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    pool: PgPool,
    otp: OtpClient,
}

impl AppState {
    /// Bundle the configuration, pool, and service clients.
    #[must_use]
    pub fn new(config: AdminConfig, pool: PgPool, otp: OtpClient) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, pool, otp }),
        }
    }

    /// Application configuration.
    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    /// Database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// SMS verification provider client.
    #[must_use]
    pub fn otp(&self) -> &OtpClient {
        &self.inner.otp
    }
}
