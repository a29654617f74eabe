//! Newsletter subscriber domain type.

use chrono::{DateTime, Utc};
use serde::Serialize;

use boutique_core::{Email, SubscriberId};

/// A newsletter subscriber.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Subscriber {
    /// Unique subscriber ID.
    pub id: SubscriberId,
    /// Subscriber email (unique).
    pub email: Email,
    /// When the subscription was created.
    pub created_at: DateTime<Utc>,
}
