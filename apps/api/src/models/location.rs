use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A postal address owned by a user, reusable across requests.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LocationRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub street: String,
    pub exterior_number: String,
    pub interior_number: Option<String>,
    pub neighborhood: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub created_at: DateTime<Utc>,
}
