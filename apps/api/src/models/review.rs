use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A rating record. The same shape backs both directions:
/// `reviews` (customer → specialist) and `client_reviews`
/// (specialist → customer), one row per completed request per direction.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ReviewRow {
    pub id: Uuid,
    pub request_id: Uuid,
    pub reviewer_id: Uuid,
    pub subject_id: Uuid,
    pub punctuality: i16,
    pub quality: i16,
    pub communication: i16,
    pub value_for_money: i16,
    pub professionalism: i16,
    pub would_work_again: bool,
    pub average: f64,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}
