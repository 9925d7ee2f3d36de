use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A customer-owned service request. `status` holds one of the
/// `RequestStatus` wire strings; the lifecycle module is the authority on
/// which transitions are legal.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ServiceRequestRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub category_key: String,
    /// Tag key within the category ("reparacion_fugas" under "plomeria").
    pub activity: Option<String>,
    pub title: String,
    pub description: String,
    pub status: String,
    pub scheduled_date: Option<NaiveDate>,
    pub time_window: Option<String>,
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
    pub location_id: Option<Uuid>,
    pub evidence_urls: Vec<String>,
    /// Set when a quote wins the accept race; at most one per request.
    pub accepted_quote_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Mandatory exit survey persisted alongside every cancellation,
/// in the same transaction as the status update.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CancellationSurveyRow {
    pub id: Uuid,
    pub request_id: Uuid,
    pub cancelled_by: Uuid,
    pub main_reason: String,
    pub other_reason_text: Option<String>,
    pub created_at: DateTime<Utc>,
}
