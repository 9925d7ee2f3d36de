//! The draft → active transition. Field validation runs first, evidence
//! uploads second, and the status write commits last — a failed upload
//! leaves the request a draft with no stored evidence.

use std::sync::Arc;

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::lifecycle::evidence::{delete_uploaded, upload_evidence, EvidenceBatch, EvidenceStore};
use crate::lifecycle::status::RequestStatus;
use crate::models::request::ServiceRequestRow;
use crate::session::Session;
use crate::taxonomy::matcher;

pub const MIN_TITLE_CHARS: usize = 10;
pub const MIN_DESCRIPTION_CHARS: usize = 20;

/// Pre-flight field validation for publishing. Collects every violation so
/// the caller can surface them all at once.
pub fn validate_publish_fields(
    title: &str,
    description: &str,
    category_key: &str,
) -> Result<(), AppError> {
    let mut problems = Vec::new();

    if title.trim().chars().count() < MIN_TITLE_CHARS {
        problems.push(format!("Title must be at least {MIN_TITLE_CHARS} characters"));
    }
    if description.trim().chars().count() < MIN_DESCRIPTION_CHARS {
        problems.push(format!(
            "Description must be at least {MIN_DESCRIPTION_CHARS} characters"
        ));
    }
    if matcher::category_by_key(category_key).is_none() {
        problems.push(format!("Unknown category '{category_key}'"));
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(problems.join("; ")))
    }
}

/// Publishes a draft request, uploading any attached evidence first.
///
/// The status update is guarded on `status = 'draft'`; if the row moved
/// under us the uploads are compensated and the attempt rejected.
pub async fn publish_request(
    pool: &PgPool,
    store: Arc<dyn EvidenceStore>,
    session: Session,
    request_id: Uuid,
    evidence: EvidenceBatch,
) -> Result<ServiceRequestRow, AppError> {
    let request: ServiceRequestRow =
        sqlx::query_as("SELECT * FROM service_requests WHERE id = $1")
            .bind(request_id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Request {request_id} not found")))?;

    if request.user_id != session.user_id {
        return Err(AppError::Forbidden);
    }

    let current = RequestStatus::parse(&request.status)?;
    current.ensure_transition(RequestStatus::Active)?;

    validate_publish_fields(&request.title, &request.description, &request.category_key)?;

    let uploaded = if evidence.is_empty() {
        Vec::new()
    } else {
        upload_evidence(Arc::clone(&store), request_id, evidence).await?
    };
    let urls: Vec<String> = uploaded.iter().map(|u| u.url.clone()).collect();

    let updated: Option<ServiceRequestRow> = sqlx::query_as(
        r#"
        UPDATE service_requests
        SET status = 'active', evidence_urls = $2, updated_at = now()
        WHERE id = $1 AND status = 'draft'
        RETURNING *
        "#,
    )
    .bind(request_id)
    .bind(&urls)
    .fetch_optional(pool)
    .await?;

    match updated {
        Some(row) => {
            info!("Request {request_id} published by {}", session.user_id);
            Ok(row)
        }
        None => {
            // Lost the race against a concurrent transition; no partial
            // publish allowed, so remove what we just stored.
            delete_uploaded(&store, &uploaded).await;
            Err(AppError::UnprocessableEntity(
                "Request is no longer a draft".to_string(),
            ))
        }
    }
}
