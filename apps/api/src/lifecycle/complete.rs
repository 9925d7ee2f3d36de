//! The in_progress → completed transition, plus the background check that
//! makes review prompts eligible.

use redis::Client as RedisClient;
use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::lifecycle::cancel::accepted_specialist_id;
use crate::lifecycle::status::RequestStatus;
use crate::models::request::ServiceRequestRow;
use crate::notify::{self, CompletionEvent};
use crate::session::Session;

/// Marks an in-progress request completed. Either party may finish:
/// the owner or the accepted specialist.
///
/// The completion event is published to the change feed best-effort; a
/// feed failure is logged and does not undo the completion. The
/// authoritative review-prompt check is `pending_review_prompts`.
pub async fn complete_request(
    pool: &PgPool,
    redis: &RedisClient,
    session: Session,
    request_id: Uuid,
) -> Result<ServiceRequestRow, AppError> {
    let request: ServiceRequestRow =
        sqlx::query_as("SELECT * FROM service_requests WHERE id = $1")
            .bind(request_id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Request {request_id} not found")))?;

    // Party check first, same ordering as cancel: outsiders see a 403
    // before any status detail leaks through the transition guard.
    session.ensure_participant(
        request.user_id,
        accepted_specialist_id(pool, request_id).await?,
    )?;

    let current = RequestStatus::parse(&request.status)?;
    current.ensure_transition(RequestStatus::Completed)?;

    let updated: Option<ServiceRequestRow> = sqlx::query_as(
        r#"
        UPDATE service_requests
        SET status = 'completed', updated_at = now()
        WHERE id = $1 AND status = 'in_progress'
        RETURNING *
        "#,
    )
    .bind(request_id)
    .fetch_optional(pool)
    .await?;

    let updated = updated.ok_or_else(|| {
        AppError::UnprocessableEntity("Request is no longer in progress".to_string())
    })?;

    info!("Request {request_id} completed by {}", session.user_id);

    let event = CompletionEvent {
        request_id: updated.id,
        user_id: updated.user_id,
        completed_at: updated.updated_at,
    };
    if let Err(e) = notify::publish_completion(redis, &event).await {
        warn!("completion event for {request_id} not published: {e}");
    }

    Ok(updated)
}

/// Completed requests of this user with no review submitted yet, the rows
/// the customer UI turns into a one-time review prompt.
pub async fn pending_review_prompts(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<ServiceRequestRow>, AppError> {
    Ok(sqlx::query_as(
        r#"
        SELECT r.* FROM service_requests r
        WHERE r.user_id = $1
          AND r.status = 'completed'
          AND NOT EXISTS (SELECT 1 FROM reviews rv WHERE rv.request_id = r.id)
        ORDER BY r.updated_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?)
}
