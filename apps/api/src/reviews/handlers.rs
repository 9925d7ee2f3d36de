//! Review submission for both directions. A review exists only for a
//! completed request, written by the correct party, at most once per
//! direction; the unique index on `request_id` backs the application check.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::lifecycle::complete::pending_review_prompts;
use crate::lifecycle::status::RequestStatus;
use crate::models::quote::QuoteRow;
use crate::models::request::ServiceRequestRow;
use crate::models::review::ReviewRow;
use crate::reviews::ratings::ScoreCard;
use crate::session::Session;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SubmitReviewPayload {
    #[serde(flatten)]
    pub scores: ScoreCard,
    pub would_work_again: bool,
    pub comment: Option<String>,
}

/// Which direction a review runs. Decides the backing table and who may
/// write it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    CustomerToSpecialist,
    SpecialistToCustomer,
}

impl Direction {
    fn table(self) -> &'static str {
        match self {
            Direction::CustomerToSpecialist => "reviews",
            Direction::SpecialistToCustomer => "client_reviews",
        }
    }
}

/// POST /api/v1/requests/:id/reviews — customer rates the specialist.
pub async fn handle_submit_review(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<Uuid>,
    Json(payload): Json<SubmitReviewPayload>,
) -> Result<Json<ReviewRow>, AppError> {
    submit(&state.db, session, id, payload, Direction::CustomerToSpecialist)
        .await
        .map(Json)
}

/// POST /api/v1/requests/:id/client-reviews — specialist rates the customer.
pub async fn handle_submit_client_review(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<Uuid>,
    Json(payload): Json<SubmitReviewPayload>,
) -> Result<Json<ReviewRow>, AppError> {
    submit(&state.db, session, id, payload, Direction::SpecialistToCustomer)
        .await
        .map(Json)
}

/// GET /api/v1/reviews/pending — completed requests of the session user
/// still awaiting their review (the one-time prompt source).
pub async fn handle_pending_reviews(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<Vec<ServiceRequestRow>>, AppError> {
    let rows = pending_review_prompts(&state.db, session.user_id).await?;
    Ok(Json(rows))
}

async fn submit(
    pool: &PgPool,
    session: Session,
    request_id: Uuid,
    payload: SubmitReviewPayload,
    direction: Direction,
) -> Result<ReviewRow, AppError> {
    payload.scores.validate()?;

    let request: ServiceRequestRow =
        sqlx::query_as("SELECT * FROM service_requests WHERE id = $1")
            .bind(request_id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Request {request_id} not found")))?;

    if RequestStatus::parse(&request.status)? != RequestStatus::Completed {
        return Err(AppError::UnprocessableEntity(
            "Only completed requests can be reviewed".to_string(),
        ));
    }

    let accepted_quote_id = request.accepted_quote_id.ok_or_else(|| {
        AppError::UnprocessableEntity("Request has no accepted quote to review".to_string())
    })?;
    let quote: QuoteRow = sqlx::query_as("SELECT * FROM quotes WHERE id = $1")
        .bind(accepted_quote_id)
        .fetch_one(pool)
        .await?;

    let (reviewer_id, subject_id) = match direction {
        Direction::CustomerToSpecialist => (request.user_id, quote.specialist_id),
        Direction::SpecialistToCustomer => (quote.specialist_id, request.user_id),
    };
    if session.user_id != reviewer_id {
        return Err(AppError::Forbidden);
    }

    let table = direction.table();
    let existing: Option<(Uuid,)> =
        sqlx::query_as(&format!("SELECT id FROM {table} WHERE request_id = $1"))
            .bind(request_id)
            .fetch_optional(pool)
            .await?;
    if existing.is_some() {
        return Err(AppError::UnprocessableEntity(
            "This request has already been reviewed".to_string(),
        ));
    }

    let row: ReviewRow = sqlx::query_as(&format!(
        r#"
        INSERT INTO {table}
            (id, request_id, reviewer_id, subject_id, punctuality, quality,
             communication, value_for_money, professionalism, would_work_again,
             average, comment)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
        RETURNING *
        "#
    ))
    .bind(Uuid::new_v4())
    .bind(request_id)
    .bind(reviewer_id)
    .bind(subject_id)
    .bind(payload.scores.punctuality)
    .bind(payload.scores.quality)
    .bind(payload.scores.communication)
    .bind(payload.scores.value_for_money)
    .bind(payload.scores.professionalism)
    .bind(payload.would_work_again)
    .bind(payload.scores.average())
    .bind(&payload.comment)
    .fetch_one(pool)
    .await
    // Two submits racing past the existence check above both reach the
    // insert; the unique index decides, and the loser gets the same 422.
    .map_err(|e| AppError::map_unique_violation(e, "This request has already been reviewed"))?;

    Ok(row)
}
