use axum::{
    extract::{Multipart, Path, Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::lifecycle::cancel::{cancel_request, CancellationSurvey};
use crate::lifecycle::complete::complete_request;
use crate::lifecycle::evidence::{EvidenceBatch, EvidenceFile};
use crate::lifecycle::publish::publish_request;
use crate::lifecycle::quotes::{
    accept_quote, quotes_for_request, reject_quote, submit_quote, SubmitQuotePayload,
};
use crate::lifecycle::status::RequestStatus;
use crate::models::quote::QuoteRow;
use crate::models::request::{CancellationSurveyRow, ServiceRequestRow};
use crate::session::Session;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct CreateRequestPayload {
    pub category_key: String,
    pub activity: Option<String>,
    pub title: String,
    pub description: String,
    pub scheduled_date: Option<NaiveDate>,
    pub time_window: Option<String>,
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
    pub location_id: Option<Uuid>,
}

/// POST /api/v1/requests
///
/// Creates a draft. Drafts accept anything; the publish guards run later.
pub async fn handle_create_request(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CreateRequestPayload>,
) -> Result<Json<ServiceRequestRow>, AppError> {
    let row: ServiceRequestRow = sqlx::query_as(
        r#"
        INSERT INTO service_requests
            (id, user_id, category_key, activity, title, description, status,
             scheduled_date, time_window, price_min, price_max, location_id, evidence_urls)
        VALUES ($1, $2, $3, $4, $5, $6, 'draft', $7, $8, $9, $10, $11, '{}')
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(session.user_id)
    .bind(&payload.category_key)
    .bind(&payload.activity)
    .bind(&payload.title)
    .bind(&payload.description)
    .bind(payload.scheduled_date)
    .bind(&payload.time_window)
    .bind(payload.price_min)
    .bind(payload.price_max)
    .bind(payload.location_id)
    .fetch_one(&state.db)
    .await?;
    Ok(Json(row))
}

#[derive(Deserialize)]
pub struct ListRequestsQuery {
    pub status: Option<String>,
}

/// GET /api/v1/requests — the session user's own requests.
pub async fn handle_list_requests(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<ListRequestsQuery>,
) -> Result<Json<Vec<ServiceRequestRow>>, AppError> {
    let rows: Vec<ServiceRequestRow> = match &params.status {
        Some(status) => {
            RequestStatus::parse(status)
                .map_err(|_| AppError::Validation(format!("Unknown status '{status}'")))?;
            sqlx::query_as(
                "SELECT * FROM service_requests WHERE user_id = $1 AND status = $2 ORDER BY created_at DESC",
            )
            .bind(session.user_id)
            .bind(status)
            .fetch_all(&state.db)
            .await?
        }
        None => {
            sqlx::query_as(
                "SELECT * FROM service_requests WHERE user_id = $1 ORDER BY created_at DESC",
            )
            .bind(session.user_id)
            .fetch_all(&state.db)
            .await?
        }
    };
    Ok(Json(rows))
}

#[derive(Deserialize)]
pub struct OpenRequestsQuery {
    pub category: Option<String>,
}

/// GET /api/v1/requests/open — the specialist browse view: active requests
/// from other users, optionally filtered by category.
pub async fn handle_list_open_requests(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<OpenRequestsQuery>,
) -> Result<Json<Vec<ServiceRequestRow>>, AppError> {
    if !session.specialist_mode {
        return Err(AppError::Forbidden);
    }
    let rows: Vec<ServiceRequestRow> = match &params.category {
        Some(category) => sqlx::query_as(
            r#"
            SELECT * FROM service_requests
            WHERE status = 'active' AND user_id <> $1 AND category_key = $2
            ORDER BY created_at DESC
            "#,
        )
        .bind(session.user_id)
        .bind(category)
        .fetch_all(&state.db)
        .await?,
        None => sqlx::query_as(
            r#"
            SELECT * FROM service_requests
            WHERE status = 'active' AND user_id <> $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(session.user_id)
        .fetch_all(&state.db)
        .await?,
    };
    Ok(Json(rows))
}

/// GET /api/v1/requests/:id — visible to the owner; others see it only
/// while it is active (the browse/quote window).
pub async fn handle_get_request(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<Uuid>,
) -> Result<Json<ServiceRequestRow>, AppError> {
    let row: ServiceRequestRow = sqlx::query_as("SELECT * FROM service_requests WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Request {id} not found")))?;

    if row.user_id != session.user_id && RequestStatus::parse(&row.status)? != RequestStatus::Active
    {
        return Err(AppError::Forbidden);
    }
    Ok(Json(row))
}

#[derive(Deserialize)]
pub struct UpdateRequestPayload {
    pub category_key: Option<String>,
    pub activity: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub scheduled_date: Option<NaiveDate>,
    pub time_window: Option<String>,
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
    pub location_id: Option<Uuid>,
}

/// PATCH /api/v1/requests/:id — drafts only.
pub async fn handle_update_request(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateRequestPayload>,
) -> Result<Json<ServiceRequestRow>, AppError> {
    let existing: ServiceRequestRow =
        sqlx::query_as("SELECT * FROM service_requests WHERE id = $1")
            .bind(id)
            .fetch_optional(&state.db)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Request {id} not found")))?;

    if existing.user_id != session.user_id {
        return Err(AppError::Forbidden);
    }
    let status = RequestStatus::parse(&existing.status)?;
    if status != RequestStatus::Draft {
        let detail = if status.is_terminal() {
            "the request is closed"
        } else {
            "the request is already published"
        };
        return Err(AppError::UnprocessableEntity(format!(
            "Only draft requests can be edited; {detail}"
        )));
    }

    // The status guard repeats in the update so an edit racing a publish
    // loses cleanly instead of surfacing a missing-row error.
    let row: Option<ServiceRequestRow> = sqlx::query_as(
        r#"
        UPDATE service_requests
        SET category_key = COALESCE($2, category_key),
            activity = COALESCE($3, activity),
            title = COALESCE($4, title),
            description = COALESCE($5, description),
            scheduled_date = COALESCE($6, scheduled_date),
            time_window = COALESCE($7, time_window),
            price_min = COALESCE($8, price_min),
            price_max = COALESCE($9, price_max),
            location_id = COALESCE($10, location_id),
            updated_at = now()
        WHERE id = $1 AND status = 'draft'
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(&payload.category_key)
    .bind(&payload.activity)
    .bind(&payload.title)
    .bind(&payload.description)
    .bind(payload.scheduled_date)
    .bind(&payload.time_window)
    .bind(payload.price_min)
    .bind(payload.price_max)
    .bind(payload.location_id)
    .fetch_optional(&state.db)
    .await?;

    let row = row.ok_or_else(|| {
        AppError::UnprocessableEntity("Request is no longer a draft".to_string())
    })?;
    Ok(Json(row))
}

/// POST /api/v1/requests/:id/publish
///
/// Multipart body; every part named `evidence` is validated into the
/// pending batch before any upload starts.
pub async fn handle_publish(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<Json<ServiceRequestRow>, AppError> {
    let mut batch = EvidenceBatch::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        if field.name() != Some("evidence") {
            continue;
        }
        let file_name = field.file_name().unwrap_or("evidencia").to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Could not read file '{file_name}': {e}")))?;
        batch.try_add(EvidenceFile {
            file_name,
            content_type,
            bytes,
        })?;
    }
    tracing::debug!("publish {id}: {} evidence files attached", batch.len());

    let row = publish_request(&state.db, state.evidence.clone(), session, id, batch).await?;
    Ok(Json(row))
}

#[derive(serde::Serialize)]
pub struct CancelResponse {
    pub request: ServiceRequestRow,
    pub survey: CancellationSurveyRow,
}

/// POST /api/v1/requests/:id/cancel
pub async fn handle_cancel(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<Uuid>,
    Json(survey): Json<CancellationSurvey>,
) -> Result<Json<CancelResponse>, AppError> {
    let (request, survey) = cancel_request(&state.db, session, id, survey).await?;
    Ok(Json(CancelResponse { request, survey }))
}

/// POST /api/v1/requests/:id/complete
pub async fn handle_complete(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<Uuid>,
) -> Result<Json<ServiceRequestRow>, AppError> {
    let row = complete_request(&state.db, &state.redis, session, id).await?;
    Ok(Json(row))
}

/// POST /api/v1/requests/:id/quotes
pub async fn handle_submit_quote(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<Uuid>,
    Json(payload): Json<SubmitQuotePayload>,
) -> Result<Json<QuoteRow>, AppError> {
    let quote = submit_quote(&state.db, session, id, payload).await?;
    Ok(Json(quote))
}

/// GET /api/v1/requests/:id/quotes
pub async fn handle_list_quotes(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<QuoteRow>>, AppError> {
    let quotes = quotes_for_request(&state.db, session, id).await?;
    Ok(Json(quotes))
}

#[derive(serde::Serialize)]
pub struct AcceptQuoteResponse {
    pub quote: QuoteRow,
    pub request: ServiceRequestRow,
}

/// POST /api/v1/quotes/:id/accept
pub async fn handle_accept_quote(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<Uuid>,
) -> Result<Json<AcceptQuoteResponse>, AppError> {
    let (quote, request) = accept_quote(&state.db, session, id).await?;
    Ok(Json(AcceptQuoteResponse { quote, request }))
}

/// POST /api/v1/quotes/:id/reject
pub async fn handle_reject_quote(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<Uuid>,
) -> Result<Json<QuoteRow>, AppError> {
    let quote = reject_quote(&state.db, session, id).await?;
    Ok(Json(quote))
}
