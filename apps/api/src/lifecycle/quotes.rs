//! Quote submission and the accept/reject operations.
//!
//! Accepting is the one place two rows move together, so it runs in a
//! single transaction with a compare-and-swap on the quote: the status
//! flip is guarded by "no sibling quote for this request is already
//! accepted". Losing that race is a 422, not a second winner.

use chrono::NaiveDate;
use serde::Deserialize;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::lifecycle::status::{QuoteStatus, RequestStatus};
use crate::models::quote::{QuotePrice, QuoteRow};
use crate::models::request::ServiceRequestRow;
use crate::session::Session;

#[derive(Debug, Deserialize)]
pub struct SubmitQuotePayload {
    pub price: QuotePrice,
    pub proposed_date: Option<NaiveDate>,
    pub proposed_time_window: Option<String>,
    pub scope: Option<String>,
    pub exclusions: Option<String>,
    pub warranty: Option<String>,
    #[serde(default)]
    pub attachment_urls: Vec<String>,
}

/// Creates a pending quote on an active request. One quote per specialist
/// per request; specialists cannot quote their own requests.
pub async fn submit_quote(
    pool: &PgPool,
    session: Session,
    request_id: Uuid,
    payload: SubmitQuotePayload,
) -> Result<QuoteRow, AppError> {
    if !session.specialist_mode {
        return Err(AppError::Forbidden);
    }
    payload.price.validate()?;

    let request: ServiceRequestRow =
        sqlx::query_as("SELECT * FROM service_requests WHERE id = $1")
            .bind(request_id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Request {request_id} not found")))?;

    if RequestStatus::parse(&request.status)? != RequestStatus::Active {
        return Err(AppError::UnprocessableEntity(
            "Quotes can only be submitted on active requests".to_string(),
        ));
    }
    if request.user_id == session.user_id {
        return Err(AppError::UnprocessableEntity(
            "Cannot quote your own request".to_string(),
        ));
    }

    let existing: Option<QuoteRow> =
        sqlx::query_as("SELECT * FROM quotes WHERE request_id = $1 AND specialist_id = $2")
            .bind(request_id)
            .bind(session.user_id)
            .fetch_optional(pool)
            .await?;
    if existing.is_some() {
        return Err(AppError::UnprocessableEntity(
            "You already submitted a quote for this request".to_string(),
        ));
    }

    let price_json = serde_json::to_value(&payload.price)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("price serialization: {e}")))?;

    // The insert re-checks the request status so a cancel racing past the
    // read above cannot still collect a quote, and the UNIQUE(request_id,
    // specialist_id) constraint backstops the duplicate check.
    let quote: Option<QuoteRow> = sqlx::query_as(
        r#"
        INSERT INTO quotes
            (id, request_id, specialist_id, status, price, proposed_date,
             proposed_time_window, scope, exclusions, warranty, attachment_urls)
        SELECT $1, $2, $3, 'pending', $4, $5, $6, $7, $8, $9, $10
        WHERE EXISTS (
            SELECT 1 FROM service_requests r WHERE r.id = $2 AND r.status = 'active'
        )
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(request_id)
    .bind(session.user_id)
    .bind(&price_json)
    .bind(payload.proposed_date)
    .bind(&payload.proposed_time_window)
    .bind(&payload.scope)
    .bind(&payload.exclusions)
    .bind(&payload.warranty)
    .bind(&payload.attachment_urls)
    .fetch_optional(pool)
    .await
    .map_err(|e| {
        AppError::map_unique_violation(e, "You already submitted a quote for this request")
    })?;

    let quote = quote.ok_or_else(|| {
        AppError::UnprocessableEntity(
            "Quotes can only be submitted on active requests".to_string(),
        )
    })?;

    info!(
        "Quote {} submitted on request {request_id} by {}",
        quote.id, session.user_id
    );
    Ok(quote)
}

/// The accept guard in pure form: a quote may flip to accepted only while
/// it is pending and no sibling quote on the same request already holds
/// accepted. `accept_quote` evaluates this against rows locked in its
/// transaction, then re-applies it inside the update itself.
pub fn may_accept(quote: QuoteStatus, siblings: &[QuoteStatus]) -> bool {
    quote == QuoteStatus::Pending && !siblings.contains(&QuoteStatus::Accepted)
}

/// Accepts a quote: quote pending → accepted, request active → in_progress,
/// with the quote's schedule and price copied onto the request as its
/// effective values. Sibling quotes are left alone — no auto-reject.
pub async fn accept_quote(
    pool: &PgPool,
    session: Session,
    quote_id: Uuid,
) -> Result<(QuoteRow, ServiceRequestRow), AppError> {
    let mut tx = pool.begin().await?;

    let quote: QuoteRow = sqlx::query_as("SELECT * FROM quotes WHERE id = $1")
        .bind(quote_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Quote {quote_id} not found")))?;

    let request: ServiceRequestRow =
        sqlx::query_as("SELECT * FROM service_requests WHERE id = $1 FOR UPDATE")
            .bind(quote.request_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Request {} not found", quote.request_id)))?;

    if request.user_id != session.user_id {
        return Err(AppError::Forbidden);
    }
    let current = RequestStatus::parse(&request.status)?;
    current.ensure_transition(RequestStatus::InProgress)?;

    let sibling_rows: Vec<(String,)> =
        sqlx::query_as("SELECT status FROM quotes WHERE request_id = $1 AND id <> $2")
            .bind(quote.request_id)
            .bind(quote.id)
            .fetch_all(&mut *tx)
            .await?;
    let mut siblings = Vec::with_capacity(sibling_rows.len());
    for (status,) in &sibling_rows {
        siblings.push(QuoteStatus::parse(status)?);
    }
    if !may_accept(QuoteStatus::parse(&quote.status)?, &siblings) {
        return Err(AppError::UnprocessableEntity(
            "Quote is not pending or another quote was already accepted".to_string(),
        ));
    }

    // CAS: re-applies the same predicate atomically, so a concurrent accept
    // that commits between the read above and this update still loses here.
    let accepted: Option<QuoteRow> = sqlx::query_as(
        r#"
        UPDATE quotes
        SET status = 'accepted'
        WHERE id = $1
          AND status = 'pending'
          AND NOT EXISTS (
              SELECT 1 FROM quotes q
              WHERE q.request_id = $2 AND q.status = 'accepted'
          )
        RETURNING *
        "#,
    )
    .bind(quote_id)
    .bind(quote.request_id)
    .fetch_optional(&mut *tx)
    .await?;

    let accepted = accepted.ok_or_else(|| {
        AppError::UnprocessableEntity(
            "Quote is not pending or another quote was already accepted".to_string(),
        )
    })?;

    let price: QuotePrice = serde_json::from_value(accepted.price.clone())
        .map_err(|e| AppError::Internal(anyhow::anyhow!("stored quote price malformed: {e}")))?;
    let (price_min, price_max) = price.bounds();

    let updated: Option<ServiceRequestRow> = sqlx::query_as(
        r#"
        UPDATE service_requests
        SET status = 'in_progress',
            accepted_quote_id = $2,
            scheduled_date = COALESCE($3, scheduled_date),
            time_window = COALESCE($4, time_window),
            price_min = $5,
            price_max = $6,
            updated_at = now()
        WHERE id = $1 AND status = 'active'
        RETURNING *
        "#,
    )
    .bind(request.id)
    .bind(accepted.id)
    .bind(accepted.proposed_date)
    .bind(&accepted.proposed_time_window)
    .bind(price_min)
    .bind(price_max)
    .fetch_optional(&mut *tx)
    .await?;

    let updated = updated.ok_or_else(|| {
        AppError::UnprocessableEntity("Request is no longer active".to_string())
    })?;

    tx.commit().await?;
    info!(
        "Quote {} accepted on request {}; request now in_progress",
        accepted.id, updated.id
    );
    Ok((accepted, updated))
}

/// Rejects a pending quote. Owner-only; the request itself is untouched.
pub async fn reject_quote(
    pool: &PgPool,
    session: Session,
    quote_id: Uuid,
) -> Result<QuoteRow, AppError> {
    let quote: QuoteRow = sqlx::query_as("SELECT * FROM quotes WHERE id = $1")
        .bind(quote_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Quote {quote_id} not found")))?;

    let request: ServiceRequestRow =
        sqlx::query_as("SELECT * FROM service_requests WHERE id = $1")
            .bind(quote.request_id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Request {} not found", quote.request_id)))?;

    if request.user_id != session.user_id {
        return Err(AppError::Forbidden);
    }
    if QuoteStatus::parse(&quote.status)? != QuoteStatus::Pending {
        return Err(AppError::UnprocessableEntity(
            "Only pending quotes can be rejected".to_string(),
        ));
    }

    let rejected: Option<QuoteRow> = sqlx::query_as(
        "UPDATE quotes SET status = $2 WHERE id = $1 AND status = 'pending' RETURNING *",
    )
    .bind(quote_id)
    .bind(QuoteStatus::Rejected.as_str())
    .fetch_optional(pool)
    .await?;

    rejected.ok_or_else(|| {
        AppError::UnprocessableEntity("Only pending quotes can be rejected".to_string())
    })
}

/// Quotes on a request, visible to its owner; a specialist sees only
/// their own.
pub async fn quotes_for_request(
    pool: &PgPool,
    session: Session,
    request_id: Uuid,
) -> Result<Vec<QuoteRow>, AppError> {
    let request: ServiceRequestRow =
        sqlx::query_as("SELECT * FROM service_requests WHERE id = $1")
            .bind(request_id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Request {request_id} not found")))?;

    if request.user_id == session.user_id {
        Ok(
            sqlx::query_as("SELECT * FROM quotes WHERE request_id = $1 ORDER BY created_at ASC")
                .bind(request_id)
                .fetch_all(pool)
                .await?,
        )
    } else {
        Ok(sqlx::query_as(
            "SELECT * FROM quotes WHERE request_id = $1 AND specialist_id = $2",
        )
        .bind(request_id)
        .bind(session.user_id)
        .fetch_all(pool)
        .await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use QuoteStatus::{Accepted, Pending, Rejected};

    #[test]
    fn test_pending_quote_with_no_siblings_may_accept() {
        assert!(may_accept(Pending, &[]));
    }

    #[test]
    fn test_pending_and_rejected_siblings_do_not_block() {
        assert!(may_accept(Pending, &[Pending, Rejected]));
    }

    #[test]
    fn test_accepted_sibling_blocks_a_second_accept() {
        assert!(!may_accept(Pending, &[Accepted]));
        assert!(!may_accept(Pending, &[Rejected, Accepted, Pending]));
    }

    #[test]
    fn test_non_pending_quote_cannot_be_accepted() {
        assert!(!may_accept(Accepted, &[]));
        assert!(!may_accept(Rejected, &[]));
    }

    #[test]
    fn test_at_most_one_quote_ever_wins() {
        // Once any quote holds accepted, no remaining quote passes the
        // guard, whatever its own status.
        for status in [Pending, Accepted, Rejected] {
            assert!(!may_accept(status, &[Accepted, Pending, Rejected]));
        }
    }
}
