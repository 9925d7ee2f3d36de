//! Cancellation with its mandatory exit survey. The survey insert and the
//! status update commit in one transaction so a cancelled request always
//! has its reason on record.

use serde::Deserialize;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::lifecycle::status::RequestStatus;
use crate::models::request::{CancellationSurveyRow, ServiceRequestRow};
use crate::session::Session;

/// The fixed reason list offered by the cancellation dialog.
pub const CANCELLATION_REASONS: &[&str] = &[
    "Ya no necesito el servicio",
    "Encontré otra solución",
    "El especialista no respondió",
    "El precio no me convenció",
    "Cambié la fecha del servicio",
    "Otro motivo",
];

pub const OTHER_REASON: &str = "Otro motivo";
pub const MAX_OTHER_REASON_CHARS: usize = 120;

#[derive(Debug, Clone, Deserialize)]
pub struct CancellationSurvey {
    pub main_reason: String,
    pub other_reason_text: Option<String>,
}

/// Survey rules: `main_reason` must come from the fixed list; the free-text
/// elaboration exists only with "Otro motivo" and is capped at 120 chars.
pub fn validate_survey(survey: &CancellationSurvey) -> Result<(), AppError> {
    if !CANCELLATION_REASONS.contains(&survey.main_reason.as_str()) {
        return Err(AppError::Validation(format!(
            "'{}' is not a valid cancellation reason",
            survey.main_reason
        )));
    }

    match (
        survey.main_reason == OTHER_REASON,
        survey.other_reason_text.as_deref(),
    ) {
        (true, None) => Err(AppError::Validation(
            "An explanation is required for 'Otro motivo'".to_string(),
        )),
        (true, Some(text)) => {
            let len = text.trim().chars().count();
            if len == 0 {
                Err(AppError::Validation(
                    "An explanation is required for 'Otro motivo'".to_string(),
                ))
            } else if len > MAX_OTHER_REASON_CHARS {
                Err(AppError::Validation(format!(
                    "Explanation must be at most {MAX_OTHER_REASON_CHARS} characters"
                )))
            } else {
                Ok(())
            }
        }
        (false, Some(_)) => Err(AppError::Validation(
            "Free-text explanation is only allowed with 'Otro motivo'".to_string(),
        )),
        (false, None) => Ok(()),
    }
}

/// Cancels a request from `active` or `in_progress`. The owner may always
/// cancel; the accepted specialist may cancel too, and one only exists
/// once work is in progress.
pub async fn cancel_request(
    pool: &PgPool,
    session: Session,
    request_id: Uuid,
    survey: CancellationSurvey,
) -> Result<(ServiceRequestRow, CancellationSurveyRow), AppError> {
    validate_survey(&survey)?;

    let request: ServiceRequestRow =
        sqlx::query_as("SELECT * FROM service_requests WHERE id = $1")
            .bind(request_id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Request {request_id} not found")))?;

    // Party check before the transition guard, so a stranger cannot tell a
    // completed request from an active one by the error code.
    session.ensure_participant(
        request.user_id,
        accepted_specialist_id(pool, request_id).await?,
    )?;

    let current = RequestStatus::parse(&request.status)?;
    current.ensure_transition(RequestStatus::Cancelled)?;

    let mut tx = pool.begin().await?;

    let survey_row: CancellationSurveyRow = sqlx::query_as(
        r#"
        INSERT INTO cancellation_surveys
            (id, request_id, cancelled_by, main_reason, other_reason_text)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(request_id)
    .bind(session.user_id)
    .bind(&survey.main_reason)
    .bind(survey.other_reason_text.as_deref().map(str::trim))
    .fetch_one(&mut *tx)
    .await?;

    let updated: Option<ServiceRequestRow> = sqlx::query_as(
        r#"
        UPDATE service_requests
        SET status = 'cancelled', updated_at = now()
        WHERE id = $1 AND status = $2
        RETURNING *
        "#,
    )
    .bind(request_id)
    .bind(current.as_str())
    .fetch_optional(&mut *tx)
    .await?;

    let updated = updated.ok_or_else(|| {
        AppError::UnprocessableEntity("Request status changed during cancellation".to_string())
    })?;

    tx.commit().await?;
    info!(
        "Request {request_id} cancelled by {} ({})",
        session.user_id, survey.main_reason
    );
    Ok((updated, survey_row))
}

/// The specialist behind the request's accepted quote, if any.
pub async fn accepted_specialist_id(
    pool: &PgPool,
    request_id: Uuid,
) -> Result<Option<Uuid>, AppError> {
    let found: Option<(Uuid,)> = sqlx::query_as(
        "SELECT specialist_id FROM quotes WHERE request_id = $1 AND status = 'accepted'",
    )
    .bind(request_id)
    .fetch_optional(pool)
    .await?;
    Ok(found.map(|(id,)| id))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn survey(reason: &str, other: Option<&str>) -> CancellationSurvey {
        CancellationSurvey {
            main_reason: reason.to_string(),
            other_reason_text: other.map(String::from),
        }
    }

    #[test]
    fn test_listed_reason_passes() {
        validate_survey(&survey("Ya no necesito el servicio", None)).unwrap();
    }

    #[test]
    fn test_empty_reason_rejected() {
        assert!(validate_survey(&survey("", None)).is_err());
    }

    #[test]
    fn test_unlisted_reason_rejected() {
        assert!(validate_survey(&survey("Me mudé de ciudad", None)).is_err());
    }

    #[test]
    fn test_other_requires_explanation() {
        assert!(validate_survey(&survey(OTHER_REASON, None)).is_err());
        assert!(validate_survey(&survey(OTHER_REASON, Some(""))).is_err());
        assert!(validate_survey(&survey(OTHER_REASON, Some("   "))).is_err());
    }

    #[test]
    fn test_other_with_explanation_passes() {
        validate_survey(&survey(OTHER_REASON, Some("El especialista llegó dos veces tarde")))
            .unwrap();
    }

    #[test]
    fn test_explanation_cap_at_120_chars() {
        let at_limit = "x".repeat(120);
        validate_survey(&survey(OTHER_REASON, Some(&at_limit))).unwrap();

        let over_limit = "x".repeat(121);
        let err = validate_survey(&survey(OTHER_REASON, Some(&over_limit))).unwrap_err();
        assert!(err.to_string().contains("120"));
    }

    #[test]
    fn test_single_char_explanation_passes() {
        validate_survey(&survey(OTHER_REASON, Some("x"))).unwrap();
    }

    #[test]
    fn test_explanation_forbidden_for_listed_reasons() {
        let err =
            validate_survey(&survey("Encontré otra solución", Some("extra texto"))).unwrap_err();
        assert!(err.to_string().contains("Otro motivo"));
    }
}
