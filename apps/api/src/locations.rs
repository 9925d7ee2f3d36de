//! Saved addresses, reusable across requests. Thin CRUD; rows are scoped
//! to their owner.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::location::LocationRow;
use crate::session::Session;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct CreateLocationPayload {
    pub street: String,
    pub exterior_number: String,
    pub interior_number: Option<String>,
    pub neighborhood: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
}

/// POST /api/v1/locations
pub async fn handle_create_location(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CreateLocationPayload>,
) -> Result<Json<LocationRow>, AppError> {
    for (field, value) in [
        ("street", &payload.street),
        ("exterior_number", &payload.exterior_number),
        ("neighborhood", &payload.neighborhood),
        ("city", &payload.city),
        ("state", &payload.state),
        ("postal_code", &payload.postal_code),
    ] {
        if value.trim().is_empty() {
            return Err(AppError::Validation(format!("'{field}' must not be empty")));
        }
    }

    let row: LocationRow = sqlx::query_as(
        r#"
        INSERT INTO locations
            (id, user_id, street, exterior_number, interior_number,
             neighborhood, city, state, postal_code)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(session.user_id)
    .bind(payload.street.trim())
    .bind(payload.exterior_number.trim())
    .bind(payload.interior_number.as_deref().map(str::trim))
    .bind(payload.neighborhood.trim())
    .bind(payload.city.trim())
    .bind(payload.state.trim())
    .bind(payload.postal_code.trim())
    .fetch_one(&state.db)
    .await?;
    Ok(Json(row))
}

/// GET /api/v1/locations — own addresses only.
pub async fn handle_list_locations(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<Vec<LocationRow>>, AppError> {
    let rows: Vec<LocationRow> =
        sqlx::query_as("SELECT * FROM locations WHERE user_id = $1 ORDER BY created_at DESC")
            .bind(session.user_id)
            .fetch_all(&state.db)
            .await?;
    Ok(Json(rows))
}

/// DELETE /api/v1/locations/:id
pub async fn handle_delete_location(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let result = sqlx::query("DELETE FROM locations WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(session.user_id)
        .execute(&state.db)
        .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Location {id} not found")));
    }
    Ok(Json(serde_json::json!({ "deleted": id })))
}
