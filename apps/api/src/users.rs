//! The identity-adjacent surface. Authentication itself lives in the proxy;
//! this only resolves the session principal to its profile row.

use axum::{extract::State, Json};

use crate::errors::AppError;
use crate::models::user::User;
use crate::session::Session;
use crate::state::AppState;

/// GET /api/v1/me
pub async fn handle_me(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<User>, AppError> {
    let user: User = sqlx::query_as("SELECT * FROM users WHERE id = $1")
        .bind(session.user_id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("User profile not found".to_string()))?;
    Ok(Json(user))
}
