use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use crate::errors::AppError;

/// Identity headers injected by the auth proxy in front of this service.
pub const USER_ID_HEADER: &str = "x-user-id";
pub const SPECIALIST_MODE_HEADER: &str = "x-specialist-mode";

/// The current principal, threaded explicitly through every operation.
///
/// `specialist_mode` mirrors the client-side mode toggle: the same account
/// can browse as a customer or act as a specialist, and quote-side
/// operations require the specialist hat to be on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    pub user_id: Uuid,
    pub specialist_mode: bool,
}

impl Session {
    /// Authorization shared by the complete and cancel operations: only
    /// the request owner or the accepted specialist may act. Runs before
    /// any status inspection, so outsiders get the same 403 regardless of
    /// where the request is in its lifecycle.
    pub fn ensure_participant(
        self,
        owner: Uuid,
        accepted_specialist: Option<Uuid>,
    ) -> Result<(), AppError> {
        if self.user_id == owner || accepted_specialist == Some(self.user_id) {
            Ok(())
        } else {
            Err(AppError::Forbidden)
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| Uuid::parse_str(v).ok())
            .ok_or(AppError::Unauthorized)?;

        let specialist_mode = parts
            .headers
            .get(SPECIALIST_MODE_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Ok(Session {
            user_id,
            specialist_mode,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(request: Request<()>) -> Result<Session, AppError> {
        let (mut parts, _) = request.into_parts();
        Session::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn test_extracts_user_and_mode() {
        let user_id = Uuid::new_v4();
        let request = Request::builder()
            .header(USER_ID_HEADER, user_id.to_string())
            .header(SPECIALIST_MODE_HEADER, "true")
            .body(())
            .unwrap();
        let session = extract(request).await.unwrap();
        assert_eq!(session.user_id, user_id);
        assert!(session.specialist_mode);
    }

    #[tokio::test]
    async fn test_mode_defaults_to_customer() {
        let request = Request::builder()
            .header(USER_ID_HEADER, Uuid::new_v4().to_string())
            .body(())
            .unwrap();
        assert!(!extract(request).await.unwrap().specialist_mode);
    }

    #[tokio::test]
    async fn test_missing_identity_is_unauthorized() {
        let request = Request::builder().body(()).unwrap();
        assert!(matches!(
            extract(request).await,
            Err(AppError::Unauthorized)
        ));
    }

    #[tokio::test]
    async fn test_garbage_user_id_is_unauthorized() {
        let request = Request::builder()
            .header(USER_ID_HEADER, "not-a-uuid")
            .body(())
            .unwrap();
        assert!(matches!(
            extract(request).await,
            Err(AppError::Unauthorized)
        ));
    }

    fn session_for(user_id: Uuid) -> Session {
        Session {
            user_id,
            specialist_mode: false,
        }
    }

    #[test]
    fn test_owner_is_a_participant() {
        let owner = Uuid::new_v4();
        session_for(owner).ensure_participant(owner, None).unwrap();
    }

    #[test]
    fn test_accepted_specialist_is_a_participant() {
        let specialist = Uuid::new_v4();
        session_for(specialist)
            .ensure_participant(Uuid::new_v4(), Some(specialist))
            .unwrap();
    }

    #[test]
    fn test_outsider_is_forbidden() {
        let err = session_for(Uuid::new_v4())
            .ensure_participant(Uuid::new_v4(), Some(Uuid::new_v4()))
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden));
    }

    #[test]
    fn test_outsider_forbidden_when_no_quote_accepted() {
        let err = session_for(Uuid::new_v4())
            .ensure_participant(Uuid::new_v4(), None)
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden));
    }
}
