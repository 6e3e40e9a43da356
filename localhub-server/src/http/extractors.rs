//! Custom Axum extractors

use std::sync::Arc;

use axum::extract::{FromRequestParts, Path};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use crate::models::{DirectoryKind, ValidationError};

use super::error::ApiError;
use super::server::AppState;

/// Extract and validate a numeric id from the path
pub struct ValidId(pub i64);

impl<S> FromRequestParts<S> for ValidId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::Validation(ValidationError::Empty { field: "id" }))?;

        let id = raw
            .parse::<i64>()
            .ok()
            .filter(|id| *id > 0)
            .ok_or(ApiError::Validation(ValidationError::InvalidFormat {
                field: "id",
                reason: "must be a positive integer",
            }))?;

        Ok(Self(id))
    }
}

/// Extract and validate a directory kind from the path
pub struct ValidKind(pub DirectoryKind);

impl<S> FromRequestParts<S> for ValidKind
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| {
                ApiError::Validation(ValidationError::Empty {
                    field: "directory kind",
                })
            })?;

        Ok(Self(DirectoryKind::parse(&raw)?))
    }
}

/// Admin guard: requires `Authorization: Bearer <token>` matching the
/// configured secret. This is the seam where a real JWT verifier would
/// plug in; token issuance is deliberately out of scope.
pub struct AdminToken;

impl FromRequestParts<Arc<AppState>> for AdminToken {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or(ApiError::Unauthorized)?;

        let token = header.strip_prefix("Bearer ").ok_or(ApiError::Unauthorized)?;

        if token.is_empty() || token != state.admin_secret {
            return Err(ApiError::Unauthorized);
        }

        Ok(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;
    use sqlx::mysql::MySqlPoolOptions;

    fn state_with_secret(secret: &str) -> Arc<AppState> {
        // connect_lazy never touches the network
        let pool = MySqlPoolOptions::new()
            .connect_lazy("mysql://root@localhost/test")
            .expect("lazy pool");
        Arc::new(AppState {
            pool,
            admin_secret: secret.to_owned(),
        })
    }

    #[tokio::test]
    async fn admin_token_accepts_matching_bearer() {
        let state = state_with_secret("hunter2");
        let (mut parts, _) = Request::builder()
            .uri("/api/admin/stats")
            .header(AUTHORIZATION, "Bearer hunter2")
            .body(())
            .unwrap()
            .into_parts();

        assert!(AdminToken::from_request_parts(&mut parts, &state)
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn admin_token_rejects_wrong_token() {
        let state = state_with_secret("hunter2");
        let (mut parts, _) = Request::builder()
            .uri("/api/admin/stats")
            .header(AUTHORIZATION, "Bearer wrong")
            .body(())
            .unwrap()
            .into_parts();

        let err = AdminToken::from_request_parts(&mut parts, &state)
            .await
            .err()
            .expect("should reject");
        assert!(matches!(err, ApiError::Unauthorized));
    }

    #[tokio::test]
    async fn admin_token_rejects_missing_header() {
        let state = state_with_secret("hunter2");
        let (mut parts, _) = Request::builder()
            .uri("/api/admin/stats")
            .body(())
            .unwrap()
            .into_parts();

        let err = AdminToken::from_request_parts(&mut parts, &state)
            .await
            .err()
            .expect("should reject");
        assert!(matches!(err, ApiError::Unauthorized));
    }
}
