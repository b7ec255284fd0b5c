//! Bearer-token identity extractor for authenticated routes.

use axum::extract::FromRequestParts;
use http::request::Parts;
use uuid::Uuid;

use crate::error::ServiceError;
use crate::state::AppState;
use crate::usecase::token::validate_token;

/// Authenticated caller, extracted from `Authorization: Bearer <jwt>`.
///
/// Rejects with `InvalidToken` (401) when the header is absent, malformed,
/// expired, or signed with the wrong secret.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: Uuid,
}

impl FromRequestParts<AppState> for Identity {
    type Rejection = ServiceError;

    // axum-core 0.5 defines this as `fn -> impl Future + Send` (not `async fn`).
    // In Rust 1.82+ precise capturing, `async fn` captures lifetimes differently,
    // causing E0195. Fix: extract values synchronously, return a 'static async move block.
    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let bearer = parts
            .headers
            .get(http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.strip_prefix("Bearer "))
            .map(str::to_owned);
        let secret = state.jwt_secret.clone();

        async move {
            let token = bearer.ok_or(ServiceError::InvalidToken)?;
            let user_id = validate_token(&token, &secret)?;
            Ok(Self { user_id })
        }
    }
}
