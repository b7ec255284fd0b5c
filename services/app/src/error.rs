use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Domain error variants. Every variant except `Internal` is recoverable:
/// the request fails with a 4xx, nothing is mutated, the user may retry.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("username must be 1-20 characters")]
    InvalidUsername,
    #[error("email address is not well-formed")]
    InvalidEmail,
    #[error("password must not be empty")]
    MissingPassword,
    #[error("title must be 1-100 characters")]
    InvalidTitle,
    #[error("duration must be a positive number of minutes")]
    InvalidDuration,
    #[error("nothing to update")]
    MissingData,
    #[error("invalid access token")]
    InvalidToken,
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("user not found")]
    UserNotFound,
    #[error("task not found")]
    TaskNotFound,
    #[error("tip not found")]
    TipNotFound,
    #[error("username already taken")]
    DuplicateUsername,
    #[error("email already registered")]
    DuplicateEmail,
    #[error("content length out of range")]
    ContentLength,
    #[error("daily task budget of 480 minutes exceeded")]
    DailyBudgetExceeded,
    #[error("not enough tokens")]
    InsufficientTokens,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl ServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidUsername => "INVALID_USERNAME",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::MissingPassword => "MISSING_PASSWORD",
            Self::InvalidTitle => "INVALID_TITLE",
            Self::InvalidDuration => "INVALID_DURATION",
            Self::MissingData => "MISSING_DATA",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::TaskNotFound => "TASK_NOT_FOUND",
            Self::TipNotFound => "TIP_NOT_FOUND",
            Self::DuplicateUsername => "DUPLICATE_USERNAME",
            Self::DuplicateEmail => "DUPLICATE_EMAIL",
            Self::ContentLength => "CONTENT_LENGTH",
            Self::DailyBudgetExceeded => "DAILY_BUDGET_EXCEEDED",
            Self::InsufficientTokens => "INSUFFICIENT_TOKENS",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::InvalidUsername
            | Self::InvalidEmail
            | Self::MissingPassword
            | Self::InvalidTitle
            | Self::InvalidDuration
            | Self::MissingData => StatusCode::BAD_REQUEST,
            Self::InvalidToken | Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::UserNotFound | Self::TaskNotFound | Self::TipNotFound => StatusCode::NOT_FOUND,
            Self::DuplicateUsername | Self::DuplicateEmail => StatusCode::CONFLICT,
            Self::ContentLength | Self::DailyBudgetExceeded | Self::InsufficientTokens => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
