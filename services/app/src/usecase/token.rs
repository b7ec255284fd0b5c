use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

use crate::domain::types::User;
use crate::error::ServiceError;

/// Access token lifetime in seconds (7 days).
pub const ACCESS_TOKEN_EXP: u64 = 60 * 60 * 24 * 7;

/// JWT claims for access tokens.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String,
    pub exp: u64,
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before UNIX epoch")
        .as_secs()
}

pub fn issue_token(user: &User, secret: &str) -> Result<(String, u64), ServiceError> {
    let exp = now_secs() + ACCESS_TOKEN_EXP;
    let claims = TokenClaims {
        sub: user.id.to_string(),
        exp,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| ServiceError::Internal(e.into()))?;
    Ok((token, exp))
}

/// Validate a bearer token and return the user id it names.
pub fn validate_token(token: &str, secret: &str) -> Result<Uuid, ServiceError> {
    let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
    validation.validate_exp = true;
    validation.required_spec_claims.clear();
    validation.set_required_spec_claims(&["exp", "sub"]);

    let data = decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|_| ServiceError::InvalidToken)?;

    data.claims
        .sub
        .parse::<Uuid>()
        .map_err(|_| ServiceError::InvalidToken)
}
