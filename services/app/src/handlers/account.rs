use axum::{Json, extract::Multipart, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use crate::error::ServiceError;
use crate::identity::Identity;
use crate::state::AppState;
use crate::usecase::account::{
    AuthenticateUseCase, GetProfileUseCase, RegisterInput, RegisterUseCase, UpdateSettingsInput,
    UpdateSettingsUseCase,
};
use crate::usecase::token::issue_token;

// ── POST /auth/register ──────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<StatusCode, ServiceError> {
    let usecase = RegisterUseCase {
        repo: state.user_repo(),
    };
    usecase
        .execute(RegisterInput {
            username: body.username,
            email: body.email,
            password: body.password,
        })
        .await?;
    Ok(StatusCode::CREATED)
}

// ── POST /auth/login ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub expires: u64,
}

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ServiceError> {
    let usecase = AuthenticateUseCase {
        repo: state.user_repo(),
    };
    let user = usecase.execute(&body.email, &body.password).await?;
    let (access_token, expires) = issue_token(&user, &state.jwt_secret)?;
    Ok(Json(LoginResponse {
        access_token,
        expires,
    }))
}

// ── GET /users/@me ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct ProfileResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    pub tokens: i32,
    pub dark_mode: bool,
    pub profile_picture: String,
    #[serde(serialize_with = "friendlytask_core::serde::to_rfc3339")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

pub async fn get_me(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<ProfileResponse>, ServiceError> {
    let usecase = GetProfileUseCase {
        repo: state.user_repo(),
    };
    let user = usecase.execute(identity.user_id).await?;
    Ok(Json(ProfileResponse {
        id: user.id.to_string(),
        username: user.username,
        email: user.email,
        tokens: user.tokens,
        dark_mode: user.dark_mode,
        profile_picture: user.profile_picture,
        created_at: user.created_at,
    }))
}

// ── PATCH /users/@me/settings ────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateSettingsRequest {
    pub username: Option<String>,
    pub dark_mode: Option<bool>,
}

pub async fn update_settings(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<UpdateSettingsRequest>,
) -> Result<StatusCode, ServiceError> {
    let usecase = UpdateSettingsUseCase {
        repo: state.user_repo(),
        pictures: state.pictures.clone(),
    };
    usecase
        .execute(
            identity.user_id,
            UpdateSettingsInput {
                username: body.username,
                dark_mode: body.dark_mode,
                picture: None,
            },
        )
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── PUT /users/@me/picture ───────────────────────────────────────────────────

#[derive(Serialize)]
pub struct PictureResponse {
    pub profile_picture: String,
}

pub async fn upload_picture(
    identity: Identity,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<PictureResponse>, ServiceError> {
    let mut picture = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ServiceError::Internal(anyhow::anyhow!("read multipart field: {e}")))?
    {
        if field.name() != Some("picture") {
            continue;
        }
        let filename = field.file_name().unwrap_or("picture").to_owned();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ServiceError::Internal(anyhow::anyhow!("read picture bytes: {e}")))?;
        picture = Some((filename, bytes.to_vec()));
    }
    let Some(picture) = picture else {
        return Err(ServiceError::MissingData);
    };

    let usecase = UpdateSettingsUseCase {
        repo: state.user_repo(),
        pictures: state.pictures.clone(),
    };
    usecase
        .execute(
            identity.user_id,
            UpdateSettingsInput {
                username: None,
                dark_mode: None,
                picture: Some(picture),
            },
        )
        .await?;

    let profile = GetProfileUseCase {
        repo: state.user_repo(),
    }
    .execute(identity.user_id)
    .await?;
    Ok(Json(PictureResponse {
        profile_picture: profile.profile_picture,
    }))
}
