use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::types::{Comment, Tip};
use crate::error::ServiceError;
use crate::identity::Identity;
use crate::state::AppState;
use crate::usecase::tip::{
    AddCommentUseCase, GetTipUseCase, ListTipsUseCase, PostTipUseCase, ToggleLikeUseCase,
};

#[derive(Serialize)]
pub struct TipResponse {
    pub id: String,
    pub user_id: String,
    pub content: String,
    #[serde(serialize_with = "friendlytask_core::serde::to_rfc3339")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<Tip> for TipResponse {
    fn from(tip: Tip) -> Self {
        Self {
            id: tip.id.to_string(),
            user_id: tip.user_id.to_string(),
            content: tip.content,
            created_at: tip.created_at,
        }
    }
}

#[derive(Serialize)]
pub struct CommentResponse {
    pub id: String,
    pub user_id: String,
    pub content: String,
    #[serde(serialize_with = "friendlytask_core::serde::to_rfc3339")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id.to_string(),
            user_id: comment.user_id.to_string(),
            content: comment.content,
            created_at: comment.created_at,
        }
    }
}

// ── GET /tips ────────────────────────────────────────────────────────────────

pub async fn list_tips(
    _identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<Vec<TipResponse>>, ServiceError> {
    let usecase = ListTipsUseCase {
        tips: state.tip_repo(),
    };
    let tips = usecase.execute().await?;
    Ok(Json(tips.into_iter().map(Into::into).collect()))
}

// ── POST /tips ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct PostTipRequest {
    pub content: String,
}

pub async fn post_tip(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<PostTipRequest>,
) -> Result<(StatusCode, Json<TipResponse>), ServiceError> {
    let usecase = PostTipUseCase {
        tips: state.tip_repo(),
    };
    let tip = usecase.execute(identity.user_id, body.content).await?;
    Ok((StatusCode::CREATED, Json(tip.into())))
}

// ── GET /tips/{id} ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct TipThreadResponse {
    pub tip: TipResponse,
    pub comments: Vec<CommentResponse>,
}

pub async fn get_tip(
    _identity: Identity,
    State(state): State<AppState>,
    Path(tip_id): Path<Uuid>,
) -> Result<Json<TipThreadResponse>, ServiceError> {
    let usecase = GetTipUseCase {
        tips: state.tip_repo(),
        comments: state.comment_repo(),
    };
    let thread = usecase.execute(tip_id).await?;
    Ok(Json(TipThreadResponse {
        tip: thread.tip.into(),
        comments: thread.comments.into_iter().map(Into::into).collect(),
    }))
}

// ── POST /tips/{id}/comments ─────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct AddCommentRequest {
    pub content: String,
}

pub async fn add_comment(
    identity: Identity,
    State(state): State<AppState>,
    Path(tip_id): Path<Uuid>,
    Json(body): Json<AddCommentRequest>,
) -> Result<(StatusCode, Json<CommentResponse>), ServiceError> {
    let usecase = AddCommentUseCase {
        tips: state.tip_repo(),
        comments: state.comment_repo(),
    };
    let comment = usecase
        .execute(identity.user_id, tip_id, body.content)
        .await?;
    Ok((StatusCode::CREATED, Json(comment.into())))
}

// ── PUT /tips/{id}/like ──────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct LikeResponse {
    pub state: &'static str,
}

pub async fn toggle_like(
    identity: Identity,
    State(state): State<AppState>,
    Path(tip_id): Path<Uuid>,
) -> Result<Json<LikeResponse>, ServiceError> {
    let usecase = ToggleLikeUseCase {
        tips: state.tip_repo(),
        likes: state.like_repo(),
    };
    let like_state = usecase.execute(identity.user_id, tip_id).await?;
    Ok(Json(LikeResponse {
        state: like_state.as_str(),
    }))
}
