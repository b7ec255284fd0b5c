use chrono::Utc;
use uuid::Uuid;

use crate::domain::repository::{CommentRepository, LikeRepository, TipRepository};
use crate::domain::types::{
    COMMENT_CONTENT_MAX, COMMENT_CONTENT_MIN, Comment, LikeState, TIP_CONTENT_MAX,
    TIP_CONTENT_MIN, TIP_COST_TOKENS, Tip,
};
use crate::error::ServiceError;

// ── PostTip ──────────────────────────────────────────────────────────────────

pub struct PostTipUseCase<T: TipRepository> {
    pub tips: T,
}

impl<T: TipRepository> PostTipUseCase<T> {
    pub async fn execute(&self, user_id: Uuid, content: String) -> Result<Tip, ServiceError> {
        let len = content.chars().count();
        if !(TIP_CONTENT_MIN..=TIP_CONTENT_MAX).contains(&len) {
            return Err(ServiceError::ContentLength);
        }
        let tip = Tip {
            id: Uuid::now_v7(),
            user_id,
            content,
            created_at: Utc::now(),
        };
        // Token spend and tip insert commit together or not at all.
        self.tips
            .create_spending_tokens(&tip, TIP_COST_TOKENS)
            .await?;
        Ok(tip)
    }
}

// ── ListTips ─────────────────────────────────────────────────────────────────

pub struct ListTipsUseCase<T: TipRepository> {
    pub tips: T,
}

impl<T: TipRepository> ListTipsUseCase<T> {
    pub async fn execute(&self) -> Result<Vec<Tip>, ServiceError> {
        self.tips.list().await
    }
}

// ── GetTip ───────────────────────────────────────────────────────────────────

/// A tip together with its comment thread, oldest comment first.
#[derive(Debug)]
pub struct TipThread {
    pub tip: Tip,
    pub comments: Vec<Comment>,
}

pub struct GetTipUseCase<T: TipRepository, C: CommentRepository> {
    pub tips: T,
    pub comments: C,
}

impl<T: TipRepository, C: CommentRepository> GetTipUseCase<T, C> {
    pub async fn execute(&self, tip_id: Uuid) -> Result<TipThread, ServiceError> {
        let tip = self
            .tips
            .find_by_id(tip_id)
            .await?
            .ok_or(ServiceError::TipNotFound)?;
        let comments = self.comments.list_by_tip(tip_id).await?;
        Ok(TipThread { tip, comments })
    }
}

// ── AddComment ───────────────────────────────────────────────────────────────

pub struct AddCommentUseCase<T: TipRepository, C: CommentRepository> {
    pub tips: T,
    pub comments: C,
}

impl<T: TipRepository, C: CommentRepository> AddCommentUseCase<T, C> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        tip_id: Uuid,
        content: String,
    ) -> Result<Comment, ServiceError> {
        if self.tips.find_by_id(tip_id).await?.is_none() {
            return Err(ServiceError::TipNotFound);
        }
        let len = content.chars().count();
        if !(COMMENT_CONTENT_MIN..=COMMENT_CONTENT_MAX).contains(&len) {
            return Err(ServiceError::ContentLength);
        }
        let comment = Comment {
            id: Uuid::now_v7(),
            user_id,
            tip_id,
            content,
            created_at: Utc::now(),
        };
        self.comments.create(&comment).await?;
        Ok(comment)
    }
}

// ── ToggleLike ───────────────────────────────────────────────────────────────

pub struct ToggleLikeUseCase<T: TipRepository, L: LikeRepository> {
    pub tips: T,
    pub likes: L,
}

impl<T: TipRepository, L: LikeRepository> ToggleLikeUseCase<T, L> {
    pub async fn execute(&self, user_id: Uuid, tip_id: Uuid) -> Result<LikeState, ServiceError> {
        if self.tips.find_by_id(tip_id).await?.is_none() {
            return Err(ServiceError::TipNotFound);
        }
        self.likes.toggle(user_id, tip_id).await
    }
}
