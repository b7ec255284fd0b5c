#![allow(async_fn_in_trait)]

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::types::{Comment, LikeState, Task, Tip, User};
use crate::error::ServiceError;

/// Repository for accounts.
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ServiceError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ServiceError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, ServiceError>;
    async fn create(&self, user: &User) -> Result<(), ServiceError>;
    async fn update_settings(
        &self,
        id: Uuid,
        username: Option<&str>,
        dark_mode: Option<bool>,
        profile_picture: Option<&str>,
    ) -> Result<(), ServiceError>;
}

/// Repository for daily tasks.
pub trait TaskRepository: Send + Sync {
    /// Tasks owned by `user_id`, newest-first.
    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Task>, ServiceError>;

    /// Insert `task` in one transaction that first sums the durations of the
    /// owner's incomplete tasks; fails with `DailyBudgetExceeded` (and
    /// inserts nothing) if the sum plus the new duration passes `budget`.
    async fn create_within_budget(&self, task: &Task, budget: i32) -> Result<(), ServiceError>;

    /// Set the start time, resetting any previous one. Returns `false` if no
    /// such task exists.
    async fn set_started(&self, id: Uuid, now: DateTime<Utc>) -> Result<bool, ServiceError>;

    /// Mark the task completed and, on the first false-to-true transition
    /// only, award `reward_tokens` to the owner in the same transaction.
    /// Returns `true` if the flag transitioned. `TaskNotFound` if missing.
    async fn complete(&self, id: Uuid, reward_tokens: i32) -> Result<bool, ServiceError>;
}

/// Repository for tips.
pub trait TipRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Tip>, ServiceError>;

    /// All tips, newest-first.
    async fn list(&self) -> Result<Vec<Tip>, ServiceError>;

    /// Insert `tip` and deduct `cost` tokens from the author in one
    /// transaction; fails with `InsufficientTokens` (and inserts nothing)
    /// when the balance is below `cost`.
    async fn create_spending_tokens(&self, tip: &Tip, cost: i32) -> Result<(), ServiceError>;
}

/// Repository for tip comments.
pub trait CommentRepository: Send + Sync {
    async fn create(&self, comment: &Comment) -> Result<(), ServiceError>;

    /// Comments on a tip, oldest-first.
    async fn list_by_tip(&self, tip_id: Uuid) -> Result<Vec<Comment>, ServiceError>;
}

/// Repository for likes.
pub trait LikeRepository: Send + Sync {
    /// Atomically flip the (user, tip) like: delete it if present, insert it
    /// otherwise. The unique (user_id, tip_id) constraint is the
    /// authoritative guard against concurrent double-inserts.
    async fn toggle(&self, user_id: Uuid, tip_id: Uuid) -> Result<LikeState, ServiceError>;
}

/// Port for profile picture storage. Accepts the uploaded bytes and returns
/// the stable reference the account will carry.
pub trait PictureStore: Send + Sync {
    async fn save(&self, filename: &str, bytes: &[u8]) -> Result<String, ServiceError>;
}
