use anyhow::Context as _;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, SqlErr, TransactionError, TransactionTrait,
    sea_query::{Expr, OnConflict},
};
use uuid::Uuid;

use friendlytask_schema::{comments, likes, tasks, tips, users};

use crate::domain::repository::{
    CommentRepository, LikeRepository, TaskRepository, TipRepository, UserRepository,
};
use crate::domain::types::{Comment, LikeState, Task, Tip, User};
use crate::error::ServiceError;

/// Flatten sea-orm's transaction error wrapper back into our error type.
fn txn_err(e: TransactionError<ServiceError>) -> ServiceError {
    match e {
        TransactionError::Connection(db) => ServiceError::Internal(db.into()),
        TransactionError::Transaction(e) => e,
    }
}

/// Map a unique-constraint violation on the users table to the duplicate
/// error for the column it names.
fn user_unique_violation(msg: &str) -> Option<ServiceError> {
    if msg.contains("username") {
        Some(ServiceError::DuplicateUsername)
    } else if msg.contains("email") {
        Some(ServiceError::DuplicateEmail)
    } else {
        None
    }
}

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ServiceError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        Ok(model.map(user_from_model))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ServiceError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find user by email")?;
        Ok(model.map(user_from_model))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, ServiceError> {
        let model = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.db)
            .await
            .context("find user by username")?;
        Ok(model.map(user_from_model))
    }

    async fn create(&self, user: &User) -> Result<(), ServiceError> {
        let insert = users::ActiveModel {
            id: Set(user.id),
            username: Set(user.username.clone()),
            email: Set(user.email.clone()),
            password_hash: Set(user.password_hash.clone()),
            tokens: Set(user.tokens),
            dark_mode: Set(user.dark_mode),
            profile_picture: Set(user.profile_picture.clone()),
            created_at: Set(user.created_at),
        }
        .insert(&self.db)
        .await;

        match insert {
            Ok(_) => Ok(()),
            // The usecase pre-checks duplicates; the unique constraints are
            // the authoritative guard under concurrent registrations.
            Err(e) => {
                if let Some(SqlErr::UniqueConstraintViolation(msg)) = e.sql_err() {
                    if let Some(dup) = user_unique_violation(&msg) {
                        return Err(dup);
                    }
                }
                Err(anyhow::Error::new(e).context("create user").into())
            }
        }
    }

    async fn update_settings(
        &self,
        id: Uuid,
        username: Option<&str>,
        dark_mode: Option<bool>,
        profile_picture: Option<&str>,
    ) -> Result<(), ServiceError> {
        let mut am = users::ActiveModel {
            id: Set(id),
            ..Default::default()
        };
        if let Some(username) = username {
            am.username = Set(username.to_owned());
        }
        if let Some(dark_mode) = dark_mode {
            am.dark_mode = Set(dark_mode);
        }
        if let Some(picture) = profile_picture {
            am.profile_picture = Set(picture.to_owned());
        }
        match am.update(&self.db).await {
            Ok(_) => Ok(()),
            // A racer can take the username between the usecase pre-check
            // and this update; the unique constraint still reports it.
            Err(e) => {
                if let Some(SqlErr::UniqueConstraintViolation(msg)) = e.sql_err() {
                    if let Some(dup) = user_unique_violation(&msg) {
                        return Err(dup);
                    }
                }
                Err(anyhow::Error::new(e).context("update user settings").into())
            }
        }
    }
}

fn user_from_model(model: users::Model) -> User {
    User {
        id: model.id,
        username: model.username,
        email: model.email,
        password_hash: model.password_hash,
        tokens: model.tokens,
        dark_mode: model.dark_mode,
        profile_picture: model.profile_picture,
        created_at: model.created_at,
    }
}

// ── Task repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbTaskRepository {
    pub db: DatabaseConnection,
}

impl TaskRepository for DbTaskRepository {
    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Task>, ServiceError> {
        let models = tasks::Entity::find()
            .filter(tasks::Column::UserId.eq(user_id))
            .order_by_desc(tasks::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list tasks by user")?;
        Ok(models.into_iter().map(task_from_model).collect())
    }

    async fn create_within_budget(&self, task: &Task, budget: i32) -> Result<(), ServiceError> {
        let task = task.clone();
        self.db
            .transaction::<_, (), ServiceError>(|txn| {
                Box::pin(async move {
                    let incomplete = tasks::Entity::find()
                        .filter(tasks::Column::UserId.eq(task.user_id))
                        .filter(tasks::Column::Completed.eq(false))
                        .all(txn)
                        .await
                        .context("load incomplete tasks for budget check")?;
                    let committed: i32 =
                        incomplete.iter().map(|t| t.duration_minutes).sum();
                    if committed + task.duration_minutes > budget {
                        return Err(ServiceError::DailyBudgetExceeded);
                    }
                    tasks::ActiveModel {
                        id: Set(task.id),
                        user_id: Set(task.user_id),
                        title: Set(task.title.clone()),
                        duration_minutes: Set(task.duration_minutes),
                        started_at: Set(task.started_at),
                        completed: Set(task.completed),
                        created_at: Set(task.created_at),
                    }
                    .insert(txn)
                    .await
                    .context("insert task")?;
                    Ok(())
                })
            })
            .await
            .map_err(txn_err)
    }

    async fn set_started(&self, id: Uuid, now: DateTime<Utc>) -> Result<bool, ServiceError> {
        let result = tasks::Entity::update_many()
            .filter(tasks::Column::Id.eq(id))
            .col_expr(tasks::Column::StartedAt, Expr::value(Some(now)))
            .exec(&self.db)
            .await
            .context("set task start time")?;
        Ok(result.rows_affected > 0)
    }

    async fn complete(&self, id: Uuid, reward_tokens: i32) -> Result<bool, ServiceError> {
        self.db
            .transaction::<_, bool, ServiceError>(|txn| {
                Box::pin(async move {
                    let task = tasks::Entity::find_by_id(id)
                        .one(txn)
                        .await
                        .context("find task to complete")?
                        .ok_or(ServiceError::TaskNotFound)?;
                    if task.completed {
                        return Ok(false);
                    }
                    let user_id = task.user_id;
                    tasks::Entity::update_many()
                        .filter(tasks::Column::Id.eq(id))
                        .col_expr(tasks::Column::Completed, Expr::value(true))
                        .exec(txn)
                        .await
                        .context("mark task completed")?;
                    // Award rides in the same transaction as the flag flip.
                    users::Entity::update_many()
                        .filter(users::Column::Id.eq(user_id))
                        .col_expr(
                            users::Column::Tokens,
                            Expr::col(users::Column::Tokens).add(reward_tokens),
                        )
                        .exec(txn)
                        .await
                        .context("award completion tokens")?;
                    Ok(true)
                })
            })
            .await
            .map_err(txn_err)
    }
}

fn task_from_model(model: tasks::Model) -> Task {
    Task {
        id: model.id,
        user_id: model.user_id,
        title: model.title,
        duration_minutes: model.duration_minutes,
        started_at: model.started_at,
        completed: model.completed,
        created_at: model.created_at,
    }
}

// ── Tip repository ───────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbTipRepository {
    pub db: DatabaseConnection,
}

impl TipRepository for DbTipRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Tip>, ServiceError> {
        let model = tips::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find tip by id")?;
        Ok(model.map(tip_from_model))
    }

    async fn list(&self) -> Result<Vec<Tip>, ServiceError> {
        let models = tips::Entity::find()
            .order_by_desc(tips::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list tips")?;
        Ok(models.into_iter().map(tip_from_model).collect())
    }

    async fn create_spending_tokens(&self, tip: &Tip, cost: i32) -> Result<(), ServiceError> {
        let tip = tip.clone();
        self.db
            .transaction::<_, (), ServiceError>(|txn| {
                Box::pin(async move {
                    // Guarded decrement: zero rows means the balance was
                    // below cost and nothing is written.
                    let spent = users::Entity::update_many()
                        .filter(users::Column::Id.eq(tip.user_id))
                        .filter(users::Column::Tokens.gte(cost))
                        .col_expr(
                            users::Column::Tokens,
                            Expr::col(users::Column::Tokens).sub(cost),
                        )
                        .exec(txn)
                        .await
                        .context("spend tokens for tip")?;
                    if spent.rows_affected == 0 {
                        return Err(ServiceError::InsufficientTokens);
                    }
                    tips::ActiveModel {
                        id: Set(tip.id),
                        user_id: Set(tip.user_id),
                        content: Set(tip.content.clone()),
                        created_at: Set(tip.created_at),
                    }
                    .insert(txn)
                    .await
                    .context("insert tip")?;
                    Ok(())
                })
            })
            .await
            .map_err(txn_err)
    }
}

fn tip_from_model(model: tips::Model) -> Tip {
    Tip {
        id: model.id,
        user_id: model.user_id,
        content: model.content,
        created_at: model.created_at,
    }
}

// ── Comment repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbCommentRepository {
    pub db: DatabaseConnection,
}

impl CommentRepository for DbCommentRepository {
    async fn create(&self, comment: &Comment) -> Result<(), ServiceError> {
        comments::ActiveModel {
            id: Set(comment.id),
            user_id: Set(comment.user_id),
            tip_id: Set(comment.tip_id),
            content: Set(comment.content.clone()),
            created_at: Set(comment.created_at),
        }
        .insert(&self.db)
        .await
        .context("insert comment")?;
        Ok(())
    }

    async fn list_by_tip(&self, tip_id: Uuid) -> Result<Vec<Comment>, ServiceError> {
        let models = comments::Entity::find()
            .filter(comments::Column::TipId.eq(tip_id))
            .order_by_asc(comments::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list comments by tip")?;
        Ok(models.into_iter().map(comment_from_model).collect())
    }
}

fn comment_from_model(model: comments::Model) -> Comment {
    Comment {
        id: model.id,
        user_id: model.user_id,
        tip_id: model.tip_id,
        content: model.content,
        created_at: model.created_at,
    }
}

// ── Like repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbLikeRepository {
    pub db: DatabaseConnection,
}

impl LikeRepository for DbLikeRepository {
    async fn toggle(&self, user_id: Uuid, tip_id: Uuid) -> Result<LikeState, ServiceError> {
        self.db
            .transaction::<_, LikeState, ServiceError>(|txn| {
                Box::pin(async move {
                    let existing = likes::Entity::find_by_id((user_id, tip_id))
                        .one(txn)
                        .await
                        .context("find like")?;
                    if existing.is_some() {
                        likes::Entity::delete_by_id((user_id, tip_id))
                            .exec(txn)
                            .await
                            .context("delete like")?;
                        return Ok(LikeState::Unliked);
                    }
                    // ON CONFLICT DO NOTHING makes the composite pk the
                    // authoritative guard: if a concurrent toggle got there
                    // first the row count is 0 and the tip is liked either way.
                    likes::Entity::insert(likes::ActiveModel {
                        user_id: Set(user_id),
                        tip_id: Set(tip_id),
                        created_at: Set(Utc::now()),
                    })
                    .on_conflict(
                        OnConflict::columns([likes::Column::UserId, likes::Column::TipId])
                            .do_nothing()
                            .to_owned(),
                    )
                    .exec_without_returning(txn)
                    .await
                    .context("insert like")?;
                    Ok(LikeState::Liked)
                })
            })
            .await
            .map_err(txn_err)
    }
}
