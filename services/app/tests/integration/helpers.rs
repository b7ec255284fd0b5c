use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use friendlytask::domain::repository::{
    CommentRepository, LikeRepository, PictureStore, TaskRepository, TipRepository,
    UserRepository,
};
use friendlytask::domain::types::{
    Comment, DEFAULT_PROFILE_PICTURE, LikeState, Task, Tip, User,
};
use friendlytask::error::ServiceError;
use friendlytask::usecase::account::hash_password;

pub const TEST_PASSWORD: &str = "hunter2";

pub fn test_user(username: &str, tokens: i32) -> User {
    User {
        id: Uuid::now_v7(),
        username: username.to_owned(),
        email: format!("{username}@example.com"),
        password_hash: hash_password(TEST_PASSWORD).unwrap(),
        tokens,
        dark_mode: false,
        profile_picture: DEFAULT_PROFILE_PICTURE.to_owned(),
        created_at: Utc::now(),
    }
}

// ── MockUserRepo ─────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockUserRepo {
    pub users: Arc<Mutex<Vec<User>>>,
}

impl MockUserRepo {
    pub fn with(users: Vec<User>) -> Self {
        Self {
            users: Arc::new(Mutex::new(users)),
        }
    }

    pub fn empty() -> Self {
        Self::with(vec![])
    }

    pub fn count(&self) -> usize {
        self.users.lock().unwrap().len()
    }
}

impl UserRepository for MockUserRepo {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ServiceError> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ServiceError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, ServiceError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn create(&self, user: &User) -> Result<(), ServiceError> {
        self.users.lock().unwrap().push(user.clone());
        Ok(())
    }

    async fn update_settings(
        &self,
        id: Uuid,
        username: Option<&str>,
        dark_mode: Option<bool>,
        profile_picture: Option<&str>,
    ) -> Result<(), ServiceError> {
        let mut users = self.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(ServiceError::UserNotFound)?;
        if let Some(username) = username {
            user.username = username.to_owned();
        }
        if let Some(dark_mode) = dark_mode {
            user.dark_mode = dark_mode;
        }
        if let Some(picture) = profile_picture {
            user.profile_picture = picture.to_owned();
        }
        Ok(())
    }
}

// ── MockTaskRepo ─────────────────────────────────────────────────────────────

/// In-memory task store sharing a user list so the completion award is
/// observable, mirroring the single-transaction contract of the real store.
#[derive(Clone)]
pub struct MockTaskRepo {
    pub tasks: Arc<Mutex<Vec<Task>>>,
    pub users: Arc<Mutex<Vec<User>>>,
}

impl MockTaskRepo {
    pub fn for_users(users: &MockUserRepo) -> Self {
        Self {
            tasks: Arc::new(Mutex::new(vec![])),
            users: Arc::clone(&users.users),
        }
    }
}

impl TaskRepository for MockTaskRepo {
    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Task>, ServiceError> {
        let mut tasks: Vec<Task> = self
            .tasks
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect();
        tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(tasks)
    }

    async fn create_within_budget(&self, task: &Task, budget: i32) -> Result<(), ServiceError> {
        let mut tasks = self.tasks.lock().unwrap();
        let committed: i32 = tasks
            .iter()
            .filter(|t| t.user_id == task.user_id && !t.completed)
            .map(|t| t.duration_minutes)
            .sum();
        if committed + task.duration_minutes > budget {
            return Err(ServiceError::DailyBudgetExceeded);
        }
        tasks.push(task.clone());
        Ok(())
    }

    async fn set_started(&self, id: Uuid, now: DateTime<Utc>) -> Result<bool, ServiceError> {
        let mut tasks = self.tasks.lock().unwrap();
        match tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                task.started_at = Some(now);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn complete(&self, id: Uuid, reward_tokens: i32) -> Result<bool, ServiceError> {
        let mut tasks = self.tasks.lock().unwrap();
        let task = tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(ServiceError::TaskNotFound)?;
        if task.completed {
            return Ok(false);
        }
        task.completed = true;
        let mut users = self.users.lock().unwrap();
        if let Some(user) = users.iter_mut().find(|u| u.id == task.user_id) {
            user.tokens += reward_tokens;
        }
        Ok(true)
    }
}

// ── MockTipRepo ──────────────────────────────────────────────────────────────

/// In-memory tip store sharing a user list so the token spend is guarded and
/// observable, mirroring the single-transaction contract of the real store.
#[derive(Clone)]
pub struct MockTipRepo {
    pub tips: Arc<Mutex<Vec<Tip>>>,
    pub users: Arc<Mutex<Vec<User>>>,
}

impl MockTipRepo {
    pub fn for_users(users: &MockUserRepo) -> Self {
        Self {
            tips: Arc::new(Mutex::new(vec![])),
            users: Arc::clone(&users.users),
        }
    }

    pub fn count(&self) -> usize {
        self.tips.lock().unwrap().len()
    }
}

impl TipRepository for MockTipRepo {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Tip>, ServiceError> {
        Ok(self.tips.lock().unwrap().iter().find(|t| t.id == id).cloned())
    }

    async fn list(&self) -> Result<Vec<Tip>, ServiceError> {
        let mut tips = self.tips.lock().unwrap().clone();
        tips.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(tips)
    }

    async fn create_spending_tokens(&self, tip: &Tip, cost: i32) -> Result<(), ServiceError> {
        let mut users = self.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|u| u.id == tip.user_id)
            .ok_or(ServiceError::UserNotFound)?;
        if user.tokens < cost {
            return Err(ServiceError::InsufficientTokens);
        }
        user.tokens -= cost;
        self.tips.lock().unwrap().push(tip.clone());
        Ok(())
    }
}

// ── MockCommentRepo ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockCommentRepo {
    pub comments: Arc<Mutex<Vec<Comment>>>,
}

impl MockCommentRepo {
    pub fn empty() -> Self {
        Self {
            comments: Arc::new(Mutex::new(vec![])),
        }
    }
}

impl CommentRepository for MockCommentRepo {
    async fn create(&self, comment: &Comment) -> Result<(), ServiceError> {
        self.comments.lock().unwrap().push(comment.clone());
        Ok(())
    }

    async fn list_by_tip(&self, tip_id: Uuid) -> Result<Vec<Comment>, ServiceError> {
        let mut comments: Vec<Comment> = self
            .comments
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.tip_id == tip_id)
            .cloned()
            .collect();
        comments.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(comments)
    }
}

// ── MockLikeRepo ─────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockLikeRepo {
    pub likes: Arc<Mutex<HashSet<(Uuid, Uuid)>>>,
}

impl MockLikeRepo {
    pub fn empty() -> Self {
        Self {
            likes: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    pub fn count(&self) -> usize {
        self.likes.lock().unwrap().len()
    }
}

impl LikeRepository for MockLikeRepo {
    async fn toggle(&self, user_id: Uuid, tip_id: Uuid) -> Result<LikeState, ServiceError> {
        let mut likes = self.likes.lock().unwrap();
        if likes.remove(&(user_id, tip_id)) {
            Ok(LikeState::Unliked)
        } else {
            likes.insert((user_id, tip_id));
            Ok(LikeState::Liked)
        }
    }
}

// ── MockPictureStore ─────────────────────────────────────────────────────────

pub struct MockPictureStore;

impl PictureStore for MockPictureStore {
    async fn save(&self, filename: &str, _bytes: &[u8]) -> Result<String, ServiceError> {
        Ok(format!("stored-{filename}"))
    }
}
