use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

/// Cap on the summed duration of a user's incomplete tasks, checked at
/// task creation. Completing a task frees budget again.
pub const DAILY_BUDGET_MINUTES: i32 = 480;

/// Tokens spent when posting a tip.
pub const TIP_COST_TOKENS: i32 = 20;

/// Tokens awarded the first time a task is completed.
pub const TASK_REWARD_TOKENS: i32 = 10;

/// Picture reference for accounts that never uploaded one.
pub const DEFAULT_PROFILE_PICTURE: &str = "default.png";

pub const TIP_CONTENT_MIN: usize = 10;
pub const TIP_CONTENT_MAX: usize = 140;
pub const COMMENT_CONTENT_MIN: usize = 5;
pub const COMMENT_CONTENT_MAX: usize = 140;

/// Registered account.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub tokens: i32,
    pub dark_mode: bool,
    pub profile_picture: String,
    pub created_at: DateTime<Utc>,
}

/// Daily task entry.
#[derive(Debug, Clone)]
pub struct Task {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub duration_minutes: i32,
    pub started_at: Option<DateTime<Utc>>,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

/// Task lifecycle state. Started vs Overdue is a function of wall-clock
/// time, so it is always computed fresh against a supplied `now`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    Planned,
    Started,
    Overdue,
    Completed,
}

impl Task {
    pub fn state(&self, now: DateTime<Utc>) -> TaskState {
        if self.completed {
            return TaskState::Completed;
        }
        match self.started_at {
            None => TaskState::Planned,
            Some(started_at) => {
                if started_at + Duration::minutes(self.duration_minutes as i64) > now {
                    TaskState::Started
                } else {
                    TaskState::Overdue
                }
            }
        }
    }
}

/// A user's day, partitioned by task state. Completed tasks are excluded.
#[derive(Debug, Default)]
pub struct DayPlan {
    pub planned: Vec<Task>,
    pub started: Vec<Task>,
    pub overdue: Vec<Task>,
}

/// Partition `tasks` by their state at `now`. Pure; never cached.
pub fn classify(tasks: Vec<Task>, now: DateTime<Utc>) -> DayPlan {
    let mut plan = DayPlan::default();
    for task in tasks {
        match task.state(now) {
            TaskState::Planned => plan.planned.push(task),
            TaskState::Started => plan.started.push(task),
            TaskState::Overdue => plan.overdue.push(task),
            TaskState::Completed => {}
        }
    }
    plan
}

/// Shared productivity tip.
#[derive(Debug, Clone)]
pub struct Tip {
    pub id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Comment on a tip.
#[derive(Debug, Clone)]
pub struct Comment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub tip_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Result of a like toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeState {
    Liked,
    Unliked,
}

impl LikeState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Liked => "liked",
            Self::Unliked => "unliked",
        }
    }
}

/// Validate a username: non-empty, at most 20 characters.
pub fn validate_username(username: &str) -> bool {
    let len = username.chars().count();
    (1..=20).contains(&len)
}

/// Minimal shape check: one `@` with a non-empty local part and a domain
/// containing a dot. Deliverability is not our problem.
pub fn validate_email(email: &str) -> bool {
    if email.chars().count() > 120 {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() {
        return false;
    }
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    !host.is_empty() && !tld.is_empty() && !domain.contains('@')
}
