use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::repository::TaskRepository;
use crate::domain::types::{DAILY_BUDGET_MINUTES, DayPlan, TASK_REWARD_TOKENS, Task, classify};
use crate::error::ServiceError;

// ── AddTask ──────────────────────────────────────────────────────────────────

pub struct AddTaskInput {
    pub title: String,
    pub duration_minutes: i32,
}

pub struct AddTaskUseCase<R: TaskRepository> {
    pub repo: R,
}

impl<R: TaskRepository> AddTaskUseCase<R> {
    pub async fn execute(&self, user_id: Uuid, input: AddTaskInput) -> Result<Task, ServiceError> {
        let title_len = input.title.chars().count();
        if !(1..=100).contains(&title_len) {
            return Err(ServiceError::InvalidTitle);
        }
        if input.duration_minutes < 1 {
            return Err(ServiceError::InvalidDuration);
        }
        // A single task longer than the budget can never fit, and capping it
        // here keeps the ledger's incomplete-minutes sum well inside i32.
        if input.duration_minutes > DAILY_BUDGET_MINUTES {
            return Err(ServiceError::DailyBudgetExceeded);
        }
        let task = Task {
            id: Uuid::now_v7(),
            user_id,
            title: input.title,
            duration_minutes: input.duration_minutes,
            started_at: None,
            completed: false,
            created_at: Utc::now(),
        };
        // Budget check and insert run in one transaction; on
        // DailyBudgetExceeded nothing is written.
        self.repo
            .create_within_budget(&task, DAILY_BUDGET_MINUTES)
            .await?;
        Ok(task)
    }
}

// ── StartTask ────────────────────────────────────────────────────────────────

pub struct StartTaskUseCase<R: TaskRepository> {
    pub repo: R,
}

impl<R: TaskRepository> StartTaskUseCase<R> {
    /// Starting an already-started task resets its window.
    pub async fn execute(&self, task_id: Uuid, now: DateTime<Utc>) -> Result<(), ServiceError> {
        if !self.repo.set_started(task_id, now).await? {
            return Err(ServiceError::TaskNotFound);
        }
        Ok(())
    }
}

// ── CompleteTask ─────────────────────────────────────────────────────────────

pub struct CompleteTaskUseCase<R: TaskRepository> {
    pub repo: R,
}

impl<R: TaskRepository> CompleteTaskUseCase<R> {
    /// Idempotent on the completed flag; the token award only happens on the
    /// first transition.
    pub async fn execute(&self, task_id: Uuid) -> Result<(), ServiceError> {
        self.repo.complete(task_id, TASK_REWARD_TOKENS).await?;
        Ok(())
    }
}

// ── PlanDay ──────────────────────────────────────────────────────────────────

pub struct PlanDayUseCase<R: TaskRepository> {
    pub repo: R,
}

impl<R: TaskRepository> PlanDayUseCase<R> {
    pub async fn execute(&self, user_id: Uuid, now: DateTime<Utc>) -> Result<DayPlan, ServiceError> {
        let tasks = self.repo.list_by_user(user_id).await?;
        Ok(classify(tasks, now))
    }
}
