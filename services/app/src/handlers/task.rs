use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::types::Task;
use crate::error::ServiceError;
use crate::identity::Identity;
use crate::state::AppState;
use crate::usecase::task::{
    AddTaskInput, AddTaskUseCase, CompleteTaskUseCase, PlanDayUseCase, StartTaskUseCase,
};

#[derive(Serialize)]
pub struct TaskResponse {
    pub id: String,
    pub title: String,
    pub duration_minutes: i32,
    pub started_at: Option<String>,
    pub completed: bool,
    #[serde(serialize_with = "friendlytask_core::serde::to_rfc3339")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<Task> for TaskResponse {
    fn from(task: Task) -> Self {
        Self {
            id: task.id.to_string(),
            title: task.title,
            duration_minutes: task.duration_minutes,
            started_at: task
                .started_at
                .map(|t| t.to_rfc3339_opts(chrono::SecondsFormat::Secs, true)),
            completed: task.completed,
            created_at: task.created_at,
        }
    }
}

// ── GET /my-day ──────────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct DayPlanResponse {
    pub planned: Vec<TaskResponse>,
    pub started: Vec<TaskResponse>,
    pub overdue: Vec<TaskResponse>,
}

pub async fn get_my_day(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<DayPlanResponse>, ServiceError> {
    let usecase = PlanDayUseCase {
        repo: state.task_repo(),
    };
    let plan = usecase.execute(identity.user_id, Utc::now()).await?;
    Ok(Json(DayPlanResponse {
        planned: plan.planned.into_iter().map(Into::into).collect(),
        started: plan.started.into_iter().map(Into::into).collect(),
        overdue: plan.overdue.into_iter().map(Into::into).collect(),
    }))
}

// ── POST /tasks ──────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct AddTaskRequest {
    pub title: String,
    pub duration_minutes: i32,
}

pub async fn add_task(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<AddTaskRequest>,
) -> Result<(StatusCode, Json<TaskResponse>), ServiceError> {
    let usecase = AddTaskUseCase {
        repo: state.task_repo(),
    };
    let task = usecase
        .execute(
            identity.user_id,
            AddTaskInput {
                title: body.title,
                duration_minutes: body.duration_minutes,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(task.into())))
}

// ── POST /tasks/{id}/start ───────────────────────────────────────────────────

pub async fn start_task(
    _identity: Identity,
    State(state): State<AppState>,
    Path(task_id): Path<Uuid>,
) -> Result<StatusCode, ServiceError> {
    let usecase = StartTaskUseCase {
        repo: state.task_repo(),
    };
    usecase.execute(task_id, Utc::now()).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── POST /tasks/{id}/complete ────────────────────────────────────────────────

pub async fn complete_task(
    _identity: Identity,
    State(state): State<AppState>,
    Path(task_id): Path<Uuid>,
) -> Result<StatusCode, ServiceError> {
    let usecase = CompleteTaskUseCase {
        repo: state.task_repo(),
    };
    usecase.execute(task_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
