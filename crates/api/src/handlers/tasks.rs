//! Handlers for the `/tasks` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use taskdesk_core::error::CoreError;
use taskdesk_core::permissions::{can, can_view_task, Action};
use taskdesk_core::task_status::{is_failed, validate_success_percent, TaskStatus};
use taskdesk_core::types::DbId;
use taskdesk_db::models::task::{CreateTask, Task, UpdateTask};
use taskdesk_db::repositories::TaskRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// A task annotated with the derived (never stored) failed flag.
#[derive(Debug, Serialize)]
pub struct TaskItem {
    #[serde(flatten)]
    pub task: Task,
    pub is_failed: bool,
}

impl TaskItem {
    /// Evaluate the failed flag against today's date.
    pub fn derive(task: Task) -> TaskItem {
        let today = Utc::now().date_naive();
        let failed = is_failed(task.end_date, &task.status, today);
        TaskItem {
            task,
            is_failed: failed,
        }
    }
}

/// POST /api/v1/tasks
///
/// Create a task assigned to another user. Staff only; the creating identity
/// becomes `assigned_by` and the task starts at To Do.
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreateTaskRequest>,
) -> AppResult<(StatusCode, Json<TaskItem>)> {
    if !can(auth.role, Action::CreateTask) {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only admins and bosses may create tasks".into(),
        )));
    }
    if input.title.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "title must not be empty".into(),
        )));
    }

    let create_dto = CreateTask {
        title: input.title,
        description: input.description.unwrap_or_default(),
        task_type: input.task_type,
        level: input.level,
        assigned_to: input.assigned_to,
        leader_id: input.leader_id,
        project_id: input.project_id,
        start_date: input.start_date,
        end_date: input.end_date,
        follow_up_date: input.follow_up_date,
        follow_up_message: input.follow_up_message,
    };

    let task = TaskRepo::create(&state.pool, &create_dto, auth.user_id).await?;
    Ok((StatusCode::CREATED, Json(TaskItem::derive(task))))
}

/// Request body for `POST /tasks`.
#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    pub title: String,
    pub description: Option<String>,
    pub task_type: String,
    pub level: String,
    pub assigned_to: DbId,
    pub leader_id: Option<DbId>,
    pub project_id: Option<DbId>,
    pub start_date: Option<chrono::NaiveDate>,
    pub end_date: Option<chrono::NaiveDate>,
    pub follow_up_date: Option<chrono::NaiveDate>,
    pub follow_up_message: Option<String>,
}

/// GET /api/v1/tasks/{id}
///
/// Fetch a single task. Visibility is role-gated: a refused check is a 403,
/// never an empty result.
pub async fn get_by_id(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<TaskItem>> {
    let task = TaskRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Task", id }))?;

    if !can_view_task(
        auth.role,
        auth.user_id,
        task.assigned_to,
        task.assigned_by,
        task.leader_id,
    ) {
        return Err(AppError::Core(CoreError::Forbidden(
            "You do not have permission to view this task.".into(),
        )));
    }

    Ok(Json(TaskItem::derive(task)))
}

/// PATCH /api/v1/tasks/{id}
///
/// Apply a partial update. Non-staff identities may only touch their own
/// completion percentage and comment; all other submitted fields are
/// ignored. A percent change always rewrites the status in the same
/// statement (To Do / In Progress / Completed by range).
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTask>,
) -> AppResult<Json<TaskItem>> {
    let task = TaskRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Task", id }))?;

    if !can_view_task(
        auth.role,
        auth.user_id,
        task.assigned_to,
        task.assigned_by,
        task.leader_id,
    ) {
        return Err(AppError::Core(CoreError::Forbidden(
            "You do not have permission to update this task.".into(),
        )));
    }

    let patch = if auth.role.is_staff() {
        input
    } else {
        // Assignees report progress; everything else stays as the staff set it.
        UpdateTask {
            success_percent: input.success_percent,
            user_comment: input.user_comment,
            ..Default::default()
        }
    };

    if let Some(percent) = patch.success_percent {
        validate_success_percent(percent).map_err(AppError::Core)?;
    }
    if let Some(status) = &patch.status {
        if TaskStatus::parse(status).is_none() {
            return Err(AppError::Core(CoreError::Validation(format!(
                "unknown status: {status}"
            ))));
        }
    }

    let task = TaskRepo::update(&state.pool, id, &patch)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Task", id }))?;

    Ok(Json(TaskItem::derive(task)))
}

/// DELETE /api/v1/tasks/{id}
///
/// Remove a task. Staff only. Returns 204 No Content.
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !can(auth.role, Action::DeleteTask) {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only admins and bosses may delete tasks".into(),
        )));
    }

    let deleted = TaskRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound { entity: "Task", id }));
    }
    Ok(StatusCode::NO_CONTENT)
}
