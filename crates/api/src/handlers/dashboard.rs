//! The dashboard handler: follow-up sweep, summary counters, and the
//! role-scoped filtered task list.

use axum::extract::{Query, State};
use axum::Json;
use serde::Serialize;
use taskdesk_core::permissions::{can, Action, TaskScope};
use taskdesk_core::task_status::STATUS_COMPLETED;
use taskdesk_db::models::notification::Notification;
use taskdesk_db::models::task::TaskFilters;
use taskdesk_db::repositories::{NotificationRepo, TaskRepo};

use crate::error::AppResult;
use crate::handlers::tasks::TaskItem;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Dashboard payload.
#[derive(Debug, Serialize)]
pub struct DashboardData {
    /// Count of tasks assigned to the requesting identity, unfiltered.
    pub total_tasks: usize,
    /// Count of those that are completed.
    pub completed_tasks: usize,
    /// The personal task list (always `assigned_to = self`), newest first.
    pub my_tasks: Vec<TaskItem>,
    /// The broad role-scoped list with the request's filters applied.
    pub tasks: Vec<TaskItem>,
    /// Unread notifications for the requesting identity.
    pub notifications: Vec<Notification>,
}

/// GET /api/v1/dashboard
///
/// Loading the dashboard is also what triggers the follow-up sweep for
/// staff: overdue, uncompleted tasks they created each produce at most one
/// unread notification, no matter how often the page is loaded.
pub async fn dashboard(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(filters): Query<TaskFilters>,
) -> AppResult<Json<DataResponse<DashboardData>>> {
    if can(auth.role, Action::ViewAllTasks) {
        notify_follow_up(&state, auth.user_id).await?;
    }

    // Personal list and counters are computed independently of any filters.
    let my_tasks = TaskRepo::list_for_assignee(&state.pool, auth.user_id).await?;
    let total_tasks = my_tasks.len();
    let completed_tasks = my_tasks
        .iter()
        .filter(|t| t.status == STATUS_COMPLETED)
        .count();

    let filters = if can(auth.role, Action::ViewAllTasks) {
        filters
    } else {
        filters.reduced_for_user()
    };

    let scope = TaskScope::for_identity(auth.role, auth.user_id);
    let tasks = TaskRepo::list_scoped(&state.pool, scope, &filters).await?;

    let notifications = NotificationRepo::list_unread(&state.pool, auth.user_id).await?;

    let data = DashboardData {
        total_tasks,
        completed_tasks,
        my_tasks: my_tasks.into_iter().map(TaskItem::derive).collect(),
        tasks: tasks.into_iter().map(TaskItem::derive).collect(),
        notifications,
    };

    Ok(Json(DataResponse { data }))
}

/// Scan for overdue follow-ups created by `creator_id` and insert a
/// notification for each, deduplicated per (user, task) pair.
async fn notify_follow_up(state: &AppState, creator_id: i64) -> AppResult<()> {
    let due = TaskRepo::list_follow_up_due(&state.pool, creator_id).await?;
    for task in due {
        let message = format!(
            "Follow up on task: '{}' - {}",
            task.title,
            task.follow_up_message.as_deref().unwrap_or("")
        );
        let inserted =
            NotificationRepo::create_if_absent(&state.pool, creator_id, task.id, &message).await?;
        if inserted {
            tracing::debug!(task_id = task.id, user_id = creator_id, "follow-up notification created");
        }
    }
    Ok(())
}
