//! Task entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use taskdesk_core::types::{Date, DbId, Timestamp};

/// A task row from the `tasks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Task {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub task_type: String,
    pub level: String,
    pub assigned_to: DbId,
    pub assigned_by: DbId,
    pub leader_id: Option<DbId>,
    pub project_id: Option<DbId>,
    /// One of `"To Do"`, `"In Progress"`, `"Completed"`.
    pub status: String,
    pub created_at: Timestamp,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub follow_up_date: Option<Date>,
    pub follow_up_message: Option<String>,
    pub success_percent: f64,
    pub admin_comment: Option<String>,
    pub user_comment: Option<String>,
}

/// DTO for creating a new task. `assigned_by` comes from the authenticated
/// identity, `status` always starts at To Do.
#[derive(Debug, Clone)]
pub struct CreateTask {
    pub title: String,
    pub description: String,
    pub task_type: String,
    pub level: String,
    pub assigned_to: DbId,
    pub leader_id: Option<DbId>,
    pub project_id: Option<DbId>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub follow_up_date: Option<Date>,
    pub follow_up_message: Option<String>,
}

/// DTO for updating an existing task. All fields are optional; absent fields
/// are left unchanged. When `success_percent` is present, the repository
/// derives `status` from it and ignores any status supplied here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTask {
    pub title: Option<String>,
    pub description: Option<String>,
    pub task_type: Option<String>,
    pub level: Option<String>,
    pub assigned_to: Option<DbId>,
    pub leader_id: Option<DbId>,
    pub project_id: Option<DbId>,
    pub status: Option<String>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub follow_up_date: Option<Date>,
    pub follow_up_message: Option<String>,
    pub success_percent: Option<f64>,
    pub admin_comment: Option<String>,
    pub user_comment: Option<String>,
}

/// Optional, AND-combined filters for the broad task listing.
///
/// `status` accepts the stored values plus the virtual `"Failed"`, which is
/// resolved to `end_date < today AND status != Completed` at query time.
/// All substring matches are case-insensitive (ILIKE).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskFilters {
    /// Substring match on title.
    pub search: Option<String>,
    pub status: Option<String>,
    pub level: Option<String>,
    pub task_type: Option<String>,
    /// Exact match on the assignee's section (staff only).
    pub section: Option<String>,
    /// Substring match on the assignee's username (staff only).
    pub man: Option<String>,
    /// Substring match on the leader's username (staff only).
    pub leader: Option<String>,
    /// Substring match on the linked project's description (staff only).
    pub project: Option<String>,
}

impl TaskFilters {
    /// Strip the filters the `user` role may not apply; its scope is already
    /// narrowed to its own tasks.
    pub fn reduced_for_user(mut self) -> TaskFilters {
        self.section = None;
        self.man = None;
        self.leader = None;
        self.project = None;
        self
    }
}
