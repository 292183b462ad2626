//! Repository for the `tasks` table, including the role-scoped listing
//! that backs the dashboard.

use sqlx::PgPool;
use taskdesk_core::permissions::TaskScope;
use taskdesk_core::task_status::{derive_status, STATUS_FAILED_FILTER};
use taskdesk_core::types::DbId;

use crate::models::task::{CreateTask, Task, TaskFilters, UpdateTask};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, task_type, level, assigned_to, assigned_by, \
     leader_id, project_id, status, created_at, start_date, end_date, \
     follow_up_date, follow_up_message, success_percent, admin_comment, user_comment";

/// Column list qualified with the `t` alias, for joined queries.
const T_COLUMNS: &str = "t.id, t.title, t.description, t.task_type, t.level, t.assigned_to, \
     t.assigned_by, t.leader_id, t.project_id, t.status, t.created_at, t.start_date, \
     t.end_date, t.follow_up_date, t.follow_up_message, t.success_percent, \
     t.admin_comment, t.user_comment";

/// Provides CRUD and scoped-listing operations for tasks.
pub struct TaskRepo;

impl TaskRepo {
    /// Insert a new task, returning the created row.
    ///
    /// New tasks always start at To Do with zero percent; `assigned_by` is
    /// the creating identity.
    pub async fn create(
        pool: &PgPool,
        input: &CreateTask,
        assigned_by: DbId,
    ) -> Result<Task, sqlx::Error> {
        let query = format!(
            "INSERT INTO tasks (title, description, task_type, level, assigned_to, assigned_by,
                                leader_id, project_id, start_date, end_date,
                                follow_up_date, follow_up_message)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.task_type)
            .bind(&input.level)
            .bind(input.assigned_to)
            .bind(assigned_by)
            .bind(input.leader_id)
            .bind(input.project_id)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(input.follow_up_date)
            .bind(&input.follow_up_message)
            .fetch_one(pool)
            .await
    }

    /// Find a task by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Task>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tasks WHERE id = $1");
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// The personal task list: everything assigned to `user_id`, newest
    /// first. Always unfiltered; backs the dashboard summary counters.
    pub async fn list_for_assignee(pool: &PgPool, user_id: DbId) -> Result<Vec<Task>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tasks
             WHERE assigned_to = $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// The broad, role-scoped task listing with optional AND-combined
    /// filters, newest first.
    ///
    /// The virtual status `"Failed"` resolves to
    /// `end_date < CURRENT_DATE AND status != 'Completed'`. Substring
    /// filters are case-insensitive (ILIKE).
    pub async fn list_scoped(
        pool: &PgPool,
        scope: TaskScope,
        filters: &TaskFilters,
    ) -> Result<Vec<Task>, sqlx::Error> {
        let scope_predicate = match scope {
            TaskScope::All => "TRUE",
            TaskScope::CreatedOrLed(_) => "(t.assigned_by = $9 OR t.leader_id = $9)",
            TaskScope::AssignedTo(_) => "t.assigned_to = $9",
        };

        let query = format!(
            "SELECT {T_COLUMNS} FROM tasks t
             LEFT JOIN users assignee ON assignee.id = t.assigned_to
             LEFT JOIN users leader ON leader.id = t.leader_id
             LEFT JOIN projects p ON p.id = t.project_id
             WHERE {scope_predicate}
               AND ($1::TEXT IS NULL OR t.title ILIKE '%' || $1 || '%')
               AND ($2::TEXT IS NULL OR CASE
                        WHEN $2 = '{STATUS_FAILED_FILTER}'
                        THEN t.end_date < CURRENT_DATE AND t.status <> 'Completed'
                        ELSE t.status = $2
                    END)
               AND ($3::TEXT IS NULL OR t.level = $3)
               AND ($4::TEXT IS NULL OR t.task_type = $4)
               AND ($5::TEXT IS NULL OR assignee.section = $5)
               AND ($6::TEXT IS NULL OR assignee.username ILIKE '%' || $6 || '%')
               AND ($7::TEXT IS NULL OR leader.username ILIKE '%' || $7 || '%')
               AND ($8::TEXT IS NULL OR p.description ILIKE '%' || $8 || '%')
             ORDER BY t.created_at DESC, t.id DESC"
        );

        let q = sqlx::query_as::<_, Task>(&query)
            .bind(&filters.search)
            .bind(&filters.status)
            .bind(&filters.level)
            .bind(&filters.task_type)
            .bind(&filters.section)
            .bind(&filters.man)
            .bind(&filters.leader)
            .bind(&filters.project);

        let q = match scope {
            TaskScope::All => q,
            TaskScope::CreatedOrLed(id) | TaskScope::AssignedTo(id) => q.bind(id),
        };

        q.fetch_all(pool).await
    }

    /// Tasks the given creator should be reminded about: follow-up date
    /// reached, not completed, created by them.
    pub async fn list_follow_up_due(
        pool: &PgPool,
        assigned_by: DbId,
    ) -> Result<Vec<Task>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tasks
             WHERE follow_up_date <= CURRENT_DATE
               AND status <> 'Completed'
               AND assigned_by = $1
             ORDER BY follow_up_date, id"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(assigned_by)
            .fetch_all(pool)
            .await
    }

    /// Apply a task patch. Only non-`None` fields are applied.
    ///
    /// When the patch carries `success_percent`, the stored status is derived
    /// from it in the same statement, overriding any status in the patch.
    /// Patches without a percent may still set status directly. Returns
    /// `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTask,
    ) -> Result<Option<Task>, sqlx::Error> {
        let status = match input.success_percent {
            Some(percent) => Some(derive_status(percent).as_str().to_string()),
            None => input.status.clone(),
        };

        let query = format!(
            "UPDATE tasks SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                task_type = COALESCE($4, task_type),
                level = COALESCE($5, level),
                assigned_to = COALESCE($6, assigned_to),
                leader_id = COALESCE($7, leader_id),
                project_id = COALESCE($8, project_id),
                status = COALESCE($9, status),
                start_date = COALESCE($10, start_date),
                end_date = COALESCE($11, end_date),
                follow_up_date = COALESCE($12, follow_up_date),
                follow_up_message = COALESCE($13, follow_up_message),
                success_percent = COALESCE($14, success_percent),
                admin_comment = COALESCE($15, admin_comment),
                user_comment = COALESCE($16, user_comment)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.task_type)
            .bind(&input.level)
            .bind(input.assigned_to)
            .bind(input.leader_id)
            .bind(input.project_id)
            .bind(status)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(input.follow_up_date)
            .bind(&input.follow_up_message)
            .bind(input.success_percent)
            .bind(&input.admin_comment)
            .bind(&input.user_comment)
            .fetch_optional(pool)
            .await
    }

    /// Delete a task by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
