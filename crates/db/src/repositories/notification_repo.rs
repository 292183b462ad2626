//! Repository for the `notifications` table.

use sqlx::PgPool;
use taskdesk_core::types::DbId;

use crate::models::notification::Notification;

/// Column list for `notifications` queries.
const COLUMNS: &str = "id, user_id, task_id, message, is_read, created_at";

/// Provides operations for follow-up notifications.
pub struct NotificationRepo;

impl NotificationRepo {
    /// Insert a notification unless an unread one already exists for the same
    /// (user, task) pair. Returns `true` if a row was inserted.
    ///
    /// The insert races safely against concurrent sweeps: the conflict target
    /// is the partial unique index `uq_notifications_unread_pair`.
    pub async fn create_if_absent(
        pool: &PgPool,
        user_id: DbId,
        task_id: DbId,
        message: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO notifications (user_id, task_id, message)
             VALUES ($1, $2, $3)
             ON CONFLICT (user_id, task_id) WHERE NOT is_read DO NOTHING",
        )
        .bind(user_id)
        .bind(task_id)
        .bind(message)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List a user's unread notifications, newest first.
    pub async fn list_unread(pool: &PgPool, user_id: DbId) -> Result<Vec<Notification>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM notifications
             WHERE user_id = $1 AND NOT is_read
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Mark a single notification as read, scoped to its owner.
    ///
    /// Returns `true` if a row was updated; a nonexistent or foreign
    /// notification updates nothing.
    pub async fn mark_read(
        pool: &PgPool,
        notification_id: DbId,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE notifications SET is_read = TRUE
             WHERE id = $1 AND user_id = $2 AND NOT is_read",
        )
        .bind(notification_id)
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Get the number of unread notifications for a user.
    pub async fn unread_count(pool: &PgPool, user_id: DbId) -> Result<i64, sqlx::Error> {
        let count: Option<i64> = sqlx::query_scalar(
            "SELECT COUNT(*) FROM notifications WHERE user_id = $1 AND NOT is_read",
        )
        .bind(user_id)
        .fetch_one(pool)
        .await?;
        Ok(count.unwrap_or(0))
    }
}
