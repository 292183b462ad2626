//! Notification entity model.

use serde::Serialize;
use sqlx::FromRow;
use taskdesk_core::types::{DbId, Timestamp};

/// A row from the `notifications` table.
///
/// At most one unread row may exist per (user_id, task_id) pair; the partial
/// unique index `uq_notifications_unread_pair` enforces this.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Notification {
    pub id: DbId,
    pub user_id: DbId,
    pub task_id: DbId,
    pub message: String,
    pub is_read: bool,
    pub created_at: Timestamp,
}
