//! Handlers for the `/notifications` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use taskdesk_core::types::DbId;
use taskdesk_db::models::notification::Notification;
use taskdesk_db::repositories::NotificationRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/notifications
///
/// List the authenticated user's unread notifications, newest first.
pub async fn list_unread(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<Vec<Notification>>>> {
    let data = NotificationRepo::list_unread(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data }))
}

/// POST /api/v1/notifications/{id}/read
///
/// Mark one of the user's own notifications as read. Marking a nonexistent
/// or foreign notification is a documented no-op: nothing is mutated and
/// 204 is still returned.
pub async fn mark_read(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(notification_id): Path<DbId>,
) -> AppResult<StatusCode> {
    let updated = NotificationRepo::mark_read(&state.pool, notification_id, auth.user_id).await?;
    if !updated {
        tracing::debug!(
            notification_id,
            user_id = auth.user_id,
            "mark-read matched no unread notification"
        );
    }
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/notifications/unread-count
pub async fn unread_count(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<i64>>> {
    let data = NotificationRepo::unread_count(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data }))
}
