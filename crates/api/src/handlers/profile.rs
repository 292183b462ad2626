//! Handlers for the authenticated user's own profile.

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use taskdesk_core::error::CoreError;
use taskdesk_db::models::user::{UpdateProfile, UserResponse};
use taskdesk_db::repositories::UserRepo;

use crate::auth::password::hash_password;
use crate::error::{AppError, AppResult};
use crate::handlers::auth::MIN_PASSWORD_LENGTH;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Request body for `PUT /profile`. Absent fields are left unchanged;
/// the role can never be changed from here.
#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub username: Option<String>,
    pub section: Option<String>,
    pub password: Option<String>,
}

/// GET /api/v1/profile
pub async fn get_profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<UserResponse>> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;
    Ok(Json(user.into()))
}

/// PUT /api/v1/profile
///
/// Update the authenticated user's username, section, and/or password.
/// Taking a username that belongs to someone else is a conflict.
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<UpdateProfileRequest>,
) -> AppResult<Json<UserResponse>> {
    if let Some(username) = &input.username {
        if username.trim().is_empty() {
            return Err(AppError::Core(CoreError::Validation(
                "username must not be empty".into(),
            )));
        }
        if let Some(existing) = UserRepo::find_by_username(&state.pool, username).await? {
            if existing.id != auth.user_id {
                return Err(AppError::Core(CoreError::Conflict(
                    "This username is already taken.".into(),
                )));
            }
        }
    }

    let password_hash = match input.password.as_deref() {
        // An empty password field means "keep the current one".
        None | Some("") => None,
        Some(password) => {
            if password.len() < MIN_PASSWORD_LENGTH {
                return Err(AppError::Core(CoreError::Validation(format!(
                    "password must be at least {MIN_PASSWORD_LENGTH} characters long"
                ))));
            }
            Some(
                hash_password(password)
                    .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?,
            )
        }
    };

    let patch = UpdateProfile {
        username: input.username,
        section: input.section,
        password_hash,
    };

    let user = UserRepo::update_profile(&state.pool, auth.user_id, &patch)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;

    Ok(Json(user.into()))
}
