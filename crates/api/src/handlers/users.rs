//! Handlers for the `/users` resource (assignment dropdowns).

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use taskdesk_db::models::user::UserResponse;
use taskdesk_db::repositories::UserRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `GET /users`.
#[derive(Debug, Deserialize)]
pub struct UsersQuery {
    /// Restrict to one section (plus every boss). `"all"` or absent lists
    /// everyone.
    pub section: Option<String>,
}

/// GET /api/v1/users
///
/// List users assignable to tasks, ordered by username. With a `section`
/// filter, returns that section's members plus all bosses.
pub async fn list(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(params): Query<UsersQuery>,
) -> AppResult<Json<DataResponse<Vec<UserResponse>>>> {
    let section = params
        .section
        .as_deref()
        .filter(|section| *section != "all");

    let users = UserRepo::list_assignable(&state.pool, section).await?;
    let data = users.into_iter().map(UserResponse::from).collect();

    Ok(Json(DataResponse { data }))
}
