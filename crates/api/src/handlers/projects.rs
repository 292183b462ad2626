//! Handlers for the `/projects` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use taskdesk_core::error::CoreError;
use taskdesk_core::permissions::{can, Action};
use taskdesk_core::types::DbId;
use taskdesk_db::models::project::{CreateProject, Project, ProjectFilters, UpdateProject};
use taskdesk_db::repositories::ProjectRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/projects
///
/// List projects with optional filters, ordered by internal number.
pub async fn list(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(filters): Query<ProjectFilters>,
) -> AppResult<Json<DataResponse<Vec<Project>>>> {
    let data = ProjectRepo::list(&state.pool, &filters).await?;
    Ok(Json(DataResponse { data }))
}

/// POST /api/v1/projects
pub async fn create(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(input): Json<CreateProject>,
) -> AppResult<(StatusCode, Json<Project>)> {
    if input.internal_number.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "internal_number must not be empty".into(),
        )));
    }
    if input.description.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "description must not be empty".into(),
        )));
    }
    if input.status.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "status must not be empty".into(),
        )));
    }

    let project = ProjectRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(project)))
}

/// GET /api/v1/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Project>> {
    let project = ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;
    Ok(Json(project))
}

/// PUT /api/v1/projects/{id}
pub async fn update(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProject>,
) -> AppResult<Json<Project>> {
    let project = ProjectRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;
    Ok(Json(project))
}

/// DELETE /api/v1/projects/{id}
///
/// Staff only. Tasks linked to the project survive with their link cleared.
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !can(auth.role, Action::DeleteProject) {
        return Err(AppError::Core(CoreError::Forbidden(
            "You do not have permission to delete projects.".into(),
        )));
    }

    let deleted = ProjectRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}
