//! Route tree assembly.

pub mod auth;
pub mod customers;
pub mod dashboard;
pub mod health;
pub mod notifications;
pub mod profile;
pub mod projects;
pub mod tasks;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /auth/register                   register (public)
/// /auth/login                      login (public)
/// /auth/refresh                    refresh (public)
/// /auth/logout                     logout (requires auth)
///
/// /profile                         get, update own profile
/// /users                           assignable users for dropdowns
/// /dashboard                       counters + scoped task list + sweep
///
/// /tasks                           create (staff)
/// /tasks/{id}                      get, patch, delete
///
/// /projects                        list, create
/// /projects/{id}                   get, update, delete
///
/// /customers                       list, create (boss only)
/// /customers/{id}                  get, update, delete (boss only)
///
/// /notifications                   list unread
/// /notifications/unread-count      unread count
/// /notifications/{id}/read         mark read
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/profile", profile::router())
        .nest("/users", users::router())
        .nest("/dashboard", dashboard::router())
        .nest("/tasks", tasks::router())
        .nest("/projects", projects::router())
        .nest("/customers", customers::router())
        .nest("/notifications", notifications::router())
}
