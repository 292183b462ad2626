//! Route definitions for the `/customers` resource. Boss only.

use axum::routing::get;
use axum::Router;

use crate::handlers::customers;
use crate::state::AppState;

/// Routes mounted at `/customers`.
///
/// ```text
/// GET    /       -> list
/// POST   /       -> create (with initial units)
/// GET    /{id}   -> get_by_id (with unit tree)
/// PUT    /{id}   -> update (field patch + full unit replace)
/// DELETE /{id}   -> delete (explicit cascade)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(customers::list).post(customers::create))
        .route(
            "/{id}",
            get(customers::get_by_id)
                .put(customers::update)
                .delete(customers::delete),
        )
}
