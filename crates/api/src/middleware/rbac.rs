//! Role-based access control extractor.
//!
//! Customer management is gated wholesale to the `boss` role; wrapping the
//! check in an extractor enforces it at the type level for every handler in
//! the resource. Finer-grained checks (task create/delete, project delete,
//! per-task visibility) consult `taskdesk_core::permissions` inside the
//! handlers instead.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use taskdesk_core::error::CoreError;
use taskdesk_core::permissions::{can, Action};

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the `boss` role. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn boss_only(RequireBoss(auth): RequireBoss) -> AppResult<Json<()>> {
///     // auth.role is guaranteed to be Boss here
///     Ok(Json(()))
/// }
/// ```
pub struct RequireBoss(pub AuthUser);

impl FromRequestParts<AppState> for RequireBoss {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth = AuthUser::from_request_parts(parts, state).await?;
        if !can(auth.role, Action::ManageCustomers) {
            return Err(AppError::Core(CoreError::Forbidden(
                "You do not have permission.".into(),
            )));
        }
        Ok(RequireBoss(auth))
    }
}
