//! User entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use taskdesk_core::types::{DbId, Timestamp};

/// Full user row from the `users` table.
///
/// Contains the password hash -- never serialize this to API responses.
/// Use [`UserResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub password_hash: String,
    /// One of `"user"`, `"admin"`, `"boss"` (enforced by a CHECK constraint).
    pub role: String,
    pub section: Option<String>,
    pub created_at: Timestamp,
}

/// Safe user representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub username: String,
    pub role: String,
    pub section: Option<String>,
    pub created_at: Timestamp,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user.id,
            username: user.username,
            role: user.role,
            section: user.section,
            created_at: user.created_at,
        }
    }
}

/// DTO for creating a new user. The password is hashed before this is built.
#[derive(Debug)]
pub struct CreateUser {
    pub username: String,
    pub password_hash: String,
    pub role: String,
    pub section: Option<String>,
}

/// DTO for a user's own profile update. Role is deliberately absent: it is
/// immutable after assignment.
#[derive(Debug, Default)]
pub struct UpdateProfile {
    pub username: Option<String>,
    pub section: Option<String>,
    /// Already-hashed replacement password, when the user supplied one.
    pub password_hash: Option<String>,
}
