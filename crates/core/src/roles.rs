//! The three-role model.
//!
//! Roles are a fixed enumeration, not a hierarchy: each operation checks the
//! exact roles it allows. Role names must match the CHECK constraint on
//! `users.role` in `20260705000001_create_users.sql`.

use serde::{Deserialize, Serialize};

pub const ROLE_USER: &str = "user";
pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_BOSS: &str = "boss";

/// An identity's role. Immutable once assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
    Boss,
}

impl Role {
    /// Database / wire representation of the role.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => ROLE_USER,
            Role::Admin => ROLE_ADMIN,
            Role::Boss => ROLE_BOSS,
        }
    }

    /// Parse a stored role string. Returns `None` for anything outside the
    /// fixed three-value set.
    pub fn parse(s: &str) -> Option<Role> {
        match s {
            ROLE_USER => Some(Role::User),
            ROLE_ADMIN => Some(Role::Admin),
            ROLE_BOSS => Some(Role::Boss),
            _ => None,
        }
    }

    /// Whether this role is staff (admin or boss).
    pub fn is_staff(self) -> bool {
        matches!(self, Role::Admin | Role::Boss)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
