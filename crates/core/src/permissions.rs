//! Centralized permission and visibility rules.
//!
//! Every operation consults [`can`] or [`can_view_task`] instead of
//! scattering role conditionals through the handlers. A refused check is a
//! Forbidden error at the HTTP boundary, never a silently empty result.

use crate::roles::Role;
use crate::types::DbId;

/// Role-gated operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    CreateTask,
    DeleteTask,
    DeleteProject,
    /// List, view, create, update, or delete customers.
    ManageCustomers,
    /// Run the follow-up sweep and see the broad (non-personal) task list.
    ViewAllTasks,
}

/// Whether `role` may perform `action`.
pub fn can(role: Role, action: Action) -> bool {
    match action {
        Action::CreateTask | Action::DeleteTask | Action::DeleteProject => role.is_staff(),
        Action::ManageCustomers => role == Role::Boss,
        Action::ViewAllTasks => role.is_staff(),
    }
}

/// Whether an identity may view a single task.
///
/// boss: always. admin: only tasks it created, leads, or is assigned.
/// user: only its own assigned tasks.
pub fn can_view_task(
    role: Role,
    viewer_id: DbId,
    assigned_to: DbId,
    assigned_by: DbId,
    leader_id: Option<DbId>,
) -> bool {
    match role {
        Role::Boss => true,
        Role::Admin => {
            assigned_by == viewer_id || leader_id == Some(viewer_id) || assigned_to == viewer_id
        }
        Role::User => assigned_to == viewer_id,
    }
}

/// The base set of tasks a role can list, before filters are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskScope {
    /// Every task in the system (boss).
    All,
    /// Tasks the identity created or leads (admin).
    CreatedOrLed(DbId),
    /// Tasks assigned to the identity (user).
    AssignedTo(DbId),
}

impl TaskScope {
    pub fn for_identity(role: Role, user_id: DbId) -> TaskScope {
        match role {
            Role::Boss => TaskScope::All,
            Role::Admin => TaskScope::CreatedOrLed(user_id),
            Role::User => TaskScope::AssignedTo(user_id),
        }
    }

    /// Whether a task belongs to this scope. Mirrors the SQL predicate in
    /// `TaskRepo::list_scoped`; kept here so the rule is testable in isolation.
    pub fn contains(self, assigned_to: DbId, assigned_by: DbId, leader_id: Option<DbId>) -> bool {
        match self {
            TaskScope::All => true,
            TaskScope::CreatedOrLed(id) => assigned_by == id || leader_id == Some(id),
            TaskScope::AssignedTo(id) => assigned_to == id,
        }
    }
}
