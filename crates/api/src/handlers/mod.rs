//! Request handlers.
//!
//! Each submodule provides async handler functions for one resource.
//! Handlers delegate persistence to the repositories in `taskdesk_db`,
//! consult `taskdesk_core` for role and status rules, and map errors via
//! [`crate::error::AppError`].

pub mod auth;
pub mod customers;
pub mod dashboard;
pub mod notifications;
pub mod profile;
pub mod projects;
pub mod tasks;
pub mod users;
