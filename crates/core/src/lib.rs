//! Domain rules for the taskdesk tracking service.
//!
//! Everything in this crate is pure: role and permission decisions, task
//! status derivation, task visibility scoping, and org-unit worker-name
//! normalization. Persistence and HTTP concerns live in `taskdesk-db` and
//! `taskdesk-api`.

pub mod error;
pub mod org_units;
pub mod permissions;
pub mod roles;
pub mod task_status;
pub mod types;
