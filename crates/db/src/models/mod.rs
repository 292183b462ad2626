//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - A create DTO for inserts
//! - An update DTO (all `Option` fields) for patches; absent means unchanged

pub mod customer;
pub mod notification;
pub mod project;
pub mod session;
pub mod task;
pub mod user;
