//! Authentication and authorization middleware extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated identity from a JWT Bearer token.
//! - [`rbac::RequireBoss`] -- Requires the `boss` role (customer management).

pub mod auth;
pub mod rbac;
