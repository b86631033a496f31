//! Well-known role name constants.
//!
//! These must match the `chk_users_role` constraint in
//! `20261019000001_create_users_and_profiles.sql`.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_MEMBER: &str = "member";

/// All valid role values.
pub const VALID_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_MEMBER];
