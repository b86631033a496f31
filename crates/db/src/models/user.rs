//! User entity model and DTOs.
//!
//! Users are owned by the external identity provider. Only the fields the
//! forum needs (name, role, active flag) are mirrored here.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use quanda_core::types::{DbId, Timestamp};
use validator::Validate;

/// A row from the `users` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub role: String,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for registering a user identity.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateUser {
    #[validate(length(min = 1, max = 150))]
    pub username: String,
    /// Defaults to `member`.
    pub role: Option<String>,
}
