//! Repository for the `users` table.

use sqlx::PgPool;
use quanda_core::roles::ROLE_MEMBER;
use quanda_core::types::DbId;

use crate::models::user::{CreateUser, User};
use crate::repositories::ProfileRepo;

/// Column list shared across queries.
const COLUMNS: &str = "id, username, role, is_active, created_at, updated_at";

/// Provides lookups and registration for user identities.
pub struct UserRepo;

impl UserRepo {
    /// Register a user and create their profile in the same transaction.
    ///
    /// A duplicate username violates `uq_users_username`.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO users (username, role) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        let user = sqlx::query_as::<_, User>(&query)
            .bind(&input.username)
            .bind(input.role.as_deref().unwrap_or(ROLE_MEMBER))
            .fetch_one(&mut *tx)
            .await?;

        ProfileRepo::ensure_inner(&mut tx, user.id).await?;

        tx.commit().await?;
        Ok(user)
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by username.
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE username = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(username)
            .fetch_optional(pool)
            .await
    }
}
