//! Repository for the `profiles` table.
//!
//! Profiles follow an explicit "ensure" lifecycle instead of being created as
//! a side effect of reads. [`ProfileRepo::ensure`] is idempotent and is
//! called:
//!
//! 1. when a user is registered (inside the registration transaction), and
//! 2. before any profile read or reputation computation, so users created
//!    outside this service still get a profile with base reputation 0.

use sqlx::PgPool;
use quanda_core::types::DbId;

use crate::models::profile::{Profile, UpdateProfile};

/// Column list shared across queries.
const COLUMNS: &str =
    "id, user_id, reputation, bio, website, location, created_at, updated_at";

/// Provides the ensure/read/update operations for profiles.
pub struct ProfileRepo;

impl ProfileRepo {
    /// Make sure a profile exists for `user_id` and return it.
    pub async fn ensure(pool: &PgPool, user_id: DbId) -> Result<Profile, sqlx::Error> {
        sqlx::query(
            "INSERT INTO profiles (user_id) VALUES ($1) \
             ON CONFLICT (user_id) DO NOTHING",
        )
        .bind(user_id)
        .execute(pool)
        .await?;

        let query = format!("SELECT {COLUMNS} FROM profiles WHERE user_id = $1");
        sqlx::query_as::<_, Profile>(&query)
            .bind(user_id)
            .fetch_one(pool)
            .await
    }

    /// Transaction-scoped variant of [`ProfileRepo::ensure`] used at registration.
    pub(crate) async fn ensure_inner(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        user_id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO profiles (user_id) VALUES ($1) \
             ON CONFLICT (user_id) DO NOTHING",
        )
        .bind(user_id)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }

    /// Update the user-editable profile fields. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        user_id: DbId,
        input: &UpdateProfile,
    ) -> Result<Profile, sqlx::Error> {
        Self::ensure(pool, user_id).await?;

        let query = format!(
            "UPDATE profiles SET \
                bio = COALESCE($2, bio), \
                website = COALESCE($3, website), \
                location = COALESCE($4, location) \
             WHERE user_id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Profile>(&query)
            .bind(user_id)
            .bind(&input.bio)
            .bind(&input.website)
            .bind(&input.location)
            .fetch_one(pool)
            .await
    }

    /// Set the admin-awarded base reputation.
    pub async fn set_base_reputation(
        pool: &PgPool,
        user_id: DbId,
        base: i64,
    ) -> Result<Profile, sqlx::Error> {
        Self::ensure(pool, user_id).await?;

        let query = format!(
            "UPDATE profiles SET reputation = $2 WHERE user_id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Profile>(&query)
            .bind(user_id)
            .bind(base)
            .fetch_one(pool)
            .await
    }
}
