//! Reputation computation against the database.
//!
//! Counts votes on everything a user authored with one aggregate query, then
//! hands the numbers to [`quanda_core::reputation::compute_reputation`].
//! Nothing is cached; every call reads the current vote state.

use sqlx::PgPool;
use quanda_core::reputation::{compute_reputation, ReputationConfig, VoteTally};
use quanda_core::types::DbId;

use crate::models::vote::VoteTallyRow;
use crate::repositories::{ProfileRepo, UserRepo};

/// Provides reputation lookups.
pub struct ReputationRepo;

impl ReputationRepo {
    /// Count up- and down-votes on the user's questions and answers.
    pub async fn vote_tally(pool: &PgPool, user_id: DbId) -> Result<VoteTally, sqlx::Error> {
        let row = sqlx::query_as::<_, VoteTallyRow>(
            "SELECT \
                (SELECT COUNT(*) FROM question_votes v \
                   JOIN questions q ON q.id = v.question_id \
                  WHERE q.author_id = $1 AND v.score = 1) AS question_up, \
                (SELECT COUNT(*) FROM question_votes v \
                   JOIN questions q ON q.id = v.question_id \
                  WHERE q.author_id = $1 AND v.score = -1) AS question_down, \
                (SELECT COUNT(*) FROM answer_votes v \
                   JOIN answers a ON a.id = v.answer_id \
                  WHERE a.author_id = $1 AND v.score = 1) AS answer_up, \
                (SELECT COUNT(*) FROM answer_votes v \
                   JOIN answers a ON a.id = v.answer_id \
                  WHERE a.author_id = $1 AND v.score = -1) AS answer_down",
        )
        .bind(user_id)
        .fetch_one(pool)
        .await?;

        Ok(row.into())
    }

    /// Current reputation of `user_id`, or `0` if no such user exists.
    ///
    /// Ensures the user's profile exists before reading its base value.
    pub async fn compute(
        pool: &PgPool,
        user_id: DbId,
        config: &ReputationConfig,
    ) -> Result<i64, sqlx::Error> {
        if UserRepo::find_by_id(pool, user_id).await?.is_none() {
            return Ok(0);
        }

        let profile = ProfileRepo::ensure(pool, user_id).await?;
        let tally = Self::vote_tally(pool, user_id).await?;

        Ok(compute_reputation(profile.reputation, &tally, config))
    }
}
