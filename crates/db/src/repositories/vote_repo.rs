//! Repository for the `question_votes` and `answer_votes` tables.
//!
//! Each voter holds a single mutable vote per target. Writes are one
//! `INSERT ... ON CONFLICT DO UPDATE` statement against the
//! `uq_*_votes_user_*` constraints, so concurrent first votes by the same
//! voter cannot produce two rows; the last write wins.

use std::collections::HashMap;

use sqlx::PgPool;
use quanda_core::types::DbId;

use crate::models::vote::{AnswerVote, QuestionVote};

/// Column list for `question_votes` queries.
const QUESTION_VOTE_COLUMNS: &str = "id, user_id, question_id, score, created_at, updated_at";

/// Column list for `answer_votes` queries.
const ANSWER_VOTE_COLUMNS: &str = "id, user_id, answer_id, score, created_at, updated_at";

/// Provides vote upserts and per-voter lookups.
pub struct VoteRepo;

impl VoteRepo {
    // -----------------------------------------------------------------------
    // Questions
    // -----------------------------------------------------------------------

    /// Set `user_id`'s vote on `question_id` to `score`, replacing any prior vote.
    pub async fn upsert_question_vote(
        pool: &PgPool,
        user_id: DbId,
        question_id: DbId,
        score: i16,
    ) -> Result<QuestionVote, sqlx::Error> {
        let query = format!(
            "INSERT INTO question_votes (user_id, question_id, score) \
             VALUES ($1, $2, $3) \
             ON CONFLICT ON CONSTRAINT uq_question_votes_user_question \
             DO UPDATE SET score = EXCLUDED.score \
             RETURNING {QUESTION_VOTE_COLUMNS}"
        );
        sqlx::query_as::<_, QuestionVote>(&query)
            .bind(user_id)
            .bind(question_id)
            .bind(score)
            .fetch_one(pool)
            .await
    }

    /// `user_id`'s current vote on `question_id`, `0` if none.
    pub async fn question_vote_of(
        pool: &PgPool,
        user_id: DbId,
        question_id: DbId,
    ) -> Result<i16, sqlx::Error> {
        let row: Option<(i16,)> = sqlx::query_as(
            "SELECT score FROM question_votes WHERE user_id = $1 AND question_id = $2",
        )
        .bind(user_id)
        .bind(question_id)
        .fetch_optional(pool)
        .await?;
        Ok(row.map(|(score,)| score).unwrap_or(0))
    }

    // -----------------------------------------------------------------------
    // Answers
    // -----------------------------------------------------------------------

    /// Set `user_id`'s vote on `answer_id` to `score`, replacing any prior vote.
    pub async fn upsert_answer_vote(
        pool: &PgPool,
        user_id: DbId,
        answer_id: DbId,
        score: i16,
    ) -> Result<AnswerVote, sqlx::Error> {
        let query = format!(
            "INSERT INTO answer_votes (user_id, answer_id, score) \
             VALUES ($1, $2, $3) \
             ON CONFLICT ON CONSTRAINT uq_answer_votes_user_answer \
             DO UPDATE SET score = EXCLUDED.score \
             RETURNING {ANSWER_VOTE_COLUMNS}"
        );
        sqlx::query_as::<_, AnswerVote>(&query)
            .bind(user_id)
            .bind(answer_id)
            .bind(score)
            .fetch_one(pool)
            .await
    }

    /// Sum of all vote scores on an answer; `0` when it has no votes.
    pub async fn answer_score(pool: &PgPool, answer_id: DbId) -> Result<i64, sqlx::Error> {
        let (score,): (i64,) = sqlx::query_as(
            "SELECT COALESCE(SUM(score), 0)::BIGINT FROM answer_votes WHERE answer_id = $1",
        )
        .bind(answer_id)
        .fetch_one(pool)
        .await?;
        Ok(score)
    }

    /// `user_id`'s votes on the answers of `question_id`, keyed by answer id.
    pub async fn answer_votes_of(
        pool: &PgPool,
        user_id: DbId,
        question_id: DbId,
    ) -> Result<HashMap<DbId, i16>, sqlx::Error> {
        let rows: Vec<(DbId, i16)> = sqlx::query_as(
            "SELECT v.answer_id, v.score \
             FROM answer_votes v \
             JOIN answers a ON a.id = v.answer_id \
             WHERE a.question_id = $1 AND v.user_id = $2",
        )
        .bind(question_id)
        .bind(user_id)
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().collect())
    }
}
