//! Repository for the `question_views` table (session-deduplicated view counter).

use sqlx::PgPool;
use quanda_core::types::DbId;

/// Provides view recording and counting.
pub struct QuestionViewRepo;

impl QuestionViewRepo {
    /// Record a view of `question_id` by the session with digest `session_hash`.
    ///
    /// Returns `true` if this was the session's first view of the question.
    pub async fn record(
        pool: &PgPool,
        question_id: DbId,
        session_hash: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO question_views (question_id, session_hash) VALUES ($1, $2) \
             ON CONFLICT (question_id, session_hash) DO NOTHING",
        )
        .bind(question_id)
        .bind(session_hash)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Number of distinct sessions that viewed `question_id`.
    pub async fn count(pool: &PgPool, question_id: DbId) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM question_views WHERE question_id = $1")
                .bind(question_id)
                .fetch_one(pool)
                .await?;
        Ok(count)
    }
}
