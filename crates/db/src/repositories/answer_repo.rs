//! Repository for the `answers` table.

use sqlx::PgPool;
use quanda_core::types::DbId;

use crate::models::answer::{Answer, AnswerWithScore};

/// Column list for full answer rows.
const COLUMNS: &str = "id, question_id, body, author_id, user_chosen, posted, last_modified, \
                       created_at, updated_at";

/// Provides CRUD, scored listing, and choose-answer for answers.
pub struct AnswerRepo;

impl AnswerRepo {
    /// Insert an answer to `question_id`.
    pub async fn create(
        pool: &PgPool,
        question_id: DbId,
        author_id: Option<DbId>,
        body: &str,
    ) -> Result<Answer, sqlx::Error> {
        let query = format!(
            "INSERT INTO answers (question_id, author_id, body) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Answer>(&query)
            .bind(question_id)
            .bind(author_id)
            .bind(body)
            .fetch_one(pool)
            .await
    }

    /// Find an answer by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Answer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM answers WHERE id = $1");
        sqlx::query_as::<_, Answer>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Replace an answer's body and bump `last_modified`.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update_body(
        pool: &PgPool,
        id: DbId,
        body: &str,
    ) -> Result<Option<Answer>, sqlx::Error> {
        let query = format!(
            "UPDATE answers SET body = $2, last_modified = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Answer>(&query)
            .bind(id)
            .bind(body)
            .fetch_optional(pool)
            .await
    }

    /// All answers to a question with their aggregate scores.
    ///
    /// Rows come back in id order; display ranking is done by
    /// [`quanda_core::ranking::rank_answers`].
    pub async fn list_for_question(
        pool: &PgPool,
        question_id: DbId,
    ) -> Result<Vec<AnswerWithScore>, sqlx::Error> {
        sqlx::query_as::<_, AnswerWithScore>(
            "SELECT a.id, a.question_id, a.body, a.author_id, a.user_chosen, \
                    a.posted, a.last_modified, \
                    COALESCE((SELECT SUM(v.score) FROM answer_votes v \
                               WHERE v.answer_id = a.id), 0)::BIGINT AS score \
             FROM answers a \
             WHERE a.question_id = $1 \
             ORDER BY a.id",
        )
        .bind(question_id)
        .fetch_all(pool)
        .await
    }

    /// Whether `user_id` has already answered `question_id`.
    pub async fn has_answered(
        pool: &PgPool,
        question_id: DbId,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM answers WHERE question_id = $1 AND author_id = $2)",
        )
        .bind(question_id)
        .bind(user_id)
        .fetch_one(pool)
        .await?;
        Ok(exists)
    }

    /// Mark `answer_id` as the chosen answer of its question.
    ///
    /// Clears any previously chosen answer of the same question in the same
    /// transaction, so at most one answer per question is ever chosen.
    pub async fn choose(
        pool: &PgPool,
        question_id: DbId,
        answer_id: DbId,
    ) -> Result<Answer, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let cleared = sqlx::query(
            "UPDATE answers SET user_chosen = false \
             WHERE question_id = $1 AND user_chosen AND id <> $2",
        )
        .bind(question_id)
        .bind(answer_id)
        .execute(&mut *tx)
        .await?;

        let query = format!(
            "UPDATE answers SET user_chosen = true \
             WHERE id = $1 AND question_id = $2 \
             RETURNING {COLUMNS}"
        );
        let answer = sqlx::query_as::<_, Answer>(&query)
            .bind(answer_id)
            .bind(question_id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::debug!(
            question_id,
            answer_id,
            previously_chosen_cleared = cleared.rows_affected(),
            "Chosen answer updated",
        );
        Ok(answer)
    }

    /// Answers posted to questions asked by `author_id`, newest first.
    pub async fn list_for_questions_by(
        pool: &PgPool,
        author_id: DbId,
        limit: i64,
    ) -> Result<Vec<Answer>, sqlx::Error> {
        sqlx::query_as::<_, Answer>(
            "SELECT a.id, a.question_id, a.body, a.author_id, a.user_chosen, \
                    a.posted, a.last_modified, a.created_at, a.updated_at \
             FROM answers a \
             JOIN questions q ON q.id = a.question_id \
             WHERE q.author_id = $1 \
             ORDER BY a.posted DESC, a.id DESC \
             LIMIT $2",
        )
        .bind(author_id)
        .bind(limit)
        .fetch_all(pool)
        .await
    }
}
