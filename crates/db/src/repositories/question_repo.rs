//! Repository for the `questions` table.
//!
//! Scores are derived on read from `question_votes`; listings that need a
//! score use [`SUMMARY_SELECT`] so the aggregate is computed in one query.

use sqlx::PgPool;
use quanda_core::types::DbId;

use crate::models::question::{CreateQuestion, Question, QuestionSummary, UpdateQuestion};
use crate::repositories::TagRepo;

/// Column list for full question rows.
const COLUMNS: &str =
    "id, title, body, author_id, posted, last_modified, created_at, updated_at";

/// Projection for [`QuestionSummary`] rows, aliased on `q`.
const SUMMARY_SELECT: &str = "\
    SELECT q.id, q.title, q.author_id, q.posted, \
           COALESCE((SELECT SUM(v.score) FROM question_votes v \
                      WHERE v.question_id = q.id), 0)::BIGINT AS score \
    FROM questions q";

/// Default page size for question listings.
const DEFAULT_LIMIT: i64 = 20;

/// Maximum page size for question listings.
const MAX_LIMIT: i64 = 100;

/// Clamp a caller-supplied page size into `1..=MAX_LIMIT`.
pub fn clamp_limit(limit: Option<i64>) -> i64 {
    limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
}

/// Clamp a caller-supplied offset to be non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}

/// Provides CRUD and listing operations for questions.
pub struct QuestionRepo;

impl QuestionRepo {
    /// Insert a question and attach its tags in one transaction.
    pub async fn create(
        pool: &PgPool,
        author_id: Option<DbId>,
        input: &CreateQuestion,
    ) -> Result<Question, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO questions (title, body, author_id) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        let question = sqlx::query_as::<_, Question>(&query)
            .bind(&input.title)
            .bind(&input.body)
            .bind(author_id)
            .fetch_one(&mut *tx)
            .await?;

        if !input.tag_ids.is_empty() {
            TagRepo::set_for_question_inner(&mut tx, question.id, &input.tag_ids).await?;
        }

        tx.commit().await?;
        Ok(question)
    }

    /// Find a question by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Question>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM questions WHERE id = $1");
        sqlx::query_as::<_, Question>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Update a question. Only non-`None` fields are applied; `last_modified`
    /// is bumped. When `tag_ids` is present the tag set is replaced.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateQuestion,
    ) -> Result<Option<Question>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE questions SET \
                title = COALESCE($2, title), \
                body = COALESCE($3, body), \
                last_modified = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let question = sqlx::query_as::<_, Question>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.body)
            .fetch_optional(&mut *tx)
            .await?;

        if let (Some(question), Some(tag_ids)) = (&question, &input.tag_ids) {
            TagRepo::set_for_question_inner(&mut tx, question.id, tag_ids).await?;
        }

        tx.commit().await?;
        Ok(question)
    }

    /// Sum of all vote scores on a question; `0` when it has no votes.
    pub async fn score(pool: &PgPool, id: DbId) -> Result<i64, sqlx::Error> {
        let (score,): (i64,) = sqlx::query_as(
            "SELECT COALESCE(SUM(score), 0)::BIGINT FROM question_votes WHERE question_id = $1",
        )
        .bind(id)
        .fetch_one(pool)
        .await?;
        Ok(score)
    }

    /// Most recently posted questions, newest first.
    pub async fn list_recent(
        pool: &PgPool,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<QuestionSummary>, sqlx::Error> {
        let query =
            format!("{SUMMARY_SELECT} ORDER BY q.posted DESC, q.id DESC LIMIT $1 OFFSET $2");
        sqlx::query_as::<_, QuestionSummary>(&query)
            .bind(clamp_limit(limit))
            .bind(clamp_offset(offset))
            .fetch_all(pool)
            .await
    }

    /// Highest-scoring questions; ties go to the newer question.
    pub async fn list_top(
        pool: &PgPool,
        limit: Option<i64>,
    ) -> Result<Vec<QuestionSummary>, sqlx::Error> {
        let query = format!(
            "{SUMMARY_SELECT} ORDER BY score DESC, q.posted DESC, q.id DESC LIMIT $1"
        );
        sqlx::query_as::<_, QuestionSummary>(&query)
            .bind(clamp_limit(limit))
            .fetch_all(pool)
            .await
    }

    /// Questions asked by `author_id`, newest first.
    pub async fn list_by_author(
        pool: &PgPool,
        author_id: DbId,
    ) -> Result<Vec<QuestionSummary>, sqlx::Error> {
        let query = format!(
            "{SUMMARY_SELECT} WHERE q.author_id = $1 ORDER BY q.posted DESC, q.id DESC"
        );
        sqlx::query_as::<_, QuestionSummary>(&query)
            .bind(author_id)
            .fetch_all(pool)
            .await
    }

    /// Questions carrying the tag `tag_id`, newest first.
    pub async fn list_by_tag(
        pool: &PgPool,
        tag_id: DbId,
    ) -> Result<Vec<QuestionSummary>, sqlx::Error> {
        let query = format!(
            "{SUMMARY_SELECT} \
             JOIN question_tag_links l ON l.question_id = q.id \
             WHERE l.tag_id = $1 \
             ORDER BY q.posted DESC, q.id DESC"
        );
        sqlx::query_as::<_, QuestionSummary>(&query)
            .bind(tag_id)
            .fetch_all(pool)
            .await
    }

    /// Other questions sharing at least one tag with `question_id`.
    pub async fn list_related(
        pool: &PgPool,
        question_id: DbId,
    ) -> Result<Vec<QuestionSummary>, sqlx::Error> {
        let query = format!(
            "{SUMMARY_SELECT} \
             WHERE q.id <> $1 \
               AND q.id IN ( \
                   SELECT other.question_id \
                   FROM question_tag_links mine \
                   JOIN question_tag_links other ON other.tag_id = mine.tag_id \
                   WHERE mine.question_id = $1) \
             ORDER BY q.posted DESC, q.id DESC"
        );
        sqlx::query_as::<_, QuestionSummary>(&query)
            .bind(question_id)
            .fetch_all(pool)
            .await
    }
}
