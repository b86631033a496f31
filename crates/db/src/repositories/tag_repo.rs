//! Repository for the `question_tags` and `question_tag_links` tables.

use sqlx::PgPool;
use quanda_core::types::DbId;

use crate::models::tag::QuestionTag;

/// Column list for `question_tags` queries.
const COLUMNS: &str = "id, title, created_at, updated_at";

/// Provides CRUD for tags and question-tag associations.
pub struct TagRepo;

impl TagRepo {
    /// Insert a tag. The caller passes an already-normalized title.
    ///
    /// A duplicate title violates `uq_question_tags_title`.
    pub async fn create(pool: &PgPool, title: &str) -> Result<QuestionTag, sqlx::Error> {
        let query = format!("INSERT INTO question_tags (title) VALUES ($1) RETURNING {COLUMNS}");
        sqlx::query_as::<_, QuestionTag>(&query)
            .bind(title)
            .fetch_one(pool)
            .await
    }

    /// All tags, alphabetically.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<QuestionTag>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM question_tags ORDER BY title");
        sqlx::query_as::<_, QuestionTag>(&query).fetch_all(pool).await
    }

    /// Find a tag by its normalized title.
    pub async fn find_by_title(
        pool: &PgPool,
        title: &str,
    ) -> Result<Option<QuestionTag>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM question_tags WHERE title = $1");
        sqlx::query_as::<_, QuestionTag>(&query)
            .bind(title)
            .fetch_optional(pool)
            .await
    }

    /// Delete a tag. Cascade deletes its question associations.
    ///
    /// Returns `true` if a tag was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM question_tags WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Tags attached to a question, alphabetically.
    pub async fn list_for_question(
        pool: &PgPool,
        question_id: DbId,
    ) -> Result<Vec<QuestionTag>, sqlx::Error> {
        sqlx::query_as::<_, QuestionTag>(
            "SELECT t.id, t.title, t.created_at, t.updated_at \
             FROM question_tags t \
             JOIN question_tag_links l ON l.tag_id = t.id \
             WHERE l.question_id = $1 \
             ORDER BY t.title",
        )
        .bind(question_id)
        .fetch_all(pool)
        .await
    }

    /// Replace the tag set of a question. Ids that match no tag are skipped.
    pub(crate) async fn set_for_question_inner(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        question_id: DbId,
        tag_ids: &[DbId],
    ) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM question_tag_links WHERE question_id = $1")
            .bind(question_id)
            .execute(&mut **tx)
            .await?;

        sqlx::query(
            "INSERT INTO question_tag_links (question_id, tag_id) \
             SELECT $1, t.id FROM question_tags t WHERE t.id = ANY($2) \
             ON CONFLICT (question_id, tag_id) DO NOTHING",
        )
        .bind(question_id)
        .bind(tag_ids)
        .execute(&mut **tx)
        .await?;

        Ok(())
    }
}
