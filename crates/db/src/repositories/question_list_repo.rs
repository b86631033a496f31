//! Repository for the `question_lists` and `question_list_orders` tables.
//!
//! Ordering rules live in [`quanda_core::list_order`]; this module only
//! applies an already-validated [`ReorderPlan`].

use sqlx::PgPool;
use quanda_core::list_order::{next_position, ReorderPlan};
use quanda_core::types::DbId;

use crate::models::question_list::{
    AppendOutcome, QuestionList, QuestionListEntry, ReorderOutcome,
};

/// Unique constraint on `(list_id, question_id)`.
const ENTRY_UNIQUE: &str = "uq_question_list_orders_list_question";

/// Column list for `question_lists` queries.
const COLUMNS: &str = "id, title, created_at, updated_at";

/// Provides list CRUD, appends, and bulk reordering.
pub struct QuestionListRepo;

impl QuestionListRepo {
    /// Insert a list. A duplicate title violates `uq_question_lists_title`.
    pub async fn create(pool: &PgPool, title: &str) -> Result<QuestionList, sqlx::Error> {
        let query = format!("INSERT INTO question_lists (title) VALUES ($1) RETURNING {COLUMNS}");
        sqlx::query_as::<_, QuestionList>(&query)
            .bind(title)
            .fetch_one(pool)
            .await
    }

    /// All lists, alphabetically.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<QuestionList>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM question_lists ORDER BY title, id");
        sqlx::query_as::<_, QuestionList>(&query)
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<QuestionList>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM question_lists WHERE id = $1");
        sqlx::query_as::<_, QuestionList>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Rename a list. Returns `None` if it does not exist.
    pub async fn rename(
        pool: &PgPool,
        id: DbId,
        title: &str,
    ) -> Result<Option<QuestionList>, sqlx::Error> {
        let query =
            format!("UPDATE question_lists SET title = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, QuestionList>(&query)
            .bind(id)
            .bind(title)
            .fetch_optional(pool)
            .await
    }

    /// Entries of a list in display order (`sort_order`, then join-row id).
    pub async fn entries(
        pool: &PgPool,
        list_id: DbId,
    ) -> Result<Vec<QuestionListEntry>, sqlx::Error> {
        sqlx::query_as::<_, QuestionListEntry>(
            "SELECT o.id, o.question_id, q.title, o.sort_order \
             FROM question_list_orders o \
             JOIN questions q ON q.id = o.question_id \
             WHERE o.list_id = $1 \
             ORDER BY o.sort_order, o.id",
        )
        .bind(list_id)
        .fetch_all(pool)
        .await
    }

    /// Whether `question_id` is already on `list_id`.
    pub async fn contains(
        pool: &PgPool,
        list_id: DbId,
        question_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM question_list_orders \
                            WHERE list_id = $1 AND question_id = $2)",
        )
        .bind(list_id)
        .bind(question_id)
        .fetch_one(pool)
        .await?;
        Ok(exists)
    }

    /// Append a question after the list's current highest position.
    ///
    /// The list row is locked for the duration of the transaction so two
    /// concurrent appends cannot pick the same position. A question already on
    /// the list, or a list with no position left, rolls back and is reported
    /// through [`AppendOutcome`].
    pub async fn append(
        pool: &PgPool,
        list_id: DbId,
        question_id: DbId,
    ) -> Result<AppendOutcome, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("SELECT id FROM question_lists WHERE id = $1 FOR UPDATE")
            .bind(list_id)
            .fetch_one(&mut *tx)
            .await?;

        let (current_max,): (Option<i32>,) =
            sqlx::query_as("SELECT MAX(sort_order) FROM question_list_orders WHERE list_id = $1")
                .bind(list_id)
                .fetch_one(&mut *tx)
                .await?;
        let position = match next_position(current_max) {
            Ok(position) => position,
            Err(err) => return Ok(AppendOutcome::Rejected(err)),
        };

        let inserted = sqlx::query(
            "INSERT INTO question_list_orders (list_id, question_id, sort_order) \
             VALUES ($1, $2, $3)",
        )
        .bind(list_id)
        .bind(question_id)
        .bind(position)
        .execute(&mut *tx)
        .await;

        match inserted {
            Ok(_) => {}
            Err(sqlx::Error::Database(db_err)) if db_err.constraint() == Some(ENTRY_UNIQUE) => {
                return Ok(AppendOutcome::AlreadyOnList);
            }
            Err(err) => return Err(err),
        }

        tx.commit().await?;
        Ok(AppendOutcome::Appended { position })
    }

    /// Apply a validated reorder plan in one transaction.
    ///
    /// If any question in the plan is not on the list, nothing is written and
    /// [`ReorderOutcome::NotOnList`] names the first such question.
    pub async fn reorder(
        pool: &PgPool,
        list_id: DbId,
        plan: &ReorderPlan,
    ) -> Result<ReorderOutcome, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let present: Vec<(DbId,)> = sqlx::query_as(
            "SELECT question_id FROM question_list_orders \
             WHERE list_id = $1 AND question_id = ANY($2) \
             FOR UPDATE",
        )
        .bind(list_id)
        .bind(plan.question_ids())
        .fetch_all(&mut *tx)
        .await?;

        if let Some(missing) = plan
            .question_ids()
            .into_iter()
            .find(|id| !present.iter().any(|(p,)| p == id))
        {
            tx.rollback().await?;
            return Ok(ReorderOutcome::NotOnList {
                question_id: missing,
            });
        }

        if !plan.removals.is_empty() {
            sqlx::query(
                "DELETE FROM question_list_orders \
                 WHERE list_id = $1 AND question_id = ANY($2)",
            )
            .bind(list_id)
            .bind(&plan.removals)
            .execute(&mut *tx)
            .await?;
        }

        for (question_id, position) in &plan.updates {
            sqlx::query(
                "UPDATE question_list_orders SET sort_order = $3 \
                 WHERE list_id = $1 AND question_id = $2",
            )
            .bind(list_id)
            .bind(question_id)
            .bind(position)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        tracing::debug!(
            list_id,
            updated = plan.updates.len(),
            removed = plan.removals.len(),
            "List reordered",
        );
        Ok(ReorderOutcome::Applied)
    }
}
