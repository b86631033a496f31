//! Curated question list models and DTOs.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use quanda_core::error::CoreError;
use quanda_core::types::{DbId, Timestamp};
use validator::Validate;

/// A row from the `question_lists` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct QuestionList {
    pub id: DbId,
    pub title: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A question's place on a list, joined with the question title.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct QuestionListEntry {
    /// Id of the `question_list_orders` row.
    pub id: DbId,
    pub question_id: DbId,
    pub title: String,
    pub sort_order: i32,
}

/// DTO for creating or renaming a list.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SaveQuestionList {
    #[validate(length(min = 1, max = 140))]
    pub title: String,
}

/// DTO for appending a question to a list.
#[derive(Debug, Clone, Deserialize)]
pub struct AddQuestionToList {
    pub question_id: DbId,
}

/// DTO for a bulk reorder. Keys are question ids; a value of `0` removes
/// the question from the list. A question id given twice is rejected.
#[derive(Debug, Clone, Deserialize)]
pub struct ReorderQuestionList {
    #[serde(deserialize_with = "distinct_edits")]
    pub edits: BTreeMap<DbId, i32>,
}

fn distinct_edits<'de, D>(deserializer: D) -> Result<BTreeMap<DbId, i32>, D::Error>
where
    D: Deserializer<'de>,
{
    struct EditsVisitor;

    impl<'de> Visitor<'de> for EditsVisitor {
        type Value = BTreeMap<DbId, i32>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a map of question id to position")
        }

        fn visit_map<M: MapAccess<'de>>(self, mut map: M) -> Result<Self::Value, M::Error> {
            let mut edits = BTreeMap::new();
            while let Some((question_id, position)) = map.next_entry::<DbId, i32>()? {
                if edits.insert(question_id, position).is_some() {
                    return Err(de::Error::custom(format!(
                        "question {question_id} appears more than once"
                    )));
                }
            }
            Ok(edits)
        }
    }

    deserializer.deserialize_map(EditsVisitor)
}

/// A list with its entries in display order.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionListDetail {
    pub list: QuestionList,
    pub entries: Vec<QuestionListEntry>,
}

/// What happened when a reorder plan was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReorderOutcome {
    Applied,
    /// The batch named a question that is not on the list; nothing changed.
    NotOnList { question_id: DbId },
}

/// What happened when a question was appended to a list.
#[derive(Debug)]
pub enum AppendOutcome {
    Appended { position: i32 },
    /// The question is already on the list; nothing changed.
    AlreadyOnList,
    /// No position could be assigned; nothing changed.
    Rejected(CoreError),
}
