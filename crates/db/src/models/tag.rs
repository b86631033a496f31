//! Question tag model and DTO.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use quanda_core::types::{DbId, Timestamp};

/// A row from the `question_tags` table. `title` is stored lowercased.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct QuestionTag {
    pub id: DbId,
    pub title: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a tag. The title is normalized before insert.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTag {
    pub title: String,
}
