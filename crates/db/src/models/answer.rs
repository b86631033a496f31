//! Answer models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use quanda_core::ranking::{Rankable, RankingKey};
use quanda_core::types::{DbId, Timestamp};
use validator::Validate;

/// A row from the `answers` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Answer {
    pub id: DbId,
    pub question_id: DbId,
    pub body: String,
    /// `None` for answers posted anonymously.
    pub author_id: Option<DbId>,
    /// Marked as accepted by the question's author. At most one per question.
    pub user_chosen: bool,
    pub posted: Timestamp,
    pub last_modified: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// An answer row joined with its aggregate vote score.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AnswerWithScore {
    pub id: DbId,
    pub question_id: DbId,
    pub body: String,
    pub author_id: Option<DbId>,
    pub user_chosen: bool,
    pub posted: Timestamp,
    pub last_modified: Timestamp,
    pub score: i64,
}

impl Rankable for AnswerWithScore {
    fn ranking_key(&self) -> RankingKey {
        RankingKey {
            id: self.id,
            user_chosen: self.user_chosen,
            score: self.score,
            posted: self.posted,
        }
    }

    fn author_id(&self) -> Option<DbId> {
        self.author_id
    }
}

/// DTO for posting an answer.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateAnswer {
    #[validate(length(min = 1))]
    pub body: String,
}

/// DTO for editing an answer.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateAnswer {
    #[validate(length(min = 1))]
    pub body: String,
}
