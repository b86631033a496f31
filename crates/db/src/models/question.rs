//! Question models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use quanda_core::ranking::AnswerView;
use quanda_core::types::{DbId, Timestamp};
use validator::Validate;

use crate::models::answer::{Answer, AnswerWithScore};
use crate::models::tag::QuestionTag;

/// A row from the `questions` table. Score is never stored.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Question {
    pub id: DbId,
    pub title: String,
    pub body: String,
    /// `None` for questions asked anonymously.
    pub author_id: Option<DbId>,
    pub posted: Timestamp,
    pub last_modified: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Compact question row with its aggregate vote score, used in listings.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct QuestionSummary {
    pub id: DbId,
    pub title: String,
    pub author_id: Option<DbId>,
    pub posted: Timestamp,
    pub score: i64,
}

/// DTO for asking a question.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateQuestion {
    #[validate(length(min = 1, max = 140))]
    pub title: String,
    #[serde(default)]
    pub body: String,
    /// Existing tag ids to attach. Unknown ids are ignored.
    #[serde(default)]
    pub tag_ids: Vec<DbId>,
}

/// DTO for editing a question. `tag_ids`, when present, replaces the tag set.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateQuestion {
    #[validate(length(min = 1, max = 140))]
    pub title: Option<String>,
    pub body: Option<String>,
    pub tag_ids: Option<Vec<DbId>>,
}

/// Full question page payload.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionDetail {
    pub question: Question,
    pub score: i64,
    pub tags: Vec<QuestionTag>,
    pub view_count: i64,
    /// The viewer's current vote on the question, `0` if none.
    pub user_question_previous_vote: i16,
    pub related_questions: Vec<QuestionSummary>,
    pub answers: Vec<AnswerView<AnswerWithScore>>,
    pub user_has_answered: bool,
}

/// Front page payload.
#[derive(Debug, Clone, Serialize)]
pub struct HomeSummary {
    pub top_questions: Vec<QuestionSummary>,
    pub recent_questions: Vec<QuestionSummary>,
    /// Answers posted to the viewer's questions; `None` for anonymous viewers.
    pub your_answers: Option<Vec<Answer>>,
}
