//! Vote rows, the vote request DTO, and the aggregated tally row.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use quanda_core::reputation::VoteTally;
use quanda_core::types::{DbId, Timestamp};
use quanda_core::voting::VoteTarget;

/// A row from the `question_votes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct QuestionVote {
    pub id: DbId,
    pub user_id: DbId,
    pub question_id: DbId,
    pub score: i16,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `answer_votes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AnswerVote {
    pub id: DbId,
    pub user_id: DbId,
    pub answer_id: DbId,
    pub score: i16,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for casting a vote. `delta` must be `1` or `-1`.
#[derive(Debug, Clone, Deserialize)]
pub struct VoteRequest {
    pub delta: i16,
}

/// Result of a recorded vote.
#[derive(Debug, Clone, Serialize)]
pub struct VoteResult {
    pub target: VoteTarget,
    pub target_id: DbId,
    /// The target's score after the vote.
    pub score: i64,
    /// The voter's current vote on the target.
    pub user_vote: i16,
}

/// Vote counts on one author's content, as returned by the tally query.
#[derive(Debug, Clone, Copy, FromRow)]
pub struct VoteTallyRow {
    pub question_up: i64,
    pub question_down: i64,
    pub answer_up: i64,
    pub answer_down: i64,
}

impl From<VoteTallyRow> for VoteTally {
    fn from(row: VoteTallyRow) -> Self {
        Self {
            question_up: row.question_up,
            question_down: row.question_down,
            answer_up: row.answer_up,
            answer_down: row.answer_down,
        }
    }
}
