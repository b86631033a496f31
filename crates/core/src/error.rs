use crate::types::DbId;

/// Domain errors surfaced to the requester.
///
/// Every variant is an expected, user-facing condition. None of them are
/// fatal and none are retried; the caller re-submits explicitly.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// The requester is anonymous but the action needs an identity.
    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    /// The voter's computed reputation is below the configured threshold.
    #[error("{message}")]
    InsufficientReputation {
        required: i64,
        actual: i64,
        message: String,
    },

    #[error("{0}")]
    SelfVoteForbidden(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// A reorder batch used the same non-zero position more than once.
    #[error("Order position {order} was submitted more than once")]
    DuplicateOrderPosition { order: i32 },

    #[error("Question {question_id} is already on list {list_id}")]
    AlreadyOnList { list_id: DbId, question_id: DbId },
}
