//! Route definitions for answers, mounted at `/answers`.

use axum::routing::{post, put};
use axum::Router;

use crate::handlers::{answers, votes};
use crate::state::AppState;

/// ```text
/// PUT    /{id}              -> update_answer (author only)
/// POST   /{id}/choose       -> choose_answer (question author only)
/// POST   /{id}/vote         -> vote_answer
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{id}", put(answers::update_answer))
        .route("/{id}/choose", post(answers::choose_answer))
        .route("/{id}/vote", post(votes::vote_answer))
}
