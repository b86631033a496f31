//! Route definitions for questions, mounted at `/questions`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{answers, questions, votes};
use crate::state::AppState;

/// ```text
/// GET    /                  -> list_questions
/// POST   /                  -> create_question
/// GET    /top               -> top_questions
/// GET    /{id}              -> get_question
/// PUT    /{id}              -> update_question (author only)
/// POST   /{id}/vote         -> vote_question
/// POST   /{id}/answers      -> create_answer
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(questions::list_questions).post(questions::create_question),
        )
        .route("/top", get(questions::top_questions))
        .route(
            "/{id}",
            get(questions::get_question).put(questions::update_question),
        )
        .route("/{id}/vote", post(votes::vote_question))
        .route("/{id}/answers", post(answers::create_answer))
}
