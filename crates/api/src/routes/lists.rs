//! Route definitions for curated question lists, mounted at `/lists`.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::lists;
use crate::state::AppState;

/// ```text
/// GET    /                  -> list_lists
/// POST   /                  -> create_list (admin only)
/// GET    /{id}              -> get_list
/// PUT    /{id}              -> rename_list (admin only)
/// POST   /{id}/questions    -> add_question (admin only)
/// PUT    /{id}/order        -> reorder_list (admin only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(lists::list_lists).post(lists::create_list))
        .route("/{id}", get(lists::get_list).put(lists::rename_list))
        .route("/{id}/questions", post(lists::add_question))
        .route("/{id}/order", put(lists::reorder_list))
}
