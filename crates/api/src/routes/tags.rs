//! Route definitions for tags, mounted at `/tags`.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::tags;
use crate::state::AppState;

/// ```text
/// GET    /                      -> list_tags
/// POST   /                      -> create_tag (admin only)
/// DELETE /{tag}                 -> delete_tag (admin only, by id)
/// GET    /{tag}/questions       -> questions_for_tag (by title)
/// ```
///
/// Both routes use the `{tag}` segment name; differently named parameters in
/// the same position are rejected by the router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(tags::list_tags).post(tags::create_tag))
        .route("/{tag}", delete(tags::delete_tag))
        .route("/{tag}/questions", get(tags::questions_for_tag))
}
