pub mod admin;
pub mod answers;
pub mod health;
pub mod lists;
pub mod profiles;
pub mod questions;
pub mod tags;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /home                              front page summary
///
/// /questions                         list recent, ask
/// /questions/top                     list by score
/// /questions/{id}                    detail, edit
/// /questions/{id}/vote               vote on a question
/// /questions/{id}/answers            post an answer
///
/// /answers/{id}                      edit an answer
/// /answers/{id}/choose               accept an answer
/// /answers/{id}/vote                 vote on an answer
///
/// /tags                              list, create (admin)
/// /tags/{id}                         delete (admin)
/// /tags/{title}/questions            questions for a tag
///
/// /lists                             list, create (admin)
/// /lists/{id}                        detail, rename (admin)
/// /lists/{id}/questions              append a question (admin)
/// /lists/{id}/order                  bulk reorder (admin)
///
/// /profiles/me                       edit own profile
/// /profiles/{username}               public profile
/// /profiles/{username}/reputation    set base reputation (admin)
///
/// /admin/users                       register an identity (admin)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/home", get(handlers::home::home))
        .nest("/questions", questions::router())
        .nest("/answers", answers::router())
        .nest("/tags", tags::router())
        .nest("/lists", lists::router())
        .nest("/profiles", profiles::router())
        .nest("/admin", admin::router())
}
