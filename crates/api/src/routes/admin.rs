//! Admin-only route definitions, mounted at `/admin`.

use axum::routing::post;
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// ```text
/// POST   /users             -> create_user
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/users", post(users::create_user))
}
