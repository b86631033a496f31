//! Route definitions for profiles, mounted at `/profiles`.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::profiles;
use crate::state::AppState;

/// ```text
/// PUT    /me                     -> update_my_profile
/// GET    /{username}             -> get_profile
/// PUT    /{username}/reputation  -> set_base_reputation (admin only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/me", put(profiles::update_my_profile))
        .route("/{username}", get(profiles::get_profile))
        .route("/{username}/reputation", put(profiles::set_base_reputation))
}
