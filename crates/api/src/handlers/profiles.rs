//! Handlers for public profiles and reputation.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use quanda_core::error::CoreError;
use quanda_db::models::profile::{ProfileResponse, SetBaseReputation, UpdateProfile};
use quanda_db::models::user::User;
use quanda_db::repositories::{ProfileRepo, QuestionRepo, ReputationRepo, UserRepo};
use quanda_db::DbPool;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

async fn find_user(pool: &DbPool, username: &str) -> AppResult<User> {
    UserRepo::find_by_username(pool, username)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User '{username}' not found")))
}

/// GET /api/v1/profiles/{username}
///
/// Profile fields, computed reputation, and the user's questions.
pub async fn get_profile(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> AppResult<impl IntoResponse> {
    let user = find_user(&state.pool, &username).await?;

    let profile = ProfileRepo::ensure(&state.pool, user.id).await?;
    let reputation =
        ReputationRepo::compute(&state.pool, user.id, &state.config.reputation).await?;
    let questions = QuestionRepo::list_by_author(&state.pool, user.id).await?;

    Ok(Json(DataResponse {
        data: ProfileResponse {
            username: user.username,
            profile,
            reputation,
            questions,
        },
    }))
}

/// PUT /api/v1/profiles/me
pub async fn update_my_profile(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<UpdateProfile>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;

    let profile = ProfileRepo::update(&state.pool, auth.user_id, &input).await?;

    tracing::info!(user_id = auth.user_id, "Profile updated");

    Ok(Json(DataResponse { data: profile }))
}

/// PUT /api/v1/profiles/{username}/reputation
///
/// Set the admin-awarded base reputation. Vote-driven reputation is added
/// on top of it when reputation is computed. Admin only.
pub async fn set_base_reputation(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(username): Path<String>,
    Json(input): Json<SetBaseReputation>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let user = find_user(&state.pool, &username).await?;

    let profile =
        ProfileRepo::set_base_reputation(&state.pool, user.id, input.base_reputation).await?;

    tracing::info!(
        user_id = user.id,
        base_reputation = input.base_reputation,
        admin_id = admin.user_id,
        "Base reputation set",
    );

    Ok(Json(DataResponse { data: profile }))
}
