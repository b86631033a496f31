//! Admin registration of user identities.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use quanda_core::roles::VALID_ROLES;
use quanda_db::models::user::CreateUser;
use quanda_db::repositories::UserRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/admin/users
///
/// Mirror an identity from the identity provider. The profile is created in
/// the same transaction. Admin only.
pub async fn create_user(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateUser>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    if let Some(role) = input.role.as_deref() {
        if !VALID_ROLES.contains(&role) {
            return Err(AppError::BadRequest(format!(
                "Unknown role '{role}'. Expected one of: {}",
                VALID_ROLES.join(", ")
            )));
        }
    }

    let user = UserRepo::create(&state.pool, &input).await?;

    tracing::info!(
        user_id = user.id,
        role = %user.role,
        admin_id = admin.user_id,
        "User registered",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: user })))
}
