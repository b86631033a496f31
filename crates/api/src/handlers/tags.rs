//! Handlers for question tags.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use quanda_core::error::CoreError;
use quanda_core::tags::{normalize_tag_title, validate_tag_title};
use quanda_core::types::DbId;
use quanda_db::models::tag::CreateTag;
use quanda_db::repositories::{QuestionRepo, TagRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/tags
pub async fn list_tags(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let tags = TagRepo::list_all(&state.pool).await?;
    Ok(Json(DataResponse { data: tags }))
}

/// POST /api/v1/tags
///
/// Create a tag. The title is trimmed and lowercased before insert. Admin only.
pub async fn create_tag(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateTag>,
) -> AppResult<impl IntoResponse> {
    let title = validate_tag_title(&input.title)?;
    let tag = TagRepo::create(&state.pool, &title).await?;

    tracing::info!(
        tag_id = tag.id,
        title = %tag.title,
        user_id = admin.user_id,
        "Tag created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: tag })))
}

/// DELETE /api/v1/tags/{id}
///
/// Delete a tag and its question associations. Admin only.
pub async fn delete_tag(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(tag_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = TagRepo::delete(&state.pool, tag_id).await?;

    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Tag",
            id: tag_id,
        }));
    }

    tracing::info!(tag_id, user_id = admin.user_id, "Tag deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/tags/{title}/questions
///
/// Questions carrying the tag, newest first. The title is matched
/// case-insensitively.
pub async fn questions_for_tag(
    State(state): State<AppState>,
    Path(title): Path<String>,
) -> AppResult<impl IntoResponse> {
    let title = normalize_tag_title(&title);
    let tag = TagRepo::find_by_title(&state.pool, &title)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Tag '{title}' not found")))?;

    let questions = QuestionRepo::list_by_tag(&state.pool, tag.id).await?;
    Ok(Json(DataResponse { data: questions }))
}
