//! Handlers for curated question lists.
//!
//! Reading is public; every write is admin only.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use quanda_core::error::CoreError;
use quanda_core::list_order::plan_reorder;
use quanda_core::types::DbId;
use quanda_db::models::question_list::{
    AddQuestionToList, AppendOutcome, QuestionList, QuestionListDetail, ReorderOutcome,
    ReorderQuestionList, SaveQuestionList,
};
use quanda_db::repositories::{QuestionListRepo, QuestionRepo};
use quanda_db::DbPool;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Load a list or fail with `NotFound`.
async fn ensure_list_exists(pool: &DbPool, list_id: DbId) -> AppResult<QuestionList> {
    QuestionListRepo::find_by_id(pool, list_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "QuestionList",
            id: list_id,
        }))
}

async fn load_detail(pool: &DbPool, list: QuestionList) -> AppResult<QuestionListDetail> {
    let entries = QuestionListRepo::entries(pool, list.id).await?;
    Ok(QuestionListDetail { list, entries })
}

// ---------------------------------------------------------------------------
// Lists
// ---------------------------------------------------------------------------

/// GET /api/v1/lists
pub async fn list_lists(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let lists = QuestionListRepo::list_all(&state.pool).await?;
    Ok(Json(DataResponse { data: lists }))
}

/// POST /api/v1/lists
pub async fn create_list(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<SaveQuestionList>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let list = QuestionListRepo::create(&state.pool, &input.title).await?;

    tracing::info!(list_id = list.id, user_id = admin.user_id, "Question list created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: list })))
}

/// GET /api/v1/lists/{id}
///
/// The list with its entries ordered by position.
pub async fn get_list(
    State(state): State<AppState>,
    Path(list_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let list = ensure_list_exists(&state.pool, list_id).await?;
    let detail = load_detail(&state.pool, list).await?;
    Ok(Json(DataResponse { data: detail }))
}

/// PUT /api/v1/lists/{id}
pub async fn rename_list(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(list_id): Path<DbId>,
    Json(input): Json<SaveQuestionList>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let list = QuestionListRepo::rename(&state.pool, list_id, &input.title)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "QuestionList",
            id: list_id,
        }))?;

    tracing::info!(list_id, user_id = admin.user_id, "Question list renamed");

    Ok(Json(DataResponse { data: list }))
}

// ---------------------------------------------------------------------------
// Entries
// ---------------------------------------------------------------------------

/// POST /api/v1/lists/{id}/questions
///
/// Append a question after the current last position (`1` on an empty list).
pub async fn add_question(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(list_id): Path<DbId>,
    Json(input): Json<AddQuestionToList>,
) -> AppResult<impl IntoResponse> {
    let list = ensure_list_exists(&state.pool, list_id).await?;
    let question_id = input.question_id;

    QuestionRepo::find_by_id(&state.pool, question_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Question",
            id: question_id,
        }))?;

    if QuestionListRepo::contains(&state.pool, list_id, question_id).await? {
        return Err(AppError::Core(CoreError::AlreadyOnList {
            list_id,
            question_id,
        }));
    }

    let position = match QuestionListRepo::append(&state.pool, list_id, question_id).await? {
        AppendOutcome::Appended { position } => position,
        AppendOutcome::AlreadyOnList => {
            return Err(AppError::Core(CoreError::AlreadyOnList {
                list_id,
                question_id,
            }));
        }
        AppendOutcome::Rejected(err) => return Err(err.into()),
    };

    tracing::info!(
        list_id,
        question_id,
        position,
        user_id = admin.user_id,
        "Question added to list",
    );

    let detail = load_detail(&state.pool, list).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: detail })))
}

/// PUT /api/v1/lists/{id}/order
///
/// Apply a batch of `question_id -> position` edits. A position of `0`
/// removes the question. The batch is all-or-nothing: a repeated position,
/// a negative position, or a question that is not on the list rejects it.
pub async fn reorder_list(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(list_id): Path<DbId>,
    Json(input): Json<ReorderQuestionList>,
) -> AppResult<impl IntoResponse> {
    let list = ensure_list_exists(&state.pool, list_id).await?;
    let plan = plan_reorder(&input.edits)?;

    if !plan.is_empty() {
        match QuestionListRepo::reorder(&state.pool, list_id, &plan).await? {
            ReorderOutcome::Applied => {}
            ReorderOutcome::NotOnList { question_id } => {
                return Err(AppError::Core(CoreError::NotFound {
                    entity: "QuestionListEntry",
                    id: question_id,
                }));
            }
        }
    }

    tracing::info!(
        list_id,
        updated = plan.updates.len(),
        removed = plan.removals.len(),
        user_id = admin.user_id,
        "Question list reordered",
    );

    let detail = load_detail(&state.pool, list).await?;
    Ok(Json(DataResponse { data: detail }))
}
