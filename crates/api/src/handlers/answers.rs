//! Handlers for posting, editing, and choosing answers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use quanda_core::error::CoreError;
use quanda_core::types::DbId;
use quanda_db::models::answer::{CreateAnswer, UpdateAnswer};
use quanda_db::repositories::{AnswerRepo, QuestionRepo};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::{AuthUser, MaybeAuthUser};
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/questions/{id}/answers
///
/// Anonymous visitors may answer. A signed-in user gets one answer per
/// question.
pub async fn create_answer(
    auth: MaybeAuthUser,
    State(state): State<AppState>,
    Path(question_id): Path<DbId>,
    Json(input): Json<CreateAnswer>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    QuestionRepo::find_by_id(&state.pool, question_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Question",
            id: question_id,
        }))?;

    if let Some(user_id) = auth.user_id() {
        if AnswerRepo::has_answered(&state.pool, question_id, user_id).await? {
            return Err(AppError::Core(CoreError::Conflict(
                "You've already answered this question.".into(),
            )));
        }
    }

    let answer =
        AnswerRepo::create(&state.pool, question_id, auth.user_id(), &input.body).await?;

    tracing::info!(
        answer_id = answer.id,
        question_id,
        author_id = ?answer.author_id,
        "Answer posted",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: answer })))
}

/// PUT /api/v1/answers/{id}
pub async fn update_answer(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(answer_id): Path<DbId>,
    Json(input): Json<UpdateAnswer>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let existing = AnswerRepo::find_by_id(&state.pool, answer_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Answer",
            id: answer_id,
        }))?;

    if existing.author_id != Some(auth.user_id) {
        return Err(AppError::Core(CoreError::Forbidden(
            "You are not allowed to edit this post.".into(),
        )));
    }

    let answer = AnswerRepo::update_body(&state.pool, answer_id, &input.body)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Answer",
            id: answer_id,
        }))?;

    tracing::info!(answer_id, user_id = auth.user_id, "Answer updated");

    Ok(Json(DataResponse { data: answer }))
}

/// POST /api/v1/answers/{id}/choose
///
/// Mark an answer as the accepted one. Only the question's author may choose,
/// and choosing replaces any earlier choice.
pub async fn choose_answer(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(answer_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let answer = AnswerRepo::find_by_id(&state.pool, answer_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Answer",
            id: answer_id,
        }))?;

    let question = QuestionRepo::find_by_id(&state.pool, answer.question_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Question",
            id: answer.question_id,
        }))?;

    if question.author_id != Some(auth.user_id) {
        return Err(AppError::Core(CoreError::Forbidden(
            "This is not your question to answer".into(),
        )));
    }

    let chosen = AnswerRepo::choose(&state.pool, question.id, answer_id).await?;

    tracing::info!(
        answer_id,
        question_id = question.id,
        user_id = auth.user_id,
        "Answer chosen",
    );

    Ok(Json(DataResponse { data: chosen }))
}
