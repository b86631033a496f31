//! Handlers for asking, editing, listing, and reading questions.

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use quanda_core::error::CoreError;
use quanda_core::ranking::rank_answers;
use quanda_core::types::DbId;
use quanda_db::models::question::{CreateQuestion, QuestionDetail, UpdateQuestion};
use quanda_db::repositories::{
    AnswerRepo, QuestionRepo, QuestionViewRepo, TagRepo, VoteRepo,
};
use sha2::{Digest, Sha256};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::{AuthUser, MaybeAuthUser};
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Header carrying the client's opaque session identifier, used to count views.
pub const SESSION_HEADER: &str = "x-session-id";

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

/// GET /api/v1/questions
///
/// Most recent questions first, paginated with `?limit=&offset=`.
pub async fn list_questions(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let questions = QuestionRepo::list_recent(&state.pool, params.limit, params.offset).await?;
    Ok(Json(DataResponse { data: questions }))
}

/// GET /api/v1/questions/top
pub async fn top_questions(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let questions = QuestionRepo::list_top(&state.pool, params.limit).await?;
    Ok(Json(DataResponse { data: questions }))
}

// ---------------------------------------------------------------------------
// Create / update
// ---------------------------------------------------------------------------

/// POST /api/v1/questions
///
/// Anonymous questions are allowed; a valid token attaches the author.
pub async fn create_question(
    auth: MaybeAuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateQuestion>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let question = QuestionRepo::create(&state.pool, auth.user_id(), &input).await?;

    tracing::info!(
        question_id = question.id,
        author_id = ?question.author_id,
        "Question created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: question })))
}

/// PUT /api/v1/questions/{id}
///
/// Only the question's author may edit it.
pub async fn update_question(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(question_id): Path<DbId>,
    Json(input): Json<UpdateQuestion>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let existing = QuestionRepo::find_by_id(&state.pool, question_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Question",
            id: question_id,
        }))?;

    if existing.author_id != Some(auth.user_id) {
        return Err(AppError::Core(CoreError::Forbidden(
            "You are not allowed to edit this post.".into(),
        )));
    }

    let question = QuestionRepo::update(&state.pool, question_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Question",
            id: question_id,
        }))?;

    tracing::info!(question_id, user_id = auth.user_id, "Question updated");

    Ok(Json(DataResponse { data: question }))
}

// ---------------------------------------------------------------------------
// Detail
// ---------------------------------------------------------------------------

/// GET /api/v1/questions/{id}
///
/// Full question page: score, tags, views, related questions, and the ranked
/// answers annotated with the viewer's own votes. An `x-session-id` header
/// records a view, counted once per session.
pub async fn get_question(
    auth: MaybeAuthUser,
    State(state): State<AppState>,
    Path(question_id): Path<DbId>,
    headers: HeaderMap,
) -> AppResult<impl IntoResponse> {
    let question = QuestionRepo::find_by_id(&state.pool, question_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Question",
            id: question_id,
        }))?;

    if let Some(session_id) = session_id(&headers) {
        let first_view =
            QuestionViewRepo::record(&state.pool, question_id, &hash_session_id(session_id))
                .await?;
        if first_view {
            tracing::debug!(question_id, "Question view recorded");
        }
    }

    let viewer = auth.user_id();
    let (user_question_previous_vote, viewer_answer_votes) = match viewer {
        Some(user_id) => (
            VoteRepo::question_vote_of(&state.pool, user_id, question_id).await?,
            VoteRepo::answer_votes_of(&state.pool, user_id, question_id).await?,
        ),
        None => (0, Default::default()),
    };

    let answers = AnswerRepo::list_for_question(&state.pool, question_id).await?;
    let ranked = rank_answers(answers, viewer, &viewer_answer_votes);

    let detail = QuestionDetail {
        score: QuestionRepo::score(&state.pool, question_id).await?,
        tags: TagRepo::list_for_question(&state.pool, question_id).await?,
        view_count: QuestionViewRepo::count(&state.pool, question_id).await?,
        related_questions: QuestionRepo::list_related(&state.pool, question_id).await?,
        user_question_previous_vote,
        answers: ranked.answers,
        user_has_answered: ranked.user_has_answered,
        question,
    };

    Ok(Json(DataResponse { data: detail }))
}

/// Non-empty session identifier from the request headers, if any.
fn session_id(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(SESSION_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// SHA-256 hex digest of a session identifier. Raw session ids are never stored.
fn hash_session_id(session_id: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(session_id.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn session_hash_is_stable_hex() {
        let a = hash_session_id("abc");
        assert_eq!(a, hash_session_id("abc"));
        assert_ne!(a, hash_session_id("abd"));
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn blank_session_header_is_ignored() {
        let mut headers = HeaderMap::new();
        assert_eq!(session_id(&headers), None);

        headers.insert(SESSION_HEADER, HeaderValue::from_static("   "));
        assert_eq!(session_id(&headers), None);

        headers.insert(SESSION_HEADER, HeaderValue::from_static("s-1"));
        assert_eq!(session_id(&headers), Some("s-1"));
    }
}
