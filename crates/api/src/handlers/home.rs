//! Front page handler.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use quanda_db::models::question::HomeSummary;
use quanda_db::repositories::{AnswerRepo, QuestionRepo};

use crate::error::AppResult;
use crate::middleware::auth::MaybeAuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Number of questions in each front-page section.
const HOME_SECTION_SIZE: i64 = 5;

/// Number of answers shown under "answers to your questions".
const HOME_ANSWERS_SIZE: i64 = 20;

/// GET /api/v1/home
///
/// Top questions by score, the most recent questions, and for signed-in
/// users the latest answers to their own questions.
pub async fn home(
    auth: MaybeAuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let top_questions = QuestionRepo::list_top(&state.pool, Some(HOME_SECTION_SIZE)).await?;
    let recent_questions =
        QuestionRepo::list_recent(&state.pool, Some(HOME_SECTION_SIZE), None).await?;

    let your_answers = match auth.user_id() {
        Some(user_id) => Some(
            AnswerRepo::list_for_questions_by(&state.pool, user_id, HOME_ANSWERS_SIZE).await?,
        ),
        None => None,
    };

    Ok(Json(DataResponse {
        data: HomeSummary {
            top_questions,
            recent_questions,
            your_answers,
        },
    }))
}
