//! Vote handlers for questions and answers.
//!
//! Both follow the same sequence: parse the delta, require a signed-in voter,
//! load the target, compute the voter's reputation, run the gates, upsert.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use quanda_core::error::CoreError;
use quanda_core::types::DbId;
use quanda_core::voting::{
    authorize_vote, require_voter, VoteAttempt, VoteDirection, VoteTarget, Voter,
};
use quanda_db::models::vote::{VoteRequest, VoteResult};
use quanda_db::repositories::{AnswerRepo, QuestionRepo, ReputationRepo, VoteRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::MaybeAuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/questions/{id}/vote
pub async fn vote_question(
    auth: MaybeAuthUser,
    State(state): State<AppState>,
    Path(question_id): Path<DbId>,
    Json(input): Json<VoteRequest>,
) -> AppResult<impl IntoResponse> {
    let config = &state.config.reputation;
    let target = VoteTarget::Question;
    let direction = VoteDirection::from_delta(input.delta)?;
    let voter_id = require_voter(auth.user_id(), target, direction, config)?;

    let question = QuestionRepo::find_by_id(&state.pool, question_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Question",
            id: question_id,
        }))?;

    let reputation = ReputationRepo::compute(&state.pool, voter_id, config).await?;
    authorize_vote(
        &VoteAttempt {
            target,
            direction,
            voter: Some(Voter {
                user_id: voter_id,
                reputation,
            }),
            author_id: question.author_id,
        },
        config,
    )?;

    let vote =
        VoteRepo::upsert_question_vote(&state.pool, voter_id, question_id, direction.score())
            .await?;
    let score = QuestionRepo::score(&state.pool, question_id).await?;

    tracing::info!(
        question_id,
        user_id = voter_id,
        delta = vote.score,
        score,
        "Question vote recorded",
    );

    Ok(Json(DataResponse {
        data: VoteResult {
            target,
            target_id: question_id,
            score,
            user_vote: vote.score,
        },
    }))
}

/// POST /api/v1/answers/{id}/vote
pub async fn vote_answer(
    auth: MaybeAuthUser,
    State(state): State<AppState>,
    Path(answer_id): Path<DbId>,
    Json(input): Json<VoteRequest>,
) -> AppResult<impl IntoResponse> {
    let config = &state.config.reputation;
    let target = VoteTarget::Answer;
    let direction = VoteDirection::from_delta(input.delta)?;
    let voter_id = require_voter(auth.user_id(), target, direction, config)?;

    let answer = AnswerRepo::find_by_id(&state.pool, answer_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Answer",
            id: answer_id,
        }))?;

    let reputation = ReputationRepo::compute(&state.pool, voter_id, config).await?;
    authorize_vote(
        &VoteAttempt {
            target,
            direction,
            voter: Some(Voter {
                user_id: voter_id,
                reputation,
            }),
            author_id: answer.author_id,
        },
        config,
    )?;

    let vote =
        VoteRepo::upsert_answer_vote(&state.pool, voter_id, answer_id, direction.score()).await?;
    let score = VoteRepo::answer_score(&state.pool, answer_id).await?;

    tracing::info!(
        answer_id,
        user_id = voter_id,
        delta = vote.score,
        score,
        "Answer vote recorded",
    );

    Ok(Json(DataResponse {
        data: VoteResult {
            target,
            target_id: answer_id,
            score,
            user_vote: vote.score,
        },
    }))
}
