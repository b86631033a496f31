//! Vote gating rules.
//!
//! A vote is checked in a fixed order: the voter must be signed in, must have
//! enough reputation for the direction of the vote, and must not be voting on
//! their own content. Persisting the vote (an upsert on the `(voter, target)`
//! pair) is the repository's job.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::reputation::ReputationConfig;
use crate::types::DbId;

/// What kind of content is being voted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoteTarget {
    Question,
    Answer,
}

impl VoteTarget {
    /// Noun phrase with article, as used in user-facing messages.
    fn with_article(self) -> &'static str {
        match self {
            Self::Question => "a question",
            Self::Answer => "an answer",
        }
    }

    fn plural(self) -> &'static str {
        match self {
            Self::Question => "questions",
            Self::Answer => "answers",
        }
    }
}

/// Direction of a vote. Stored as `+1` / `-1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoteDirection {
    Up,
    Down,
}

impl VoteDirection {
    /// Parse a request delta. Only `1` and `-1` are accepted.
    pub fn from_delta(delta: i16) -> Result<Self, CoreError> {
        match delta {
            1 => Ok(Self::Up),
            -1 => Ok(Self::Down),
            other => Err(CoreError::Validation(format!(
                "Invalid vote delta {other}. Must be 1 or -1"
            ))),
        }
    }

    /// The value written to the vote row.
    pub fn score(self) -> i16 {
        match self {
            Self::Up => 1,
            Self::Down => -1,
        }
    }

    fn verb(self) -> &'static str {
        match self {
            Self::Up => "vote up",
            Self::Down => "vote down",
        }
    }
}

/// Reputation needed to cast a vote of `direction` on `target`.
pub fn required_reputation(
    target: VoteTarget,
    direction: VoteDirection,
    config: &ReputationConfig,
) -> i64 {
    match (target, direction) {
        (VoteTarget::Question, VoteDirection::Up) => config.vote_question_up_rep,
        (VoteTarget::Question, VoteDirection::Down) => config.vote_question_down_rep,
        (VoteTarget::Answer, VoteDirection::Up) => config.vote_answer_up_rep,
        (VoteTarget::Answer, VoteDirection::Down) => config.vote_answer_down_rep,
    }
}

/// A signed-in voter together with their freshly computed reputation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Voter {
    pub user_id: DbId,
    pub reputation: i64,
}

/// Everything needed to decide whether a vote may be recorded.
#[derive(Debug, Clone, Copy)]
pub struct VoteAttempt {
    pub target: VoteTarget,
    pub direction: VoteDirection,
    /// `None` for anonymous requests.
    pub voter: Option<Voter>,
    /// Author of the target. Anonymous questions have no author.
    pub author_id: Option<DbId>,
}

/// Fail with `Unauthenticated` when there is no voter.
///
/// Callers run this before any lookup so anonymous requests get the same
/// answer whether or not the target exists.
pub fn require_voter(
    voter: Option<DbId>,
    target: VoteTarget,
    direction: VoteDirection,
    config: &ReputationConfig,
) -> Result<DbId, CoreError> {
    voter.ok_or_else(|| {
        CoreError::Unauthenticated(format!(
            "You need to sign up and get at least {} rep to {} {}",
            required_reputation(target, direction, config),
            direction.verb(),
            target.with_article(),
        ))
    })
}

/// Run all three gates in order.
pub fn authorize_vote(attempt: &VoteAttempt, config: &ReputationConfig) -> Result<(), CoreError> {
    let voter_id = require_voter(
        attempt.voter.map(|v| v.user_id),
        attempt.target,
        attempt.direction,
        config,
    )?;
    let reputation = attempt.voter.map(|v| v.reputation).unwrap_or_default();

    let required = required_reputation(attempt.target, attempt.direction, config);
    if reputation < required {
        return Err(CoreError::InsufficientReputation {
            required,
            actual: reputation,
            message: format!(
                "You need at least {required} rep to {} {}",
                attempt.direction.verb(),
                attempt.target.with_article(),
            ),
        });
    }

    if attempt.author_id == Some(voter_id) {
        return Err(CoreError::SelfVoteForbidden(format!(
            "You cannot vote on your own {}",
            attempt.target.plural()
        )));
    }

    Ok(())
}
