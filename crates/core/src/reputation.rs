//! Reputation arithmetic and the tunable knobs that drive it.
//!
//! A user's reputation is never stored. It is the admin-settable base on the
//! profile plus a fixed contribution for every vote cast on content the user
//! authored. The repository layer counts the votes ([`VoteTally`]); this
//! module turns the counts into a number.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

/// Reputation gained for each up-vote on a question the user asked.
pub const DEFAULT_QUESTION_VOTED_UP: i64 = 10;

/// Reputation contribution for each down-vote on a question the user asked.
///
/// Added as-is, like the up-vote bonus. Configure a negative value to make
/// down-votes cost reputation.
pub const DEFAULT_QUESTION_VOTED_DOWN: i64 = 5;

/// Reputation gained for each up-vote on an answer the user wrote.
pub const DEFAULT_ANSWER_VOTED_UP: i64 = 10;

/// Reputation contribution for each down-vote on an answer the user wrote.
pub const DEFAULT_ANSWER_VOTED_DOWN: i64 = 5;

/// Minimum reputation needed to up-vote a question.
pub const DEFAULT_VOTE_QUESTION_UP_REP: i64 = 20;

/// Minimum reputation needed to down-vote a question.
pub const DEFAULT_VOTE_QUESTION_DOWN_REP: i64 = 100;

/// Minimum reputation needed to up-vote an answer.
pub const DEFAULT_VOTE_ANSWER_UP_REP: i64 = 20;

/// Minimum reputation needed to down-vote an answer.
pub const DEFAULT_VOTE_ANSWER_DOWN_REP: i64 = 100;

/// Bounds on the admin-set base reputation.
pub const MAX_BASE_REPUTATION: i64 = 1_000_000_000;
pub const MIN_BASE_REPUTATION: i64 = -MAX_BASE_REPUTATION;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// The eight integer knobs shared by the reputation calculator and the vote
/// ledger. Built once at startup and passed by reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReputationConfig {
    pub question_voted_up: i64,
    pub question_voted_down: i64,
    pub answer_voted_up: i64,
    pub answer_voted_down: i64,
    pub vote_question_up_rep: i64,
    pub vote_question_down_rep: i64,
    pub vote_answer_up_rep: i64,
    pub vote_answer_down_rep: i64,
}

impl Default for ReputationConfig {
    fn default() -> Self {
        Self {
            question_voted_up: DEFAULT_QUESTION_VOTED_UP,
            question_voted_down: DEFAULT_QUESTION_VOTED_DOWN,
            answer_voted_up: DEFAULT_ANSWER_VOTED_UP,
            answer_voted_down: DEFAULT_ANSWER_VOTED_DOWN,
            vote_question_up_rep: DEFAULT_VOTE_QUESTION_UP_REP,
            vote_question_down_rep: DEFAULT_VOTE_QUESTION_DOWN_REP,
            vote_answer_up_rep: DEFAULT_VOTE_ANSWER_UP_REP,
            vote_answer_down_rep: DEFAULT_VOTE_ANSWER_DOWN_REP,
        }
    }
}

// ---------------------------------------------------------------------------
// Calculation
// ---------------------------------------------------------------------------

/// Vote counts on everything a single user authored.
///
/// Votes whose stored score is `0` are not counted in either bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct VoteTally {
    pub question_up: i64,
    pub question_down: i64,
    pub answer_up: i64,
    pub answer_down: i64,
}

/// Compute a user's reputation from their profile base and vote tally.
///
/// Saturates at the `i64` bounds instead of overflowing.
pub fn compute_reputation(base: i64, tally: &VoteTally, config: &ReputationConfig) -> i64 {
    [
        (tally.question_up, config.question_voted_up),
        (tally.question_down, config.question_voted_down),
        (tally.answer_up, config.answer_voted_up),
        (tally.answer_down, config.answer_voted_down),
    ]
    .into_iter()
    .fold(base, |rep, (count, bonus)| {
        rep.saturating_add(count.saturating_mul(bonus))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_votes_and_zero_base_is_zero() {
        let rep = compute_reputation(0, &VoteTally::default(), &ReputationConfig::default());
        assert_eq!(rep, 0);
    }

    #[test]
    fn base_reputation_is_carried_through() {
        let rep = compute_reputation(250, &VoteTally::default(), &ReputationConfig::default());
        assert_eq!(rep, 250);
    }

    #[test]
    fn question_up_vote_adds_exactly_the_bonus() {
        let config = ReputationConfig::default();
        let before = VoteTally {
            question_up: 3,
            answer_down: 1,
            ..Default::default()
        };
        let after = VoteTally {
            question_up: 4,
            ..before
        };

        let delta = compute_reputation(7, &after, &config) - compute_reputation(7, &before, &config);
        assert_eq!(delta, config.question_voted_up);
    }

    #[test]
    fn down_votes_add_the_configured_constant_literally() {
        let tally = VoteTally {
            question_down: 2,
            answer_down: 1,
            ..Default::default()
        };
        let rep = compute_reputation(0, &tally, &ReputationConfig::default());
        assert_eq!(rep, 2 * DEFAULT_QUESTION_VOTED_DOWN + DEFAULT_ANSWER_VOTED_DOWN);
    }

    #[test]
    fn negative_down_vote_constant_lowers_reputation() {
        let config = ReputationConfig {
            question_voted_down: -5,
            ..Default::default()
        };
        let tally = VoteTally {
            question_down: 2,
            ..Default::default()
        };
        assert_eq!(compute_reputation(100, &tally, &config), 90);
    }

    #[test]
    fn answer_votes_use_answer_constants() {
        let config = ReputationConfig {
            answer_voted_up: 15,
            answer_voted_down: 2,
            ..Default::default()
        };
        let tally = VoteTally {
            answer_up: 2,
            answer_down: 3,
            ..Default::default()
        };
        assert_eq!(compute_reputation(0, &tally, &config), 36);
    }

    #[test]
    fn extreme_base_saturates() {
        let config = ReputationConfig::default();
        let up = VoteTally {
            question_up: 1,
            ..Default::default()
        };
        assert_eq!(compute_reputation(i64::MAX, &up, &config), i64::MAX);

        let costly = ReputationConfig {
            answer_voted_down: i64::MIN,
            ..Default::default()
        };
        let down = VoteTally {
            answer_down: 3,
            ..Default::default()
        };
        assert_eq!(compute_reputation(-1, &down, &costly), i64::MIN);
    }

    #[test]
    fn default_config_matches_documented_values() {
        let config = ReputationConfig::default();
        assert_eq!(config.question_voted_up, 10);
        assert_eq!(config.question_voted_down, 5);
        assert_eq!(config.answer_voted_up, 10);
        assert_eq!(config.answer_voted_down, 5);
        assert_eq!(config.vote_question_up_rep, 20);
        assert_eq!(config.vote_question_down_rep, 100);
        assert_eq!(config.vote_answer_up_rep, 20);
        assert_eq!(config.vote_answer_down_rep, 100);
    }
}
