//! Display order for a question's answers.
//!
//! The chosen answer always comes first. The rest are ordered by score
//! (highest first), then by posting time (newest first). Each answer is
//! wrapped in an [`AnswerView`] carrying the requesting user's own vote so
//! the presentation layer never has to mutate the loaded rows.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::Serialize;

use crate::types::{DbId, Timestamp};

/// The fields that decide where an answer is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankingKey {
    pub id: DbId,
    pub user_chosen: bool,
    pub score: i64,
    pub posted: Timestamp,
}

/// Implemented by anything that can be ranked as an answer.
pub trait Rankable {
    fn ranking_key(&self) -> RankingKey;

    fn author_id(&self) -> Option<DbId>;
}

/// Compare two answers for display: chosen, then score, then recency.
///
/// Ties on all three fall back to the higher id so the order is total.
pub fn display_order(a: &RankingKey, b: &RankingKey) -> Ordering {
    b.user_chosen
        .cmp(&a.user_chosen)
        .then_with(|| b.score.cmp(&a.score))
        .then_with(|| b.posted.cmp(&a.posted))
        .then_with(|| b.id.cmp(&a.id))
}

/// An answer as shown to one particular user.
#[derive(Debug, Clone, Serialize)]
pub struct AnswerView<A> {
    #[serde(flatten)]
    pub answer: A,
    /// The viewer's current vote on this answer, `0` if none.
    pub user_prev_vote: i16,
}

/// The ranked answers of a question plus per-viewer facts.
#[derive(Debug, Clone, Serialize)]
pub struct RankedAnswers<A> {
    pub answers: Vec<AnswerView<A>>,
    /// Whether the viewer already wrote an answer to this question.
    pub user_has_answered: bool,
}

/// Rank `answers` for display to `viewer`.
///
/// `viewer_votes` maps answer id to the viewer's vote score. Answers missing
/// from the map get `0`.
pub fn rank_answers<A: Rankable>(
    mut answers: Vec<A>,
    viewer: Option<DbId>,
    viewer_votes: &HashMap<DbId, i16>,
) -> RankedAnswers<A> {
    answers.sort_by(|a, b| display_order(&a.ranking_key(), &b.ranking_key()));

    let user_has_answered = viewer
        .map(|uid| answers.iter().any(|a| a.author_id() == Some(uid)))
        .unwrap_or(false);

    let answers = answers
        .into_iter()
        .map(|answer| {
            let user_prev_vote = viewer_votes
                .get(&answer.ranking_key().id)
                .copied()
                .unwrap_or(0);
            AnswerView {
                answer,
                user_prev_vote,
            }
        })
        .collect();

    RankedAnswers {
        answers,
        user_has_answered,
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};

    use super::*;

    #[derive(Debug, Clone)]
    struct Row {
        key: RankingKey,
        author: Option<DbId>,
    }

    impl Rankable for Row {
        fn ranking_key(&self) -> RankingKey {
            self.key
        }

        fn author_id(&self) -> Option<DbId> {
            self.author
        }
    }

    fn base_time() -> Timestamp {
        Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap()
    }

    fn row(id: DbId, score: i64, chosen: bool, minutes: i64, author: DbId) -> Row {
        Row {
            key: RankingKey {
                id,
                user_chosen: chosen,
                score,
                posted: base_time() + Duration::minutes(minutes),
            },
            author: Some(author),
        }
    }

    fn ids<A: Rankable>(ranked: &RankedAnswers<A>) -> Vec<DbId> {
        ranked
            .answers
            .iter()
            .map(|v| v.answer.ranking_key().id)
            .collect()
    }

    #[test]
    fn chosen_first_then_score_then_recency() {
        // A: score 5, T1; B: score 5, chosen, T2 < T1; C: score 8, T3.
        let a = row(1, 5, false, 10, 100);
        let b = row(2, 5, true, 5, 101);
        let c = row(3, 8, false, 1, 102);

        let ranked = rank_answers(vec![a, b, c], None, &HashMap::new());
        assert_eq!(ids(&ranked), vec![2, 3, 1]);
    }

    #[test]
    fn equal_scores_newest_first() {
        let older = row(1, 3, false, 0, 100);
        let newer = row(2, 3, false, 30, 101);

        let ranked = rank_answers(vec![older, newer], None, &HashMap::new());
        assert_eq!(ids(&ranked), vec![2, 1]);
    }

    #[test]
    fn chosen_beats_higher_score() {
        let popular = row(1, 50, false, 0, 100);
        let chosen = row(2, -3, true, 0, 101);

        let ranked = rank_answers(vec![popular, chosen], None, &HashMap::new());
        assert_eq!(ids(&ranked), vec![2, 1]);
    }

    #[test]
    fn viewer_votes_attached_per_answer() {
        let answers = vec![row(1, 2, false, 0, 100), row(2, 1, false, 0, 101)];
        let votes = HashMap::from([(2, -1)]);

        let ranked = rank_answers(answers, Some(55), &votes);
        assert_eq!(ranked.answers[0].user_prev_vote, 0);
        assert_eq!(ranked.answers[1].user_prev_vote, -1);
    }

    #[test]
    fn user_has_answered_detects_authorship() {
        let answers = vec![row(1, 0, false, 0, 100), row(2, 0, false, 0, 101)];

        assert!(rank_answers(answers.clone(), Some(101), &HashMap::new()).user_has_answered);
        assert!(!rank_answers(answers.clone(), Some(999), &HashMap::new()).user_has_answered);
        assert!(!rank_answers(answers, None, &HashMap::new()).user_has_answered);
    }

    #[test]
    fn empty_question_has_no_answers() {
        let ranked = rank_answers(Vec::<Row>::new(), Some(1), &HashMap::new());
        assert!(ranked.answers.is_empty());
        assert!(!ranked.user_has_answered);
    }
}
