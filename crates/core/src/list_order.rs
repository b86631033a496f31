//! Manual ordering of questions within a named list.
//!
//! Positions are plain integers chosen by an admin. They are not renumbered
//! or compacted, so gaps persist. A submitted position of `0` removes the
//! question from the list instead of placing it.

use std::collections::{BTreeMap, HashSet};

use crate::error::CoreError;
use crate::types::DbId;

/// Position value that means "take this question off the list".
pub const REMOVE_FROM_LIST: i32 = 0;

/// Position given to the first question added to an empty list.
pub const FIRST_POSITION: i32 = 1;

/// Highest position a question may hold.
pub const MAX_POSITION: i32 = 1_000_000;

/// A validated reorder batch, split into what to update and what to delete.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReorderPlan {
    /// `(question_id, new_position)` pairs, in question id order.
    pub updates: Vec<(DbId, i32)>,
    /// Questions to remove from the list.
    pub removals: Vec<DbId>,
}

impl ReorderPlan {
    /// All question ids touched by the plan.
    pub fn question_ids(&self) -> Vec<DbId> {
        let mut ids: Vec<DbId> = self
            .updates
            .iter()
            .map(|(id, _)| *id)
            .chain(self.removals.iter().copied())
            .collect();
        ids.sort_unstable();
        ids
    }

    pub fn is_empty(&self) -> bool {
        self.updates.is_empty() && self.removals.is_empty()
    }
}

/// Validate a reorder batch and turn it into a [`ReorderPlan`].
///
/// The whole batch is rejected if any non-zero position appears twice or any
/// position is negative or above [`MAX_POSITION`]. Nothing is applied on
/// rejection.
pub fn plan_reorder(edits: &BTreeMap<DbId, i32>) -> Result<ReorderPlan, CoreError> {
    let mut seen = HashSet::new();
    let mut plan = ReorderPlan::default();

    for (&question_id, &position) in edits {
        if position < 0 {
            return Err(CoreError::Validation(format!(
                "Order for question {question_id} must not be negative, got {position}"
            )));
        }
        if position > MAX_POSITION {
            return Err(CoreError::Validation(format!(
                "Order for question {question_id} must be at most {MAX_POSITION}, got {position}"
            )));
        }
        if position == REMOVE_FROM_LIST {
            plan.removals.push(question_id);
            continue;
        }
        if !seen.insert(position) {
            return Err(CoreError::DuplicateOrderPosition { order: position });
        }
        plan.updates.push((question_id, position));
    }

    Ok(plan)
}

/// Position for a question appended to a list whose current highest
/// position is `current_max` (`None` for an empty list).
///
/// Fails when the list already occupies [`MAX_POSITION`].
pub fn next_position(current_max: Option<i32>) -> Result<i32, CoreError> {
    let Some(max) = current_max else {
        return Ok(FIRST_POSITION);
    };
    max.checked_add(1)
        .filter(|&next| next <= MAX_POSITION)
        .ok_or_else(|| {
            CoreError::Validation(format!(
                "No position left after {max}; reorder the list to make room"
            ))
        })
}
