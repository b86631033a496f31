//! Profile model, DTOs, and the public profile response.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use quanda_core::reputation::{MAX_BASE_REPUTATION, MIN_BASE_REPUTATION};
use quanda_core::types::{DbId, Timestamp};
use validator::Validate;

use crate::models::question::QuestionSummary;

/// A row from the `profiles` table.
///
/// `reputation` is the admin-awarded base only. The reputation shown to
/// users is computed from votes on top of it.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Profile {
    pub id: DbId,
    pub user_id: DbId,
    pub reputation: i64,
    pub bio: String,
    pub website: String,
    pub location: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for a user editing their own profile. All fields are optional.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateProfile {
    pub bio: Option<String>,
    #[validate(length(max = 140))]
    pub website: Option<String>,
    #[validate(length(max = 140))]
    pub location: Option<String>,
}

/// DTO for an admin setting the base reputation.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SetBaseReputation {
    #[validate(range(min = MIN_BASE_REPUTATION, max = MAX_BASE_REPUTATION))]
    pub base_reputation: i64,
}

/// Public profile page payload.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    pub username: String,
    pub profile: Profile,
    /// Base plus vote-driven reputation.
    pub reputation: i64,
    pub questions: Vec<QuestionSummary>,
}
