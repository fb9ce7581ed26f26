use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::{ContestParticipant, Streak, User};

/// Request payload for the onboarding / profile form. Completing it
/// marks onboarding as done.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub linkedin_username: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub leetcode_username: Option<String>,
}

/// Slim row returned by user search.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserSearchResult {
    pub user_id: Uuid,
    pub name: Option<String>,
    pub email: Option<String>,
    pub leetcode_username: Option<String>,
    pub image: Option<String>,
}

/// Achievement joined with its badge, for profile display.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AchievementDetail {
    pub badge_id: Uuid,
    pub badge_name: String,
    pub badge_description: String,
    pub badge_icon: Option<String>,
    pub earned_at: DateTime<Utc>,
}

/// Full profile: account, streak, achievements and contest memberships.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    #[serde(flatten)]
    pub user: User,
    pub streak: Option<Streak>,
    pub achievements: Vec<AchievementDetail>,
    pub participations: Vec<ContestParticipant>,
}
