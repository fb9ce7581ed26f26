use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Local mirror of an auth-provider account, upserted on every
/// successful sign-in callback.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    pub user_id: Uuid,
    pub email: Option<String>,
    pub name: Option<String>,
    pub image: Option<String>,
    pub linkedin_username: Option<String>,
    pub leetcode_username: Option<String>,
    pub onboarding_completed: bool,
    pub created_at: DateTime<Utc>,
}
