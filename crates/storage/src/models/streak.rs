use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Per-user activity streak. The reset-after-a-missed-day invariant is
/// enforced lazily on read, not by a background job.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Streak {
    pub user_id: Uuid,
    pub current_streak: i32,
    pub freezes_left: i32,
    pub last_active_at: DateTime<Utc>,
}
