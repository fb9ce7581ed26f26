use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Weekly coding contest. Amounts are in whole rupees; conversion to
/// paise happens at the payment-gateway boundary.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Contest {
    pub contest_id: Uuid,
    pub name: String,
    pub entry_fee: i64,
    pub penalty_amount: i64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Membership row keyed by (contest_id, user_id).
///
/// `needs_payment` is cleared only by a completed payment for this
/// contest (and week, for penalties).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ContestParticipant {
    pub contest_id: Uuid,
    pub user_id: Uuid,
    pub has_paid: bool,
    pub needs_payment: bool,
    pub last_payment_date: Option<DateTime<Utc>>,
    pub current_streak: i32,
    pub joined_at: DateTime<Utc>,
}
