use sqlx::PgPool;
use uuid::Uuid;

use crate::error::Result;
use crate::models::ContestParticipant;

pub struct ParticipantRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ParticipantRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<ContestParticipant>> {
        let participants = sqlx::query_as::<_, ContestParticipant>(
            r#"
            SELECT contest_id, user_id, has_paid, needs_payment,
                   last_payment_date, current_streak, joined_at
            FROM contest_participants
            WHERE user_id = $1
            ORDER BY joined_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(participants)
    }

    /// Distinct users who have paid into at least one active contest;
    /// the audience for weekend cron notifications.
    pub async fn paid_users_of_active_contests(&self) -> Result<Vec<Uuid>> {
        let user_ids = sqlx::query_scalar::<_, Uuid>(
            r#"
            SELECT DISTINCT cp.user_id
            FROM contest_participants cp
            JOIN contests c ON c.contest_id = cp.contest_id
            WHERE c.is_active AND cp.has_paid
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(user_ids)
    }
}
