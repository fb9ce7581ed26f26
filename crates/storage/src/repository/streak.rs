use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::Streak;

pub struct StreakRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> StreakRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn find(&self, user_id: Uuid) -> Result<Option<Streak>> {
        let streak = sqlx::query_as::<_, Streak>(
            r#"
            SELECT user_id, current_streak, freezes_left, last_active_at
            FROM streaks
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(streak)
    }

    /// Zero the streak after a missed day, stamping the reset time.
    pub async fn reset(&self, user_id: Uuid, now: DateTime<Utc>) -> Result<Streak> {
        sqlx::query_as::<_, Streak>(
            r#"
            UPDATE streaks
            SET current_streak = 0,
                last_active_at = $2
            WHERE user_id = $1
            RETURNING user_id, current_streak, freezes_left, last_active_at
            "#,
        )
        .bind(user_id)
        .bind(now)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)
    }

    /// Consume one streak freeze. The guard is in the WHERE clause so a
    /// concurrent double-spend cannot drive the count negative.
    pub async fn use_freeze(&self, user_id: Uuid, now: DateTime<Utc>) -> Result<Streak> {
        let streak = sqlx::query_as::<_, Streak>(
            r#"
            UPDATE streaks
            SET freezes_left = freezes_left - 1,
                last_active_at = $2
            WHERE user_id = $1 AND freezes_left > 0
            RETURNING user_id, current_streak, freezes_left, last_active_at
            "#,
        )
        .bind(user_id)
        .bind(now)
        .fetch_optional(self.pool)
        .await?;

        match streak {
            Some(streak) => Ok(streak),
            None => match self.find(user_id).await? {
                Some(_) => Err(StorageError::NoFreezesAvailable),
                None => Err(StorageError::NotFound),
            },
        }
    }
}
