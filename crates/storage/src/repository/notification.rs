use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::Notification;

pub struct NotificationRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> NotificationRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_for_user(&self, user_id: Uuid, limit: i64) -> Result<Vec<Notification>> {
        let notifications = sqlx::query_as::<_, Notification>(
            r#"
            SELECT notification_id, user_id, title, message, is_read, created_at
            FROM notifications
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(self.pool)
        .await?;

        Ok(notifications)
    }

    /// Flip the read flag. Scoped to the owning user so one user cannot
    /// mark another's notifications.
    pub async fn mark_read(&self, notification_id: Uuid, user_id: Uuid) -> Result<Notification> {
        sqlx::query_as::<_, Notification>(
            r#"
            UPDATE notifications
            SET is_read = TRUE
            WHERE notification_id = $1 AND user_id = $2
            RETURNING notification_id, user_id, title, message, is_read, created_at
            "#,
        )
        .bind(notification_id)
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)
    }

    /// Fan one message out to a batch of users in a single statement.
    /// Returns the number of rows inserted.
    pub async fn create_batch(
        &self,
        user_ids: &[Uuid],
        title: &str,
        message: &str,
    ) -> Result<u64> {
        if user_ids.is_empty() {
            return Ok(0);
        }

        let result = sqlx::query(
            r#"
            INSERT INTO notifications (user_id, title, message)
            SELECT uid, $2, $3
            FROM UNNEST($1::uuid[]) AS uid
            "#,
        )
        .bind(user_ids)
        .bind(title)
        .bind(message)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
