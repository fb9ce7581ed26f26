use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::user::AchievementDetail;
use crate::error::Result;

pub struct AchievementRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AchievementRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<AchievementDetail>> {
        let achievements = sqlx::query_as::<_, AchievementDetail>(
            r#"
            SELECT b.badge_id,
                   b.name AS badge_name,
                   b.description AS badge_description,
                   b.icon AS badge_icon,
                   ua.earned_at
            FROM user_achievements ua
            JOIN badges b ON b.badge_id = ua.badge_id
            WHERE ua.user_id = $1
            ORDER BY ua.earned_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(achievements)
    }
}
