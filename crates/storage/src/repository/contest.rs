use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::Contest;

pub struct ContestRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ContestRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, contest_id: Uuid) -> Result<Contest> {
        sqlx::query_as::<_, Contest>(
            r#"
            SELECT contest_id, name, entry_fee, penalty_amount, is_active, created_at
            FROM contests
            WHERE contest_id = $1
            "#,
        )
        .bind(contest_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)
    }
}
