use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::user::{UpdateProfileRequest, UserSearchResult};
use crate::error::{Result, StorageError};
use crate::models::User;

/// Backslash-escape `%`, `_` and `\` so user input cannot act as a
/// LIKE wildcard. Backslash is Postgres's default LIKE escape char.
fn escape_like(query: &str) -> String {
    query
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

pub struct UserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, user_id: Uuid) -> Result<User> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT user_id, email, name, image, linkedin_username,
                   leetcode_username, onboarding_completed, created_at
            FROM users
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)
    }

    /// Create or refresh the local mirror of an auth-provider account.
    /// Profile fields the user edits locally are left untouched.
    pub async fn upsert_from_provider(
        &self,
        user_id: Uuid,
        email: Option<&str>,
        name: Option<&str>,
        image: Option<&str>,
    ) -> Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (user_id, email, name, image, onboarding_completed)
            VALUES ($1, $2, $3, $4, FALSE)
            ON CONFLICT (user_id) DO UPDATE
            SET email = EXCLUDED.email,
                name = EXCLUDED.name,
                image = EXCLUDED.image
            RETURNING user_id, email, name, image, linkedin_username,
                      leetcode_username, onboarding_completed, created_at
            "#,
        )
        .bind(user_id)
        .bind(email)
        .bind(name)
        .bind(image)
        .fetch_one(self.pool)
        .await?;

        Ok(user)
    }

    /// Apply the onboarding/profile form. Only supplied fields change;
    /// completing the form always marks onboarding as done.
    pub async fn update_profile(
        &self,
        user_id: Uuid,
        request: &UpdateProfileRequest,
    ) -> Result<User> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET name = COALESCE($2, name),
                linkedin_username = COALESCE($3, linkedin_username),
                leetcode_username = COALESCE($4, leetcode_username),
                onboarding_completed = TRUE
            WHERE user_id = $1
            RETURNING user_id, email, name, image, linkedin_username,
                      leetcode_username, onboarding_completed, created_at
            "#,
        )
        .bind(user_id)
        .bind(request.name.as_deref())
        .bind(request.linkedin_username.as_deref())
        .bind(request.leetcode_username.as_deref())
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)
    }

    /// Case-insensitive substring search across name, email and
    /// leetcode username. The query is matched literally: LIKE
    /// metacharacters in it are escaped.
    pub async fn search(&self, query: &str, limit: i64) -> Result<Vec<UserSearchResult>> {
        let pattern = format!("%{}%", escape_like(query));

        let users = sqlx::query_as::<_, UserSearchResult>(
            r#"
            SELECT user_id, name, email, leetcode_username, image
            FROM users
            WHERE name ILIKE $1
               OR email ILIKE $1
               OR leetcode_username ILIKE $1
            ORDER BY name NULLS LAST
            LIMIT $2
            "#,
        )
        .bind(pattern)
        .bind(limit)
        .fetch_all(self.pool)
        .await?;

        Ok(users)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_metacharacters_are_escaped() {
        assert_eq!(escape_like("a%b"), "a\\%b");
        assert_eq!(escape_like("a_b"), "a\\_b");
        assert_eq!(escape_like("a\\b"), "a\\\\b");
        assert_eq!(escape_like("100%_\\"), "100\\%\\_\\\\");
    }

    #[test]
    fn plain_queries_pass_through() {
        assert_eq!(escape_like("alice"), "alice");
        assert_eq!(escape_like("dev@example.com"), "dev@example.com");
    }
}
