use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use storage::dto::user::{AchievementDetail, ProfileResponse, UpdateProfileRequest, UserSearchResult};
use storage::error::Result;
use storage::models::{Notification, Streak, User};
use storage::repository::achievement::AchievementRepository;
use storage::repository::notification::NotificationRepository;
use storage::repository::participant::ParticipantRepository;
use storage::repository::streak::StreakRepository;
use storage::repository::user::UserRepository;

const SEARCH_MIN_CHARS: usize = 3;
const SEARCH_LIMIT: i64 = 10;
const NOTIFICATION_LIMIT: i64 = 50;

/// A streak survives same-day and next-day reads; a gap of more than
/// one full calendar day means a missed day.
fn streak_lapsed(last_active_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    let days = (now.date_naive() - last_active_at.date_naive()).num_days();
    days > 1
}

/// Search queries shorter than three characters return nothing, and
/// never reach the store. The length check is on the raw input, no
/// trimming.
fn normalized_query(query: &str) -> Option<&str> {
    (query.chars().count() >= SEARCH_MIN_CHARS).then_some(query)
}

pub async fn search_users(pool: &PgPool, query: &str) -> Result<Vec<UserSearchResult>> {
    let Some(query) = normalized_query(query) else {
        return Ok(Vec::new());
    };

    UserRepository::new(pool).search(query, SEARCH_LIMIT).await
}

pub async fn get_profile(pool: &PgPool, user_id: Uuid) -> Result<ProfileResponse> {
    let user = UserRepository::new(pool).find_by_id(user_id).await?;
    let streak = StreakRepository::new(pool).find(user_id).await?;
    let achievements = AchievementRepository::new(pool).list_for_user(user_id).await?;
    let participations = ParticipantRepository::new(pool).list_for_user(user_id).await?;

    Ok(ProfileResponse {
        user,
        streak,
        achievements,
        participations,
    })
}

pub async fn update_profile(
    pool: &PgPool,
    user_id: Uuid,
    request: &UpdateProfileRequest,
) -> Result<User> {
    UserRepository::new(pool).update_profile(user_id, request).await
}

/// Read the streak, enforcing the missed-day reset lazily: a stale
/// streak is zeroed and restamped before it is returned.
pub async fn get_streak(pool: &PgPool, user_id: Uuid) -> Result<Option<Streak>> {
    let repo = StreakRepository::new(pool);

    let Some(streak) = repo.find(user_id).await? else {
        return Ok(None);
    };

    let now = Utc::now();
    if streak_lapsed(streak.last_active_at, now) {
        return Ok(Some(repo.reset(user_id, now).await?));
    }

    Ok(Some(streak))
}

pub async fn use_streak_freeze(pool: &PgPool, user_id: Uuid) -> Result<Streak> {
    StreakRepository::new(pool).use_freeze(user_id, Utc::now()).await
}

pub async fn list_notifications(pool: &PgPool, user_id: Uuid) -> Result<Vec<Notification>> {
    NotificationRepository::new(pool)
        .list_for_user(user_id, NOTIFICATION_LIMIT)
        .await
}

pub async fn mark_notification_read(
    pool: &PgPool,
    user_id: Uuid,
    notification_id: Uuid,
) -> Result<Notification> {
    NotificationRepository::new(pool)
        .mark_read(notification_id, user_id)
        .await
}

pub async fn list_achievements(pool: &PgPool, user_id: Uuid) -> Result<Vec<AchievementDetail>> {
    AchievementRepository::new(pool).list_for_user(user_id).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn same_day_read_keeps_streak() {
        assert!(!streak_lapsed(at(2026, 8, 26, 1), at(2026, 8, 26, 23)));
    }

    #[test]
    fn next_day_read_keeps_streak() {
        // Late-night activity followed by an early read the next day is
        // still within the grace window.
        assert!(!streak_lapsed(at(2026, 8, 25, 23), at(2026, 8, 26, 0)));
    }

    #[test]
    fn two_calendar_days_resets_streak() {
        assert!(streak_lapsed(at(2026, 8, 24, 23), at(2026, 8, 26, 0)));
        assert!(streak_lapsed(at(2026, 8, 1, 12), at(2026, 8, 26, 12)));
    }

    #[test]
    fn short_queries_are_dropped() {
        assert_eq!(normalized_query(""), None);
        assert_eq!(normalized_query("ab"), None);
    }

    #[test]
    fn three_chars_and_up_are_searched() {
        assert_eq!(normalized_query("abc"), Some("abc"));
        // Raw length counts whitespace, like the original guard.
        assert_eq!(normalized_query(" ab"), Some(" ab"));
        assert_eq!(normalized_query("alice"), Some("alice"));
    }
}
