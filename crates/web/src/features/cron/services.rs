use sqlx::PgPool;
use storage::error::Result;
use storage::repository::notification::NotificationRepository;
use storage::repository::participant::ParticipantRepository;

/// Announce the weekend contest to every paid participant of an
/// active contest. Returns the number of notifications created.
pub async fn notify_weekend_contest_start(pool: &PgPool) -> Result<u64> {
    let audience = ParticipantRepository::new(pool)
        .paid_users_of_active_contests()
        .await?;

    let created = NotificationRepository::new(pool)
        .create_batch(
            &audience,
            "Weekend Contest Started!",
            "This week's weekend contest is live. Complete the test before Sunday night to keep your streak.",
        )
        .await?;

    tracing::info!(recipients = created, "Weekend contest start notifications sent");

    Ok(created)
}

/// Last-call reminder before the weekend test closes, to the same
/// audience as the start announcement.
pub async fn notify_weekend_reminder(pool: &PgPool) -> Result<u64> {
    let audience = ParticipantRepository::new(pool)
        .paid_users_of_active_contests()
        .await?;

    let created = NotificationRepository::new(pool)
        .create_batch(
            &audience,
            "Weekend Test Reminder",
            "The weekend test closes tonight. Finish your remaining problems to avoid the penalty.",
        )
        .await?;

    tracing::info!(recipients = created, "Weekend reminder notifications sent");

    Ok(created)
}
