use chrono::{Duration, SubsecRound, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use storage::error::StorageError;
use storage::models::{ContestParticipant, PaymentStatus};
use storage::repository::participant::ParticipantRepository;
use storage::repository::payment::PaymentRepository;
use storage::repository::streak::StreakRepository;

async fn seed_user(pool: &PgPool) -> Uuid {
    let user_id = Uuid::new_v4();
    sqlx::query("INSERT INTO users (user_id, email) VALUES ($1, $2)")
        .bind(user_id)
        .bind(format!("{}@example.com", user_id))
        .execute(pool)
        .await
        .unwrap();
    user_id
}

async fn seed_contest(pool: &PgPool) -> Uuid {
    sqlx::query_scalar(
        "INSERT INTO contests (name, entry_fee, penalty_amount) \
         VALUES ('August Grind', 500, 100) RETURNING contest_id",
    )
    .fetch_one(pool)
    .await
    .unwrap()
}

async fn seed_participant(
    pool: &PgPool,
    contest_id: Uuid,
    user_id: Uuid,
    has_paid: bool,
    needs_payment: bool,
    current_streak: i32,
) {
    sqlx::query(
        "INSERT INTO contest_participants \
         (contest_id, user_id, has_paid, needs_payment, current_streak) \
         VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(contest_id)
    .bind(user_id)
    .bind(has_paid)
    .bind(needs_payment)
    .bind(current_streak)
    .execute(pool)
    .await
    .unwrap();
}

async fn participant(pool: &PgPool, contest_id: Uuid, user_id: Uuid) -> ContestParticipant {
    ParticipantRepository::new(pool)
        .list_for_user(user_id)
        .await
        .unwrap()
        .into_iter()
        .find(|p| p.contest_id == contest_id)
        .unwrap()
}

#[sqlx::test]
async fn entry_fee_completion_grants_access(pool: PgPool) {
    let user_id = seed_user(&pool).await;
    let contest_id = seed_contest(&pool).await;
    seed_participant(&pool, contest_id, user_id, false, true, 0).await;

    let payments = PaymentRepository::new(&pool);
    let payment = payments
        .create_pending(contest_id, user_id, None, 500, "INR")
        .await
        .unwrap();

    let completed = payments
        .complete_verified(
            payment.payment_id,
            contest_id,
            user_id,
            "pay_abc123",
            "deadbeef",
            Utc::now(),
        )
        .await
        .unwrap();

    assert_eq!(completed.status, PaymentStatus::Completed);
    assert_eq!(completed.razorpay_payment_id.as_deref(), Some("pay_abc123"));

    let row = participant(&pool, contest_id, user_id).await;
    assert!(row.has_paid);
    assert!(!row.needs_payment);
    assert!(row.last_payment_date.is_some());
}

#[sqlx::test]
async fn penalty_completion_clears_debt_and_zeroes_streak(pool: PgPool) {
    let user_id = seed_user(&pool).await;
    let contest_id = seed_contest(&pool).await;
    seed_participant(&pool, contest_id, user_id, true, true, 5).await;

    let payments = PaymentRepository::new(&pool);
    let payment = payments
        .create_pending(contest_id, user_id, Some(3), 100, "INR")
        .await
        .unwrap();

    payments
        .complete_verified(
            payment.payment_id,
            contest_id,
            user_id,
            "pay_pen456",
            "deadbeef",
            Utc::now(),
        )
        .await
        .unwrap();

    let row = participant(&pool, contest_id, user_id).await;
    assert!(!row.needs_payment);
    assert_eq!(row.current_streak, 0);
    assert!(row.last_payment_date.is_some());
    // Entry-fee entitlement is untouched by penalty payments.
    assert!(row.has_paid);
}

#[sqlx::test]
async fn missing_participant_rolls_back_payment_completion(pool: PgPool) {
    let user_id = seed_user(&pool).await;
    let contest_id = seed_contest(&pool).await;

    let payments = PaymentRepository::new(&pool);
    let payment = payments
        .create_pending(contest_id, user_id, None, 500, "INR")
        .await
        .unwrap();

    let result = payments
        .complete_verified(
            payment.payment_id,
            contest_id,
            user_id,
            "pay_orphan",
            "deadbeef",
            Utc::now(),
        )
        .await;
    assert!(matches!(result, Err(StorageError::NotFound)));

    // The payment update was part of the same transaction, so it must
    // not have stuck.
    let payment = payments.find_by_id(payment.payment_id).await.unwrap();
    assert_eq!(payment.status, PaymentStatus::Pending);
    assert_eq!(payment.razorpay_payment_id, None);
}

#[sqlx::test]
async fn freeze_with_none_left_fails_without_mutation(pool: PgPool) {
    let user_id = seed_user(&pool).await;
    // Truncate to Postgres's microsecond precision so the unchanged
    // row compares equal on read-back.
    let last_active = (Utc::now() - Duration::days(1)).trunc_subsecs(6);
    sqlx::query(
        "INSERT INTO streaks (user_id, current_streak, freezes_left, last_active_at) \
         VALUES ($1, 4, 0, $2)",
    )
    .bind(user_id)
    .bind(last_active)
    .execute(&pool)
    .await
    .unwrap();

    let streaks = StreakRepository::new(&pool);
    let result = streaks.use_freeze(user_id, Utc::now()).await;
    assert!(matches!(result, Err(StorageError::NoFreezesAvailable)));

    let streak = streaks.find(user_id).await.unwrap().unwrap();
    assert_eq!(streak.freezes_left, 0);
    assert_eq!(streak.current_streak, 4);
    assert_eq!(streak.last_active_at, last_active);
}

#[sqlx::test]
async fn freeze_decrements_once_and_stamps_activity(pool: PgPool) {
    let user_id = seed_user(&pool).await;
    let last_active = Utc::now() - Duration::days(1);
    sqlx::query(
        "INSERT INTO streaks (user_id, current_streak, freezes_left, last_active_at) \
         VALUES ($1, 4, 2, $2)",
    )
    .bind(user_id)
    .bind(last_active)
    .execute(&pool)
    .await
    .unwrap();

    let now = Utc::now();
    let streak = StreakRepository::new(&pool)
        .use_freeze(user_id, now)
        .await
        .unwrap();

    assert_eq!(streak.freezes_left, 1);
    assert_eq!(streak.current_streak, 4);
    assert!(streak.last_active_at > last_active);
}

#[sqlx::test]
async fn freeze_for_unknown_user_is_not_found(pool: PgPool) {
    let result = StreakRepository::new(&pool)
        .use_freeze(Uuid::new_v4(), Utc::now())
        .await;
    assert!(matches!(result, Err(StorageError::NotFound)));
}
