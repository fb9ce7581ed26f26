use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::Payment;

pub struct PaymentRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> PaymentRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a pending payment ahead of the gateway order request.
    pub async fn create_pending(
        &self,
        contest_id: Uuid,
        user_id: Uuid,
        week_number: Option<i32>,
        amount: i64,
        currency: &str,
    ) -> Result<Payment> {
        let payment = sqlx::query_as::<_, Payment>(
            r#"
            INSERT INTO payments (contest_id, user_id, week_number, amount, currency, status)
            VALUES ($1, $2, $3, $4, $5, 'pending')
            RETURNING payment_id, contest_id, user_id, week_number, amount, currency,
                      razorpay_order_id, razorpay_payment_id, razorpay_signature,
                      status, created_at
            "#,
        )
        .bind(contest_id)
        .bind(user_id)
        .bind(week_number)
        .bind(amount)
        .bind(currency)
        .fetch_one(self.pool)
        .await?;

        Ok(payment)
    }

    /// Attach the gateway order handle once the order is created.
    pub async fn set_order_id(&self, payment_id: Uuid, order_id: &str) -> Result<Payment> {
        sqlx::query_as::<_, Payment>(
            r#"
            UPDATE payments
            SET razorpay_order_id = $2
            WHERE payment_id = $1
            RETURNING payment_id, contest_id, user_id, week_number, amount, currency,
                      razorpay_order_id, razorpay_payment_id, razorpay_signature,
                      status, created_at
            "#,
        )
        .bind(payment_id)
        .bind(order_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)
    }

    pub async fn find_by_id(&self, payment_id: Uuid) -> Result<Payment> {
        sqlx::query_as::<_, Payment>(
            r#"
            SELECT payment_id, contest_id, user_id, week_number, amount, currency,
                   razorpay_order_id, razorpay_payment_id, razorpay_signature,
                   status, created_at
            FROM payments
            WHERE payment_id = $1
            "#,
        )
        .bind(payment_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)
    }

    /// Mark a verified payment completed and update the participant's
    /// entitlement flags, all in one transaction. Entry fees grant
    /// access; penalty payments clear the debt and zero the contest
    /// streak.
    pub async fn complete_verified(
        &self,
        payment_id: Uuid,
        contest_id: Uuid,
        user_id: Uuid,
        razorpay_payment_id: &str,
        razorpay_signature: &str,
        now: DateTime<Utc>,
    ) -> Result<Payment> {
        let mut tx = self.pool.begin().await?;

        let payment = sqlx::query_as::<_, Payment>(
            r#"
            UPDATE payments
            SET razorpay_payment_id = $2,
                razorpay_signature = $3,
                status = 'completed'
            WHERE payment_id = $1
            RETURNING payment_id, contest_id, user_id, week_number, amount, currency,
                      razorpay_order_id, razorpay_payment_id, razorpay_signature,
                      status, created_at
            "#,
        )
        .bind(payment_id)
        .bind(razorpay_payment_id)
        .bind(razorpay_signature)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(StorageError::NotFound)?;

        let updated = if payment.is_entry_fee() {
            sqlx::query(
                r#"
                UPDATE contest_participants
                SET has_paid = TRUE,
                    needs_payment = FALSE,
                    last_payment_date = $3
                WHERE contest_id = $1 AND user_id = $2
                "#,
            )
            .bind(contest_id)
            .bind(user_id)
            .bind(now)
            .execute(&mut *tx)
            .await?
        } else {
            sqlx::query(
                r#"
                UPDATE contest_participants
                SET needs_payment = FALSE,
                    last_payment_date = $3,
                    current_streak = 0
                WHERE contest_id = $1 AND user_id = $2
                "#,
            )
            .bind(contest_id)
            .bind(user_id)
            .bind(now)
            .execute(&mut *tx)
            .await?
        };

        if updated.rows_affected() == 0 {
            // Roll back the payment update rather than complete a
            // payment with no matching participant.
            return Err(StorageError::NotFound);
        }

        tx.commit().await?;

        Ok(payment)
    }
}
