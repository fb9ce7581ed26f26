use chrono::Utc;
use uuid::Uuid;

use storage::dto::payment::{CreateOrderRequest, CreateOrderResponse, VerifyPaymentRequest};
use storage::repository::contest::ContestRepository;
use storage::repository::payment::PaymentRepository;

use crate::error::{WebError, WebResult};
use crate::state::AppState;

use super::signature::verify_signature;

const CURRENCY: &str = "INR";

/// Amount owed for this charge: the contest entry fee, or the weekly
/// penalty when a week number is given.
fn amount_for(entry_fee: i64, penalty_amount: i64, week_number: Option<i32>) -> i64 {
    if week_number.is_some() {
        penalty_amount
    } else {
        entry_fee
    }
}

/// Create a pending payment and the matching gateway order. The
/// gateway wants the amount in paise; we store and report rupees.
pub async fn create_order(
    state: &AppState,
    user_id: Uuid,
    request: &CreateOrderRequest,
) -> WebResult<CreateOrderResponse> {
    let contest = ContestRepository::new(state.db.pool())
        .find_by_id(request.contest_id)
        .await?;

    let amount = amount_for(contest.entry_fee, contest.penalty_amount, request.week_number);

    let payments = PaymentRepository::new(state.db.pool());
    let payment = payments
        .create_pending(contest.contest_id, user_id, request.week_number, amount, CURRENCY)
        .await?;

    let order = state
        .razorpay
        .create_order(amount * 100, CURRENCY, &payment.payment_id.to_string())
        .await
        .map_err(|e| WebError::Gateway(e.to_string()))?;

    let payment = payments.set_order_id(payment.payment_id, &order.id).await?;

    tracing::info!(
        payment_id = %payment.payment_id,
        order_id = %order.id,
        amount,
        week_number = ?request.week_number,
        "Created gateway order"
    );

    Ok(CreateOrderResponse {
        order_id: order.id,
        payment_id: payment.payment_id,
        amount,
        currency: CURRENCY.to_string(),
        key_id: state.config.razorpay_key_id.clone(),
    })
}

/// Verify the checkout callback and apply the entitlement update.
/// Nothing is mutated unless the signature matches; the payment and
/// participant rows then change together in one transaction.
pub async fn verify_payment(
    state: &AppState,
    user_id: Uuid,
    request: &VerifyPaymentRequest,
) -> WebResult<()> {
    if !verify_signature(
        &state.config.razorpay_key_secret,
        &request.razorpay_order_id,
        &request.razorpay_payment_id,
        &request.razorpay_signature,
    ) {
        tracing::warn!(payment_id = %request.payment_id, "Payment signature mismatch");
        return Err(WebError::InvalidSignature);
    }

    let payment = PaymentRepository::new(state.db.pool())
        .complete_verified(
            request.payment_id,
            request.contest_id,
            user_id,
            &request.razorpay_payment_id,
            &request.razorpay_signature,
            Utc::now(),
        )
        .await?;

    tracing::info!(
        payment_id = %payment.payment_id,
        contest_id = %request.contest_id,
        week_number = ?payment.week_number,
        "Payment completed"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_fee_when_no_week_number() {
        assert_eq!(amount_for(500, 100, None), 500);
    }

    #[test]
    fn penalty_when_week_number_present() {
        assert_eq!(amount_for(500, 100, Some(3)), 100);
    }
}
