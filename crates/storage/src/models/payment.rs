use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Payment lifecycle. A row is created `Pending` by order creation and
/// moves to `Completed` exactly once, by signature verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "payment_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Completed,
}

/// One gateway charge. `week_number` NULL means a contest entry fee,
/// non-NULL a penalty for that week's failed weekend test.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Payment {
    pub payment_id: Uuid,
    pub contest_id: Uuid,
    pub user_id: Uuid,
    pub week_number: Option<i32>,
    pub amount: i64,
    pub currency: String,
    pub razorpay_order_id: Option<String>,
    pub razorpay_payment_id: Option<String>,
    pub razorpay_signature: Option<String>,
    pub status: PaymentStatus,
    pub created_at: DateTime<Utc>,
}

impl Payment {
    pub fn is_entry_fee(&self) -> bool {
        self.week_number.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_fee_is_null_week() {
        let payment = Payment {
            payment_id: Uuid::new_v4(),
            contest_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            week_number: None,
            amount: 500,
            currency: "INR".into(),
            razorpay_order_id: None,
            razorpay_payment_id: None,
            razorpay_signature: None,
            status: PaymentStatus::Pending,
            created_at: Utc::now(),
        };
        assert!(payment.is_entry_fee());

        let penalty = Payment {
            week_number: Some(3),
            ..payment
        };
        assert!(!penalty.is_entry_fee());
    }
}
