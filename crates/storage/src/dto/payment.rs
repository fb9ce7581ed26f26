use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Request payload for creating a gateway order. A missing `weekNumber`
/// means a contest entry fee, a present one a weekly penalty.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub contest_id: Uuid,

    #[validate(range(min = 1, max = 52, message = "Week number must be between 1 and 52"))]
    pub week_number: Option<i32>,
}

/// Everything the checkout widget needs to open the hosted payment UI.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderResponse {
    pub order_id: String,
    pub payment_id: Uuid,
    pub amount: i64,
    pub currency: String,
    pub key_id: String,
}

/// Callback payload posted by the browser after the hosted checkout
/// completes, echoing the gateway's order/payment ids and signature.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VerifyPaymentRequest {
    #[validate(length(min = 1, message = "Order id is required"))]
    pub razorpay_order_id: String,

    #[validate(length(min = 1, message = "Payment id is required"))]
    pub razorpay_payment_id: String,

    #[validate(length(min = 1, message = "Signature is required"))]
    pub razorpay_signature: String,

    pub payment_id: Uuid,
    pub contest_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VerifyPaymentResponse {
    pub success: bool,
}
