use axum::{
    Extension, Json,
    extract::State,
    response::{IntoResponse, Response},
};
use storage::dto::payment::{
    CreateOrderRequest, CreateOrderResponse, VerifyPaymentRequest, VerifyPaymentResponse,
};
use validator::Validate;

use crate::clients::auth::AuthUser;
use crate::error::WebError;
use crate::state::AppState;

use super::services;

#[utoipa::path(
    post,
    path = "/api/razorpay/create-order",
    request_body = CreateOrderRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Gateway order created", body = CreateOrderResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Contest not found")
    ),
    tag = "payments"
)]
pub async fn create_order(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<CreateOrderRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let order = services::create_order(&state, user.id, &req).await?;

    Ok(Json(order).into_response())
}

#[utoipa::path(
    post,
    path = "/api/razorpay/verify-payment",
    request_body = VerifyPaymentRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Payment verified and entitlements updated", body = VerifyPaymentResponse),
        (status = 400, description = "Invalid payment signature"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Payment or participant not found")
    ),
    tag = "payments"
)]
pub async fn verify_payment(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<VerifyPaymentRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    services::verify_payment(&state, user.id, &req).await?;

    Ok(Json(VerifyPaymentResponse { success: true }).into_response())
}
