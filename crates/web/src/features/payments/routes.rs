use axum::{Router, middleware, routing::post};

use crate::middleware::auth::require_user;
use crate::state::AppState;

use super::handlers::{create_order, verify_payment};

pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/create-order", post(create_order))
        .route("/verify-payment", post(verify_payment))
        .route_layer(middleware::from_fn_with_state(state, require_user))
}
