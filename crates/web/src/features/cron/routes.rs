use axum::{Router, routing::get};

use crate::state::AppState;

use super::handlers::weekend_notifications;

pub fn routes() -> Router<AppState> {
    Router::new().route("/weekend-notifications", get(weekend_notifications))
}
