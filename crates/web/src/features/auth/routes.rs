use axum::{Router, routing::get};

use crate::state::AppState;

use super::handlers::callback;

pub fn routes() -> Router<AppState> {
    Router::new().route("/callback", get(callback))
}
