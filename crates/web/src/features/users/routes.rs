use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::middleware::auth::require_user;
use crate::state::AppState;

use super::handlers::{
    get_profile, get_streak, list_achievements, list_notifications, mark_notification_read,
    search_users, update_profile, use_streak_freeze,
};

pub fn routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/me", get(get_profile))
        .route("/me/profile", put(update_profile))
        .route("/me/streak", get(get_streak))
        .route("/me/streak/freeze", post(use_streak_freeze))
        .route("/me/notifications", get(list_notifications))
        .route("/me/notifications/:id/read", post(mark_notification_read))
        .route("/me/achievements", get(list_achievements))
        .route_layer(middleware::from_fn_with_state(state, require_user));

    Router::new()
        .route("/search", get(search_users))
        .merge(protected)
}
