use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use storage::dto::user::{ProfileResponse, UpdateProfileRequest, UserSearchResult};
use storage::models::{Notification, Streak, User};
use uuid::Uuid;
use validator::Validate;

use crate::clients::auth::AuthUser;
use crate::error::WebError;
use crate::state::AppState;

use super::services;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

#[utoipa::path(
    get,
    path = "/api/users/search",
    params(
        ("q" = String, Query, description = "Search term, minimum 3 characters")
    ),
    responses(
        (status = 200, description = "Matching users, at most 10", body = Vec<UserSearchResult>)
    ),
    tag = "users"
)]
pub async fn search_users(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Response, WebError> {
    let users = services::search_users(state.db.pool(), &query.q).await?;

    Ok(Json(users).into_response())
}

#[utoipa::path(
    get,
    path = "/api/users/me",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Profile with streak, achievements and participations", body = ProfileResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "No local account for this session")
    ),
    tag = "users"
)]
pub async fn get_profile(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Response, WebError> {
    let profile = services::get_profile(state.db.pool(), user.id).await?;

    Ok(Json(profile).into_response())
}

#[utoipa::path(
    put,
    path = "/api/users/me/profile",
    request_body = UpdateProfileRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Profile updated, onboarding marked complete", body = User),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "users"
)]
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let updated = services::update_profile(state.db.pool(), user.id, &req).await?;

    Ok(Json(updated).into_response())
}

#[utoipa::path(
    get,
    path = "/api/users/me/streak",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Current streak (null if none), reset if a day was missed", body = Streak),
        (status = 401, description = "Unauthorized")
    ),
    tag = "users"
)]
pub async fn get_streak(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Response, WebError> {
    let streak = services::get_streak(state.db.pool(), user.id).await?;

    Ok(Json(streak).into_response())
}

#[utoipa::path(
    post,
    path = "/api/users/me/streak/freeze",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Freeze consumed", body = Streak),
        (status = 400, description = "No freezes available"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "users"
)]
pub async fn use_streak_freeze(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Response, WebError> {
    let streak = services::use_streak_freeze(state.db.pool(), user.id).await?;

    Ok(Json(streak).into_response())
}

#[utoipa::path(
    get,
    path = "/api/users/me/notifications",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Newest notifications first, at most 50", body = Vec<Notification>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "users"
)]
pub async fn list_notifications(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Response, WebError> {
    let notifications = services::list_notifications(state.db.pool(), user.id).await?;

    Ok(Json(notifications).into_response())
}

#[utoipa::path(
    post,
    path = "/api/users/me/notifications/{id}/read",
    params(
        ("id" = Uuid, Path, description = "Notification id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Notification marked read", body = Notification),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Notification not found")
    ),
    tag = "users"
)]
pub async fn mark_notification_read(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let notification = services::mark_notification_read(state.db.pool(), user.id, id).await?;

    Ok(Json(notification).into_response())
}

#[utoipa::path(
    get,
    path = "/api/users/me/achievements",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Earned badges, newest first", body = Vec<storage::dto::user::AchievementDetail>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "users"
)]
pub async fn list_achievements(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Response, WebError> {
    let achievements = services::list_achievements(state.db.pool(), user.id).await?;

    Ok(Json(achievements).into_response())
}
