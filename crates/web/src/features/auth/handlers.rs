use axum::{
    extract::{Query, State},
    response::Redirect,
};
use serde::Deserialize;
use storage::repository::user::UserRepository;

use crate::state::AppState;

const DEFAULT_NEXT: &str = "/contests";
const SIGNIN: &str = "/auth/signin";
const ONBOARDING: &str = "/onboarding";

#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub code: Option<String>,
    pub next: Option<String>,
}

/// OAuth callback: exchange the code for a session, mirror the account
/// locally, then route fresh users into onboarding. A failed local
/// upsert is logged but does not block sign-in.
#[utoipa::path(
    get,
    path = "/auth/callback",
    params(
        ("code" = Option<String>, Query, description = "OAuth authorization code"),
        ("next" = Option<String>, Query, description = "Path to land on after sign-in")
    ),
    responses(
        (status = 303, description = "Redirect to next, onboarding, or sign-in")
    ),
    tag = "auth"
)]
pub async fn callback(
    State(state): State<AppState>,
    Query(query): Query<CallbackQuery>,
) -> Redirect {
    let Some(code) = query.code else {
        return Redirect::to(SIGNIN);
    };

    let session = match state.auth.exchange_code(&code).await {
        Ok(session) => session,
        Err(e) => {
            tracing::error!("Auth callback code exchange failed: {}", e);
            return Redirect::to(SIGNIN);
        }
    };

    let repo = UserRepository::new(state.db.pool());
    let provider_user = &session.user;

    if let Err(e) = repo
        .upsert_from_provider(
            provider_user.id,
            provider_user.email.as_deref(),
            provider_user.user_metadata.display_name(),
            provider_user.user_metadata.avatar_url.as_deref(),
        )
        .await
    {
        tracing::error!(user_id = %provider_user.id, "Account sync failed: {}", e);
    }

    match repo.find_by_id(provider_user.id).await {
        Ok(user) if user.leetcode_username.is_none() => Redirect::to(ONBOARDING),
        _ => Redirect::to(query.next.as_deref().unwrap_or(DEFAULT_NEXT)),
    }
}
