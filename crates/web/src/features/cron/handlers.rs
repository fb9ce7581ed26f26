use std::str::FromStr;

use axum::{
    Json,
    extract::{Query, State},
    http::{HeaderMap, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::WebError;
use crate::state::AppState;

use super::services;

/// Which batch job an external scheduler is firing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerKind {
    Start,
    Reminder,
}

impl FromStr for TriggerKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "start" => Ok(Self::Start),
            "reminder" => Ok(Self::Reminder),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TriggerQuery {
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TriggerResponse {
    pub success: bool,
    pub message: String,
}

/// The trigger is never open: a missing or mismatching bearer token is
/// rejected regardless of deployment configuration.
fn check_cron_secret(headers: &HeaderMap, secret: &str) -> Result<(), WebError> {
    let supplied = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or(WebError::Unauthorized)?;

    if supplied != format!("Bearer {}", secret) {
        tracing::warn!("Cron trigger with invalid secret");
        return Err(WebError::Unauthorized);
    }

    Ok(())
}

#[utoipa::path(
    get,
    path = "/api/cron/weekend-notifications",
    params(
        ("type" = String, Query, description = "Batch to fire: start or reminder")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Notifications sent", body = TriggerResponse),
        (status = 400, description = "Unknown trigger type"),
        (status = 401, description = "Missing or invalid cron secret")
    ),
    tag = "cron"
)]
pub async fn weekend_notifications(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<TriggerQuery>,
) -> Result<Response, WebError> {
    check_cron_secret(&headers, &state.config.cron_secret)?;

    let kind = query
        .kind
        .as_deref()
        .and_then(|s| TriggerKind::from_str(s).ok())
        .ok_or_else(|| {
            WebError::BadRequest("Invalid type. Use ?type=start or ?type=reminder".to_string())
        })?;

    let message = match kind {
        TriggerKind::Start => {
            services::notify_weekend_contest_start(state.db.pool()).await?;
            "Weekend contest start notifications sent"
        }
        TriggerKind::Reminder => {
            services::notify_weekend_reminder(state.db.pool()).await?;
            "Weekend reminder notifications sent"
        }
    };

    Ok(Json(TriggerResponse {
        success: true,
        message: message.to_string(),
    })
    .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn trigger_kind_parses_known_values_only() {
        assert_eq!(TriggerKind::from_str("start"), Ok(TriggerKind::Start));
        assert_eq!(TriggerKind::from_str("reminder"), Ok(TriggerKind::Reminder));
        assert!(TriggerKind::from_str("weekly").is_err());
        assert!(TriggerKind::from_str("").is_err());
    }

    #[test]
    fn missing_or_wrong_secret_is_rejected() {
        let empty = HeaderMap::new();
        assert!(check_cron_secret(&empty, "s3cret").is_err());

        let mut wrong = HeaderMap::new();
        wrong.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer nope"));
        assert!(check_cron_secret(&wrong, "s3cret").is_err());

        let mut bare = HeaderMap::new();
        bare.insert(header::AUTHORIZATION, HeaderValue::from_static("s3cret"));
        assert!(check_cron_secret(&bare, "s3cret").is_err());
    }

    #[test]
    fn matching_secret_is_accepted() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer s3cret"),
        );
        assert!(check_cron_secret(&headers, "s3cret").is_ok());
    }
}
