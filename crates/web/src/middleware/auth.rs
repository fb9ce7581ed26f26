use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;

use crate::clients::auth::AuthUser;
use crate::error::WebError;
use crate::state::AppState;

/// Cookie the auth provider's browser SDK stores the access token in.
const SESSION_COOKIE: &str = "sb-access-token";

/// Exact paths served without a session.
const PUBLIC_ROUTES: &[&str] = &["/", "/privacy", "/terms", "/refund", "/contact"];

/// Prefixes the gate never inspects. API and auth routes do their own
/// session handling; the API docs stay reachable.
const SKIP_PREFIXES: &[&str] = &[
    "/_next",
    "/api",
    "/auth",
    "/public",
    "/swagger-ui",
    "/api-docs",
];

pub fn is_public_route(path: &str) -> bool {
    PUBLIC_ROUTES.contains(&path)
}

pub fn should_skip_gate(path: &str) -> bool {
    SKIP_PREFIXES.iter().any(|prefix| path.starts_with(prefix))
}

/// Pull the access token from the Authorization header or the session
/// cookie, in that order.
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    if let Some(value) = headers.get(header::AUTHORIZATION) {
        if let Ok(value) = value.to_str() {
            if let Some(token) = value.strip_prefix("Bearer ") {
                return Some(token.to_string());
            }
        }
    }

    CookieJar::from_headers(headers)
        .get(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
}

/// Session gate over page paths: unauthenticated visitors get sent to
/// sign-in, everything else passes through. Per-page concerns such as
/// onboarding redirects stay with the pages.
pub async fn session_gate(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let path = req.uri().path();

    if should_skip_gate(path) || is_public_route(path) {
        return next.run(req).await;
    }

    let user = match session_token(req.headers()) {
        Some(token) => state.auth.current_user(&token).await.unwrap_or_else(|e| {
            tracing::warn!("Session verification failed: {}", e);
            None
        }),
        None => None,
    };

    if user.is_none() {
        return Redirect::to("/auth/signin").into_response();
    }

    next.run(req).await
}

/// Route-layer session check for API endpoints. Responds 401 JSON and
/// injects the authenticated user as a request extension.
pub async fn require_user(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, WebError> {
    let token = session_token(req.headers()).ok_or(WebError::Unauthorized)?;

    let user: AuthUser = state
        .auth
        .current_user(&token)
        .await
        .map_err(|e| {
            tracing::warn!("Session verification failed: {}", e);
            WebError::Unauthorized
        })?
        .ok_or(WebError::Unauthorized)?;

    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn public_pages_bypass_the_gate() {
        for path in ["/", "/privacy", "/terms", "/refund", "/contact"] {
            assert!(is_public_route(path), "{path} should be public");
        }
        assert!(!is_public_route("/dashboard"));
        assert!(!is_public_route("/contests"));
    }

    #[test]
    fn skip_prefixes_bypass_the_gate() {
        assert!(should_skip_gate("/api/razorpay/verify-payment"));
        assert!(should_skip_gate("/auth/callback"));
        assert!(should_skip_gate("/_next/static/chunk.js"));
        assert!(should_skip_gate("/public/logo.svg"));
        assert!(!should_skip_gate("/dashboard"));
        assert!(!should_skip_gate("/onboarding"));
    }

    #[test]
    fn bearer_header_wins_over_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer header-token"),
        );
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("sb-access-token=cookie-token"),
        );
        assert_eq!(session_token(&headers).as_deref(), Some("header-token"));
    }

    #[test]
    fn cookie_token_is_used_without_header() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; sb-access-token=cookie-token"),
        );
        assert_eq!(session_token(&headers).as_deref(), Some("cookie-token"));
    }

    #[test]
    fn no_credentials_means_no_token() {
        assert_eq!(session_token(&HeaderMap::new()), None);
    }
}
