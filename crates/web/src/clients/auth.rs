use serde::Deserialize;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Auth provider rejected the request ({status}): {body}")]
    Provider {
        status: reqwest::StatusCode,
        body: String,
    },
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserMetadata {
    pub name: Option<String>,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
}

impl UserMetadata {
    /// Display name preference mirrors the sign-in providers: `name`
    /// first, then `full_name`.
    pub fn display_name(&self) -> Option<&str> {
        self.name.as_deref().or(self.full_name.as_deref())
    }
}

/// Account as the auth provider reports it.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: UserMetadata,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    pub user: AuthUser,
}

#[derive(Debug, serde::Serialize)]
struct ExchangeCodeBody<'a> {
    auth_code: &'a str,
}

/// Client for the external auth provider (Supabase GoTrue API):
/// session verification and OAuth code exchange. Session issuance and
/// cookie management stay on the provider's side.
#[derive(Clone)]
pub struct AuthClient {
    http: reqwest::Client,
    base_url: String,
    anon_key: String,
}

impl AuthClient {
    pub fn new(base_url: &str, anon_key: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key: anon_key.to_string(),
        }
    }

    /// Resolve the user behind an access token. A token the provider
    /// does not recognize yields `None`, not an error.
    pub async fn current_user(&self, access_token: &str) -> Result<Option<AuthUser>, AuthError> {
        let response = self
            .http
            .get(format!("{}/auth/v1/user", self.base_url))
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Ok(None);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError::Provider { status, body });
        }

        Ok(Some(response.json::<AuthUser>().await?))
    }

    /// Exchange an OAuth callback code for a session.
    pub async fn exchange_code(&self, code: &str) -> Result<AuthSession, AuthError> {
        let response = self
            .http
            .post(format!("{}/auth/v1/token?grant_type=pkce", self.base_url))
            .header("apikey", &self.anon_key)
            .json(&ExchangeCodeBody { auth_code: code })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError::Provider { status, body });
        }

        Ok(response.json::<AuthSession>().await?)
    }
}
