use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::config::ClientConfig;
use crate::error::LoginError;

/// A token issued by the provider's token endpoint.
///
/// Immutable value object; a refresh produces a brand-new `ApiToken`.
/// The caller owns persistence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiToken {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
    pub scope: String,
    pub token_type: String,
    pub user_id: i64,
    #[serde(rename = "expirationDate")]
    pub expiration_date: DateTime<Utc>,
}

impl ApiToken {
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expiration_date
    }

    /// Truncated form safe for logs: `abcd-*****-wxyz`.
    pub fn truncated_access_token(&self) -> String {
        truncate_token(&self.access_token)
    }

    pub fn truncated_refresh_token(&self) -> String {
        truncate_token(&self.refresh_token)
    }
}

fn truncate_token(token: &str) -> String {
    let prefix: String = token.chars().take(4).collect();
    let suffix: String = {
        let chars: Vec<char> = token.chars().collect();
        chars[chars.len().saturating_sub(4)..].iter().collect()
    };
    format!("{prefix}-*****-{suffix}")
}

/// Raw success body from the token endpoint.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: String,
    expires_in: i64,
    scope: String,
    token_type: String,
    user_id: i64,
    #[serde(default, rename = "expirationDate")]
    expiration_date: Option<DateTime<Utc>>,
}

impl TokenResponse {
    fn into_api_token(self) -> ApiToken {
        // Use the server-supplied expiration date if present, else compute
        // it from expires_in at decode time.
        let expiration_date = self
            .expiration_date
            .unwrap_or_else(|| Utc::now() + Duration::seconds(self.expires_in));
        ApiToken {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expires_in: self.expires_in,
            scope: self.scope,
            token_type: self.token_type,
            user_id: self.user_id,
            expiration_date,
        }
    }
}

/// Structured error body from a non-2xx token-endpoint response.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiError {
    pub error: String,
    #[serde(default)]
    pub error_description: Option<String>,
}

/// Client for the provider's token endpoint.
///
/// All three grant types post form-encoded bodies to the same endpoint and
/// share one response handler. Each call resolves exactly once with a token
/// or an error; nothing is retried internally.
#[derive(Debug, Clone)]
pub struct TokenClient {
    http: reqwest::Client,
    token_endpoint: String,
    client_id: String,
    redirect_uri: String,
}

impl TokenClient {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            token_endpoint: config.token_endpoint(),
            client_id: config.client_id.clone(),
            redirect_uri: config.redirect_uri.clone(),
        }
    }

    /// Redeem an authorization code with the PKCE verifier it was bound to.
    pub async fn exchange_code(
        &self,
        code: &str,
        code_verifier: &str,
    ) -> Result<ApiToken, LoginError> {
        tracing::debug!("exchanging authorization code for token");
        self.request(&[
            ("grant_type", "authorization_code"),
            ("client_id", self.client_id.as_str()),
            ("code", code),
            ("code_verifier", code_verifier),
            ("redirect_uri", self.redirect_uri.as_str()),
        ])
        .await
    }

    /// Resource-owner-password grant.
    pub async fn exchange_password(
        &self,
        username: &str,
        password: &str,
    ) -> Result<ApiToken, LoginError> {
        tracing::debug!(username, "exchanging password for token");
        self.request(&[
            ("grant_type", "password"),
            ("access_type", "offline"),
            ("client_id", self.client_id.as_str()),
            ("username", username),
            ("password", password),
        ])
        .await
    }

    /// Trade the refresh token for a brand-new `ApiToken`.
    pub async fn refresh(&self, token: &ApiToken) -> Result<ApiToken, LoginError> {
        tracing::debug!(
            refresh_token = %token.truncated_refresh_token(),
            "refreshing token"
        );
        self.request(&[
            ("grant_type", "refresh_token"),
            ("client_id", self.client_id.as_str()),
            ("refresh_token", token.refresh_token.as_str()),
        ])
        .await
    }

    async fn request(&self, form: &[(&str, &str)]) -> Result<ApiToken, LoginError> {
        let resp = self
            .http
            .post(&self.token_endpoint)
            .form(form)
            .send()
            .await?;

        let status = resp.status();
        let body = resp.bytes().await?;

        // A response is only usable if it carries a non-empty body.
        if body.is_empty() {
            return Err(LoginError::EmptyResponse(status.as_u16()));
        }

        if status.is_success() {
            let raw: TokenResponse = serde_json::from_slice(&body)
                .map_err(|e| LoginError::Decode(format!("token response: {e}")))?;
            let token = raw.into_api_token();
            tracing::debug!(
                access_token = %token.truncated_access_token(),
                user_id = token.user_id,
                "token exchange succeeded"
            );
            return Ok(token);
        }

        let api_error: ApiError = serde_json::from_slice(&body)
            .map_err(|e| LoginError::Decode(format!("error response: {e}")))?;
        Err(LoginError::Provider {
            status: status.as_u16(),
            error: api_error.error,
            description: api_error.error_description,
        })
    }
}
