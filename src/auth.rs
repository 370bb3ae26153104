//! Authentication helpers and token providers.
//!
//! Firefly calls carry an IMS bearer token obtained through the OAuth 2.0
//! client-credentials grant. [`ClientCredentialsTokenProvider`] performs a
//! fresh exchange on every call; nothing is cached.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};

use crate::config::FireflyConfig;
use crate::error::{FireflyError, Result};
use crate::types::AccessTokenResponse;

/// Bearer token with its declared lifetime.
#[derive(Debug, Clone)]
pub struct AccessToken {
    token: SecretString,
    /// Usually `bearer`
    pub token_type: String,
    /// Lifetime in seconds as reported by IMS
    pub expires_in: u64,
}

impl AccessToken {
    pub fn new(token: impl Into<String>, token_type: impl Into<String>, expires_in: u64) -> Self {
        Self {
            token: SecretString::from(token.into()),
            token_type: token_type.into(),
            expires_in,
        }
    }

    /// Value for the `Authorization` header.
    pub(crate) fn bearer(&self) -> String {
        format!("Bearer {}", self.token.expose_secret())
    }
}

impl From<AccessTokenResponse> for AccessToken {
    fn from(resp: AccessTokenResponse) -> Self {
        Self::new(resp.access_token, resp.token_type, resp.expires_in)
    }
}

/// Supplies bearer tokens for Firefly requests.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    async fn access_token(&self) -> Result<AccessToken>;
}

/// A token provider returning a fixed token, for hosts that manage IMS
/// tokens themselves.
pub struct StaticTokenProvider {
    token: AccessToken,
}

impl StaticTokenProvider {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: AccessToken::new(token, "bearer", 0),
        }
    }
}

#[async_trait]
impl TokenProvider for StaticTokenProvider {
    async fn access_token(&self) -> Result<AccessToken> {
        Ok(self.token.clone())
    }
}

/// OAuth 2.0 client-credentials exchange against Adobe IMS.
pub struct ClientCredentialsTokenProvider {
    endpoint: String,
    client_id: String,
    client_secret: SecretString,
    scope: String,
    http: reqwest::Client,
}

impl ClientCredentialsTokenProvider {
    pub fn new(config: &FireflyConfig, http: reqwest::Client) -> Self {
        Self {
            endpoint: config.token_endpoint(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            scope: config.scope_string(),
            http,
        }
    }
}

#[async_trait]
impl TokenProvider for ClientCredentialsTokenProvider {
    async fn access_token(&self) -> Result<AccessToken> {
        tracing::debug!(endpoint = %self.endpoint, "requesting Firefly access token");

        let form = [
            ("grant_type", "client_credentials"),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.expose_secret()),
            ("scope", self.scope.as_str()),
        ];

        let response = self
            .http
            .post(&self.endpoint)
            .form(&form)
            .send()
            .await
            .map_err(|e| FireflyError::Authentication {
                status: None,
                message: format!("Token endpoint request failed: {e}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "Firefly token request rejected");
            return Err(FireflyError::Authentication {
                status: Some(status.as_u16()),
                message: body,
            });
        }

        let token: AccessTokenResponse = response.json().await.map_err(|e| {
            FireflyError::Authentication {
                status: Some(status.as_u16()),
                message: format!("Failed to parse token response: {e}"),
            }
        })?;

        tracing::debug!(expires_in = token.expires_in, "obtained Firefly access token");
        Ok(token.into())
    }
}
