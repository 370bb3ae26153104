//! Adobe Firefly provider
//!
//! Entry points for creating Firefly image models.
//!
//! ```rust,ignore
//! use siumai_provider_firefly::prelude::*;
//!
//! let firefly = create_firefly(FireflyConfig::new("client-id", "client-secret"))?;
//! let model = firefly.image("firefly-v3");
//!
//! let result = model
//!     .do_generate(ImageCallOptions::new("A beautiful sunset over mountains").with_count(2))
//!     .await?;
//! ```

use secrecy::SecretString;
use std::sync::Arc;
use std::time::Duration;

use crate::config::FireflyConfig;
use crate::error::Result;
use crate::model::{DEFAULT_MODEL_ID, FireflyImageModel};

/// Factory for [`FireflyImageModel`]s sharing one configuration and HTTP client.
#[derive(Debug, Clone)]
pub struct FireflyProvider {
    config: Arc<FireflyConfig>,
    http_client: reqwest::Client,
}

impl FireflyProvider {
    /// Create a provider, building an HTTP client from the config timeouts.
    pub fn new(config: FireflyConfig) -> Result<Self> {
        let http_client = config.build_http_client()?;
        Ok(Self::with_http_client(config, http_client))
    }

    pub fn with_http_client(config: FireflyConfig, http_client: reqwest::Client) -> Self {
        Self {
            config: Arc::new(config),
            http_client,
        }
    }

    pub fn builder() -> FireflyBuilder {
        FireflyBuilder::new()
    }

    /// Image model for `model_id`.
    pub fn image(&self, model_id: impl Into<String>) -> FireflyImageModel {
        FireflyImageModel::new(model_id, self.config.clone(), self.http_client.clone())
    }

    /// Image model for `firefly-v3`.
    pub fn image_default(&self) -> FireflyImageModel {
        self.image(DEFAULT_MODEL_ID)
    }

    pub fn config(&self) -> &FireflyConfig {
        &self.config
    }
}

/// Create a Firefly provider from an explicit configuration.
pub fn create_firefly(config: FireflyConfig) -> Result<FireflyProvider> {
    FireflyProvider::new(config)
}

/// Default provider reading `ADOBE_FIREFLY_CLIENT_ID` and
/// `ADOBE_FIREFLY_CLIENT_SECRET` from the environment.
pub fn firefly() -> Result<FireflyProvider> {
    FireflyProvider::new(FireflyConfig::from_env())
}

/// Firefly provider builder
///
/// Blank credentials are filled from the environment on `build`.
#[derive(Debug, Clone, Default)]
pub struct FireflyBuilder {
    config: FireflyConfig,
    http_client: Option<reqwest::Client>,
}

impl FireflyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the IMS client id
    pub fn client_id<S: Into<String>>(mut self, client_id: S) -> Self {
        self.config.client_id = client_id.into();
        self
    }

    /// Set the IMS client secret
    pub fn client_secret<S: Into<String>>(mut self, client_secret: S) -> Self {
        self.config.client_secret = SecretString::from(client_secret.into());
        self
    }

    /// Override the Firefly API host
    pub fn base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.config.base_url = base_url.into();
        self
    }

    /// Override the IMS host
    pub fn ims_url<S: Into<String>>(mut self, ims_url: S) -> Self {
        self.config.ims_url = ims_url.into();
        self
    }

    /// Replace the requested OAuth scopes
    pub fn scopes(mut self, scopes: Vec<String>) -> Self {
        self.config.scopes = scopes;
        self
    }

    /// Set request timeout
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = Some(timeout);
        self
    }

    /// Set connection timeout
    pub const fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = Some(timeout);
        self
    }

    /// Use a custom HTTP client; configured timeouts are then ignored
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    pub fn build(self) -> Result<FireflyProvider> {
        let mut config = self.config;
        config.fill_from_env();

        match self.http_client {
            Some(client) => Ok(FireflyProvider::with_http_client(config, client)),
            None => FireflyProvider::new(config),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CLIENT_ID_ENV, CLIENT_SECRET_ENV};
    use crate::traits::ImageModel;
    use secrecy::ExposeSecret;

    #[test]
    fn image_uses_requested_model_id() {
        let provider = FireflyProvider::new(FireflyConfig::new("id", "secret")).unwrap();
        assert_eq!(provider.image("firefly-v4").model_id(), "firefly-v4");
        assert_eq!(provider.image_default().model_id(), "firefly-v3");
    }

    #[test]
    fn builder_sets_endpoints_and_timeouts() {
        let provider = FireflyProvider::builder()
            .client_id("id")
            .client_secret("secret")
            .base_url("http://firefly.test")
            .ims_url("http://ims.test")
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap();

        let config = provider.config();
        assert_eq!(config.client_id, "id");
        assert_eq!(config.generate_endpoint(), "http://firefly.test/v3/images/generate");
        assert_eq!(config.token_endpoint(), "http://ims.test/ims/token/v3");
        assert_eq!(config.timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn builder_falls_back_to_environment() {
        temp_env::with_vars(
            [
                (CLIENT_ID_ENV, Some("env-id")),
                (CLIENT_SECRET_ENV, Some("env-secret")),
            ],
            || {
                let provider = FireflyProvider::builder().build().unwrap();
                assert_eq!(provider.config().client_id, "env-id");
                assert_eq!(provider.config().client_secret.expose_secret(), "env-secret");
            },
        );
    }

    #[test]
    fn default_provider_reads_environment() {
        temp_env::with_vars(
            [
                (CLIENT_ID_ENV, Some("default-id")),
                (CLIENT_SECRET_ENV, None::<&str>),
            ],
            || {
                let provider = firefly().unwrap();
                assert_eq!(provider.config().client_id, "default-id");
                assert!(provider.config().client_secret.expose_secret().is_empty());
            },
        );
    }
}
