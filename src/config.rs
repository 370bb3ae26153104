//! Firefly configuration
//!
//! Credentials and endpoints shared read-only by every call made through a
//! provider instance.

use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;

use crate::error::{FireflyError, Result};

/// Environment variable holding the IMS client id.
pub const CLIENT_ID_ENV: &str = "ADOBE_FIREFLY_CLIENT_ID";
/// Environment variable holding the IMS client secret.
pub const CLIENT_SECRET_ENV: &str = "ADOBE_FIREFLY_CLIENT_SECRET";
/// Optional environment override for the Firefly API host.
pub const BASE_URL_ENV: &str = "ADOBE_FIREFLY_BASE_URL";

/// Default Firefly API host
pub const DEFAULT_BASE_URL: &str = "https://firefly-api.adobe.io";
/// Default Adobe IMS host
pub const DEFAULT_IMS_URL: &str = "https://ims-na1.adobelogin.com";

/// Scopes requested in the client-credentials grant.
pub const DEFAULT_SCOPES: &[&str] = &[
    "openid",
    "AdobeID",
    "session",
    "additional_info",
    "read_organizations",
    "firefly_api",
    "ff_apis",
];

/// Adobe Firefly configuration
#[derive(Debug, Clone)]
pub struct FireflyConfig {
    /// IMS client id, also sent as `x-api-key`
    pub client_id: String,
    /// IMS client secret
    pub client_secret: SecretString,
    /// Firefly API host
    pub base_url: String,
    /// Adobe IMS host
    pub ims_url: String,
    /// OAuth scopes for the token exchange
    pub scopes: Vec<String>,
    /// Overall HTTP request timeout
    pub timeout: Option<Duration>,
    /// HTTP connect timeout
    pub connect_timeout: Option<Duration>,
}

impl Default for FireflyConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: SecretString::from(String::new()),
            base_url: DEFAULT_BASE_URL.to_string(),
            ims_url: DEFAULT_IMS_URL.to_string(),
            scopes: DEFAULT_SCOPES.iter().map(|s| (*s).to_string()).collect(),
            timeout: None,
            connect_timeout: None,
        }
    }
}

impl FireflyConfig {
    /// Create a configuration from a client id and secret.
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: SecretString::from(client_secret.into()),
            ..Default::default()
        }
    }

    /// Load credentials from `ADOBE_FIREFLY_CLIENT_ID` / `ADOBE_FIREFLY_CLIENT_SECRET`.
    ///
    /// Missing variables become empty strings; the token endpoint rejects
    /// them on first use.
    pub fn from_env() -> Self {
        let mut config = Self::new(
            std::env::var(CLIENT_ID_ENV).unwrap_or_default(),
            std::env::var(CLIENT_SECRET_ENV).unwrap_or_default(),
        );
        if let Ok(base_url) = std::env::var(BASE_URL_ENV)
            && !base_url.trim().is_empty()
        {
            config.base_url = base_url;
        }
        config
    }

    /// Fill blank credentials from the environment.
    pub(crate) fn fill_from_env(&mut self) {
        if self.client_id.is_empty()
            && let Ok(id) = std::env::var(CLIENT_ID_ENV)
        {
            self.client_id = id;
        }
        if self.client_secret.expose_secret().is_empty()
            && let Ok(secret) = std::env::var(CLIENT_SECRET_ENV)
        {
            self.client_secret = SecretString::from(secret);
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_ims_url(mut self, ims_url: impl Into<String>) -> Self {
        self.ims_url = ims_url.into();
        self
    }

    pub fn with_scopes(mut self, scopes: Vec<String>) -> Self {
        self.scopes = scopes;
        self
    }

    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// `POST` target of the client-credentials grant.
    pub fn token_endpoint(&self) -> String {
        format!("{}/ims/token/v3", self.ims_url.trim_end_matches('/'))
    }

    /// `POST` target of image generation.
    pub fn generate_endpoint(&self) -> String {
        format!("{}/v3/images/generate", self.base_url.trim_end_matches('/'))
    }

    /// Scope list in the comma-separated form IMS expects.
    pub fn scope_string(&self) -> String {
        self.scopes.join(",")
    }

    /// Build the shared HTTP client honoring the configured timeouts.
    pub fn build_http_client(&self) -> Result<reqwest::Client> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(timeout) = self.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        builder
            .build()
            .map_err(|e| FireflyError::Configuration(format!("Failed to build HTTP client: {e}")))
    }
}
