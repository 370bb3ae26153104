//! Image model call types
//!
//! The generic shapes exchanged with the host SDK: what a caller asks for
//! and what a generation call hands back.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Provider-keyed metadata returned alongside the images.
pub type ProviderMetadata = HashMap<String, serde_json::Value>;

/// Options of a single image generation call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageCallOptions {
    /// Text prompt (required)
    pub prompt: Option<String>,
    /// Number of images; values above the provider maximum are clamped
    #[serde(default = "default_count")]
    pub n: u32,
    /// Size as `"WIDTHxHEIGHT"`
    pub size: Option<String>,
    /// Seed for reproducible output
    pub seed: Option<i64>,
    /// Open provider options map keyed by provider name
    #[serde(
        default,
        rename = "providerOptions",
        skip_serializing_if = "HashMap::is_empty"
    )]
    pub provider_options: HashMap<String, serde_json::Value>,
    /// Extra headers for the generation request
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub headers: HashMap<String, String>,
}

const fn default_count() -> u32 {
    1
}

impl Default for ImageCallOptions {
    fn default() -> Self {
        Self {
            prompt: None,
            n: default_count(),
            size: None,
            seed: None,
            provider_options: HashMap::new(),
            headers: HashMap::new(),
        }
    }
}

impl ImageCallOptions {
    /// Options for `n = 1` with the given prompt.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: Some(prompt.into()),
            ..Default::default()
        }
    }

    pub const fn with_count(mut self, n: u32) -> Self {
        self.n = n;
        self
    }

    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }

    pub const fn with_seed(mut self, seed: i64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Attach provider options under `provider`.
    pub fn with_provider_options(
        mut self,
        provider: impl Into<String>,
        options: serde_json::Value,
    ) -> Self {
        self.provider_options.insert(provider.into(), options);
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}

/// Warning from the model provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Warning {
    /// An unsupported setting was provided
    UnsupportedSetting {
        setting: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        details: Option<String>,
    },
    /// Other warning types
    Other { message: String },
}

/// Response information echoed back to the host.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageResponseInfo {
    pub timestamp: DateTime<Utc>,
    pub model_id: String,
    pub headers: HashMap<String, String>,
}

/// Result of a successful generation call.
#[derive(Debug, Clone)]
pub struct ImageCallResult {
    /// Raw image bytes, index-aligned with the provider outputs
    pub images: Vec<Vec<u8>>,
    pub warnings: Vec<Warning>,
    pub provider_metadata: ProviderMetadata,
    pub response: ImageResponseInfo,
}

/// Per-image entry of [`FireflyImageMetadata`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FireflyImageInfo {
    pub url: String,
    pub width: u32,
    pub height: u32,
    pub size_in_bytes: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
}

/// The `"adobe-firefly"` entry of [`ProviderMetadata`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FireflyImageMetadata {
    pub job_id: String,
    pub status: String,
    pub images: Vec<FireflyImageInfo>,
}

impl ImageCallResult {
    /// Typed view of the metadata stored under `provider`.
    pub fn metadata_for<T: serde::de::DeserializeOwned>(&self, provider: &str) -> Option<T> {
        self.provider_metadata
            .get(provider)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }
}
