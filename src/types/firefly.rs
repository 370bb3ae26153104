//! Firefly wire types
//!
//! Request and response bodies of the Firefly v3 `images/generate` endpoint
//! and the IMS token endpoint. Field names follow the remote camelCase JSON.

use serde::{Deserialize, Deserializer, Serialize};

/// Smallest accepted edge length in pixels.
pub const MIN_DIMENSION: u32 = 1;
/// Largest accepted edge length in pixels.
pub const MAX_DIMENSION: u32 = 2688;
/// Edge length used when none (or garbage) is supplied.
pub const DEFAULT_DIMENSION: u32 = 1024;
/// Firefly returns at most this many variations per call.
pub const MAX_VARIATIONS: u32 = 4;
/// Locale used to bias prompt interpretation unless overridden.
pub const DEFAULT_LOCALE: &str = "en-US";

/// Reference to an image either by URL or by a prior upload id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicBinaryInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upload_id: Option<String>,
}

/// Style transfer settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Style {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub presets: Option<Vec<String>>,
    /// 0-100
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strength: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_reference: Option<PublicBinaryInput>,
}

/// Structure reference settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Structure {
    /// 0-100
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strength: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_reference: Option<PublicBinaryInput>,
}

/// Output dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    #[serde(default = "default_dimension")]
    pub width: u32,
    #[serde(default = "default_dimension")]
    pub height: u32,
}

impl Default for Size {
    fn default() -> Self {
        Self {
            width: DEFAULT_DIMENSION,
            height: DEFAULT_DIMENSION,
        }
    }
}

const fn default_dimension() -> u32 {
    DEFAULT_DIMENSION
}

/// Content class hint for the generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentClass {
    Photo,
    Art,
}

/// Validated body of `POST /v3/images/generate`.
///
/// Instances are produced by [`crate::schema::validate`], which applies the
/// defaults and range checks before anything is sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageGenPayload {
    pub prompt: String,
    #[serde(default = "default_num_variations")]
    pub num_variations: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seeds: Option<Vec<i64>>,
    #[serde(default)]
    pub size: Size,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub negative_prompt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_class: Option<ContentClass>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visual_intensity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<Style>,
    #[serde(default = "default_locale")]
    pub prompt_biasing_locale_code: String,
    #[serde(default)]
    pub tileable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub structure: Option<Structure>,
}

const fn default_num_variations() -> u32 {
    1
}

fn default_locale() -> String {
    DEFAULT_LOCALE.to_string()
}

/// Location and dimensions of one generated asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputImage {
    pub url: String,
    pub width: u32,
    pub height: u32,
}

/// One entry of `outputs` in the generation response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageOutput {
    pub image: OutputImage,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<i64>,
}

/// Body of a successful generation response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateImageResponse {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub status: String,
    /// Absent, `null` and empty are all treated as "no images".
    #[serde(default, deserialize_with = "null_as_empty")]
    pub outputs: Vec<ImageOutput>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<ImageOutput>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<ImageOutput>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Body of a successful IMS token response.
#[derive(Debug, Clone, Deserialize)]
pub struct AccessTokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
    #[serde(default)]
    pub expires_in: u64,
}
