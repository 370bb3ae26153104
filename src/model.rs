//! Adobe Firefly image model
//!
//! One call runs a linear pipeline: validate the request, exchange client
//! credentials for a token, call `images/generate`, fetch every returned
//! asset concurrently and assemble the host response. Any failure aborts the
//! whole call; there is no partial result.

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Arc;

use crate::auth::{AccessToken, ClientCredentialsTokenProvider, TokenProvider};
use crate::config::FireflyConfig;
use crate::error::{FireflyError, Result};
use crate::schema;
use crate::size::parse_size;
use crate::traits::ImageModel;
use crate::types::{
    DEFAULT_LOCALE, FireflyImageInfo, FireflyImageMetadata, GenerateImageResponse,
    ImageCallOptions, ImageCallResult, ImageGenPayload, ImageOutput, ImageResponseInfo,
    MAX_VARIATIONS, ProviderMetadata,
};

/// Provider name reported to the host and used as metadata key.
pub const PROVIDER_NAME: &str = "adobe-firefly";
/// Model id used when the caller does not pick one.
pub const DEFAULT_MODEL_ID: &str = "firefly-v3";

/// Payload keys the adapter derives itself; provider options cannot set them.
const ADAPTER_OWNED_KEYS: &[&str] = &["prompt", "numVariations", "size", "seeds"];

/// Headers the adapter sets on the generation request.
const RESERVED_HEADERS: &[&str] = &["authorization", "x-api-key", "content-type", "accept"];

/// Adobe Firefly text-to-image model
#[derive(Clone)]
pub struct FireflyImageModel {
    model_id: String,
    config: Arc<FireflyConfig>,
    http_client: reqwest::Client,
    token_provider: Arc<dyn TokenProvider>,
}

impl std::fmt::Debug for FireflyImageModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FireflyImageModel")
            .field("model_id", &self.model_id)
            .field("base_url", &self.config.base_url)
            .finish_non_exhaustive()
    }
}

impl FireflyImageModel {
    /// Create a model that authenticates with the configured client credentials.
    pub fn new(
        model_id: impl Into<String>,
        config: Arc<FireflyConfig>,
        http_client: reqwest::Client,
    ) -> Self {
        let token_provider = Arc::new(ClientCredentialsTokenProvider::new(
            &config,
            http_client.clone(),
        ));
        Self {
            model_id: model_id.into(),
            config,
            http_client,
            token_provider,
        }
    }

    /// Replace the token source.
    pub fn with_token_provider(mut self, token_provider: Arc<dyn TokenProvider>) -> Self {
        self.token_provider = token_provider;
        self
    }

    pub fn config(&self) -> &FireflyConfig {
        &self.config
    }

    /// Map call options to a validated Firefly payload.
    ///
    /// Runs before any network traffic, so bad input never costs a token
    /// exchange.
    pub fn build_payload(&self, options: &ImageCallOptions) -> Result<ImageGenPayload> {
        let prompt = options
            .prompt
            .as_deref()
            .filter(|p| !p.is_empty())
            .ok_or_else(|| {
                FireflyError::InvalidRequest(
                    "Prompt is required for Adobe Firefly image generation".to_string(),
                )
            })?;

        let mut raw = serde_json::Map::new();

        match options.provider_options.get(PROVIDER_NAME) {
            None | Some(Value::Null) => {}
            Some(Value::Object(extra)) => {
                for (key, value) in extra {
                    if !ADAPTER_OWNED_KEYS.contains(&key.as_str()) {
                        raw.insert(key.clone(), value.clone());
                    }
                }
            }
            Some(_) => {
                return Err(FireflyError::validation(
                    format!("providerOptions.{PROVIDER_NAME}"),
                    "provider options must be an object",
                ));
            }
        }

        let size = parse_size(options.size.as_deref().unwrap_or("1024x1024"));

        raw.insert("prompt".to_string(), json!(prompt));
        raw.insert(
            "numVariations".to_string(),
            json!(options.n.min(MAX_VARIATIONS)),
        );
        raw.insert("size".to_string(), serde_json::to_value(size)?);
        if let Some(seed) = options.seed {
            raw.insert("seeds".to_string(), json!([seed]));
        }
        raw.entry("promptBiasingLocaleCode")
            .or_insert_with(|| json!(DEFAULT_LOCALE));
        raw.entry("tileable").or_insert(Value::Bool(false));

        schema::validate(&Value::Object(raw))
    }

    async fn request_generation(
        &self,
        token: &AccessToken,
        payload: &ImageGenPayload,
        extra_headers: &HashMap<String, String>,
    ) -> Result<GenerateImageResponse> {
        let mut request = self.http_client.post(self.config.generate_endpoint());
        for (name, value) in extra_headers {
            if !RESERVED_HEADERS.contains(&name.to_ascii_lowercase().as_str()) {
                request = request.header(name, value);
            }
        }

        let response = request
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .header("x-api-key", &self.config.client_id)
            .header(AUTHORIZATION, token.bearer())
            .json(payload)
            .send()
            .await
            .map_err(|e| FireflyError::Http(format!("Generation request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(
                model = %self.model_id,
                status = status.as_u16(),
                "Firefly generation request rejected"
            );
            return Err(FireflyError::Generation {
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| FireflyError::Http(format!("Failed to read generation response: {e}")))?;
        serde_json::from_str::<GenerateImageResponse>(&body)
            .map_err(|e| FireflyError::Parse(format!("Failed to parse generation response: {e}")))
    }

    async fn download_image(&self, url: &str) -> Result<Vec<u8>> {
        tracing::debug!(url, "downloading Firefly image");

        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| FireflyError::Download {
                url: url.to_string(),
                status: None,
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(url, status = status.as_u16(), "Firefly image download failed");
            return Err(FireflyError::Download {
                url: url.to_string(),
                status: Some(status.as_u16()),
                message: format!("Download returned HTTP {status}"),
            });
        }

        let bytes = response.bytes().await.map_err(|e| FireflyError::Download {
            url: url.to_string(),
            status: Some(status.as_u16()),
            message: format!("Failed to read image bytes: {e}"),
        })?;
        Ok(bytes.to_vec())
    }

    /// Fetch all assets concurrently; the first failure drops the rest.
    async fn download_images(&self, outputs: &[ImageOutput]) -> Result<Vec<Vec<u8>>> {
        futures::future::try_join_all(
            outputs
                .iter()
                .map(|output| self.download_image(&output.image.url)),
        )
        .await
    }

    fn provider_metadata(
        result: &GenerateImageResponse,
        images: &[Vec<u8>],
    ) -> Result<ProviderMetadata> {
        let metadata = FireflyImageMetadata {
            job_id: result.id.clone(),
            status: result.status.clone(),
            images: result
                .outputs
                .iter()
                .zip(images)
                .map(|(output, bytes)| FireflyImageInfo {
                    url: output.image.url.clone(),
                    width: output.image.width,
                    height: output.image.height,
                    size_in_bytes: bytes.len(),
                    media_type: infer::get(bytes).map(|k| k.mime_type().to_string()),
                })
                .collect(),
        };

        let mut provider_metadata = ProviderMetadata::new();
        provider_metadata.insert(PROVIDER_NAME.to_string(), serde_json::to_value(metadata)?);
        Ok(provider_metadata)
    }
}

#[async_trait]
impl ImageModel for FireflyImageModel {
    fn provider(&self) -> &str {
        PROVIDER_NAME
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }

    fn max_images_per_call(&self) -> u32 {
        MAX_VARIATIONS
    }

    async fn do_generate(&self, options: ImageCallOptions) -> Result<ImageCallResult> {
        let payload = self.build_payload(&options)?;

        let token = self.token_provider.access_token().await?;

        tracing::debug!(
            model = %self.model_id,
            num_variations = payload.num_variations,
            width = payload.size.width,
            height = payload.size.height,
            "sending Firefly generation request"
        );
        let result = self
            .request_generation(&token, &payload, &options.headers)
            .await?;

        if result.outputs.is_empty() {
            return Err(FireflyError::NoImages);
        }

        let images = self.download_images(&result.outputs).await?;
        let provider_metadata = Self::provider_metadata(&result, &images)?;

        tracing::info!(
            model = %self.model_id,
            job_id = %result.id,
            images = images.len(),
            "Firefly generation completed"
        );

        Ok(ImageCallResult {
            images,
            warnings: Vec::new(),
            provider_metadata,
            response: ImageResponseInfo {
                timestamp: chrono::Utc::now(),
                model_id: self.model_id.clone(),
                headers: HashMap::from([(
                    "content-type".to_string(),
                    "application/json".to_string(),
                )]),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::StaticTokenProvider;
    use crate::types::Size;
    use tracing_test::traced_test;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn model() -> FireflyImageModel {
        FireflyImageModel::new(
            DEFAULT_MODEL_ID,
            Arc::new(FireflyConfig::new("client-id", "client-secret")),
            reqwest::Client::new(),
        )
    }

    #[test]
    fn host_contract() {
        let model = model();
        assert_eq!(model.specification_version(), "v2");
        assert_eq!(model.provider(), "adobe-firefly");
        assert_eq!(model.model_id(), "firefly-v3");
        assert_eq!(model.max_images_per_call(), 4);
    }

    #[test]
    fn payload_defaults_match_firefly_request() {
        let payload = model()
            .build_payload(&ImageCallOptions::new("  a quiet harbor  "))
            .unwrap();

        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "prompt": "a quiet harbor",
                "numVariations": 1,
                "size": { "width": 1024, "height": 1024 },
                "promptBiasingLocaleCode": "en-US",
                "tileable": false
            })
        );
    }

    #[test]
    fn count_is_clamped_to_four() {
        let payload = model()
            .build_payload(&ImageCallOptions::new("p").with_count(9))
            .unwrap();
        assert_eq!(payload.num_variations, 4);
    }

    #[test]
    fn size_is_parsed_and_clamped() {
        let payload = model()
            .build_payload(&ImageCallOptions::new("p").with_size("99999x10"))
            .unwrap();
        assert_eq!(payload.size, Size { width: 2688, height: 10 });
    }

    #[test]
    fn seed_becomes_single_element_list() {
        let payload = model()
            .build_payload(&ImageCallOptions::new("p").with_seed(0))
            .unwrap();
        assert_eq!(payload.seeds, Some(vec![0]));

        let err = model()
            .build_payload(&ImageCallOptions::new("p").with_seed(5).with_count(2))
            .unwrap_err();
        assert_eq!(err.field(), Some("seeds"));
    }

    #[test]
    fn missing_or_empty_prompt_is_invalid_request() {
        let mut options = ImageCallOptions::default();
        assert!(matches!(
            model().build_payload(&options),
            Err(FireflyError::InvalidRequest(_))
        ));

        options.prompt = Some(String::new());
        assert!(matches!(
            model().build_payload(&options),
            Err(FireflyError::InvalidRequest(_))
        ));
    }

    #[test]
    fn provider_options_extend_payload() {
        let options = ImageCallOptions::new("p").with_provider_options(
            PROVIDER_NAME,
            json!({
                "negativePrompt": "blur",
                "contentClass": "art",
                "tileable": true,
                "promptBiasingLocaleCode": "ja-JP",
                "numVariations": 3,
                "prompt": "ignored"
            }),
        );

        let payload = model().build_payload(&options).unwrap();
        assert_eq!(payload.prompt, "p");
        assert_eq!(payload.num_variations, 1);
        assert_eq!(payload.negative_prompt.as_deref(), Some("blur"));
        assert!(payload.tileable);
        assert_eq!(payload.prompt_biasing_locale_code, "ja-JP");
    }

    #[test]
    fn provider_options_are_validated() {
        let options = ImageCallOptions::new("p")
            .with_provider_options(PROVIDER_NAME, json!({ "visualIntensity": 42 }));
        let err = model().build_payload(&options).unwrap_err();
        assert_eq!(err.field(), Some("visualIntensity"));

        let options = ImageCallOptions::new("p").with_provider_options(PROVIDER_NAME, json!(3));
        let err = model().build_payload(&options).unwrap_err();
        assert_eq!(err.field(), Some("providerOptions.adobe-firefly"));
    }

    #[tokio::test]
    #[traced_test]
    async fn token_never_reaches_logs() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v3/images/generate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "job-log",
                "status": "succeeded",
                "outputs": [{ "image": {
                    "url": format!("{}/img/0.png", server.uri()),
                    "width": 1024,
                    "height": 1024
                }}]
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/img/0.png"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![1u8, 2, 3]))
            .mount(&server)
            .await;

        let config = FireflyConfig::new("client-id", "client-secret").with_base_url(server.uri());
        let model = FireflyImageModel::new(DEFAULT_MODEL_ID, Arc::new(config), reqwest::Client::new())
            .with_token_provider(Arc::new(StaticTokenProvider::new("very-private-token")));

        let result = model.do_generate(ImageCallOptions::new("p")).await.unwrap();
        assert_eq!(result.images, vec![vec![1u8, 2, 3]]);

        assert!(logs_contain("Firefly generation completed"));
        assert!(!logs_contain("very-private-token"));
        assert!(!logs_contain("client-secret"));
    }
}
