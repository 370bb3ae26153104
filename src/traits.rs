//! Image model capability trait

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{ImageCallOptions, ImageCallResult};

/// The surface a host SDK drives to generate images.
#[async_trait]
pub trait ImageModel: Send + Sync {
    /// Version of the host interface this model implements.
    fn specification_version(&self) -> &'static str {
        "v2"
    }

    /// Provider name, also the key of the provider metadata entry.
    fn provider(&self) -> &str;

    fn model_id(&self) -> &str;

    /// Upper bound for `n` in a single call.
    fn max_images_per_call(&self) -> u32;

    async fn do_generate(&self, options: ImageCallOptions) -> Result<ImageCallResult>;
}
