//! # siumai-provider-firefly
//!
//! Adobe Firefly text-to-image provider behind a generic image model
//! interface.
//!
//! A generation call validates the request against the Firefly schema,
//! exchanges the configured client credentials for an IMS token, calls the
//! Firefly v3 `images/generate` endpoint and downloads every generated asset,
//! returning raw image bytes plus provider metadata.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use siumai_provider_firefly::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), FireflyError> {
//!     // ADOBE_FIREFLY_CLIENT_ID / ADOBE_FIREFLY_CLIENT_SECRET
//!     let model = firefly()?.image("firefly-v3");
//!
//!     let result = model
//!         .do_generate(
//!             ImageCallOptions::new("A beautiful sunset over mountains")
//!                 .with_count(2)
//!                 .with_size("1024x1024"),
//!         )
//!         .await?;
//!
//!     println!("{} images", result.images.len());
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod schema;
pub mod size;
pub mod traits;
pub mod types;

pub use config::FireflyConfig;
pub use error::{FireflyError, Result};
pub use model::{DEFAULT_MODEL_ID, FireflyImageModel, PROVIDER_NAME};
pub use provider::{FireflyBuilder, FireflyProvider, create_firefly, firefly};
pub use traits::ImageModel;

/// Common imports
pub mod prelude {
    pub use crate::auth::{StaticTokenProvider, TokenProvider};
    pub use crate::config::FireflyConfig;
    pub use crate::error::FireflyError;
    pub use crate::model::FireflyImageModel;
    pub use crate::provider::{FireflyBuilder, FireflyProvider, create_firefly, firefly};
    pub use crate::traits::ImageModel;
    pub use crate::types::{
        FireflyImageMetadata, ImageCallOptions, ImageCallResult, ImageGenPayload, Warning,
    };
}
