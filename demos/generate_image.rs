//! Generate images with Adobe Firefly and save them to disk.
//!
//! ```bash
//! export ADOBE_FIREFLY_CLIENT_ID="..."
//! export ADOBE_FIREFLY_CLIENT_SECRET="..."
//! RUST_LOG=siumai_provider_firefly=debug cargo run --example generate_image -- "a lighthouse at dusk"
//! ```

use siumai_provider_firefly::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let prompt = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "A beautiful sunset over mountains".to_string());

    let model = firefly()?.image_default();
    println!(
        "Generating with {} / {} (max {} per call)",
        model.provider(),
        model.model_id(),
        model.max_images_per_call()
    );

    let result = model
        .do_generate(
            ImageCallOptions::new(prompt)
                .with_count(2)
                .with_size("1024x1024"),
        )
        .await?;

    let metadata: Option<FireflyImageMetadata> = result.metadata_for("adobe-firefly");
    if let Some(meta) = &metadata {
        println!("Job {} finished with status {}", meta.job_id, meta.status);
    }

    for (i, bytes) in result.images.iter().enumerate() {
        let ext = metadata
            .as_ref()
            .and_then(|m| m.images.get(i))
            .and_then(|info| info.media_type.as_deref())
            .and_then(|mime| mime.strip_prefix("image/"))
            .unwrap_or("bin");
        let file = format!("firefly_{i}.{ext}");
        std::fs::write(&file, bytes)?;
        println!("Saved {file} ({} bytes)", bytes.len());
    }

    Ok(())
}
