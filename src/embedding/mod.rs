//! Embedding generation for question similarity.
//!
//! Local sentence-transformer inference through FastEmbed-rs is available with
//! the `semantic-embeddings` feature. Without it, a deterministic
//! feature-hashing embedder is used instead.

mod config;
mod hashed;
mod models;
#[cfg(feature = "semantic-embeddings")]
mod service;
mod traits;

pub use config::EmbeddingConfig;
pub use hashed::{HashedEmbedder, HASHED_DIMENSIONS};
pub use models::{EmbeddingModel, ModelInfo};
#[cfg(feature = "semantic-embeddings")]
pub use service::FastEmbedder;
pub use traits::Embedder;

use anyhow::Result;
use std::sync::Arc;
use tracing::info;
#[cfg(not(feature = "semantic-embeddings"))]
use tracing::warn;

/// Build the embedder selected by the configuration.
pub fn create_embedder(config: &EmbeddingConfig) -> Result<Arc<dyn Embedder>> {
    if !config.is_semantic() {
        info!("Using hashed embeddings ({HASHED_DIMENSIONS} dimensions)");
        return Ok(Arc::new(HashedEmbedder::new()));
    }

    #[cfg(feature = "semantic-embeddings")]
    {
        let embedder = FastEmbedder::new(config.clone())?;
        info!(
            model = %config.model,
            dimensions = embedder.dimensions(),
            "Embedding model loaded"
        );
        Ok(Arc::new(embedder))
    }

    #[cfg(not(feature = "semantic-embeddings"))]
    {
        warn!(
            model = %config.model,
            "Semantic embeddings requested but the `semantic-embeddings` feature is not enabled. \
             Falling back to hashed embeddings."
        );
        Ok(Arc::new(HashedEmbedder::new()))
    }
}
