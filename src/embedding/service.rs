//! Sentence-transformer embeddings through FastEmbed-rs.

use std::sync::Mutex;

use anyhow::{Context, Result};
use fastembed::{EmbeddingModel as FastEmbedModel, InitOptions, TextEmbedding};

use super::config::EmbeddingConfig;
use super::models::{EmbeddingModel, ModelInfo};
use super::traits::Embedder;

/// Embedder backed by a local ONNX sentence-transformer model.
///
/// Models are downloaded on first use and cached under the configured cache
/// directory.
pub struct FastEmbedder {
    model: Mutex<TextEmbedding>,
    info: ModelInfo,
}

impl FastEmbedder {
    /// Load the configured model, downloading it if it is not cached yet.
    pub fn new(config: EmbeddingConfig) -> Result<Self> {
        let fastembed_model = Self::to_fastembed_model(&config.model)?;

        let init_options = InitOptions::new(fastembed_model)
            .with_cache_dir(config.models_dir())
            .with_show_download_progress(config.download_progress);

        let model =
            TextEmbedding::try_new(init_options).context("Failed to initialize embedding model")?;

        Ok(Self {
            model: Mutex::new(model),
            info: ModelInfo::from(config.model),
        })
    }

    fn to_fastembed_model(model: &EmbeddingModel) -> Result<FastEmbedModel> {
        match model {
            EmbeddingModel::ParaphraseMultilingualMiniLML12V2 => {
                Ok(FastEmbedModel::ParaphraseMLMiniLML12V2)
            }
            EmbeddingModel::AllMiniLML6V2 => Ok(FastEmbedModel::AllMiniLML6V2),
            EmbeddingModel::BGESmallENV15 => Ok(FastEmbedModel::BGESmallENV15),
            EmbeddingModel::Hashed => {
                anyhow::bail!("The hashed embedder is not a FastEmbed model")
            }
        }
    }
}

impl Embedder for FastEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let model = self
            .model
            .lock()
            .map_err(|e| anyhow::anyhow!("Embedding model lock poisoned: {e}"))?;

        let embeddings = model
            .embed(vec![text], None)
            .context("Failed to generate embedding")?;

        embeddings
            .into_iter()
            .next()
            .ok_or_else(|| anyhow::anyhow!("No embedding returned"))
    }

    fn dimensions(&self) -> usize {
        self.info.dimensions
    }

    fn model_name(&self) -> &str {
        &self.info.name
    }
}
