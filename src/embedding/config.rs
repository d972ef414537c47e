use std::path::PathBuf;

use super::models::EmbeddingModel;

const MODELS_DIR: &str = "models";

/// Which embedder to build and where downloaded ONNX weights live.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddingConfig {
    pub model: EmbeddingModel,
    /// `None` resolves to `~/.saber/models`
    pub cache_dir: Option<PathBuf>,
    pub download_progress: bool,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self::for_model(EmbeddingModel::ParaphraseMultilingualMiniLML12V2)
    }
}

impl EmbeddingConfig {
    pub fn for_model(model: EmbeddingModel) -> Self {
        Self {
            model,
            cache_dir: None,
            download_progress: false,
        }
    }

    /// Parse a model name such as `hashed` or `all-minilm-l6-v2`.
    pub fn from_name(name: &str) -> Result<Self, String> {
        Ok(Self::for_model(name.trim().parse()?))
    }

    pub fn with_cache_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.cache_dir = Some(path.into());
        self
    }

    pub fn with_download_progress(mut self, enabled: bool) -> Self {
        self.download_progress = enabled;
        self
    }

    /// Whether the model needs the `semantic-embeddings` feature
    pub fn is_semantic(&self) -> bool {
        self.model != EmbeddingModel::Hashed
    }

    pub fn models_dir(&self) -> PathBuf {
        match &self.cache_dir {
            Some(dir) => dir.clone(),
            None => dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".saber")
                .join(MODELS_DIR),
        }
    }
}
