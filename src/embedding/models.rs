//! Supported embedding models and their metadata.

use std::fmt;

use super::hashed::HASHED_DIMENSIONS;

/// Supported embedding models.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbeddingModel {
    /// Paraphrase multilingual MiniLM L12 v2 - handles Portuguese questions.
    /// 384 dimensions, ~120MB model size.
    ParaphraseMultilingualMiniLML12V2,

    /// All MiniLM L6 v2 - Fast and lightweight, English only.
    /// 384 dimensions, ~23MB model size.
    AllMiniLML6V2,

    /// BGE Small English v1.5.
    /// 384 dimensions, ~33MB model size.
    BGESmallENV15,

    /// Deterministic feature hashing, no model download.
    Hashed,
}

impl EmbeddingModel {
    /// Get the number of dimensions for this model's embeddings.
    pub fn dimensions(&self) -> usize {
        match self {
            Self::ParaphraseMultilingualMiniLML12V2 => 384,
            Self::AllMiniLML6V2 => 384,
            Self::BGESmallENV15 => 384,
            Self::Hashed => HASHED_DIMENSIONS,
        }
    }

    /// Get the model name as published on the Hugging Face hub.
    pub fn hub_name(&self) -> &'static str {
        match self {
            Self::ParaphraseMultilingualMiniLML12V2 => {
                "sentence-transformers/paraphrase-multilingual-MiniLM-L12-v2"
            }
            Self::AllMiniLML6V2 => "sentence-transformers/all-MiniLM-L6-v2",
            Self::BGESmallENV15 => "BAAI/bge-small-en-v1.5",
            Self::Hashed => "hashed",
        }
    }
}

impl fmt::Display for EmbeddingModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ParaphraseMultilingualMiniLML12V2 => {
                write!(f, "paraphrase-multilingual-minilm-l12-v2")
            }
            Self::AllMiniLML6V2 => write!(f, "all-minilm-l6-v2"),
            Self::BGESmallENV15 => write!(f, "bge-small-en-v1.5"),
            Self::Hashed => write!(f, "hashed"),
        }
    }
}

impl std::str::FromStr for EmbeddingModel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "paraphrase-multilingual-minilm-l12-v2" | "paraphrasemlminilml12v2" => {
                Ok(Self::ParaphraseMultilingualMiniLML12V2)
            }
            "all-minilm-l6-v2" | "allminilml6v2" => Ok(Self::AllMiniLML6V2),
            "bge-small-en-v1.5" | "bgesmallenv15" => Ok(Self::BGESmallENV15),
            "hashed" | "hash" => Ok(Self::Hashed),
            _ => Err(format!("Unknown embedding model: {s}")),
        }
    }
}

/// Information about the loaded embedding model.
#[derive(Debug, Clone)]
pub struct ModelInfo {
    pub model: EmbeddingModel,
    pub name: String,
    pub dimensions: usize,
}

impl From<EmbeddingModel> for ModelInfo {
    fn from(model: EmbeddingModel) -> Self {
        Self {
            name: model.to_string(),
            dimensions: model.dimensions(),
            model,
        }
    }
}
