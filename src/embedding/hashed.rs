use anyhow::Result;
use unicode_segmentation::UnicodeSegmentation;

use super::traits::Embedder;

/// Dimension of hashed embeddings. Deliberately different from the 384 of the
/// sentence-transformer models so the similarity search skips entries written
/// by the other embedder.
pub const HASHED_DIMENSIONS: usize = 256;

const FNV_OFFSET: u64 = 0xcbf29ce484222325;
const FNV_PRIME: u64 = 0x100000001b3;
const TRIGRAM_WEIGHT: f32 = 0.5;
/// Bucket that carries the whole vector for text without any word
const EMPTY_TEXT_BUCKET: usize = 0;

/// Feature-hashing embedder.
///
/// Every word and every character trigram of the text is hashed (FNV-1a) into a
/// signed bucket; the result is L2-normalized. Texts sharing words or word
/// fragments get a positive cosine similarity, identical texts get 1.0.
/// Text without words (a question made only of stopwords normalizes to "")
/// maps to a fixed unit vector so it can still match itself.
#[derive(Debug, Clone, Default)]
pub struct HashedEmbedder;

impl HashedEmbedder {
    pub fn new() -> Self {
        Self
    }

    fn add_feature(vector: &mut [f32], feature: &str, weight: f32) {
        let hash = fnv1a(feature.as_bytes());
        let index = (hash % HASHED_DIMENSIONS as u64) as usize;
        let sign = if hash >> 63 == 0 { 1.0 } else { -1.0 };
        vector[index] += sign * weight;
    }
}

impl Embedder for HashedEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let mut vector = vec![0.0f32; HASHED_DIMENSIONS];

        for word in text.unicode_words() {
            let word = word.to_lowercase();
            Self::add_feature(&mut vector, &word, 1.0);

            let padded: Vec<char> = format!(" {word} ").chars().collect();
            for window in padded.windows(3) {
                let trigram: String = window.iter().collect();
                Self::add_feature(&mut vector, &trigram, TRIGRAM_WEIGHT);
            }
        }

        let magnitude: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if magnitude > 0.0 {
            for value in &mut vector {
                *value /= magnitude;
            }
        } else {
            vector[EMPTY_TEXT_BUCKET] = 1.0;
        }

        Ok(vector)
    }

    fn dimensions(&self) -> usize {
        HASHED_DIMENSIONS
    }

    fn model_name(&self) -> &str {
        "hashed"
    }
}

fn fnv1a(bytes: &[u8]) -> u64 {
    bytes.iter().fold(FNV_OFFSET, |hash, byte| {
        (hash ^ u64::from(*byte)).wrapping_mul(FNV_PRIME)
    })
}
