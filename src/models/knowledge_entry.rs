use serde::{Deserialize, Serialize};
use tracing::warn;

/// A previously answered question, keyed by its normalized text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeEntry {
    pub id: i64,
    pub question: String,
    pub answer: String,
    #[serde(skip)]
    pub embedding: Vec<f32>,
}

impl KnowledgeEntry {
    pub fn new(question: String, answer: String, embedding: Vec<f32>) -> Self {
        Self {
            id: 0,
            question,
            answer,
            embedding,
        }
    }

    pub fn dimensions(&self) -> usize {
        self.embedding.len()
    }
}

/// Serialize an embedding as raw little-endian f32 bytes.
pub fn embedding_to_bytes(embedding: &[f32]) -> Vec<u8> {
    embedding.iter().flat_map(|v| v.to_le_bytes()).collect()
}

/// Decode raw little-endian f32 bytes.
///
/// A blob whose length is not a multiple of four is corrupt and yields an
/// empty vector, which the similarity search skips as a dimension mismatch.
pub fn embedding_from_bytes(bytes: &[u8]) -> Vec<f32> {
    if bytes.len() % 4 != 0 {
        warn!(len = bytes.len(), "Discarding corrupt embedding blob");
        return Vec::new();
    }

    bytes
        .chunks_exact(4)
        .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedding_bytes_are_little_endian() {
        let bytes = embedding_to_bytes(&[1.0, -0.5]);
        assert_eq!(bytes.len(), 8);
        assert_eq!(&bytes[..4], &1.0f32.to_le_bytes());
        assert_eq!(embedding_from_bytes(&bytes), vec![1.0, -0.5]);
    }

    #[test]
    fn test_corrupt_blob_is_empty() {
        assert!(embedding_from_bytes(&[0, 1, 2]).is_empty());
    }

    #[test]
    fn test_empty_blob() {
        assert!(embedding_from_bytes(&[]).is_empty());
        assert!(embedding_to_bytes(&[]).is_empty());
    }
}
