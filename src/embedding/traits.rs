use anyhow::Result;

/// Maps normalized text to a fixed-length dense vector.
///
/// Implementations must be deterministic: the same text always yields the same
/// vector for a given model.
pub trait Embedder: Send + Sync {
    /// Generate an embedding for a single text
    fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Number of dimensions of every vector this embedder returns
    fn dimensions(&self) -> usize;

    /// Model identifier for logging
    fn model_name(&self) -> &str;
}
