//! Question text normalization.

mod normalizer;
mod stopwords;

pub use normalizer::{normalize, Language, Normalizer};
