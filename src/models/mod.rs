pub mod answer;
pub mod knowledge_entry;

pub use answer::{AggregatedAnswer, Answer, LookupOutcome, ProcessedAnswer, SimilarityResult};
pub use knowledge_entry::{embedding_from_bytes, embedding_to_bytes, KnowledgeEntry};
