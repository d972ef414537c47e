pub mod aggregator;
pub mod answer_service;
pub mod formatter;
pub mod similarity;
pub mod sources;

pub use aggregator::{summarize, Aggregation, Aggregator};
pub use answer_service::AnswerService;
pub use formatter::format_answer;
pub use similarity::{cosine_similarity, find_best_match, is_cache_hit};
pub use sources::{KnowledgeSource, SourceError, SourceItem, SourceReport};
