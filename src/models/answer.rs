use serde::{Deserialize, Serialize};

/// Answer assembled from the external sources.
///
/// Persisted as JSON under the keys `wikipedia` and `web`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatedAnswer {
    #[serde(rename = "wikipedia")]
    pub encyclopedia: String,
    pub web: String,
}

impl AggregatedAnswer {
    pub fn new(encyclopedia: impl Into<String>, web: impl Into<String>) -> Self {
        Self {
            encyclopedia: encyclopedia.into(),
            web: web.into(),
        }
    }

    pub fn to_stored(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    /// Cached text that is not a structured answer
    Plain(String),
    Structured(AggregatedAnswer),
}

impl Answer {
    /// Decode an answer read back from the knowledge base.
    pub fn from_stored(stored: &str) -> Self {
        match serde_json::from_str::<AggregatedAnswer>(stored) {
            Ok(aggregated) => Answer::Structured(aggregated),
            Err(_) => Answer::Plain(stored.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LookupOutcome {
    Hit {
        score: f32,
        matched_question: String,
    },
    Miss {
        /// Best similarity seen, `None` when the store was empty
        best_score: Option<f32>,
    },
}

impl LookupOutcome {
    pub fn is_hit(&self) -> bool {
        matches!(self, LookupOutcome::Hit { .. })
    }
}

/// Result of running a question through the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedAnswer {
    pub answer: Answer,
    pub links: Vec<String>,
    pub outcome: LookupOutcome,
}

/// Best match found by a linear scan of the knowledge base.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityResult {
    pub answer: Option<String>,
    pub question: Option<String>,
    pub score: f32,
}

impl Default for SimilarityResult {
    fn default() -> Self {
        Self {
            answer: None,
            question: None,
            score: -1.0,
        }
    }
}
