use std::sync::Arc;

use anyhow::Context;
use tracing::{debug, info};

use crate::config::Config;
use crate::database::{DatabaseManager, KnowledgeRepository};
use crate::embedding::{create_embedder, Embedder};
use crate::error::{Result, SaberError};
use crate::models::{Answer, LookupOutcome, ProcessedAnswer, SimilarityResult};
use crate::nlp::Normalizer;
use crate::services::aggregator::Aggregator;
use crate::services::formatter::format_answer;
use crate::services::similarity::{find_best_match, is_cache_hit};

pub const EMPTY_QUESTION: &str = "Nenhuma pergunta foi recebida.";

/// Answers questions from the knowledge base when a similar one was already
/// answered, otherwise from the external sources, caching the new answer.
pub struct AnswerService {
    repository: KnowledgeRepository,
    embedder: Arc<dyn Embedder>,
    aggregator: Aggregator,
    normalizer: Normalizer,
    threshold: f32,
}

impl AnswerService {
    pub fn new(
        repository: KnowledgeRepository,
        embedder: Arc<dyn Embedder>,
        aggregator: Aggregator,
        normalizer: Normalizer,
        threshold: f32,
    ) -> Self {
        Self {
            repository,
            embedder,
            aggregator,
            normalizer,
            threshold,
        }
    }

    /// Open the configured database, embedding model and sources.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let db_path = config.database_path()?;
        let db_manager = DatabaseManager::new(&db_path)
            .with_context(|| format!("Failed to open knowledge base at {}", db_path.display()))?;

        let embedder = create_embedder(&config.embedding_config()?)?;
        let aggregator = Aggregator::from_config(&config.sources)?;

        Ok(Self::new(
            KnowledgeRepository::new(db_manager),
            embedder,
            aggregator,
            Normalizer::new(config.normalizer.language),
            config.cache.similarity_threshold,
        ))
    }

    pub fn repository(&self) -> &KnowledgeRepository {
        &self.repository
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub async fn answer(&self, question: &str) -> Result<ProcessedAnswer> {
        if question.trim().is_empty() {
            return Err(SaberError::validation("pergunta", EMPTY_QUESTION));
        }

        let normalized = self.normalizer.normalize(question);
        debug!(%normalized, "Question normalized");

        let lookup = {
            let repository = self.repository.clone();
            let embedder = Arc::clone(&self.embedder);
            let normalized = normalized.clone();
            run_blocking(move || scan_store(&repository, embedder.as_ref(), &normalized)).await?
        };

        if let Some(best) = &lookup.best {
            if let (Some(answer), Some(matched)) = (&best.answer, &best.question) {
                if is_cache_hit(best.score, self.threshold) {
                    info!(score = best.score, matched_question = %matched, "Answer served from knowledge base");
                    return Ok(ProcessedAnswer {
                        answer: Answer::from_stored(answer),
                        links: Vec::new(),
                        outcome: LookupOutcome::Hit {
                            score: best.score,
                            matched_question: matched.clone(),
                        },
                    });
                }
            }
        }

        let best_score = lookup
            .best
            .as_ref()
            .filter(|best| best.answer.is_some())
            .map(|best| best.score);

        info!(
            entries = lookup.entries,
            best_score = ?best_score,
            "No similar question stored, consulting external sources"
        );

        let aggregation = self.aggregator.gather(&normalized).await;
        let stored = aggregation.answer.to_stored()?;

        {
            let repository = self.repository.clone();
            let embedder = Arc::clone(&self.embedder);
            let query_embedding = lookup.embedding;
            run_blocking(move || {
                let embedding = match query_embedding {
                    Some(embedding) => embedding,
                    None => embed(embedder.as_ref(), &normalized)?,
                };
                repository
                    .upsert(&normalized, &stored, &embedding)
                    .map_err(|e| SaberError::storage(format!("{e:#}")))
            })
            .await?;
        }

        Ok(ProcessedAnswer {
            answer: Answer::Structured(aggregation.answer),
            links: aggregation.links,
            outcome: LookupOutcome::Miss { best_score },
        })
    }

    /// Run the pipeline and render the result as Markdown.
    pub async fn answer_formatted(&self, question: &str) -> Result<String> {
        let processed = self.answer(question).await?;
        Ok(format_answer(&processed.answer, &processed.links))
    }
}

/// Store scan for one normalized question.
struct Lookup {
    entries: usize,
    /// Query embedding, computed only when the store was not empty
    embedding: Option<Vec<f32>>,
    best: Option<SimilarityResult>,
}

fn scan_store(
    repository: &KnowledgeRepository,
    embedder: &dyn Embedder,
    normalized: &str,
) -> Result<Lookup> {
    let entries = repository
        .get_all()
        .map_err(|e| SaberError::storage(format!("{e:#}")))?;

    if entries.is_empty() {
        return Ok(Lookup {
            entries: 0,
            embedding: None,
            best: None,
        });
    }

    let embedding = embed(embedder, normalized)?;
    let best = find_best_match(&embedding, &entries);

    Ok(Lookup {
        entries: entries.len(),
        embedding: Some(embedding),
        best: Some(best),
    })
}

fn embed(embedder: &dyn Embedder, text: &str) -> Result<Vec<f32>> {
    embedder
        .embed(text)
        .map_err(|e| SaberError::embedding(format!("{}: {e:#}", embedder.model_name())))
}

/// SQLite and model inference block, so they run off the async workers.
async fn run_blocking<T, F>(task: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|e| SaberError::unknown(format!("Blocking task failed: {e}")))?
}
