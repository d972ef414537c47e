use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use saber::database::{DatabaseManager, KnowledgeRepository};
use saber::embedding::Embedder;
use saber::models::{AggregatedAnswer, Answer, LookupOutcome};
use saber::nlp::Normalizer;
use saber::services::{
    Aggregator, AnswerService, KnowledgeSource, SourceError, SourceItem, SourceReport,
};

/// Embeds every text to the same vector.
struct FixedEmbedder(Vec<f32>);

impl Embedder for FixedEmbedder {
    fn embed(&self, _text: &str) -> anyhow::Result<Vec<f32>> {
        Ok(self.0.clone())
    }

    fn dimensions(&self) -> usize {
        self.0.len()
    }

    fn model_name(&self) -> &str {
        "fixed"
    }
}

struct FakeSource {
    name: &'static str,
    items: Vec<SourceItem>,
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl KnowledgeSource for FakeSource {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn search(&self, _query: &str) -> Result<SourceReport, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(SourceReport::new(self.items.clone()))
    }
}

fn item(title: &str, description: &str, link: &str) -> SourceItem {
    SourceItem {
        title: title.to_string(),
        description: description.to_string(),
        link: Some(link.to_string()),
    }
}

fn aggregator(calls: &Arc<AtomicUsize>) -> Aggregator {
    Aggregator::new(
        Box::new(FakeSource {
            name: "Wikipedia",
            items: vec![item(
                "Fotossíntese",
                "Processo pelo qual plantas produzem energia.",
                "https://pt.wikipedia.org/wiki/Fotoss%C3%ADntese",
            )],
            calls: Arc::clone(calls),
        }),
        vec![
            Box::new(FakeSource {
                name: "Bing",
                items: vec![item("Toda Matéria", "Resumo", "https://www.todamateria.com.br/fotossintese/")],
                calls: Arc::clone(calls),
            }),
            Box::new(FakeSource {
                name: "DuckDuckGo",
                items: vec![item("Brasil Escola", "Sem descrição", "https://brasilescola.uol.com.br/")],
                calls: Arc::clone(calls),
            }),
        ],
    )
}

fn service(embedding: Vec<f32>) -> (AnswerService, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let service = AnswerService::new(
        KnowledgeRepository::new(DatabaseManager::open_in_memory().unwrap()),
        Arc::new(FixedEmbedder(embedding)),
        aggregator(&calls),
        Normalizer::default(),
        0.75,
    );
    (service, calls)
}

#[tokio::test]
async fn test_similar_question_returns_cached_answer() {
    let (service, calls) = service(vec![0.8, 0.6]);
    let cached = AggregatedAnswer::new("Brasília é a capital.", "- Brasília")
        .to_stored()
        .unwrap();
    service
        .repository()
        .upsert("capital brasil", &cached, &[1.0, 0.0])
        .unwrap();

    let processed = service.answer("Qual a capital do Brasil?").await.unwrap();

    assert!(processed.links.is_empty());
    assert_eq!(
        processed.answer,
        Answer::Structured(AggregatedAnswer::new("Brasília é a capital.", "- Brasília"))
    );
    match processed.outcome {
        LookupOutcome::Hit {
            score,
            matched_question,
        } => {
            assert!((score - 0.8).abs() < 1e-5);
            assert_eq!(matched_question, "capital brasil");
        }
        other => panic!("expected a cache hit, got {other:?}"),
    }
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert_eq!(service.repository().count().unwrap(), 1);
}

#[tokio::test]
async fn test_plain_cached_answer_is_returned_verbatim() {
    let (service, _calls) = service(vec![1.0, 0.0]);
    service
        .repository()
        .upsert("capital brasil", "Brasília", &[1.0, 0.0])
        .unwrap();

    let formatted = service.answer_formatted("capital do Brasil").await.unwrap();

    assert_eq!(
        formatted,
        "# Aqui está o que encontrei:\n\nBrasília\n### Links das fontes:\n"
    );
}

#[tokio::test]
async fn test_empty_store_consults_sources_and_saves_answer() {
    let (service, calls) = service(vec![0.3, 0.4, 0.5]);

    let formatted = service
        .answer_formatted("o que é fotossíntese")
        .await
        .unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 3);
    assert_eq!(service.repository().count().unwrap(), 1);
    assert!(formatted.contains("Links das fontes"));
    assert!(formatted.contains("## Fonte: Wikipedia\n**Wikipedia**: \n**Título**: Fotossíntese\n"));
    assert!(formatted.contains("- Toda Matéria: Resumo\n- Brasil Escola: Sem descrição"));
    assert!(formatted.contains("1. [Visite o site](https://www.todamateria.com.br/fotossintese/)"));
    assert!(formatted.contains("2. [Visite o site](https://brasilescola.uol.com.br/)"));

    let key = Normalizer::default().normalize("o que é fotossíntese");
    let entry = service.repository().get_by_question(&key).unwrap().unwrap();
    let stored: serde_json::Value = serde_json::from_str(&entry.answer).unwrap();
    assert!(stored["wikipedia"]
        .as_str()
        .unwrap()
        .contains("**Título**: Fotossíntese"));
    assert_eq!(
        stored["web"],
        "- Toda Matéria: Resumo\n- Brasil Escola: Sem descrição"
    );
    assert_eq!(entry.embedding, vec![0.3, 0.4, 0.5]);
}

#[tokio::test]
async fn test_dissimilar_question_is_resolved_externally() {
    let (service, calls) = service(vec![0.8, 0.6]);
    service
        .repository()
        .upsert("outra pergunta", "outra resposta", &[0.0, 1.0])
        .unwrap();

    let processed = service.answer("o que é fotossíntese").await.unwrap();

    match processed.outcome {
        LookupOutcome::Miss { best_score } => {
            assert!((best_score.unwrap() - 0.6).abs() < 1e-5)
        }
        other => panic!("expected a miss, got {other:?}"),
    }
    assert_eq!(calls.load(Ordering::SeqCst), 3);
    assert_eq!(processed.links.len(), 2);
    assert_eq!(service.repository().count().unwrap(), 2);
}

#[tokio::test]
async fn test_score_equal_to_threshold_is_a_miss() {
    let calls = Arc::new(AtomicUsize::new(0));
    let service = AnswerService::new(
        KnowledgeRepository::new(DatabaseManager::open_in_memory().unwrap()),
        Arc::new(FixedEmbedder(vec![1.0, 0.0])),
        aggregator(&calls),
        Normalizer::default(),
        1.0,
    );
    service
        .repository()
        .upsert("fotossintes", "antiga", &[1.0, 0.0])
        .unwrap();

    let processed = service.answer("fotossíntese").await.unwrap();

    assert!(!processed.outcome.is_hit());
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_blank_question_is_a_validation_error() {
    let (service, calls) = service(vec![1.0]);

    let err = service.answer("   ").await.unwrap_err();

    assert!(err.is_client_error());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}
