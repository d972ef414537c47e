use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use saber::database::{DatabaseManager, KnowledgeRepository};
use saber::embedding::HashedEmbedder;
use saber::nlp::Normalizer;
use saber::services::{
    Aggregator, AnswerService, KnowledgeSource, SourceError, SourceItem, SourceReport,
};
use saber::web::{create_routes, AppState};
use serde_json::Value;
use tower::ServiceExt;

struct StaticSource {
    name: &'static str,
    title: &'static str,
    link: &'static str,
}

#[async_trait]
impl KnowledgeSource for StaticSource {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn search(&self, _query: &str) -> Result<SourceReport, SourceError> {
        Ok(SourceReport::new(vec![SourceItem {
            title: self.title.to_string(),
            description: "Resumo".to_string(),
            link: Some(self.link.to_string()),
        }]))
    }
}

fn app() -> (Router, AppState) {
    let aggregator = Aggregator::new(
        Box::new(StaticSource {
            name: "Wikipedia",
            title: "Fotossíntese",
            link: "https://pt.wikipedia.org/wiki/Fotoss%C3%ADntese",
        }),
        vec![Box::new(StaticSource {
            name: "Bing",
            title: "Toda Matéria",
            link: "https://www.todamateria.com.br/fotossintese/",
        })],
    );
    let service = AnswerService::new(
        KnowledgeRepository::new(DatabaseManager::open_in_memory().unwrap()),
        Arc::new(HashedEmbedder::new()),
        aggregator,
        Normalizer::default(),
        0.75,
    );
    let state = AppState::new(service);
    (create_routes(state.clone()), state)
}

fn post_question(body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/pergunta")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_missing_question_is_rejected() {
    let (app, _) = app();

    let response = app.oneshot(post_question("{}")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["erro"], "Nenhuma pergunta foi recebida.");
}

#[tokio::test]
async fn test_blank_question_is_rejected() {
    let (app, state) = app();

    let response = app
        .oneshot(post_question(r#"{"pergunta": "   "}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["erro"], "Nenhuma pergunta foi recebida.");
    assert_eq!(state.service.repository().count().unwrap(), 0);
}

#[tokio::test]
async fn test_malformed_body_is_rejected() {
    let (app, _) = app();

    let response = app.oneshot(post_question("pergunta=oi")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["erro"], "Nenhuma pergunta foi recebida.");
}

#[tokio::test]
async fn test_question_is_answered_and_cached() {
    let (app, state) = app();

    let response = app
        .clone()
        .oneshot(post_question(r#"{"pergunta": "O que é fotossíntese?"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    let resposta = body["resposta"].as_str().unwrap();
    assert!(resposta.starts_with("# Aqui está o que encontrei:"));
    assert!(resposta.contains("**Título**: Fotossíntese"));
    assert!(resposta.contains("- Toda Matéria: Resumo"));
    assert!(resposta.contains("1. [Visite o site](https://www.todamateria.com.br/fotossintese/)"));
    assert_eq!(state.service.repository().count().unwrap(), 1);

    let response = app
        .oneshot(post_question(r#"{"pergunta": "o que é fotossíntese"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    let cached = body["resposta"].as_str().unwrap();
    assert!(cached.contains("**Título**: Fotossíntese"));
    assert!(cached.ends_with("### Links das fontes:\n"));
    assert_eq!(state.service.repository().count().unwrap(), 1);
}

#[tokio::test]
async fn test_health_reports_entry_count() {
    let (app, _) = app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["entries"], 0);
}

#[tokio::test]
async fn test_root_serves_chat_page() {
    let (app, _) = app();

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("input-pergunta"));
}
