use saber::database::{DatabaseManager, KnowledgeRepository};
use saber::embedding::{Embedder, HashedEmbedder};
use saber::nlp::Normalizer;
use saber::services::find_best_match;
use tempfile::tempdir;

fn memory_repo() -> KnowledgeRepository {
    KnowledgeRepository::new(DatabaseManager::open_in_memory().unwrap())
}

#[test]
fn test_saved_question_matches_itself() {
    let repo = memory_repo();
    let normalizer = Normalizer::default();
    let embedder = HashedEmbedder::new();

    let question = normalizer.normalize("O que é fotossíntese?");
    let embedding = embedder.embed(&question).unwrap();
    repo.upsert(&question, "resposta", &embedding).unwrap();

    let query = embedder
        .embed(&normalizer.normalize("o que é FOTOSSÍNTESE"))
        .unwrap();
    let result = find_best_match(&query, &repo.get_all().unwrap());

    assert_eq!(result.answer.as_deref(), Some("resposta"));
    assert!((result.score - 1.0).abs() < 1e-5);
}

#[test]
fn test_resaving_overwrites_without_duplicating() {
    let repo = memory_repo();

    repo.upsert("fotossintes", "primeira", &[1.0, 0.0]).unwrap();
    repo.upsert("fotossintes", "segunda", &[0.0, 1.0]).unwrap();

    let entries = repo.get_all().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].answer, "segunda");
    assert_eq!(entries[0].embedding, vec![0.0, 1.0]);
}

#[test]
fn test_mismatched_dimension_is_skipped() {
    let repo = memory_repo();

    repo.upsert("antiga", "modelo antigo", &[1.0, 0.0, 0.0])
        .unwrap();
    repo.upsert("nova", "modelo atual", &[0.6, 0.8]).unwrap();

    let entries = repo.get_all().unwrap();
    let result = find_best_match(&[0.6, 0.8], &entries);
    assert_eq!(result.answer.as_deref(), Some("modelo atual"));

    let old: Vec<_> = entries
        .into_iter()
        .filter(|entry| entry.question == "antiga")
        .collect();
    let only_old = find_best_match(&[1.0, 0.0], &old);
    assert!(only_old.answer.is_none());
    assert_eq!(only_old.score, -1.0);
}

#[test]
fn test_entries_survive_reopen() {
    let temp_dir = tempdir().unwrap();
    let db_path = temp_dir.path().join("saber.db");

    {
        let repo = KnowledgeRepository::new(DatabaseManager::new(&db_path).unwrap());
        repo.upsert("capital brasil", "Brasília", &[0.25, -0.5, 1.0])
            .unwrap();
    }

    let repo = KnowledgeRepository::new(DatabaseManager::new(&db_path).unwrap());
    let entry = repo.get_by_question("capital brasil").unwrap().unwrap();
    assert_eq!(entry.answer, "Brasília");
    assert_eq!(entry.embedding, vec![0.25, -0.5, 1.0]);
    assert_eq!(repo.count().unwrap(), 1);
}

#[test]
fn test_empty_store() {
    let repo = memory_repo();
    assert_eq!(repo.count().unwrap(), 0);
    assert!(repo.get_all().unwrap().is_empty());
}
