use anyhow::{Context, Result};
use rusqlite::{params, OptionalExtension, Row};
use tracing::debug;

use crate::database::connection::DatabaseManager;
use crate::models::{embedding_from_bytes, embedding_to_bytes, KnowledgeEntry};

/// Persistent question/answer/embedding triples, one row per normalized question.
#[derive(Clone)]
pub struct KnowledgeRepository {
    db_manager: DatabaseManager,
}

impl KnowledgeRepository {
    pub fn new(db_manager: DatabaseManager) -> Self {
        Self { db_manager }
    }

    /// Load every stored entry. Order is unspecified.
    pub fn get_all(&self) -> Result<Vec<KnowledgeEntry>> {
        self.db_manager
            .with_connection(|conn| {
                let mut stmt =
                    conn.prepare("SELECT id, pergunta, resposta, embedding FROM knowledge_base")?;

                let entries = stmt
                    .query_map([], |row| self.map_row_to_entry(row))?
                    .collect::<rusqlite::Result<Vec<_>>>()?;

                Ok(entries)
            })
            .context("Failed to load knowledge base")
    }

    /// Insert a new entry or overwrite the answer and embedding of an existing one.
    pub fn upsert(&self, question: &str, answer: &str, embedding: &[f32]) -> Result<()> {
        let blob = embedding_to_bytes(embedding);

        self.db_manager
            .with_transaction(|conn| {
                conn.execute(
                    "INSERT INTO knowledge_base (pergunta, resposta, embedding)
                     VALUES (?1, ?2, ?3)
                     ON CONFLICT(pergunta) DO UPDATE SET
                        resposta = excluded.resposta,
                        embedding = excluded.embedding",
                    params![question, answer, blob],
                )?;
                Ok(())
            })
            .with_context(|| format!("Failed to save answer for question: {question}"))?;

        debug!(question, dimensions = embedding.len(), "Knowledge entry saved");
        Ok(())
    }

    pub fn get_by_question(&self, question: &str) -> Result<Option<KnowledgeEntry>> {
        self.db_manager.with_connection(|conn| {
            conn.query_row(
                "SELECT id, pergunta, resposta, embedding FROM knowledge_base WHERE pergunta = ?1",
                params![question],
                |row| self.map_row_to_entry(row),
            )
            .optional()
        })
    }

    /// Most recently inserted entries first
    pub fn list(&self, limit: Option<usize>) -> Result<Vec<KnowledgeEntry>> {
        let limit = limit.map(|l| l as i64).unwrap_or(-1);

        self.db_manager.with_connection(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, pergunta, resposta, embedding FROM knowledge_base
                 ORDER BY id DESC LIMIT ?1",
            )?;

            let entries = stmt
                .query_map(params![limit], |row| self.map_row_to_entry(row))?
                .collect::<rusqlite::Result<Vec<_>>>()?;

            Ok(entries)
        })
    }

    pub fn count(&self) -> Result<usize> {
        self.db_manager.with_connection(|conn| {
            let count: i64 =
                conn.query_row("SELECT COUNT(*) FROM knowledge_base", [], |row| row.get(0))?;
            Ok(count as usize)
        })
    }

    fn map_row_to_entry(&self, row: &Row) -> rusqlite::Result<KnowledgeEntry> {
        let blob: Option<Vec<u8>> = row.get(3)?;

        Ok(KnowledgeEntry {
            id: row.get(0)?,
            question: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
            answer: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
            embedding: blob.as_deref().map(embedding_from_bytes).unwrap_or_default(),
        })
    }
}
