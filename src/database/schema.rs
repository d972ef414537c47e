use rusqlite::{Connection, Result};

pub const SCHEMA_VERSION: u32 = 1;

/// Tables that must exist once all migrations have run
pub const EXPECTED_TABLES: &[&str] = &["schema_versions", "knowledge_base"];

pub fn create_schema(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_versions (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now', 'utc'))
        )",
        [],
    )?;

    // Column names are kept in Portuguese for compatibility with existing databases
    conn.execute(
        "CREATE TABLE IF NOT EXISTS knowledge_base (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            pergunta TEXT UNIQUE,
            resposta TEXT,
            embedding BLOB
        )",
        [],
    )?;

    Ok(())
}
