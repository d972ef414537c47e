use anyhow::{Context, Result as AnyhowResult};
use rusqlite::{Connection, OpenFlags, Result};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, error, info};

use super::migrations::MigrationManager;

#[derive(Debug)]
pub struct DatabaseManager {
    db_path: PathBuf,
    connection: Arc<Mutex<Connection>>,
}

impl DatabaseManager {
    pub fn new(db_path: impl AsRef<Path>) -> AnyhowResult<Self> {
        let db_path = db_path.as_ref().to_path_buf();

        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create database directory: {}", parent.display())
                })?;
            }
        }

        let connection = Connection::open_with_flags(
            &db_path,
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE,
        )
        .with_context(|| format!("Failed to open database at: {}", db_path.display()))?;

        // Some PRAGMA statements return values, so we need to consume them
        for pragma in [
            "PRAGMA journal_mode = WAL",
            "PRAGMA synchronous = NORMAL",
            "PRAGMA temp_store = memory",
        ] {
            connection
                .prepare(pragma)?
                .query_map([], |_| Ok(()))?
                .for_each(drop);
        }

        let manager = Self {
            db_path,
            connection: Arc::new(Mutex::new(connection)),
        };

        manager.run_migrations()?;

        info!("Database initialized at: {}", manager.db_path.display());
        Ok(manager)
    }

    pub fn open_in_memory() -> AnyhowResult<Self> {
        let connection =
            Connection::open_in_memory().context("Failed to create in-memory database")?;

        let manager = Self {
            db_path: PathBuf::from(":memory:"),
            connection: Arc::new(Mutex::new(connection)),
        };

        manager.run_migrations()?;

        debug!("In-memory database initialized");
        Ok(manager)
    }

    fn lock(&self) -> AnyhowResult<MutexGuard<'_, Connection>> {
        self.connection
            .lock()
            .map_err(|e| anyhow::anyhow!("Database connection lock poisoned: {e}"))
    }

    fn run_migrations(&self) -> AnyhowResult<()> {
        let migration_manager = MigrationManager::new();
        let conn = self.lock()?;

        migration_manager
            .migrate_to_latest(&conn)
            .context("Failed to run database migrations")?;

        if !migration_manager.validate_database(&conn)? {
            return Err(anyhow::anyhow!(
                "Database validation failed after migration"
            ));
        }

        Ok(())
    }

    pub fn with_connection<F, R>(&self, f: F) -> AnyhowResult<R>
    where
        F: FnOnce(&Connection) -> Result<R>,
    {
        let conn = self.lock()?;
        f(&conn).with_context(|| "Database operation failed")
    }

    pub fn with_transaction<F, R>(&self, f: F) -> AnyhowResult<R>
    where
        F: FnOnce(&Connection) -> Result<R>,
    {
        let conn = self.lock()?;
        let tx = conn
            .unchecked_transaction()
            .context("Failed to start transaction")?;

        match f(&conn) {
            Ok(value) => {
                tx.commit().context("Failed to commit transaction")?;
                Ok(value)
            }
            Err(e) => {
                if let Err(rollback_err) = tx.rollback() {
                    error!("Failed to rollback transaction: {}", rollback_err);
                }
                Err(anyhow::anyhow!("Transaction failed: {e}"))
            }
        }
    }

    pub fn check_integrity(&self) -> AnyhowResult<bool> {
        self.with_connection(|conn| {
            let result: String = conn.query_row("PRAGMA integrity_check", [], |row| row.get(0))?;
            Ok(result == "ok")
        })
    }

    pub fn get_database_size(&self) -> AnyhowResult<u64> {
        if self.db_path.to_string_lossy() == ":memory:" {
            return Ok(0);
        }

        let metadata = std::fs::metadata(&self.db_path)?;
        Ok(metadata.len())
    }

    pub fn get_db_path(&self) -> &Path {
        &self.db_path
    }
}

impl Clone for DatabaseManager {
    fn clone(&self) -> Self {
        Self {
            db_path: self.db_path.clone(),
            connection: Arc::clone(&self.connection),
        }
    }
}
