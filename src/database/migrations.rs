use rusqlite::{Connection, Result};
use std::collections::HashMap;
use tracing::{debug, error, info, warn};

use super::schema::{create_schema, EXPECTED_TABLES, SCHEMA_VERSION};

pub struct Migration {
    pub version: u32,
    pub description: String,
    pub up: fn(&Connection) -> Result<()>,
}

pub struct MigrationManager {
    migrations: HashMap<u32, Migration>,
}

impl MigrationManager {
    pub fn new() -> Self {
        let mut manager = Self {
            migrations: HashMap::new(),
        };
        manager.register_migrations();
        manager
    }

    fn register_migrations(&mut self) {
        let initial = Migration {
            version: 1,
            description: "Create knowledge base".to_string(),
            up: create_schema,
        };
        self.migrations.insert(initial.version, initial);
    }

    pub fn get_current_version(&self, conn: &Connection) -> Result<u32> {
        if !table_exists(conn, "schema_versions")? {
            return Ok(0);
        }

        conn.query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_versions",
            [],
            |row| row.get::<_, u32>(0),
        )
    }

    /// Apply every pending migration. A database written by a newer schema is
    /// rejected rather than downgraded.
    pub fn migrate_to_latest(&self, conn: &Connection) -> Result<()> {
        let current_version = self.get_current_version(conn)?;

        if current_version > SCHEMA_VERSION {
            error!(
                "Database schema version {} is newer than supported version {}",
                current_version, SCHEMA_VERSION
            );
            return Err(rusqlite::Error::InvalidQuery);
        }

        if current_version == SCHEMA_VERSION {
            debug!("Database is already at version {}", current_version);
            return Ok(());
        }

        self.migrate_up(conn, current_version, SCHEMA_VERSION)
    }

    fn migrate_up(&self, conn: &Connection, from_version: u32, to_version: u32) -> Result<()> {
        info!(
            "Migrating database from version {} to {}",
            from_version, to_version
        );

        let tx = conn.unchecked_transaction()?;

        for version in (from_version + 1)..=to_version {
            let Some(migration) = self.migrations.get(&version) else {
                error!("Migration {} not found", version);
                return Err(rusqlite::Error::InvalidPath("Migration not found".into()));
            };

            info!("Applying migration {}: {}", version, migration.description);
            if let Err(e) = (migration.up)(conn) {
                error!("Failed to apply migration {}: {}", version, e);
                return Err(e);
            }

            if table_exists(conn, "schema_versions")? {
                conn.execute(
                    "INSERT INTO schema_versions (version) VALUES (?1)",
                    [version],
                )?;
            }
        }

        tx.commit()?;
        info!("Database migration completed successfully");
        Ok(())
    }

    pub fn validate_database(&self, conn: &Connection) -> Result<bool> {
        let current_version = self.get_current_version(conn)?;

        if current_version != SCHEMA_VERSION {
            warn!(
                "Database version mismatch: expected {}, found {}",
                SCHEMA_VERSION, current_version
            );
            return Ok(false);
        }

        for table in EXPECTED_TABLES {
            if !table_exists(conn, table)? {
                error!("Expected table '{}' not found", table);
                return Ok(false);
            }
        }

        debug!("Database validation passed");
        Ok(true)
    }
}

impl Default for MigrationManager {
    fn default() -> Self {
        Self::new()
    }
}

fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let count: i32 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name=?1",
        [name],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}
