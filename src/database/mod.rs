pub mod config;
pub mod connection;
pub mod knowledge_repo;
pub mod migrations;
pub mod schema;

pub use config::get_default_db_path;
pub use connection::DatabaseManager;
pub use knowledge_repo::KnowledgeRepository;
pub use migrations::{Migration, MigrationManager};
pub use schema::{create_schema, SCHEMA_VERSION};
