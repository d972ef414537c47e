//! Environment variable constants used throughout the application
//!
//! This module centralizes all environment variable names to ensure consistency
//! and make it easier to manage configuration across the codebase.

/// Logging configuration
pub mod logging {
    /// Log level configuration (e.g., "debug", "info", "warn", "error")
    pub const LOG_LEVEL: &str = "SABER_LOG_LEVEL";

    /// Log file path for file-based logging
    pub const LOG_FILE: &str = "SABER_LOG_FILE";

    /// Emit JSON log lines instead of the human readable format
    pub const LOG_JSON: &str = "SABER_LOG_JSON";

    /// Disable colored output (follows the NO_COLOR standard)
    pub const NO_COLOR: &str = "NO_COLOR";
}

/// Database configuration
pub mod database {
    /// Path of the SQLite knowledge base
    pub const SABER_DB: &str = "SABER_DB";
}

/// HTTP server configuration
pub mod server {
    pub const HOST: &str = "SABER_HOST";
    pub const PORT: &str = "SABER_PORT";
}

/// Answer cache configuration
pub mod cache {
    /// Minimum cosine similarity (exclusive) for a stored answer to be reused
    pub const SIMILARITY_THRESHOLD: &str = "SABER_SIMILARITY_THRESHOLD";
}

/// Embedding configuration
pub mod embedding {
    /// Embedding model name (e.g. "paraphrase-multilingual-minilm-l12-v2", "hashed")
    pub const MODEL: &str = "SABER_EMBEDDING_MODEL";

    /// Directory where downloaded models are cached
    pub const CACHE_DIR: &str = "SABER_MODEL_CACHE_DIR";
}

/// External knowledge source configuration
pub mod sources {
    /// Wikipedia language edition (e.g. "pt", "en")
    pub const WIKIPEDIA_LANG: &str = "SABER_WIKIPEDIA_LANG";
}
