//! Configuration file management for saber
//!
//! Values are read from ~/.saber/config.toml and can be overridden by
//! environment variables (see [`crate::env`]).

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::embedding::EmbeddingConfig;
use crate::env;
use crate::error::SaberError;
use crate::nlp::Language;

pub const DEFAULT_SIMILARITY_THRESHOLD: f32 = 0.75;
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5000;

/// Configuration structure matching config.toml
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub normalizer: NormalizerConfig,
    #[serde(default)]
    pub embedding: EmbeddingSettings,
    #[serde(default)]
    pub sources: SourcesConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DatabaseConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// A stored answer is reused only when similarity is strictly greater than this.
    pub similarity_threshold: f32,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct NormalizerConfig {
    pub language: Language,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EmbeddingSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_dir: Option<PathBuf>,
    pub show_download_progress: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    pub wikipedia_lang: String,
    pub wikipedia_sentences: u32,
    pub max_results: usize,
    pub user_agent: String,
    pub bing_url: String,
    pub duckduckgo_url: String,
    /// Per-request timeout; unset means the HTTP client's default (no timeout).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            wikipedia_lang: "pt".to_string(),
            wikipedia_sentences: 5,
            max_results: 3,
            user_agent: "Mozilla/5.0".to_string(),
            bing_url: "https://www.bing.com/search".to_string(),
            duckduckgo_url: "https://duckduckgo.com/html/".to_string(),
            request_timeout_secs: None,
        }
    }
}

impl Config {
    /// Get the config file path (~/.saber/config.toml)
    pub fn get_config_path() -> Result<PathBuf> {
        Ok(get_config_dir()?.join("config.toml"))
    }

    /// Load configuration from the default file, then apply environment overrides.
    /// Returns default config if the file doesn't exist.
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        let mut config = Self::load_from(&config_path)?;
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file without environment overrides
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Apply environment variable overrides on top of file values
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Some(path) = non_empty_var(env::database::SABER_DB) {
            self.database.path = Some(PathBuf::from(path));
        }

        if let Some(host) = non_empty_var(env::server::HOST) {
            self.server.host = host;
        }

        if let Some(port) = non_empty_var(env::server::PORT) {
            self.server.port = port
                .parse()
                .with_context(|| format!("Invalid {}: {port}", env::server::PORT))?;
        }

        if let Some(threshold) = non_empty_var(env::cache::SIMILARITY_THRESHOLD) {
            self.cache.similarity_threshold = threshold.parse().with_context(|| {
                format!("Invalid {}: {threshold}", env::cache::SIMILARITY_THRESHOLD)
            })?;
        }

        if let Some(model) = non_empty_var(env::embedding::MODEL) {
            self.embedding.model = Some(model);
        }

        if let Some(dir) = non_empty_var(env::embedding::CACHE_DIR) {
            self.embedding.cache_dir = Some(PathBuf::from(dir));
        }

        if let Some(lang) = non_empty_var(env::sources::WIKIPEDIA_LANG) {
            self.sources.wikipedia_lang = lang;
        }

        Ok(())
    }

    pub fn validate(&self) -> std::result::Result<(), SaberError> {
        let threshold = self.cache.similarity_threshold;
        if !(-1.0..=1.0).contains(&threshold) {
            return Err(SaberError::invalid_config(format!(
                "cache.similarity_threshold must be within [-1, 1], got {threshold}"
            )));
        }

        if self.sources.user_agent.trim().is_empty() {
            return Err(SaberError::invalid_config("sources.user_agent cannot be empty"));
        }

        if self.sources.max_results == 0 {
            return Err(SaberError::invalid_config(
                "sources.max_results must be at least 1",
            ));
        }

        if self.sources.wikipedia_lang.trim().is_empty() {
            return Err(SaberError::invalid_config(
                "sources.wikipedia_lang cannot be empty",
            ));
        }

        Ok(())
    }

    /// Resolve the database path, falling back to ~/.saber/saber.db
    pub fn database_path(&self) -> Result<PathBuf> {
        match &self.database.path {
            Some(path) => Ok(path.clone()),
            None => crate::database::config::get_default_db_path(),
        }
    }

    /// Build the embedding configuration from the settings
    pub fn embedding_config(&self) -> Result<EmbeddingConfig> {
        let mut config = match &self.embedding.model {
            Some(name) => EmbeddingConfig::from_name(name).map_err(SaberError::invalid_config)?,
            None => EmbeddingConfig::default(),
        };

        if let Some(dir) = &self.embedding.cache_dir {
            config = config.with_cache_dir(dir.clone());
        }

        Ok(config.with_download_progress(self.embedding.show_download_progress))
    }
}

/// Get the saber configuration directory path (~/.saber)
pub fn get_config_dir() -> Result<PathBuf> {
    let home_dir = dirs::home_dir().context("Could not find home directory")?;
    Ok(home_dir.join(".saber"))
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
