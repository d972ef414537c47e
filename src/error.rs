use thiserror::Error;

/// Custom error types for the saber application
#[derive(Error, Debug)]
pub enum SaberError {
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("Validation error: {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Embedding error: {message}")]
    Embedding { message: String },

    #[error("Unknown error: {message}")]
    Unknown { message: String },
}

impl SaberError {
    /// Create an invalid configuration error
    pub fn invalid_config<S: Into<String>>(message: S) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create a validation error
    pub fn validation<S: Into<String>>(field: S, message: S) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a storage error
    pub fn storage<S: Into<String>>(message: S) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Create an embedding error
    pub fn embedding<S: Into<String>>(message: S) -> Self {
        Self::Embedding {
            message: message.into(),
        }
    }

    /// Create an unknown error
    pub fn unknown<S: Into<String>>(message: S) -> Self {
        Self::Unknown {
            message: message.into(),
        }
    }

    /// Whether the error was caused by the caller's input rather than by the system
    pub fn is_client_error(&self) -> bool {
        matches!(self, SaberError::Validation { .. })
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            SaberError::Json(_) => "json",
            SaberError::InvalidConfig { .. } => "config",
            SaberError::Validation { .. } => "validation",
            SaberError::Storage { .. } => "storage",
            SaberError::Embedding { .. } => "embedding",
            SaberError::Unknown { .. } => "unknown",
        }
    }
}

impl From<anyhow::Error> for SaberError {
    fn from(err: anyhow::Error) -> Self {
        SaberError::Unknown {
            message: format!("{err:#}"),
        }
    }
}

/// Result type alias for saber
pub type Result<T> = std::result::Result<T, SaberError>;
