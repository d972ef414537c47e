use thiserror::Error;

/// Failure of a single external source. Contained by the aggregator.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("{0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("Unexpected response: {0}")]
    Parse(String),

    #[error("No results")]
    NoResults,
}

impl SourceError {
    pub fn parse<S: Into<String>>(message: S) -> Self {
        Self::Parse(message.into())
    }

    pub fn is_no_results(&self) -> bool {
        matches!(self, SourceError::NoResults)
    }
}
