//! External knowledge sources: the encyclopedia API and the scraped web
//! search engines.

mod bing;
mod duckduckgo;
mod errors;
mod wikipedia;

pub use bing::{parse_bing_results, BingSource};
pub use duckduckgo::{parse_duckduckgo_results, DuckDuckGoSource};
pub use errors::SourceError;
pub use wikipedia::WikipediaSource;

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::config::SourcesConfig;

pub const NO_DESCRIPTION: &str = "Sem descrição";

/// One search hit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceItem {
    pub title: String,
    pub description: String,
    pub link: Option<String>,
}

impl SourceItem {
    /// Single-line rendering used in the web summary
    pub fn summary_line(&self) -> String {
        match (self.title.is_empty(), self.description.is_empty()) {
            (false, false) => format!("{}: {}", self.title, self.description),
            (false, true) => self.title.clone(),
            (true, _) => self.description.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceReport {
    pub items: Vec<SourceItem>,
}

impl SourceReport {
    pub fn new(items: Vec<SourceItem>) -> Self {
        Self { items }
    }

    /// Links of the items that have one, in order
    pub fn links(&self) -> Vec<String> {
        self.items
            .iter()
            .filter_map(|item| item.link.clone())
            .filter(|link| !link.is_empty())
            .collect()
    }
}

#[async_trait]
pub trait KnowledgeSource: Send + Sync {
    fn name(&self) -> &'static str;

    async fn search(&self, query: &str) -> Result<SourceReport, SourceError>;
}

/// HTTP client shared by all sources.
pub fn build_client(config: &SourcesConfig) -> Result<Client, SourceError> {
    let mut builder = Client::builder().user_agent(config.user_agent.clone());

    if let Some(secs) = config.request_timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }

    Ok(builder.build()?)
}

/// Whitespace-collapsed text content of an element
pub(crate) fn element_text(element: &scraper::ElementRef<'_>) -> String {
    element
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Fail on non-2xx responses, otherwise return the body
pub(crate) async fn read_body(response: reqwest::Response) -> Result<String, SourceError> {
    let status = response.status();
    if !status.is_success() {
        return Err(SourceError::Status {
            status: status.as_u16(),
            url: response.url().to_string(),
        });
    }

    Ok(response.text().await?)
}
