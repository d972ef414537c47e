use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::config::SourcesConfig;
use crate::models::AggregatedAnswer;
use crate::services::sources::{
    build_client, BingSource, DuckDuckGoSource, KnowledgeSource, SourceError, SourceReport,
    WikipediaSource,
};

pub const ENCYCLOPEDIA_SEARCH_FAILED: &str = "Erro ao realizar a pesquisa na Wikipedia.";
pub const ENCYCLOPEDIA_NO_RESULTS: &str = "Nenhum resultado encontrado na Wikipedia.";
pub const WEB_NO_RESULTS: &str = "Nenhum resultado encontrado.";
pub const NO_RELEVANT_CONTENT: &str = "Nenhum conteúdo relevante encontrado.";

/// Structured answer plus the links of the web results it was built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aggregation {
    pub answer: AggregatedAnswer,
    pub links: Vec<String>,
}

/// Consults the encyclopedia source, then every web source in order.
///
/// A failing source contributes a placeholder line instead of results; it
/// never fails the aggregation as a whole.
pub struct Aggregator {
    encyclopedia: Box<dyn KnowledgeSource>,
    web: Vec<Box<dyn KnowledgeSource>>,
}

impl Aggregator {
    pub fn new(encyclopedia: Box<dyn KnowledgeSource>, web: Vec<Box<dyn KnowledgeSource>>) -> Self {
        Self { encyclopedia, web }
    }

    /// Wikipedia, Bing and DuckDuckGo sharing one HTTP client.
    pub fn from_config(config: &SourcesConfig) -> Result<Self> {
        let client = build_client(config).context("Failed to build HTTP client")?;

        Ok(Self::new(
            Box::new(WikipediaSource::new(
                client.clone(),
                &config.wikipedia_lang,
                config.wikipedia_sentences,
            )),
            vec![
                Box::new(BingSource::new(
                    client.clone(),
                    &config.bing_url,
                    config.max_results,
                )),
                Box::new(DuckDuckGoSource::new(
                    client,
                    &config.duckduckgo_url,
                    config.max_results,
                )),
            ],
        ))
    }

    pub async fn gather(&self, query: &str) -> Aggregation {
        let encyclopedia = match self.encyclopedia.search(query).await {
            Ok(report) => render_encyclopedia(self.encyclopedia.name(), &report),
            Err(e) => {
                warn!(source = self.encyclopedia.name(), error = %e, "Encyclopedia lookup failed");
                encyclopedia_placeholder(&e)
            }
        };

        let mut lines = Vec::new();
        let mut links = Vec::new();

        for source in &self.web {
            match source.search(query).await {
                Ok(report) => {
                    info!(source = source.name(), results = report.items.len(), "Web results");
                    lines.extend(report.items.iter().map(|item| item.summary_line()));
                    links.extend(report.links());
                }
                Err(e) => {
                    warn!(source = source.name(), error = %e, "Web search failed");
                    lines.push(web_placeholder(&e));
                }
            }
        }

        Aggregation {
            answer: AggregatedAnswer::new(encyclopedia, summarize(&lines)),
            links,
        }
    }
}

/// Bullet list of the non-empty lines
pub fn summarize(lines: &[String]) -> String {
    let topics = lines
        .iter()
        .filter(|line| !line.is_empty())
        .map(|line| format!("- {line}"))
        .collect::<Vec<_>>()
        .join("\n");

    if topics.is_empty() {
        NO_RELEVANT_CONTENT.to_string()
    } else {
        topics
    }
}

fn render_encyclopedia(name: &str, report: &SourceReport) -> String {
    let Some(article) = report.items.first() else {
        return ENCYCLOPEDIA_NO_RESULTS.to_string();
    };

    format!(
        "**{name}**: \n**Título**: {}\n**Resumo**: {}\n**Link**: {}\n",
        article.title,
        article.description,
        article.link.as_deref().unwrap_or_default()
    )
}

fn encyclopedia_placeholder(error: &SourceError) -> String {
    if error.is_no_results() {
        ENCYCLOPEDIA_NO_RESULTS.to_string()
    } else {
        ENCYCLOPEDIA_SEARCH_FAILED.to_string()
    }
}

fn web_placeholder(error: &SourceError) -> String {
    if error.is_no_results() {
        WEB_NO_RESULTS.to_string()
    } else {
        format!("Erro ao acessar a web: {error}")
    }
}
