use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::{read_body, KnowledgeSource, SourceError, SourceItem, SourceReport};

/// Wikipedia through the MediaWiki action API: best matching article title,
/// then a plain-text extract of its first sentences and its canonical URL.
pub struct WikipediaSource {
    client: Client,
    endpoint: String,
    sentences: u32,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    query: SearchQuery,
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    #[serde(default)]
    search: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    title: String,
}

#[derive(Debug, Deserialize)]
struct ExtractResponse {
    query: ExtractQuery,
}

#[derive(Debug, Deserialize)]
struct ExtractQuery {
    #[serde(default)]
    pages: Vec<Page>,
}

#[derive(Debug, Deserialize)]
struct Page {
    title: String,
    #[serde(default)]
    extract: Option<String>,
    #[serde(default)]
    fullurl: Option<String>,
    #[serde(default)]
    missing: bool,
}

impl WikipediaSource {
    pub fn new(client: Client, lang: &str, sentences: u32) -> Self {
        Self::with_endpoint(
            client,
            format!("https://{lang}.wikipedia.org/w/api.php"),
            sentences,
        )
    }

    pub fn with_endpoint(client: Client, endpoint: impl Into<String>, sentences: u32) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            sentences,
        }
    }

    async fn get(&self, params: &[(&str, &str)]) -> Result<String, SourceError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("action", "query"), ("format", "json"), ("formatversion", "2")])
            .query(params)
            .send()
            .await?;

        read_body(response).await
    }

    async fn search_title(&self, query: &str) -> Result<Option<String>, SourceError> {
        let body = self
            .get(&[
                ("list", "search"),
                ("srsearch", query),
                ("srlimit", "1"),
                ("srprop", ""),
            ])
            .await?;

        parse_search(&body)
    }

    async fn fetch_page(&self, title: &str) -> Result<Page, SourceError> {
        let sentences = self.sentences.to_string();
        let body = self
            .get(&[
                ("prop", "extracts|info"),
                ("titles", title),
                ("redirects", "1"),
                ("explaintext", "1"),
                ("exsentences", sentences.as_str()),
                ("inprop", "url"),
            ])
            .await?;

        parse_page(&body)
    }
}

#[async_trait]
impl KnowledgeSource for WikipediaSource {
    fn name(&self) -> &'static str {
        "Wikipedia"
    }

    async fn search(&self, query: &str) -> Result<SourceReport, SourceError> {
        let Some(title) = self.search_title(query).await? else {
            return Err(SourceError::NoResults);
        };
        debug!(%title, "Wikipedia article found");

        let page = self.fetch_page(&title).await?;

        Ok(SourceReport::new(vec![SourceItem {
            title: page.title,
            description: page.extract.unwrap_or_default().trim().to_string(),
            link: page.fullurl,
        }]))
    }
}

fn parse_search(body: &str) -> Result<Option<String>, SourceError> {
    let response: SearchResponse = serde_json::from_str(body)
        .map_err(|e| SourceError::parse(format!("Wikipedia search response: {e}")))?;

    Ok(response.query.search.into_iter().next().map(|hit| hit.title))
}

fn parse_page(body: &str) -> Result<Page, SourceError> {
    let response: ExtractResponse = serde_json::from_str(body)
        .map_err(|e| SourceError::parse(format!("Wikipedia extract response: {e}")))?;

    response
        .query
        .pages
        .into_iter()
        .find(|page| !page.missing)
        .ok_or_else(|| SourceError::parse("Wikipedia page not found"))
}
