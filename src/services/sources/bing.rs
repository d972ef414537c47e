use async_trait::async_trait;
use reqwest::Client;
use scraper::{Html, Selector};
use tracing::debug;

use super::{
    element_text, read_body, KnowledgeSource, SourceError, SourceItem, SourceReport, NO_DESCRIPTION,
};

/// Bing web search, scraped from the HTML results page.
pub struct BingSource {
    client: Client,
    base_url: String,
    max_results: usize,
}

impl BingSource {
    pub fn new(client: Client, base_url: impl Into<String>, max_results: usize) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            max_results,
        }
    }

    fn search_url(&self, query: &str) -> String {
        format!(
            "{}?q={}",
            self.base_url,
            urlencoding::encode(query).replace("%20", "+")
        )
    }
}

#[async_trait]
impl KnowledgeSource for BingSource {
    fn name(&self) -> &'static str {
        "Bing"
    }

    async fn search(&self, query: &str) -> Result<SourceReport, SourceError> {
        let url = self.search_url(query);
        debug!(%url, "Querying Bing");

        let response = self.client.get(&url).send().await?;
        let body = read_body(response).await?;

        let items = parse_bing_results(&body, self.max_results)?;
        if items.is_empty() {
            return Err(SourceError::NoResults);
        }

        Ok(SourceReport::new(items))
    }
}

/// Extract up to `max` organic results (`li.b_algo`) from a Bing results page.
pub fn parse_bing_results(html: &str, max: usize) -> Result<Vec<SourceItem>, SourceError> {
    let document = Html::parse_document(html);
    let result_selector = selector("li.b_algo")?;
    let title_selector = selector("h2")?;
    let description_selector = selector("p")?;
    let link_selector = selector("a[href]")?;

    let items = document
        .select(&result_selector)
        .take(max)
        .map(|result| {
            let title = result
                .select(&title_selector)
                .next()
                .map(|e| element_text(&e))
                .unwrap_or_default();

            let description = result
                .select(&description_selector)
                .next()
                .map(|e| element_text(&e))
                .filter(|text| !text.is_empty())
                .unwrap_or_else(|| NO_DESCRIPTION.to_string());

            let link = result
                .select(&link_selector)
                .next()
                .and_then(|a| a.value().attr("href"))
                .map(str::to_string);

            SourceItem {
                title,
                description,
                link,
            }
        })
        .collect();

    Ok(items)
}

fn selector(css: &str) -> Result<Selector, SourceError> {
    Selector::parse(css).map_err(|e| SourceError::parse(format!("Invalid CSS selector {css}: {e:?}")))
}
