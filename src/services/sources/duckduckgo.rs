use async_trait::async_trait;
use reqwest::Client;
use scraper::{Html, Selector};
use tracing::debug;

use super::{
    element_text, read_body, KnowledgeSource, SourceError, SourceItem, SourceReport, NO_DESCRIPTION,
};

/// DuckDuckGo search through its HTML-only endpoint.
pub struct DuckDuckGoSource {
    client: Client,
    base_url: String,
    max_results: usize,
}

impl DuckDuckGoSource {
    pub fn new(client: Client, base_url: impl Into<String>, max_results: usize) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            max_results,
        }
    }
}

#[async_trait]
impl KnowledgeSource for DuckDuckGoSource {
    fn name(&self) -> &'static str {
        "DuckDuckGo"
    }

    async fn search(&self, query: &str) -> Result<SourceReport, SourceError> {
        debug!(url = %self.base_url, query, "Querying DuckDuckGo");

        let response = self
            .client
            .get(&self.base_url)
            .query(&[("q", query)])
            .send()
            .await?;
        let body = read_body(response).await?;

        let items = parse_duckduckgo_results(&body, self.max_results)?;
        if items.is_empty() {
            return Err(SourceError::NoResults);
        }

        Ok(SourceReport::new(items))
    }
}

/// Extract up to `max` result anchors (`a.result__a`) from a DuckDuckGo HTML page.
pub fn parse_duckduckgo_results(html: &str, max: usize) -> Result<Vec<SourceItem>, SourceError> {
    let document = Html::parse_document(html);
    let anchor_selector = Selector::parse("a.result__a")
        .map_err(|e| SourceError::parse(format!("Invalid CSS selector: {e:?}")))?;

    let items = document
        .select(&anchor_selector)
        .take(max)
        .map(|anchor| {
            let description = anchor
                .value()
                .attr("title")
                .map(str::to_string)
                .unwrap_or_else(|| NO_DESCRIPTION.to_string());

            SourceItem {
                title: element_text(&anchor),
                description,
                link: anchor.value().attr("href").map(clean_link),
            }
        })
        .collect();

    Ok(items)
}

/// Unwrap DuckDuckGo redirect URLs (`//duckduckgo.com/l/?uddg=<encoded>&rut=..`).
fn clean_link(href: &str) -> String {
    if let Some(encoded) = href.split("uddg=").nth(1) {
        let encoded = encoded.split('&').next().unwrap_or(encoded);
        if let Ok(decoded) = urlencoding::decode(encoded) {
            return decoded.into_owned();
        }
    }

    if let Some(rest) = href.strip_prefix("//") {
        return format!("https://{rest}");
    }

    href.to_string()
}
