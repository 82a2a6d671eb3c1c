//! Web and news search for research reports.
//!
//! Web results come from the DuckDuckGo HTML endpoint, news from Bing News. Both are scraped
//! with CSS selectors; no API keys are needed. Failures are returned as [`SearchError`] values
//! so the caller can carry on with whatever other sources succeeded.

pub mod config;
pub mod error;
pub mod html;

pub use config::WebSearchConfig;
pub use error::{Result, SearchError};

use reqwest::{header, Client};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const WEB_ENDPOINT: &str = "https://html.duckduckgo.com/html/";
const NEWS_ENDPOINT: &str = "https://www.bing.com/news/search";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub url: String,
    pub snippet: String,
}

/// HTTP-backed web and news search.
#[derive(Debug, Clone)]
pub struct WebSearch {
    client: Client,
    config: WebSearchConfig,
}

impl WebSearch {
    pub fn new(config: WebSearchConfig) -> Result<Self> {
        config.validate()?;
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .redirect(reqwest::redirect::Policy::limited(5))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SearchError::Http(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &WebSearchConfig { &self.config }

    /// General web search.
    pub async fn search(&self, query: &str) -> Result<Vec<SearchResult>> {
        tracing::info!(query, "web search");
        let html = self
            .fetch(self.client.post(WEB_ENDPOINT).form(&[("q", query)]), "web search")
            .await?;
        let results = html::parse_web_results(&html, self.config.max_results)?;
        tracing::info!(count = results.len(), "web search finished");
        Ok(results)
    }

    /// Recent news articles.
    pub async fn search_news(&self, query: &str) -> Result<Vec<SearchResult>> {
        tracing::info!(query, "news search");
        let html = self
            .fetch(self.client.get(NEWS_ENDPOINT).query(&[("q", query), ("setlang", "en")]), "news search")
            .await?;
        let results = html::parse_news_results(&html, self.config.max_results)?;
        tracing::info!(count = results.len(), "news search finished");
        Ok(results)
    }

    async fn fetch(&self, request: reqwest::RequestBuilder, what: &str) -> Result<String> {
        let resp = request
            .header(header::ACCEPT, "text/html,application/xhtml+xml")
            .header(header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .send()
            .await
            .map_err(|e| SearchError::Http(format!("{what} request failed: {e}")))?
            .error_for_status()
            .map_err(|e| SearchError::Http(format!("{what} returned an error status: {e}")))?;
        let body = resp
            .text()
            .await
            .map_err(|e| SearchError::Http(format!("{what} response read failed: {e}")))?;
        tracing::trace!(bytes = body.len(), what, "response received");
        Ok(body)
    }
}
