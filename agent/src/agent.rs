use delve_core::config::DEFAULT_TOP_K;
use delve_core::{synthesize, DocSearch, ExternalResults, Report, Snippet};
use delve_websearch::{SearchError, SearchResult, WebSearch};

/// Runs one research request end to end. Without a [`WebSearch`] it works offline.
pub struct ResearchAgent {
    docs: DocSearch,
    web: Option<WebSearch>,
    top_k: usize,
}

impl ResearchAgent {
    pub fn new(docs: DocSearch, web: Option<WebSearch>) -> Self {
        Self { docs, web, top_k: DEFAULT_TOP_K }
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn is_offline(&self) -> bool { self.web.is_none() }

    pub async fn research(&self, query: &str) -> Report {
        tracing::info!(query, "searching local knowledge base");
        let local = self.docs.search(query, self.top_k);
        tracing::info!(matches = local.len(), "local search done");

        let (web, news) = match &self.web {
            Some(search) => {
                let (web, news) = tokio::join!(search.search(query), search.search_news(query));
                (into_external(web, "web"), into_external(news, "news"))
            }
            None => {
                tracing::info!("offline mode, skipping web and news search");
                (ExternalResults::skipped(), ExternalResults::skipped())
            }
        };

        tracing::info!(local = local.len(), web = web.len(), news = news.len(), "synthesising findings");
        synthesize(query, &local, &web, &news)
    }
}

/// Fold a collaborator result into the report input; a failure becomes an empty, annotated result.
pub fn into_external(result: Result<Vec<SearchResult>, SearchError>, source: &str) -> ExternalResults {
    match result {
        Ok(results) => ExternalResults::ok(results.into_iter().map(to_snippet).collect()),
        Err(err) => {
            tracing::warn!(source, error = %err, "external search failed");
            ExternalResults::failed(err.to_string())
        }
    }
}

fn to_snippet(r: SearchResult) -> Snippet {
    Snippet { title: r.title, url: r.url, snippet: r.snippet }
}
