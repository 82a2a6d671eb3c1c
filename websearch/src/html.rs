//! Result page parsers. Kept free of I/O so they can be tested against canned HTML.

use crate::error::{Result, SearchError};
use crate::SearchResult;
use scraper::{ElementRef, Html, Selector};
use url::Url;

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| SearchError::Parse(format!("invalid selector {css:?}: {e:?}")))
}

fn text_of(el: ElementRef<'_>) -> String {
    el.text().collect::<Vec<_>>().join(" ").split_whitespace().collect::<Vec<_>>().join(" ")
}

/// DuckDuckGo wraps result links as `//duckduckgo.com/l/?uddg=<target>&rut=...`.
pub(crate) fn unwrap_redirect(href: &str) -> Option<String> {
    let full = if href.starts_with("//") { format!("https:{href}") } else { href.to_string() };
    let parsed = Url::parse(&full).ok()?;
    if parsed.host_str() == Some("duckduckgo.com") && parsed.path().starts_with("/l/") {
        parsed.query_pairs().find(|(k, _)| k == "uddg").map(|(_, v)| v.into_owned())
    } else {
        Some(full)
    }
}

/// Organic results from the DuckDuckGo HTML endpoint, ads skipped.
pub fn parse_web_results(html: &str, max_results: usize) -> Result<Vec<SearchResult>> {
    let document = Html::parse_document(html);
    let result_sel = selector(".result:not(.result--ad)")?;
    let title_sel = selector(".result__a")?;
    let snippet_sel = selector(".result__snippet")?;

    let mut results = Vec::new();
    for element in document.select(&result_sel) {
        let Some(title_el) = element.select(&title_sel).next() else { continue };
        let title = text_of(title_el);
        let Some(url) = title_el.value().attr("href").and_then(unwrap_redirect) else { continue };
        if title.is_empty() {
            continue;
        }
        let snippet = element.select(&snippet_sel).next().map(text_of).unwrap_or_default();
        results.push(SearchResult { title, url, snippet });
        if results.len() >= max_results {
            break;
        }
    }
    tracing::debug!(count = results.len(), "web results parsed");
    Ok(results)
}

/// News cards from the Bing News HTML page.
pub fn parse_news_results(html: &str, max_results: usize) -> Result<Vec<SearchResult>> {
    let document = Html::parse_document(html);
    let card_sel = selector("div.news-card")?;
    let title_sel = selector("a.title")?;
    let snippet_sel = selector("div.snippet")?;

    let mut results = Vec::new();
    for card in document.select(&card_sel) {
        let Some(title_el) = card.select(&title_sel).next() else { continue };
        let title = text_of(title_el);
        let Some(url) = card.value().attr("data-url").or_else(|| title_el.value().attr("href")) else {
            continue;
        };
        if title.is_empty() {
            continue;
        }
        let url = url.to_string();
        let snippet = card
            .select(&snippet_sel)
            .next()
            .map(|el| el.value().attr("title").map(str::to_string).unwrap_or_else(|| text_of(el)))
            .unwrap_or_default();
        results.push(SearchResult { title, url, snippet });
        if results.len() >= max_results {
            break;
        }
    }
    tracing::debug!(count = results.len(), "news results parsed");
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DDG_HTML: &str = r#"<!DOCTYPE html>
<html><body>
<div class="result result--ad">
    <a class="result__a" href="https://ads.example.com/">Sponsored</a>
    <div class="result__snippet">Buy now.</div>
</div>
<div class="result results_links web-result">
    <a class="result__a" href="//duckduckgo.com/l/?uddg=https%3A%2F%2Fwww.iea.org%2Fev&amp;rut=abc">
        Global EV Outlook
    </a>
    <a class="result__snippet">Electric car sales   topped 14 million in 2023.</a>
</div>
<div class="result results_links web-result">
    <a class="result__a" href="https://example.com/batteries">Battery costs</a>
</div>
<div class="result results_links web-result">
    <a class="result__a">No link</a>
</div>
</body></html>"#;

    const BING_NEWS_HTML: &str = r#"<html><body>
<div class="news-card newsitem cardcommon" data-url="https://news.example.com/a">
    <a class="title" href="https://news.example.com/a?ref=x">Battery plant opens</a>
    <div class="snippet" title="A new gigafactory began production on Monday.">A new gigafactory…</div>
</div>
<div class="news-card newsitem cardcommon">
    <a class="title" href="https://news.example.com/b">Grid storage record</a>
    <div class="snippet">Utilities installed record storage capacity.</div>
</div>
<div class="news-card"><div class="snippet">orphan</div></div>
</body></html>"#;

    #[test]
    fn unwraps_ddg_redirects() {
        assert_eq!(
            unwrap_redirect("//duckduckgo.com/l/?uddg=https%3A%2F%2Fexample.com%2Fpage&rut=abc"),
            Some("https://example.com/page".to_string())
        );
        assert_eq!(unwrap_redirect("https://example.com/direct"), Some("https://example.com/direct".to_string()));
        assert_eq!(unwrap_redirect("not a url"), None);
    }

    #[test]
    fn parses_web_results_and_skips_ads() {
        let results = parse_web_results(DDG_HTML, 10).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].title, "Global EV Outlook");
        assert_eq!(results[0].url, "https://www.iea.org/ev");
        assert_eq!(results[0].snippet, "Electric car sales topped 14 million in 2023.");
        assert_eq!(results[1].url, "https://example.com/batteries");
        assert!(results[1].snippet.is_empty());
    }

    #[test]
    fn web_results_respect_limit() {
        assert_eq!(parse_web_results(DDG_HTML, 1).unwrap().len(), 1);
        assert!(parse_web_results("<html></html>", 5).unwrap().is_empty());
    }

    #[test]
    fn parses_news_cards() {
        let results = parse_news_results(BING_NEWS_HTML, 10).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].url, "https://news.example.com/a");
        assert_eq!(results[0].snippet, "A new gigafactory began production on Monday.");
        assert_eq!(results[1].title, "Grid storage record");
        assert_eq!(results[1].snippet, "Utilities installed record storage capacity.");
    }
}
