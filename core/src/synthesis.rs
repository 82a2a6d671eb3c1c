//! Assemble local matches and external search snippets into a sectioned report.

use crate::config::{MAX_KEY_POINT_CHARS, SYNTHESIS_KEY_POINTS};
use crate::search::DocMatch;
use crate::summarize::extract_key_points;
use serde::{Deserialize, Serialize};

pub const LOCAL_HEADING: &str = "Local Knowledge Base Findings";
pub const WEB_HEADING: &str = "Web Research Findings";
pub const NEWS_HEADING: &str = "Recent News";
pub const SYNTHESIS_HEADING: &str = "Synthesis & Key Takeaways";

/// One record from a web or news search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snippet {
    pub title: String,
    pub url: String,
    pub snippet: String,
}

/// What an external search collaborator returned. A failed search keeps its error message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalResults {
    pub snippets: Vec<Snippet>,
    pub error: Option<String>,
}

impl ExternalResults {
    pub fn ok(snippets: Vec<Snippet>) -> Self {
        Self { snippets, error: None }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self { snippets: Vec::new(), error: Some(error.into()) }
    }

    /// The source was not consulted at all (offline mode).
    pub fn skipped() -> Self { Self::default() }

    pub fn len(&self) -> usize { self.snippets.len() }

    pub fn is_empty(&self) -> bool { self.snippets.is_empty() }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub heading: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub query: String,
    pub sections: Vec<Section>,
}

impl Report {
    pub fn new(query: impl Into<String>) -> Self {
        Self { query: query.into(), sections: Vec::new() }
    }

    fn add_section(&mut self, heading: &str, body: String) {
        self.sections.push(Section { heading: heading.to_string(), body });
    }

    pub fn section(&self, heading: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.heading == heading)
    }
}

/// Build the report for `query` from every source that produced something.
pub fn synthesize(query: &str, local: &[DocMatch], web: &ExternalResults, news: &ExternalResults) -> Report {
    let mut report = Report::new(query);

    let local_body = if local.is_empty() {
        "No matching documents found in the local knowledge base.".to_string()
    } else {
        format_doc_matches(local)
    };
    report.add_section(LOCAL_HEADING, local_body);

    if let Some(body) = format_external(web, "Web search") {
        report.add_section(WEB_HEADING, body);
    }
    if let Some(body) = format_external(news, "News search") {
        report.add_section(NEWS_HEADING, body);
    }

    report.add_section(SYNTHESIS_HEADING, key_takeaways(query, local, web, news));
    report
}

fn format_doc_matches(matches: &[DocMatch]) -> String {
    let mut lines: Vec<String> = Vec::new();
    for m in matches {
        lines.push(format!("### {} (relevance: {:.3})", m.document_id, m.score));
        lines.push(String::new());
        for excerpt in &m.excerpts {
            lines.push(format!("> {excerpt}"));
            lines.push(String::new());
        }
    }
    lines.join("\n")
}

/// `None` when the source has nothing to show: no results and no failure to report.
fn format_external(results: &ExternalResults, label: &str) -> Option<String> {
    if results.is_empty() {
        return results.error.as_ref().map(|err| format!("{label} failed: {err}"));
    }
    let mut lines: Vec<String> = Vec::new();
    for (idx, res) in results.snippets.iter().enumerate() {
        lines.push(format!("### {}. {}", idx + 1, res.title));
        lines.push(format!("**Source:** {}", res.url));
        lines.push(String::new());
        lines.push(res.snippet.clone());
        lines.push(String::new());
    }
    Some(lines.join("\n"))
}

fn key_takeaways(query: &str, local: &[DocMatch], web: &ExternalResults, news: &ExternalResults) -> String {
    let parts: Vec<&str> = local
        .iter()
        .flat_map(|m| m.excerpts.iter())
        .chain(web.snippets.iter().map(|s| &s.snippet))
        .chain(news.snippets.iter().map(|s| &s.snippet))
        .map(String::as_str)
        .filter(|p| !p.trim().is_empty())
        .collect();

    if parts.is_empty() {
        return format!(
            "No information was found for the query **\"{query}\"**. \
             Consider refining the query or broadening the search terms."
        );
    }

    let combined = parts.join(" ");
    let points = extract_key_points(&combined, SYNTHESIS_KEY_POINTS);

    let mut lines = vec![format!(
        "Based on the research conducted for **\"{query}\"**, here are the key takeaways:\n"
    )];
    for (i, point) in points.iter().enumerate() {
        lines.push(format!("{}. {}", i + 1, truncate_point(point)));
    }
    lines.push(String::new());
    lines.push(format!(
        "**Sources consulted:** {} local document(s), {} web result(s), {} news article(s)",
        local.len(),
        web.len(),
        news.len()
    ));
    lines.join("\n")
}

fn truncate_point(point: &str) -> String {
    if point.chars().count() > MAX_KEY_POINT_CHARS {
        let kept: String = point.chars().take(MAX_KEY_POINT_CHARS - 3).collect();
        format!("{kept}...")
    } else {
        point.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snippet(title: &str, text: &str) -> Snippet {
        Snippet { title: title.into(), url: format!("https://example.com/{title}"), snippet: text.into() }
    }

    #[test]
    fn truncates_long_points() {
        let long = "a".repeat(301);
        let cut = truncate_point(&long);
        assert_eq!(cut.chars().count(), 300);
        assert!(cut.ends_with("..."));
        let exact = "b".repeat(300);
        assert_eq!(truncate_point(&exact), exact);
    }

    #[test]
    fn local_section_lists_matches_and_quotes() {
        let local = vec![DocMatch { document_id: "ev.md".into(), score: 1.23456, excerpts: vec!["EVs grew.".into()] }];
        let report = synthesize("ev", &local, &ExternalResults::skipped(), &ExternalResults::skipped());
        let body = &report.section(LOCAL_HEADING).unwrap().body;
        assert!(body.starts_with("### ev.md (relevance: 1.235)"));
        assert!(body.contains("> EVs grew."));
        assert!(report.section(WEB_HEADING).is_none());
        assert!(report.section(NEWS_HEADING).is_none());
    }

    #[test]
    fn external_sections_are_numbered() {
        let web = ExternalResults::ok(vec![snippet("one", "First snippet."), snippet("two", "Second snippet.")]);
        let report = synthesize("q", &[], &web, &ExternalResults::skipped());
        let body = &report.section(WEB_HEADING).unwrap().body;
        assert!(body.contains("### 1. one\n**Source:** https://example.com/one"));
        assert!(body.contains("### 2. two"));
        let headings: Vec<&str> = report.sections.iter().map(|s| s.heading.as_str()).collect();
        assert_eq!(headings, vec![LOCAL_HEADING, WEB_HEADING, SYNTHESIS_HEADING]);
    }

    #[test]
    fn failed_source_is_reported_not_fatal() {
        let news = ExternalResults::failed("HTTP error: timeout");
        let web = ExternalResults::ok(vec![snippet("w", "Wind farms expand offshore.")]);
        let report = synthesize("wind", &[], &web, &news);
        assert_eq!(report.section(NEWS_HEADING).unwrap().body, "News search failed: HTTP error: timeout");
        let synthesis = &report.section(SYNTHESIS_HEADING).unwrap().body;
        assert!(synthesis.contains("1. Wind farms expand offshore."));
        assert!(synthesis.ends_with("1 web result(s), 0 news article(s)"));
    }
}
