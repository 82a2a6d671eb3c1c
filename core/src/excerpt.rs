//! Pick the lines of a document that mention the query, with one line of context either side.

/// Extract up to `max_excerpts` context windows around the lines with the most query hits.
///
/// A line's hit count is the number of query tokens (repeats included) found as substrings of
/// the lowercased line. Lines without hits are never used; ties keep document order.
pub fn extract<S: AsRef<str>>(doc_text: &str, query_tokens: &[S], max_excerpts: usize) -> Vec<String> {
    let lines: Vec<&str> = doc_text.split('\n').collect();
    let tokens: Vec<&str> = query_tokens.iter().map(|t| t.as_ref()).collect();

    let mut scored: Vec<(usize, usize)> = lines
        .iter()
        .enumerate()
        .filter_map(|(idx, line)| {
            let lowered = line.to_lowercase();
            let hits = tokens.iter().filter(|t| lowered.contains(**t)).count();
            (hits > 0).then_some((hits, idx))
        })
        .collect();
    // stable: equal hit counts stay in line order
    scored.sort_by(|a, b| b.0.cmp(&a.0));

    let mut excerpts: Vec<String> = Vec::new();
    for &(_, idx) in scored.iter().take(max_excerpts) {
        let start = idx.saturating_sub(1);
        let end = (idx + 2).min(lines.len());
        let snippet = lines[start..end]
            .iter()
            .map(|l| l.trim())
            .filter(|l| !l.is_empty())
            .collect::<Vec<_>>()
            .join("\n");
        if !snippet.is_empty() && !excerpts.contains(&snippet) {
            excerpts.push(snippet);
        }
    }
    excerpts
}
