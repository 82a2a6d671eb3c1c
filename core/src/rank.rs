//! BM25 scoring over the inverted index.

use crate::config::{BM25_B, BM25_K1};
use crate::index::{DocId, InvertedIndex};
use std::collections::HashMap;

/// Score documents against `query_tokens` and return the best `top_k`, highest score first.
///
/// Every occurrence of a term in the query contributes, so repeating a word weights it up.
/// Equal scores are ordered by ascending document id.
pub fn rank<S: AsRef<str>>(query_tokens: &[S], index: &InvertedIndex, top_k: usize) -> Vec<(DocId, f64)> {
    if query_tokens.is_empty() || top_k == 0 || index.is_empty() {
        return Vec::new();
    }

    let n = index.document_count() as f64;
    let avgdl = index.average_document_length();
    let mut scores: HashMap<&str, f64> = HashMap::new();

    for term in query_tokens {
        let postings = index.postings(term.as_ref());
        if postings.is_empty() {
            continue;
        }
        let df = postings.len() as f64;
        let idf = ((n - df + 0.5) / (df + 0.5) + 1.0).ln();
        for (doc_id, &tf) in postings {
            let tf = tf as f64;
            let dl = index.length(doc_id) as f64;
            let numerator = tf * (BM25_K1 + 1.0);
            let denominator = tf + BM25_K1 * (1.0 - BM25_B + BM25_B * dl / avgdl);
            *scores.entry(doc_id.as_str()).or_insert(0.0) += idf * numerator / denominator;
        }
    }

    let mut scored: Vec<(&str, f64)> = scores.into_iter().collect();
    scored.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    scored.truncate(top_k);
    scored.into_iter().map(|(id, s)| (id.to_string(), s)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::Document;
    use crate::tokenizer::tokenize;

    fn build_corpus() -> InvertedIndex {
        InvertedIndex::build(vec![
            Document::new("0.md", "rust programming systems language fast"),
            Document::new("1.md", "python programming scripting easy"),
            Document::new("2.md", "java enterprise programming verbose"),
            Document::new("3.md", "rust memory safety zero cost abstractions"),
        ])
    }

    #[test]
    fn empty_query() {
        let idx = build_corpus();
        assert!(rank::<String>(&[], &idx, 10).is_empty());
    }

    #[test]
    fn empty_index() {
        let idx = InvertedIndex::new();
        assert!(rank(&tokenize("rust"), &idx, 10).is_empty());
    }

    #[test]
    fn finds_matching_docs_only() {
        let idx = build_corpus();
        let results = rank(&tokenize("rust"), &idx, 10);
        let ids: Vec<&str> = results.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(ids.len(), 2);
        assert!(ids.contains(&"0.md"));
        assert!(ids.contains(&"3.md"));
        assert!(results.iter().all(|(_, s)| *s > 0.0));
    }

    #[test]
    fn higher_tf_ranks_first() {
        let idx = InvertedIndex::build(vec![
            Document::new("a", "rust rust rust"),
            Document::new("b", "rust programming"),
        ]);
        let results = rank(&tokenize("rust"), &idx, 10);
        assert_eq!(results[0].0, "a");
    }

    #[test]
    fn matches_hand_computed_score() {
        let idx = InvertedIndex::build(vec![
            Document::new("a", "cat dog"),
            Document::new("b", "dog dog bird mouse"),
        ]);
        // N = 2, df(cat) = 1, len(a) = 2, avgdl = 3
        let idf = ((2.0 - 1.0 + 0.5) / (1.0 + 0.5) + 1.0f64).ln();
        let expected = idf * (1.0 * 2.5) / (1.0 + 1.5 * (1.0 - 0.75 + 0.75 * 2.0 / 3.0));
        let results = rank(&["cat"], &idx, 5);
        assert_eq!(results.len(), 1);
        assert!((results[0].1 - expected).abs() < 1e-12);
    }

    #[test]
    fn ties_break_by_ascending_id() {
        let idx = InvertedIndex::build(vec![
            Document::new("zeta.md", "solar wind power"),
            Document::new("alpha.md", "power wind solar"),
            Document::new("mid.md", "unrelated words here"),
        ]);
        let results = rank(&tokenize("wind power"), &idx, 5);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].1, results[1].1);
        assert_eq!(results[0].0, "alpha.md");
        assert_eq!(results[1].0, "zeta.md");
    }

    #[test]
    fn truncates_to_top_k() {
        let idx = build_corpus();
        assert_eq!(rank(&tokenize("programming"), &idx, 2).len(), 2);
        assert!(rank(&tokenize("programming"), &idx, 0).is_empty());
    }

    #[test]
    fn unknown_terms_contribute_nothing() {
        let idx = build_corpus();
        assert!(rank(&tokenize("nonexistent xyz"), &idx, 10).is_empty());
        let with_noise = rank(&tokenize("rust nonexistent"), &idx, 10);
        let without = rank(&tokenize("rust"), &idx, 10);
        assert_eq!(with_noise, without);
    }
}
