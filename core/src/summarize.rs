//! Frequency-based extractive summarization.
//!
//! Sentences are scored by the average normalized corpus frequency of their words, with one
//! extra slot in the denominator so that very short sentences do not win by default.

use crate::config::{DEFAULT_KEY_POINTS, DEFAULT_SUMMARY_SENTENCES};
use crate::tokenizer::tokenize;
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;

lazy_static! {
    static ref SENTENCE_END: Regex = Regex::new(r"[.!?]\s+").expect("valid regex");
}

#[derive(Debug, Clone, PartialEq)]
struct ScoredSentence<'a> {
    index: usize,
    score: f64,
    text: &'a str,
}

/// Split on whitespace that follows `.`, `!` or `?`, keeping the punctuation.
pub fn sentences(text: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0;
    for m in SENTENCE_END.find_iter(text) {
        // the terminator is a single ASCII byte
        out.push(&text[start..m.start() + 1]);
        start = m.end();
    }
    out.push(&text[start..]);
    out.into_iter().map(str::trim).filter(|s| !s.is_empty()).collect()
}

/// Word frequencies over the whole text divided by the largest one. `None` if there are no words.
fn normalized_frequencies(text: &str) -> Option<HashMap<String, f64>> {
    let mut freq: HashMap<String, u32> = HashMap::new();
    for tok in tokenize(text) {
        *freq.entry(tok).or_insert(0) += 1;
    }
    let max = *freq.values().max()? as f64;
    Some(freq.into_iter().map(|(w, c)| (w, c as f64 / max)).collect())
}

/// Score every sentence and order them best first. Equal scores keep sentence order.
fn rank_sentences<'a>(sents: &[&'a str], norm: &HashMap<String, f64>) -> Vec<ScoredSentence<'a>> {
    let mut scored: Vec<ScoredSentence<'a>> = sents
        .iter()
        .enumerate()
        .map(|(index, &text)| {
            let words = tokenize(text);
            let total: f64 = words.iter().map(|w| norm.get(w).copied().unwrap_or(0.0)).sum();
            ScoredSentence { index, score: total / (words.len() as f64 + 1.0), text }
        })
        .collect();
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored
}

/// Condense `text` to its `max_sentences` highest scoring sentences, in their original order.
///
/// Text that already has `max_sentences` sentences or fewer comes back unchanged.
pub fn summarize(text: &str, max_sentences: usize) -> String {
    let sents = sentences(text);
    if sents.len() <= max_sentences {
        return text.to_string();
    }
    let Some(norm) = normalized_frequencies(text) else {
        return text.to_string();
    };

    let mut top = rank_sentences(&sents, &norm);
    top.truncate(max_sentences);
    top.sort_by_key(|s| s.index);
    top.iter().map(|s| s.text).collect::<Vec<_>>().join(" ")
}

/// The `num_points` highest scoring sentences, most relevant first.
pub fn extract_key_points(text: &str, num_points: usize) -> Vec<String> {
    let sents = sentences(text);
    if sents.is_empty() {
        return Vec::new();
    }
    let Some(norm) = normalized_frequencies(text) else {
        return sents.into_iter().take(num_points).map(str::to_string).collect();
    };

    rank_sentences(&sents, &norm)
        .into_iter()
        .take(num_points)
        .map(|s| s.text.to_string())
        .collect()
}

/// Summarizer with configured sentence and key point budgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summarizer {
    pub max_sentences: usize,
    pub max_points: usize,
}

impl Default for Summarizer {
    fn default() -> Self {
        Self { max_sentences: DEFAULT_SUMMARY_SENTENCES, max_points: DEFAULT_KEY_POINTS }
    }
}

impl Summarizer {
    pub fn new(max_sentences: usize, max_points: usize) -> Self {
        Self { max_sentences, max_points }
    }

    /// Override only the sentence budget, leaving `None` at the current value.
    pub fn with_sentences(mut self, max_sentences: Option<usize>) -> Self {
        if let Some(n) = max_sentences {
            self.max_sentences = n;
        }
        self
    }

    pub fn with_points(mut self, max_points: Option<usize>) -> Self {
        if let Some(n) = max_points {
            self.max_points = n;
        }
        self
    }

    pub fn summarize(&self, text: &str) -> String {
        summarize(text, self.max_sentences)
    }

    pub fn extract_key_points(&self, text: &str) -> Vec<String> {
        extract_key_points(text, self.max_points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_sentences_on_terminators() {
        let s = sentences("First one. Second!  Third?\nFourth without end");
        assert_eq!(s, vec!["First one.", "Second!", "Third?", "Fourth without end"]);
    }

    #[test]
    fn no_split_without_whitespace() {
        assert_eq!(sentences("v1.2 is out.Really"), vec!["v1.2 is out.Really"]);
        assert!(sentences("   ").is_empty());
    }

    #[test]
    fn short_text_is_unchanged() {
        let text = "  One sentence.   Two sentences!  ";
        assert_eq!(summarize(text, 2), text);
        assert_eq!(summarize("", 3), "");
    }

    #[test]
    fn text_without_words_is_unchanged() {
        let text = "!!! ??? ... ...";
        assert_eq!(sentences(text).len(), 4);
        assert_eq!(summarize(text, 1), text);
    }

    #[test]
    fn summary_keeps_document_order() {
        let text = "Solar power is growing. Cats sleep. Solar power and wind power grow together. \
                    Dogs bark. Power grids need solar storage.";
        let summary = summarize(text, 2);
        // the two solar/power sentences with the highest density, in original order
        assert_eq!(summary, "Solar power is growing. Solar power and wind power grow together.");
    }

    #[test]
    fn key_points_in_score_order() {
        let text = "Cats sleep. Solar power and wind power grow together. Solar power is growing.";
        let points = extract_key_points(text, 2);
        assert_eq!(points, vec!["Solar power and wind power grow together.", "Solar power is growing."]);
    }

    #[test]
    fn key_points_empty_text() {
        assert!(extract_key_points("", 3).is_empty());
        assert!(extract_key_points(" \n ", 3).is_empty());
    }

    #[test]
    fn key_points_without_words_fall_back_to_first_sentences() {
        let points = extract_key_points("!!! ??? ...", 2);
        assert_eq!(points, vec!["!!!", "???"]);
    }

    #[test]
    fn summarizer_uses_configured_budgets() {
        let s = Summarizer::default();
        assert_eq!(s, Summarizer::new(5, 5));
        let text = "Cats sleep. Solar power and wind power grow together. Solar power is growing.";
        let s = s.with_sentences(Some(1)).with_points(None);
        assert_eq!(s.summarize(text), "Solar power and wind power grow together.");
        assert_eq!(s.extract_key_points(text).len(), 3);
        assert_eq!(s.with_points(Some(1)).extract_key_points(text), vec!["Solar power and wind power grow together."]);
    }
}
