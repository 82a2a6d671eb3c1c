use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref WORD: Regex = Regex::new(r"[a-z0-9]+").expect("valid regex");
}

/// Tokenize text into lowercase runs of ASCII letters and digits.
///
/// Everything else (punctuation, whitespace, symbols, non-ASCII letters) separates tokens and
/// is dropped. Indexing, querying and summarization all go through this function so they share
/// one vocabulary.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    WORD.find_iter(&lowered).map(|m| m.as_str().to_string()).collect()
}
