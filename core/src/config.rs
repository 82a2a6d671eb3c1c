//! Tuning constants and defaults for retrieval and summarization.
//!
//! Runtime overrides (corpus location, result counts) come from CLI arguments in the
//! binaries; these are the values used when nothing is overridden.

/// BM25 term frequency saturation.
pub const BM25_K1: f64 = 1.5;

/// BM25 document length normalization.
pub const BM25_B: f64 = 0.75;

/// Number of ranked documents returned by a local search.
pub const DEFAULT_TOP_K: usize = 5;

/// Excerpts extracted per ranked document.
pub const DEFAULT_MAX_EXCERPTS: usize = 3;

/// Sentences kept by `summarize` when the caller does not choose.
pub const DEFAULT_SUMMARY_SENTENCES: usize = 5;

/// Key points returned by `extract_key_points` when the caller does not choose.
pub const DEFAULT_KEY_POINTS: usize = 5;

/// Key points in the synthesis section of a report.
pub const SYNTHESIS_KEY_POINTS: usize = 6;

/// Longest key point (in characters) rendered before truncation.
pub const MAX_KEY_POINT_CHARS: usize = 300;

/// File extensions picked up by the directory corpus.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["md", "txt", "json", "csv"];
