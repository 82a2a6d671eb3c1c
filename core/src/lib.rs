//! Local lexical retrieval and extractive summarization.
//!
//! A corpus is tokenized into an in-memory inverted index on first use, ranked with BM25 per
//! query, and mined for excerpts. The summarizer and synthesis step turn local excerpts and
//! external search snippets into a sectioned [`Report`].

pub mod config;
pub mod corpus;
pub mod excerpt;
pub mod index;
pub mod rank;
pub mod search;
pub mod summarize;
pub mod synthesis;
pub mod tokenizer;

pub use corpus::{CorpusSource, DirectoryCorpus, MemoryCorpus};
pub use index::{DocId, Document, InvertedIndex, LazyIndex};
pub use search::{DocMatch, DocSearch};
pub use summarize::{extract_key_points, summarize, Summarizer};
pub use synthesis::{synthesize, ExternalResults, Report, Section, Snippet};
