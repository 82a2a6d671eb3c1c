use crate::config::DEFAULT_MAX_EXCERPTS;
use crate::corpus::CorpusSource;
use crate::excerpt::extract;
use crate::index::{DocId, InvertedIndex, LazyIndex};
use crate::rank::rank;
use crate::tokenizer::tokenize;
use serde::{Deserialize, Serialize};

/// A ranked local document with the excerpts that matched the query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocMatch {
    pub document_id: DocId,
    pub score: f64,
    pub excerpts: Vec<String>,
}

/// Query entry point over a lazily built local index.
#[derive(Debug)]
pub struct DocSearch {
    index: LazyIndex,
}

impl DocSearch {
    pub fn new<S: CorpusSource + 'static>(source: S) -> Self {
        Self { index: LazyIndex::new(source) }
    }

    pub fn from_index(index: InvertedIndex) -> Self {
        Self { index: LazyIndex::from_index(index) }
    }

    /// Rank documents for `query` and attach up to three excerpts to each hit.
    pub fn search(&self, query: &str, top_k: usize) -> Vec<DocMatch> {
        let query_tokens = tokenize(query);
        if query_tokens.is_empty() {
            return Vec::new();
        }
        let index = self.index.get();
        let ranked = rank(&query_tokens, &index, top_k);
        tracing::debug!(query, hits = ranked.len(), "local search");

        ranked
            .into_iter()
            .map(|(document_id, score)| {
                let text = index.document(&document_id).unwrap_or_default();
                let excerpts = extract(text, &query_tokens, DEFAULT_MAX_EXCERPTS);
                DocMatch { document_id, score, excerpts }
            })
            .collect()
    }

    /// Sorted ids of every indexed document.
    pub fn list_documents(&self) -> Vec<String> {
        self.index.get().document_ids().map(str::to_string).collect()
    }

    pub fn get_document(&self, id: &str) -> Option<String> {
        self.index.get().document(id).map(str::to_string)
    }

    pub fn document_count(&self) -> usize {
        self.index.get().document_count()
    }

    /// Whether the corpus has been loaded yet.
    pub fn is_indexed(&self) -> bool {
        self.index.is_built()
    }
}
