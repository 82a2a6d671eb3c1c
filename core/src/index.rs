use crate::corpus::CorpusSource;
use crate::tokenizer::tokenize;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

pub type DocId = String;

/// doc_id -> raw term frequency
pub type Postings = BTreeMap<DocId, u32>;

static NO_POSTINGS: Postings = BTreeMap::new();

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Corpus-relative identifier, e.g. `notes/ev.md`.
    pub id: DocId,
    pub text: String,
}

impl Document {
    pub fn new(id: impl Into<DocId>, text: impl Into<String>) -> Self {
        Self { id: id.into(), text: text.into() }
    }
}

/// In-memory inverted index over an immutable corpus.
#[derive(Debug, Default)]
pub struct InvertedIndex {
    postings: HashMap<String, Postings>,
    doc_lengths: HashMap<DocId, usize>,
    docs: BTreeMap<DocId, String>,
    avg_doc_length: f64,
}

impl InvertedIndex {
    pub fn new() -> Self { Self::default() }

    /// Build the index in one pass. A repeated document id replaces the earlier text.
    pub fn build<I>(documents: I) -> Self
    where
        I: IntoIterator<Item = Document>,
    {
        let docs: BTreeMap<DocId, String> = documents.into_iter().map(|d| (d.id, d.text)).collect();

        let mut postings: HashMap<String, Postings> = HashMap::new();
        let mut doc_lengths: HashMap<DocId, usize> = HashMap::with_capacity(docs.len());
        let mut total_len = 0usize;
        for (doc_id, text) in &docs {
            let tokens = tokenize(text);
            doc_lengths.insert(doc_id.clone(), tokens.len());
            total_len += tokens.len();

            let mut tf: HashMap<String, u32> = HashMap::new();
            for tok in tokens {
                *tf.entry(tok).or_insert(0) += 1;
            }
            for (term, count) in tf {
                postings.entry(term).or_default().insert(doc_id.clone(), count);
            }
        }

        let avg_doc_length = if docs.is_empty() { 0.0 } else { total_len as f64 / docs.len() as f64 };
        tracing::debug!(num_docs = docs.len(), num_terms = postings.len(), avg_doc_length, "built inverted index");
        Self { postings, doc_lengths, docs, avg_doc_length }
    }

    pub fn document_count(&self) -> usize { self.docs.len() }

    /// Mean token count per document, computed at build time.
    pub fn average_document_length(&self) -> f64 { self.avg_doc_length }

    /// Postings for `term`; empty when the term never occurs.
    pub fn postings(&self, term: &str) -> &Postings {
        self.postings.get(term).unwrap_or(&NO_POSTINGS)
    }

    /// Token count of a document, 0 for unknown ids.
    pub fn length(&self, doc_id: &str) -> usize {
        self.doc_lengths.get(doc_id).copied().unwrap_or(0)
    }

    pub fn document(&self, doc_id: &str) -> Option<&str> {
        self.docs.get(doc_id).map(String::as_str)
    }

    /// All document ids in ascending order.
    pub fn document_ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.docs.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool { self.docs.is_empty() }
}

/// An index that is built from its corpus source on first use and then shared read-only.
///
/// Concurrent first callers block on the same guard, so the corpus is loaded and indexed
/// exactly once and everyone observes the same `Arc`.
pub struct LazyIndex {
    source: Option<Box<dyn CorpusSource>>,
    built: Mutex<Option<Arc<InvertedIndex>>>,
}

impl LazyIndex {
    pub fn new<S: CorpusSource + 'static>(source: S) -> Self {
        Self { source: Some(Box::new(source)), built: Mutex::new(None) }
    }

    /// Wrap an index that was built eagerly by the caller.
    pub fn from_index(index: InvertedIndex) -> Self {
        Self { source: None, built: Mutex::new(Some(Arc::new(index))) }
    }

    pub fn get(&self) -> Arc<InvertedIndex> {
        let mut slot = self.built.lock();
        if let Some(index) = slot.as_ref() {
            return Arc::clone(index);
        }
        let documents = match &self.source {
            Some(source) => match source.load() {
                Ok(docs) => docs,
                Err(err) => {
                    tracing::warn!(error = %err, "corpus load failed, continuing with an empty index");
                    Vec::new()
                }
            },
            None => Vec::new(),
        };
        let index = Arc::new(InvertedIndex::build(documents));
        tracing::info!(num_docs = index.document_count(), "loaded documents into search index");
        *slot = Some(Arc::clone(&index));
        index
    }

    pub fn is_built(&self) -> bool { self.built.lock().is_some() }
}

impl std::fmt::Debug for LazyIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LazyIndex").field("built", &self.is_built()).finish()
    }
}
