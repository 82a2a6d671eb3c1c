//! Corpus sources feeding the inverted index.
//!
//! The index only sees `(id, text)` pairs; where they come from is decided by the
//! [`CorpusSource`] handed to [`crate::LazyIndex`].

use crate::config::SUPPORTED_EXTENSIONS;
use crate::index::Document;
use anyhow::{bail, Result};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Supplies the documents to index. Called at most once per [`crate::LazyIndex`].
pub trait CorpusSource: Send + Sync {
    fn load(&self) -> Result<Vec<Document>>;
}

/// Documents held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryCorpus {
    documents: Vec<Document>,
}

impl MemoryCorpus {
    pub fn new(documents: Vec<Document>) -> Self { Self { documents } }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::new(pairs.into_iter().map(|(id, text)| Document::new(id, text)).collect())
    }
}

impl CorpusSource for MemoryCorpus {
    fn load(&self) -> Result<Vec<Document>> {
        Ok(self.documents.clone())
    }
}

/// Text files under a directory tree.
///
/// Files are kept when their extension is in `extensions`; any path component that starts
/// with `.` or appears in `exclude` prunes that entry (and its subtree).
#[derive(Debug, Clone)]
pub struct DirectoryCorpus {
    root: PathBuf,
    extensions: BTreeSet<String>,
    exclude: BTreeSet<String>,
}

impl DirectoryCorpus {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            extensions: SUPPORTED_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            exclude: BTreeSet::new(),
        }
    }

    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions
            .into_iter()
            .map(|e| e.into().trim_start_matches('.').to_string())
            .collect();
        self
    }

    pub fn exclude<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn root(&self) -> &Path { &self.root }

    fn is_pruned(&self, name: &str) -> bool {
        name.starts_with('.') || self.exclude.contains(name)
    }

    fn wants(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| self.extensions.contains(e))
            .unwrap_or(false)
    }
}

impl CorpusSource for DirectoryCorpus {
    fn load(&self) -> Result<Vec<Document>> {
        if !self.root.is_dir() {
            bail!("corpus root {} is not a directory", self.root.display());
        }

        let mut documents = Vec::new();
        let walker = WalkDir::new(&self.root)
            .sort_by_file_name()
            .into_iter()
            // depth 0 is the root itself, which may legitimately be `.`
            .filter_entry(|e| e.depth() == 0 || !self.is_pruned(&e.file_name().to_string_lossy()));
        for entry in walker {
            let entry = match entry {
                Ok(e) => e,
                Err(err) => {
                    tracing::warn!(error = %err, "skipping unreadable directory entry");
                    continue;
                }
            };
            let path = entry.path();
            if !entry.file_type().is_file() || !self.wants(path) {
                continue;
            }
            let bytes = match std::fs::read(path) {
                Ok(b) => b,
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "skipping unreadable file");
                    continue;
                }
            };
            let rel = path.strip_prefix(&self.root).unwrap_or(path);
            let id = rel
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            documents.push(Document::new(id, String::from_utf8_lossy(&bytes).into_owned()));
        }

        tracing::debug!(root = %self.root.display(), count = documents.len(), "scanned corpus directory");
        Ok(documents)
    }
}
