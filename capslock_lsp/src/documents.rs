//! Open document store
//!
//! Holds the latest full text of every open document, keyed by URI.
//!
//! Created by M&K (c)2025 The LibraxisAI Team

use dashmap::DashMap;
use tower_lsp::lsp_types::Url;

/// Document content cache (uri -> content)
///
/// Every write replaces the whole text; there is no versioning.
#[derive(Debug, Default)]
pub struct DocumentStore {
    documents: DashMap<Url, String>,
}

impl DocumentStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the text of a newly opened document
    pub fn open(&self, uri: Url, text: String) {
        self.documents.insert(uri, text);
    }

    /// Replace a document's text with the last of the supplied fragments
    ///
    /// Earlier fragments are ignored. Returns `false` and leaves the store
    /// untouched when there are no fragments at all.
    pub fn change<I>(&self, uri: Url, fragments: I) -> bool
    where
        I: IntoIterator<Item = String>,
    {
        match fragments.into_iter().last() {
            Some(text) => {
                self.documents.insert(uri, text);
                true
            }
            None => false,
        }
    }

    /// Drop a document's stored text. Returns whether it was present.
    pub fn close(&self, uri: &Url) -> bool {
        self.documents.remove(uri).is_some()
    }

    /// Run `f` against the stored text while holding the entry's shard lock
    pub fn with_text<R>(&self, uri: &Url, f: impl FnOnce(&str) -> R) -> Option<R> {
        self.documents.get(uri).map(|doc| f(doc.value()))
    }

    /// Snapshot of all open document URIs
    pub fn uris(&self) -> Vec<Url> {
        self.documents.iter().map(|doc| doc.key().clone()).collect()
    }
}
