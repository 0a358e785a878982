//! Retrieval handle and prompt context formatting.

use crate::embedding::Embedder;
use crate::error::Result;
use crate::vector_store::{SearchResult, VectorStore};
use std::sync::Arc;
use tracing::debug;

/// Query handle over one immutable index.
#[derive(Clone)]
pub struct Retriever {
    vector_store: Arc<dyn VectorStore>,
    embedder: Arc<dyn Embedder>,
    top_k: usize,
}

impl Retriever {
    /// Create a retriever returning the 4 best chunks per query.
    pub fn new(vector_store: Arc<dyn VectorStore>, embedder: Arc<dyn Embedder>) -> Self {
        Self {
            vector_store,
            embedder,
            top_k: 4,
        }
    }

    /// Set the number of chunks returned per query.
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    /// Number of chunks in the underlying index.
    pub fn chunk_count(&self) -> usize {
        self.vector_store.len()
    }

    /// Best-matching chunks for `query`, best first.
    pub async fn retrieve(&self, query: &str) -> Result<Vec<SearchResult>> {
        self.retrieve_k(query, self.top_k).await
    }

    /// Like [`Retriever::retrieve`] with an explicit result count.
    pub async fn retrieve_k(&self, query: &str, k: usize) -> Result<Vec<SearchResult>> {
        if self.vector_store.is_empty() {
            return Ok(Vec::new());
        }

        let query_embedding = self.embedder.embed(query).await?;
        let results = self.vector_store.search(&query_embedding, k).await?;

        debug!(
            "Retrieved {} chunks (best score {:.3})",
            results.len(),
            results.first().map(|r| r.score).unwrap_or(0.0)
        );
        Ok(results)
    }
}

/// Join retrieved chunk texts, in rank order, separated by blank lines.
pub fn format_context_for_prompt(results: &[SearchResult]) -> String {
    results
        .iter()
        .map(|r| r.chunk.text())
        .collect::<Vec<_>>()
        .join("\n\n")
}
