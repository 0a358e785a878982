//! In-memory vector store implementation.

use super::{cosine_similarity, IndexedChunk, SearchResult, VectorStore};
use crate::error::{ChorusError, Result};
use async_trait::async_trait;
use std::cmp::Ordering;

/// Immutable in-memory index, scanned exhaustively on every query.
pub struct MemoryVectorStore {
    entries: Vec<IndexedChunk>,
}

impl MemoryVectorStore {
    /// Build the index. All embeddings must share one dimension.
    pub fn new(entries: Vec<IndexedChunk>) -> Result<Self> {
        let dimensions = entries.first().map(|e| e.embedding.len());

        if let Some(dim) = dimensions {
            if let Some(bad) = entries.iter().find(|e| e.embedding.len() != dim) {
                return Err(ChorusError::Embedding(format!(
                    "chunk {} has {} dimensions, expected {}",
                    bad.chunk.order,
                    bad.embedding.len(),
                    dim
                )));
            }
        }

        Ok(Self { entries })
    }
}

#[async_trait]
impl VectorStore for MemoryVectorStore {
    async fn search(&self, query_embedding: &[f32], limit: usize) -> Result<Vec<SearchResult>> {
        let mut results: Vec<SearchResult> = self
            .entries
            .iter()
            .map(|entry| SearchResult {
                chunk: entry.chunk.clone(),
                score: cosine_similarity(query_embedding, &entry.embedding),
            })
            .collect();

        // Ties keep text order
        results.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(Ordering::Equal)
                .then(a.chunk.order.cmp(&b.chunk.order))
        });
        results.truncate(limit);

        Ok(results)
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
