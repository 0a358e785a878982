//! Pipeline orchestrator for Chorus.
//!
//! Coordinates comment retrieval, cleanup, chunking, embedding and indexing.

use crate::chunking::{ChunkingConfig, RecursiveSplitter};
use crate::config::Settings;
use crate::embedding::{Embedder, OpenAIEmbedder};
use crate::error::{ChorusError, Result};
use crate::rag::Retriever;
use crate::text::normalize;
use crate::vector_store::{IndexedChunk, MemoryVectorStore};
use crate::youtube::{fetch_all_comments, FetchedComments, YoutubeClient};
use std::sync::Arc;
use tracing::{info, instrument};

/// The main orchestrator for the Chorus pipeline.
pub struct Orchestrator {
    settings: Settings,
    embedder: Arc<dyn Embedder>,
    splitter: RecursiveSplitter,
}

/// A video whose comments are indexed and ready for questions.
pub struct IndexedVideo {
    /// Video title.
    pub title: String,
    /// Raw comments received.
    pub comment_count: usize,
    /// Comments that were not empty after cleanup.
    pub usable_comments: usize,
    /// Chunks in the index.
    pub chunk_count: usize,
    /// Query handle over the index.
    pub retriever: Retriever,
}

impl Orchestrator {
    /// Create a new orchestrator using the OpenAI embedder.
    pub fn new(settings: Settings) -> Self {
        let embedder = Arc::new(OpenAIEmbedder::from_settings(&settings.embedding));
        Self::with_components(settings, embedder)
    }

    /// Create an orchestrator with a custom embedder.
    pub fn with_components(settings: Settings, embedder: Arc<dyn Embedder>) -> Self {
        let splitter = RecursiveSplitter::new(ChunkingConfig::from(&settings.chunking));
        Self {
            settings,
            embedder,
            splitter,
        }
    }

    /// Fetch the title and every comment of a video.
    ///
    /// The HTTP client lives for exactly this call.
    #[instrument(skip(self))]
    pub async fn fetch(&self, video_id: &str) -> Result<FetchedComments> {
        let client = YoutubeClient::new(&self.settings.youtube)?;
        fetch_all_comments(&client, video_id, self.settings.youtube.max_pages).await
    }

    /// Clean, chunk, embed and index comments into an immutable retriever.
    ///
    /// Any embedding failure aborts the build; there is no partial index.
    #[instrument(skip(self, comments), fields(comments = comments.len()))]
    pub async fn build_index(&self, title: &str, comments: &[String]) -> Result<IndexedVideo> {
        let cleaned: Vec<String> = comments
            .iter()
            .map(|c| normalize(c))
            .filter(|c| !c.is_empty())
            .collect();
        let usable_comments = cleaned.len();
        let text = cleaned.join(" ");

        let chunks = self.splitter.split(&text);
        info!(
            "Split {} usable comments ({} chars) into {} chunks",
            usable_comments,
            text.chars().count(),
            chunks.len()
        );

        let texts: Vec<String> = chunks.iter().map(|c| c.text().to_string()).collect();
        let embeddings = self.embedder.embed_batch(&texts).await?;
        if embeddings.len() != chunks.len() {
            return Err(ChorusError::Embedding(format!(
                "Expected {} embeddings, got {}",
                chunks.len(),
                embeddings.len()
            )));
        }

        let entries: Vec<IndexedChunk> = chunks
            .into_iter()
            .zip(embeddings)
            .map(|(chunk, embedding)| IndexedChunk { chunk, embedding })
            .collect();
        let chunk_count = entries.len();
        let store = Arc::new(MemoryVectorStore::new(entries)?);

        Ok(IndexedVideo {
            title: title.to_string(),
            comment_count: comments.len(),
            usable_comments,
            chunk_count,
            retriever: Retriever::new(store, self.embedder.clone())
                .with_top_k(self.settings.rag.top_k),
        })
    }

    /// Fetch and index a video in one go.
    #[instrument(skip(self))]
    pub async fn process_video(&self, video_id: &str) -> Result<IndexedVideo> {
        let fetched = self.fetch(video_id).await?;
        self.build_index(&fetched.title, &fetched.comments).await
    }
}
