//! OpenAI embeddings implementation.

use super::Embedder;
use crate::config::EmbeddingSettings;
use crate::error::{ChorusError, Result};
use crate::openai::{create_client, OpenAIClient};
use async_openai::types::{CreateEmbeddingRequestArgs, EmbeddingInput};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Inputs per embeddings request.
const BATCH_SIZE: usize = 100;

/// OpenAI-based embedder.
pub struct OpenAIEmbedder {
    client: OpenAIClient,
    model: String,
    dimensions: usize,
}

impl OpenAIEmbedder {
    /// Create a new OpenAI embedder with default settings.
    pub fn new() -> Self {
        Self::from_settings(&EmbeddingSettings::default())
    }

    /// Create an embedder for the configured model and dimensions.
    pub fn from_settings(settings: &EmbeddingSettings) -> Self {
        Self::with_client(create_client(), &settings.model, settings.dimensions as usize)
    }

    /// Create an embedder around an existing client.
    pub fn with_client(client: OpenAIClient, model: &str, dimensions: usize) -> Self {
        Self {
            client,
            model: model.to_string(),
            dimensions,
        }
    }
}

/// Only the `text-embedding-3` family accepts a `dimensions` parameter.
fn supports_dimensions(model: &str) -> bool {
    model.starts_with("text-embedding-3")
}

impl Default for OpenAIEmbedder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Embedder for OpenAIEmbedder {
    #[instrument(skip(self, text))]
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let embeddings = self.embed_batch(&[text.to_string()]).await?;
        embeddings
            .into_iter()
            .next()
            .ok_or_else(|| ChorusError::Embedding("Empty embedding response".to_string()))
    }

    #[instrument(skip(self, texts), fields(count = texts.len()))]
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        debug!("Generating embeddings for {} texts", texts.len());

        let mut all_embeddings = Vec::with_capacity(texts.len());

        for batch in texts.chunks(BATCH_SIZE) {
            let mut args = CreateEmbeddingRequestArgs::default();
            args.model(&self.model)
                .input(EmbeddingInput::StringArray(batch.to_vec()));
            if supports_dimensions(&self.model) {
                args.dimensions(self.dimensions as u32);
            }
            let request = args
                .build()
                .map_err(|e| ChorusError::Embedding(format!("Failed to build request: {}", e)))?;

            let response = self
                .client
                .embeddings()
                .create(request)
                .await
                .map_err(|e| ChorusError::OpenAI(format!("Embedding API error: {}", e)))?;

            if response.data.len() != batch.len() {
                return Err(ChorusError::Embedding(format!(
                    "Expected {} embeddings, got {}",
                    batch.len(),
                    response.data.len()
                )));
            }

            // The API may return items out of order
            let mut embeddings = response.data;
            embeddings.sort_by_key(|e| e.index);
            all_embeddings.extend(embeddings.into_iter().map(|e| e.embedding));
        }

        debug!("Generated {} embeddings", all_embeddings.len());
        Ok(all_embeddings)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}
