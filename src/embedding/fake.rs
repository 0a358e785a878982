//! Deterministic embedders for tests.

use super::Embedder;
use crate::error::{ChorusError, Result};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Hashed bag-of-words vectors: texts sharing words score higher.
pub(crate) struct BagOfWordsEmbedder {
    dimensions: usize,
    pub calls: AtomicUsize,
}

impl BagOfWordsEmbedder {
    pub fn new() -> Self {
        Self {
            dimensions: 256,
            calls: AtomicUsize::new(0),
        }
    }

    fn vectorize(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0; self.dimensions];
        for word in text
            .split(|c: char| !c.is_ascii_alphanumeric())
            .filter(|w| w.len() > 2)
        {
            let hash = word
                .to_ascii_lowercase()
                .bytes()
                .fold(2166136261u32, |h, b| (h ^ b as u32).wrapping_mul(16777619));
            vector[hash as usize % self.dimensions] += 1.0;
        }
        vector
    }
}

#[async_trait]
impl Embedder for BagOfWordsEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.vectorize(text))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(texts.iter().map(|t| self.vectorize(t)).collect())
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}

/// Fails every call, like an embedding service that is down.
pub(crate) struct FailingEmbedder;

#[async_trait]
impl Embedder for FailingEmbedder {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
        Err(ChorusError::OpenAI("service unavailable".to_string()))
    }

    async fn embed_batch(&self, _texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Err(ChorusError::OpenAI("service unavailable".to_string()))
    }

    fn dimensions(&self) -> usize {
        8
    }
}
