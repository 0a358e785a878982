//! Retrieval-augmented answering over the indexed comments.

pub mod context;
mod response;

pub use context::{format_context_for_prompt, Retriever};
pub use response::RagEngine;

use crate::error::Result;
use async_trait::async_trait;
use futures::Stream;
use std::pin::Pin;

/// Answer text, delivered fragment by fragment as the model produces it.
///
/// One-shot: each question gets a fresh stream.
pub type AnswerStream = Pin<Box<dyn Stream<Item = Result<String>> + Send>>;

/// Anything that can answer a question about the loaded video.
#[async_trait]
pub trait Answerer: Send + Sync {
    /// Start answering `question`.
    async fn answer(&self, question: &str) -> Result<AnswerStream>;
}
