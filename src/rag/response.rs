//! Streaming answer generation.

use super::{format_context_for_prompt, AnswerStream, Answerer, Retriever};
use crate::config::{Prompts, RagSettings};
use crate::error::{ChorusError, Result};
use crate::openai::{create_client, OpenAIClient};
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs,
    CreateChatCompletionRequestArgs,
};
use async_trait::async_trait;
use futures::{stream, StreamExt};
use std::collections::HashMap;
use tracing::{debug, info, instrument};

/// Reply used when the index holds nothing to answer from.
const NO_CONTEXT_ANSWER: &str = "There are no usable comments on this video to answer from.";

/// RAG engine for question answering over one video's comments.
pub struct RagEngine {
    client: OpenAIClient,
    model: String,
    temperature: f32,
    prompts: Prompts,
    title: String,
    retriever: Retriever,
}

impl RagEngine {
    /// Create a new RAG engine for the video titled `title`.
    pub fn new(settings: &RagSettings, title: impl Into<String>, retriever: Retriever) -> Self {
        Self::with_client(create_client(), settings, title, retriever)
    }

    /// Create a RAG engine around an existing client.
    pub fn with_client(
        client: OpenAIClient,
        settings: &RagSettings,
        title: impl Into<String>,
        retriever: Retriever,
    ) -> Self {
        Self {
            client,
            model: settings.model.clone(),
            temperature: settings.temperature,
            prompts: Prompts::default(),
            title: title.into(),
            retriever: retriever.with_top_k(settings.top_k),
        }
    }

    /// Set custom prompts (with user-defined variables).
    pub fn with_prompts(mut self, prompts: Prompts) -> Self {
        self.prompts = prompts;
        self
    }

    /// Render the single prompt sent to the model.
    pub fn build_prompt(&self, question: &str, context: &str) -> String {
        let mut vars = HashMap::new();
        vars.insert("title".to_string(), self.title.clone());
        vars.insert("context".to_string(), context.to_string());
        vars.insert("input".to_string(), question.to_string());

        self.prompts.render_with_custom(&self.prompts.rag.user, &vars)
    }
}

#[async_trait]
impl Answerer for RagEngine {
    #[instrument(skip(self), fields(question = %question))]
    async fn answer(&self, question: &str) -> Result<AnswerStream> {
        info!("Processing question: {}", question);

        let results = self.retriever.retrieve(question).await?;
        if results.is_empty() {
            return Ok(Box::pin(stream::once(async { Ok(NO_CONTEXT_ANSWER.to_string()) })));
        }

        let prompt = self.build_prompt(question, &format_context_for_prompt(&results));
        debug!("Prompt built from {} chunks ({} chars)", results.len(), prompt.len());

        let messages: Vec<ChatCompletionRequestMessage> = vec![ChatCompletionRequestUserMessageArgs::default()
            .content(prompt)
            .build()
            .map_err(|e| ChorusError::Rag(e.to_string()))?
            .into()];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .temperature(self.temperature)
            .build()
            .map_err(|e| ChorusError::Rag(e.to_string()))?;

        let response_stream = self
            .client
            .chat()
            .create_stream(request)
            .await
            .map_err(|e| ChorusError::OpenAI(format!("Failed to start response stream: {}", e)))?;

        let fragments = response_stream.filter_map(|item| async move {
            match item {
                Ok(response) => response
                    .choices
                    .into_iter()
                    .next()
                    .and_then(|choice| choice.delta.content)
                    .filter(|text| !text.is_empty())
                    .map(Ok),
                Err(e) => Some(Err(ChorusError::OpenAI(format!("Response stream error: {}", e)))),
            }
        });

        Ok(Box::pin(fragments))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunking::Chunk;
    use crate::embedding::fake::BagOfWordsEmbedder;
    use crate::embedding::Embedder;
    use crate::vector_store::{IndexedChunk, MemoryVectorStore};
    use async_openai::config::OpenAIConfig;
    use async_openai::Client;
    use futures::StreamExt;
    use httpmock::prelude::*;
    use serde_json::json;
    use std::sync::Arc;

    fn empty_retriever() -> Retriever {
        let store = Arc::new(MemoryVectorStore::new(Vec::new()).unwrap());
        Retriever::new(store, Arc::new(BagOfWordsEmbedder::new()))
    }

    async fn retriever_over(text: &str) -> Retriever {
        let embedder = Arc::new(BagOfWordsEmbedder::new());
        let entry = IndexedChunk {
            chunk: Chunk {
                content: text.to_string(),
                order: 0,
                start: 0,
                end: text.chars().count(),
            },
            embedding: embedder.embed(text).await.unwrap(),
        };
        let store = Arc::new(MemoryVectorStore::new(vec![entry]).unwrap());
        Retriever::new(store, embedder)
    }

    fn engine(server: &MockServer, retriever: Retriever) -> RagEngine {
        let config = OpenAIConfig::new()
            .with_api_key("test_key")
            .with_api_base(server.base_url());
        RagEngine::with_client(Client::with_config(config), &RagSettings::default(), "Demo", retriever)
    }

    /// One server-sent event carrying a chat completion chunk.
    fn sse_chunk(content: Option<&str>) -> String {
        let delta = match content {
            Some(text) => json!({ "role": "assistant", "content": text }),
            None => json!({}),
        };
        let chunk = json!({
            "id": "chatcmpl-1",
            "object": "chat.completion.chunk",
            "created": 1,
            "model": "gpt-4o-mini",
            "choices": [ { "index": 0, "delta": delta, "finish_reason": null } ]
        });
        format!("data: {}\n\n", chunk)
    }

    async fn collect(engine: &RagEngine, question: &str) -> Vec<Result<String>> {
        engine.answer(question).await.unwrap().collect().await
    }

    #[test]
    fn test_build_prompt() {
        let engine = RagEngine::new(&RagSettings::default(), "Rust in 100 Seconds", empty_retriever());

        let prompt = engine.build_prompt("Do people like it?", "Great video\n\nLoved it");

        assert!(prompt.contains("titled 'Rust in 100 Seconds'"));
        assert!(prompt.contains("<context>\nGreat video\n\nLoved it\n</context>"));
        assert!(prompt.ends_with("Question: Do people like it?"));
        assert!(!prompt.contains("{{"));
    }

    #[test]
    fn test_settings_top_k_applies_to_retriever() {
        let settings = RagSettings {
            top_k: 7,
            ..RagSettings::default()
        };
        let engine = RagEngine::new(&settings, "t", empty_retriever());
        assert_eq!(engine.retriever.top_k(), 7);
    }

    #[tokio::test]
    async fn test_streams_fragments_from_single_call() {
        let server = MockServer::start_async().await;
        let body = [
            sse_chunk(Some("")),
            sse_chunk(Some("Viewers ")),
            sse_chunk(Some("loved the ")),
            sse_chunk(Some("editing.")),
            sse_chunk(None),
            "data: [DONE]\n\n".to_string(),
        ]
        .concat();

        let completion_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/chat/completions")
                .header("Authorization", "Bearer test_key")
                .is_true(|req| {
                    let body = String::from_utf8_lossy(req.body().as_ref());
                    body.contains("\"stream\":true")
                        && body.contains("titled 'Demo'")
                        && body.contains("great editing on this video")
                });
            then.status(200).header("content-type", "text/event-stream").body(body);
        });

        let engine = engine(&server, retriever_over("great editing on this video").await);
        let fragments: Vec<String> = collect(&engine, "What about the editing?")
            .await
            .into_iter()
            .map(|f| f.unwrap())
            .collect();

        assert_eq!(fragments, vec!["Viewers ", "loved the ", "editing."]);
        completion_mock.assert_calls(1);
    }

    #[tokio::test]
    async fn test_malformed_stream_event_is_openai_error() {
        let server = MockServer::start_async().await;

        server.mock(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(200)
                .header("content-type", "text/event-stream")
                .body("data: {\"unexpected\": true}\n\ndata: [DONE]\n\n");
        });

        let engine = engine(&server, retriever_over("some comment text here").await);
        let fragments = collect(&engine, "Anything?").await;

        assert_eq!(fragments.len(), 1);
        assert!(matches!(fragments[0], Err(ChorusError::OpenAI(_))));
    }

    #[tokio::test]
    async fn test_empty_index_answers_without_model() {
        let engine = RagEngine::new(&RagSettings::default(), "Quiet Video", empty_retriever());

        let fragments: Vec<String> = engine
            .answer("Anything?")
            .await
            .unwrap()
            .map(|f| f.unwrap())
            .collect()
            .await;

        assert_eq!(fragments, vec![NO_CONTEXT_ANSWER.to_string()]);
    }
}
