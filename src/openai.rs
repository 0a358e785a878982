//! OpenAI client configuration with sensible defaults.

use async_openai::{config::OpenAIConfig, Client};
use std::time::Duration;

/// OpenAI client type used across the crate.
pub type OpenAIClient = Client<OpenAIConfig>;

/// Default timeout for OpenAI API requests (5 minutes).
const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Create an OpenAI client with the default timeout.
///
/// Credentials come from `OPENAI_API_KEY` (and optionally `OPENAI_BASE_URL`).
pub fn create_client() -> OpenAIClient {
    create_client_with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
}

/// Create an OpenAI client with a custom timeout.
pub fn create_client_with_timeout(timeout: Duration) -> OpenAIClient {
    let http_client = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new());

    let mut config = OpenAIConfig::default();
    if let Ok(base) = std::env::var("OPENAI_BASE_URL") {
        if !base.trim().is_empty() {
            config = config.with_api_base(base);
        }
    }

    Client::with_config(config).with_http_client(http_client)
}
