//! Pre-flight checks before the comment fetch starts.
//!
//! Fetching a large comment section takes a while; fail on missing
//! credentials before spending that time.

use crate::config::Settings;
use crate::error::{ChorusError, Result};

/// Run all startup checks.
pub fn check(settings: &Settings) -> Result<()> {
    settings.api_key()?;
    check_openai_key(std::env::var("OPENAI_API_KEY").ok())
}

/// Check that an OpenAI API key is configured.
fn check_openai_key(value: Option<String>) -> Result<()> {
    match value {
        Some(key) if !key.trim().is_empty() => Ok(()),
        Some(_) => Err(ChorusError::Config(
            "OPENAI_API_KEY is empty. Set it with: export OPENAI_API_KEY='sk-...'".to_string(),
        )),
        None => Err(ChorusError::Config(
            "OPENAI_API_KEY not set. Set it with: export OPENAI_API_KEY='sk-...'".to_string(),
        )),
    }
}
