//! Configuration module for Chorus.
//!
//! Handles loading and managing application settings and prompt templates.

mod prompts;
mod settings;

pub use prompts::{Prompts, RagPrompts};
pub use settings::{
    ChunkingSettings, EmbeddingSettings, PromptSettings, RagSettings, Settings, YoutubeSettings,
    ENV_API_KEY, ENV_COMMENTS_URL, ENV_VIDEOS_URL,
};
