//! Configuration settings for Chorus.

use crate::error::{ChorusError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable holding the YouTube Data API key.
pub const ENV_API_KEY: &str = "YOUTUBE_API_KEY";
/// Environment variable overriding the comment threads endpoint.
pub const ENV_COMMENTS_URL: &str = "YOUTUBE_COMMENTS_URL";
/// Environment variable overriding the videos endpoint.
pub const ENV_VIDEOS_URL: &str = "YOUTUBE_VIDEOS_URL";

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Settings {
    pub youtube: YoutubeSettings,
    pub chunking: ChunkingSettings,
    pub embedding: EmbeddingSettings,
    pub rag: RagSettings,
    pub prompts: PromptSettings,
}

/// YouTube Data API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct YoutubeSettings {
    /// YouTube Data API key.
    pub api_key: Option<String>,
    /// Comment threads endpoint.
    pub comments_url: String,
    /// Videos endpoint.
    pub videos_url: String,
    /// Comments requested per page (the API caps this at 100).
    pub page_size: u32,
    /// Stop after this many pages. Unbounded when unset.
    pub max_pages: Option<u32>,
    /// Per-request timeout in seconds. No timeout when unset.
    pub timeout_secs: Option<u64>,
}

impl Default for YoutubeSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            comments_url: "https://www.googleapis.com/youtube/v3/commentThreads".to_string(),
            videos_url: "https://www.googleapis.com/youtube/v3/videos".to_string(),
            page_size: 100,
            max_pages: None,
            timeout_secs: None,
        }
    }
}

/// Text chunking settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkingSettings {
    /// Maximum chunk length in characters.
    pub chunk_size: usize,
    /// Maximum overlap between consecutive chunks, in characters.
    pub chunk_overlap: usize,
}

impl Default for ChunkingSettings {
    fn default() -> Self {
        Self {
            chunk_size: 1000,
            chunk_overlap: 20,
        }
    }
}

/// Embedding generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingSettings {
    /// Embedding model to use.
    pub model: String,
    /// Embedding dimensions.
    pub dimensions: u32,
}

impl Default for EmbeddingSettings {
    fn default() -> Self {
        Self {
            model: "text-embedding-3-small".to_string(),
            dimensions: 1536,
        }
    }
}

/// Answer generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RagSettings {
    /// LLM model for response generation.
    pub model: String,
    /// Number of chunks retrieved per question.
    pub top_k: usize,
    /// Sampling temperature.
    pub temperature: f32,
}

impl Default for RagSettings {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            top_k: 4,
            temperature: 0.7,
        }
    }
}

/// Prompt customization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct PromptSettings {
    /// Directory for custom prompts (overrides defaults).
    pub custom_dir: Option<String>,
    /// Custom variables available in all prompts as {{variable_name}}.
    pub variables: std::collections::HashMap<String, String>,
}

impl Settings {
    /// Load settings from a specific path, or default location if None.
    ///
    /// A missing file yields the defaults.
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) => Self::expand_path(&p.to_string_lossy()),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Overlay values from the environment. Empty values are ignored.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = get(ENV_API_KEY) {
            self.youtube.api_key = Some(key);
        }
        if let Some(url) = get(ENV_COMMENTS_URL) {
            self.youtube.comments_url = url;
        }
        if let Some(url) = get(ENV_VIDEOS_URL) {
            self.youtube.videos_url = url;
        }
    }

    /// Check that everything needed for a run is present and well-formed.
    pub fn validate(&self) -> Result<()> {
        self.api_key()?;

        for (name, value) in [
            ("youtube.comments_url", &self.youtube.comments_url),
            ("youtube.videos_url", &self.youtube.videos_url),
        ] {
            url::Url::parse(value)
                .map_err(|e| ChorusError::Config(format!("{} is not a valid URL: {}", name, e)))?;
        }

        if self.youtube.page_size == 0 || self.youtube.page_size > 100 {
            return Err(ChorusError::Config(format!(
                "youtube.page_size must be between 1 and 100, got {}",
                self.youtube.page_size
            )));
        }

        if self.chunking.chunk_size == 0 {
            return Err(ChorusError::Config("chunking.chunk_size must be positive".to_string()));
        }
        if self.chunking.chunk_overlap >= self.chunking.chunk_size {
            return Err(ChorusError::Config(format!(
                "chunking.chunk_overlap ({}) must be smaller than chunking.chunk_size ({})",
                self.chunking.chunk_overlap, self.chunking.chunk_size
            )));
        }

        if self.rag.top_k == 0 {
            return Err(ChorusError::Config("rag.top_k must be positive".to_string()));
        }

        Ok(())
    }

    /// The YouTube API key, or a configuration error if it is missing.
    pub fn api_key(&self) -> Result<&str> {
        match self.youtube.api_key.as_deref() {
            Some(key) if !key.trim().is_empty() => Ok(key),
            _ => Err(ChorusError::Config(format!(
                "{} not set. Set it with: export {}='...'",
                ENV_API_KEY, ENV_API_KEY
            ))),
        }
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("chorus")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }
}
