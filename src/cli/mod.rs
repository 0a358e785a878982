//! CLI module for Chorus.

mod output;
pub mod preflight;
pub mod session;

pub use output::Output;

use crate::config::Settings;
use crate::error::Result;
use clap::Parser;
use std::path::PathBuf;

/// Chorus - ask questions about a YouTube video's comment section
///
/// Fetches every top-level comment of the video, indexes them in memory and
/// answers questions about them until you type 'exit'.
#[derive(Parser, Debug)]
#[command(name = "chorus")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// YouTube video ID or URL
    pub video: String,

    /// Increase verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// LLM model to use for answers
    #[arg(short, long)]
    pub model: Option<String>,

    /// Number of comment chunks retrieved per question
    #[arg(short = 'k', long)]
    pub top_k: Option<usize>,

    /// Stop fetching after this many comment pages
    #[arg(long)]
    pub max_pages: Option<u32>,
}

impl Cli {
    /// Log filter for the `-v` count.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }

    /// Build validated settings: config file, then environment, then flags.
    pub fn load_settings<F>(&self, lookup: F) -> Result<Settings>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Settings::load_from(self.config.as_deref())?;
        settings.apply_env(lookup);
        self.apply_overrides(&mut settings);
        settings.validate()?;
        Ok(settings)
    }

    /// Apply command-line overrides on top of loaded settings.
    pub fn apply_overrides(&self, settings: &mut Settings) {
        if let Some(model) = &self.model {
            settings.rag.model = model.clone();
        }
        if let Some(top_k) = self.top_k {
            settings.rag.top_k = top_k;
        }
        if let Some(max_pages) = self.max_pages {
            settings.youtube.max_pages = Some(max_pages);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ChorusError;

    #[test]
    fn test_parse_minimal() {
        let cli = Cli::try_parse_from(["chorus", "1Rc37QkkbGg"]).unwrap();
        assert_eq!(cli.video, "1Rc37QkkbGg");
        assert_eq!(cli.log_level(), "warn");
        assert!(cli.model.is_none());
    }

    #[test]
    fn test_video_is_required() {
        assert!(Cli::try_parse_from(["chorus"]).is_err());
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::try_parse_from([
            "chorus", "-vv", "--model", "gpt-4o", "-k", "6", "--max-pages", "3", "abc",
        ])
        .unwrap();
        assert_eq!(cli.log_level(), "debug");

        let mut settings = Settings::default();
        cli.apply_overrides(&mut settings);
        assert_eq!(settings.rag.model, "gpt-4o");
        assert_eq!(settings.rag.top_k, 6);
        assert_eq!(settings.youtube.max_pages, Some(3));
    }

    #[test]
    fn test_load_settings_layers_file_env_and_flags() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[rag]\nmodel = \"from-file\"\ntop_k = 2\n").unwrap();
        let path = path.to_string_lossy().to_string();

        let cli = Cli::try_parse_from(["chorus", "-c", &path, "-k", "9", "abc"]).unwrap();
        let settings = cli
            .load_settings(|key| (key == "YOUTUBE_API_KEY").then(|| "yt-key".to_string()))
            .unwrap();

        assert_eq!(settings.rag.model, "from-file");
        assert_eq!(settings.rag.top_k, 9);
        assert_eq!(settings.api_key().unwrap(), "yt-key");
    }

    #[test]
    fn test_load_settings_rejects_invalid_flags() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml").to_string_lossy().to_string();

        let cli = Cli::try_parse_from(["chorus", "-c", &path, "-k", "0", "abc"]).unwrap();
        let err = cli
            .load_settings(|key| (key == "YOUTUBE_API_KEY").then(|| "yt-key".to_string()))
            .unwrap_err();

        assert!(matches!(err, ChorusError::Config(_)));
        assert!(err.to_string().contains("rag.top_k"));
    }
}
