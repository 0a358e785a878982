//! Chorus - Question answering over YouTube comment sections
//!
//! A CLI tool that pulls every top-level comment of a YouTube video,
//! indexes it in memory and answers questions about what viewers said.
//!
//! # Overview
//!
//! Chorus allows you to:
//! - Fetch all comments of a video through the YouTube Data API
//! - Clean comment markup into plain prose
//! - Build an in-memory vector index of the comment text
//! - Ask questions and get streamed, AI-generated answers
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - `config` - Configuration management
//! - `youtube` - Comment and title retrieval
//! - `text` - Comment cleanup
//! - `chunking` - Overlapping text chunks
//! - `embedding` - Embedding generation
//! - `vector_store` - In-memory similarity search
//! - `rag` - Retrieval and streamed answers
//! - `orchestrator` - Pipeline coordination
//!
//! # Example
//!
//! ```rust,no_run
//! use chorus::config::Settings;
//! use chorus::orchestrator::Orchestrator;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let mut settings = Settings::load_from(None)?;
//!     settings.apply_env(|key| std::env::var(key).ok());
//!     settings.validate()?;
//!
//!     let orchestrator = Orchestrator::new(settings);
//!     let indexed = orchestrator.process_video("1Rc37QkkbGg").await?;
//!     println!("Indexed {} chunks of '{}'", indexed.chunk_count, indexed.title);
//!
//!     Ok(())
//! }
//! ```

pub mod chunking;
pub mod cli;
pub mod config;
pub mod embedding;
pub mod error;
pub mod openai;
pub mod orchestrator;
pub mod rag;
pub mod text;
pub mod vector_store;
pub mod youtube;

pub use error::{ChorusError, Result};
