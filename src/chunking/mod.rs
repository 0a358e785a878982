//! Splitting of the joined comment text into bounded, overlapping chunks.

mod recursive;

pub use recursive::RecursiveSplitter;

/// A contiguous slice of the joined comment text.
#[derive(Debug, Clone, PartialEq)]
pub struct Chunk {
    /// Exact text of `[start, end)`, including any trailing separator.
    pub content: String,
    /// Position of this chunk in the sequence.
    pub order: usize,
    /// Start offset in characters (inclusive).
    pub start: usize,
    /// End offset in characters (exclusive).
    pub end: usize,
}

impl Chunk {
    /// Length in characters.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Content without surrounding whitespace, as sent for embedding.
    pub fn text(&self) -> &str {
        self.content.trim()
    }
}

/// Configuration for chunking.
#[derive(Debug, Clone)]
pub struct ChunkingConfig {
    /// Maximum chunk length in characters.
    pub chunk_size: usize,
    /// Maximum overlap with the previous chunk, in characters.
    pub chunk_overlap: usize,
    /// Break points, coarsest first. An empty separator means a hard cut.
    pub separators: Vec<String>,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: 1000,
            chunk_overlap: 20,
            separators: ["\n\n", "\n", ". ", " ", ""]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

impl From<&crate::config::ChunkingSettings> for ChunkingConfig {
    fn from(settings: &crate::config::ChunkingSettings) -> Self {
        Self {
            chunk_size: settings.chunk_size,
            chunk_overlap: settings.chunk_overlap,
            ..Self::default()
        }
    }
}
