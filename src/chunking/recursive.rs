//! Boundary-seeking text splitter.
//!
//! Each chunk is a window of at most `chunk_size` characters. Inside the
//! window the separator hierarchy is descended (paragraph, line, sentence,
//! word) until one yields a break point; if none does, the window is cut
//! hard. The next chunk then backs up to the first word start within
//! `chunk_overlap` characters of the break.

use super::{Chunk, ChunkingConfig};
use tracing::debug;

/// Recursive separator-based splitter.
#[derive(Debug, Clone, Default)]
pub struct RecursiveSplitter {
    config: ChunkingConfig,
}

impl RecursiveSplitter {
    pub fn new(config: ChunkingConfig) -> Self {
        Self { config }
    }

    /// Split `text` into ordered, contiguous chunks.
    pub fn split(&self, text: &str) -> Vec<Chunk> {
        let chars: Vec<char> = text.chars().collect();
        let len = chars.len();
        let size = self.config.chunk_size.max(1);
        let overlap = self.config.chunk_overlap.min(size - 1);

        let mut chunks = Vec::new();
        let mut start = 0;

        while start < len {
            let end = if len - start <= size {
                len
            } else {
                self.find_break(&chars, start, start + size, overlap)
            };

            chunks.push(Chunk {
                content: chars[start..end].iter().collect(),
                order: chunks.len(),
                start,
                end,
            });

            if end == len {
                break;
            }
            start = overlap_start(&chars, end, overlap);
        }

        debug!("Split {} characters into {} chunks", len, chunks.len());
        chunks
    }

    /// Pick the end of the chunk starting at `start`, no later than `limit`.
    ///
    /// The chunk must be longer than `overlap` so the following chunk starts
    /// strictly after `start`.
    fn find_break(&self, chars: &[char], start: usize, limit: usize, overlap: usize) -> usize {
        let min_end = start + overlap + 1;

        for separator in &self.config.separators {
            let sep: Vec<char> = separator.chars().collect();
            if sep.is_empty() {
                break;
            }
            if let Some(end) = last_break(chars, &sep, min_end, limit) {
                return end;
            }
        }

        limit
    }
}

/// Position just after the last occurrence of `sep` ending within `[min_end, limit]`.
fn last_break(chars: &[char], sep: &[char], min_end: usize, limit: usize) -> Option<usize> {
    let n = sep.len();
    if limit < n || limit < min_end {
        return None;
    }

    let lowest = min_end.saturating_sub(n);
    (lowest..=limit - n)
        .rev()
        .find(|&pos| chars[pos..pos + n] == *sep)
        .map(|pos| pos + n)
}

/// Start of the next chunk: the earliest word start in `[end - overlap, end)`,
/// or `end` itself when that range holds none.
fn overlap_start(chars: &[char], end: usize, overlap: usize) -> usize {
    (end - overlap..end)
        .find(|&pos| pos > 0 && chars[pos - 1].is_whitespace() && !chars[pos].is_whitespace())
        .unwrap_or(end)
}
