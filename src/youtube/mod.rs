//! YouTube comment and metadata retrieval.
//!
//! [`CommentSource`] abstracts the two API calls the pipeline needs;
//! [`fetch_all_comments`] drives the paging protocol on top of it.

mod client;
pub mod models;

pub use client::YoutubeClient;

use crate::error::Result;
use async_trait::async_trait;
use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, info, instrument, warn};

/// One page of top-level comments.
#[derive(Debug, Clone, Default)]
pub struct CommentPage {
    /// Comment display texts, in API order.
    pub comments: Vec<String>,
    /// Continuation token. `None` marks the last page.
    pub next_page_token: Option<String>,
}

/// Everything fetched for one video.
#[derive(Debug, Clone)]
pub struct FetchedComments {
    /// Video title.
    pub title: String,
    /// Raw comment texts, page order then within-page order.
    pub comments: Vec<String>,
    /// Number of comment pages requested.
    pub pages: u32,
}

/// Trait for comment providers.
#[async_trait]
pub trait CommentSource: Send + Sync {
    /// Fetch the display title of a video.
    async fn fetch_title(&self, video_id: &str) -> Result<String>;

    /// Fetch one page of top-level comments.
    async fn fetch_page(&self, video_id: &str, page_token: Option<&str>) -> Result<CommentPage>;
}

/// Fetch the title and then every comment page of a video, in order.
///
/// Pages are requested one after another since each request needs the
/// previous page's token. The first error aborts the whole fetch.
#[instrument(skip(source))]
pub async fn fetch_all_comments(
    source: &dyn CommentSource,
    video_id: &str,
    max_pages: Option<u32>,
) -> Result<FetchedComments> {
    let title = source.fetch_title(video_id).await?;
    info!("Fetching comments for \"{}\"", title);

    let mut comments = Vec::new();
    let mut page_token: Option<String> = None;
    let mut pages = 0u32;

    loop {
        if max_pages.is_some_and(|max| pages >= max) {
            warn!("Stopped after {} pages; more comments are available", pages);
            break;
        }

        let page = source.fetch_page(video_id, page_token.as_deref()).await?;
        pages += 1;
        debug!("Page {}: {} comments", pages, page.comments.len());
        comments.extend(page.comments);

        match page.next_page_token {
            Some(token) if !token.is_empty() => page_token = Some(token),
            _ => break,
        }
    }

    info!("Fetched {} comments across {} pages", comments.len(), pages);

    Ok(FetchedComments {
        title,
        comments,
        pages,
    })
}

static VIDEO_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?x)
        (?:
            # Full YouTube URLs
            (?:https?://)?
            (?:www\.|m\.)?
            (?:youtube\.com/watch\?(?:.*&)?v=|youtu\.be/|youtube\.com/embed/|youtube\.com/shorts/|youtube\.com/live/)
            ([a-zA-Z0-9_-]{11})
        )
        |
        # Bare video ID (11 characters)
        ^([a-zA-Z0-9_-]{11})$
    ",
    )
    .expect("valid video id regex")
});

/// Extract a video ID from a YouTube URL or a bare ID.
pub fn extract_video_id(input: &str) -> Option<String> {
    let caps = VIDEO_ID_RE.captures(input.trim())?;

    caps.get(1)
        .or_else(|| caps.get(2))
        .map(|m| m.as_str().to_string())
}
