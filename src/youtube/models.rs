//! Wire types for the YouTube Data API v3 responses we read.

use serde::Deserialize;

/// Response of `GET commentThreads`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentThreadListResponse {
    pub items: Vec<CommentThread>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CommentThread {
    pub snippet: CommentThreadSnippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentThreadSnippet {
    pub top_level_comment: Comment,
}

#[derive(Debug, Deserialize)]
pub struct Comment {
    pub snippet: CommentSnippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentSnippet {
    pub text_display: String,
}

/// Response of `GET videos`.
#[derive(Debug, Deserialize)]
pub struct VideoListResponse {
    pub items: Vec<Video>,
}

#[derive(Debug, Deserialize)]
pub struct Video {
    pub snippet: VideoSnippet,
}

#[derive(Debug, Deserialize)]
pub struct VideoSnippet {
    pub title: String,
}

impl CommentThread {
    /// Display text of the thread's top-level comment.
    pub fn into_text(self) -> String {
        self.snippet.top_level_comment.snippet.text_display
    }
}
