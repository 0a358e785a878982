//! HTTP client for the YouTube Data API.

use super::models::{CommentThread, CommentThreadListResponse, VideoListResponse};
use super::{CommentPage, CommentSource};
use crate::config::YoutubeSettings;
use crate::error::{ChorusError, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, instrument};

/// YouTube Data API client.
///
/// Holds one `reqwest::Client`, so every request of a fetch shares the same
/// connection pool. Dropping the client releases it.
pub struct YoutubeClient {
    http: reqwest::Client,
    api_key: String,
    comments_url: String,
    videos_url: String,
    page_size: u32,
}

impl YoutubeClient {
    /// Create a client from settings. Fails if no API key is configured.
    pub fn new(settings: &YoutubeSettings) -> Result<Self> {
        let api_key = settings
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| ChorusError::Config("YouTube API key is not configured".to_string()))?;

        let mut builder = reqwest::Client::builder();
        if let Some(secs) = settings.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder.build()?;

        Ok(Self {
            http,
            api_key,
            comments_url: settings.comments_url.clone(),
            videos_url: settings.videos_url.clone(),
            page_size: settings.page_size,
        })
    }

    /// GET `url` with `query` plus the API key and decode the JSON body.
    async fn get_json<T: DeserializeOwned>(&self, url: &str, query: &[(&str, &str)]) -> Result<T> {
        let response = self
            .http
            .get(url)
            .query(query)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ChorusError::HttpStatus {
                status,
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body)
            .map_err(|e| ChorusError::Structure(format!("{} returned unexpected JSON: {}", url, e)))
    }
}

#[async_trait]
impl CommentSource for YoutubeClient {
    #[instrument(skip(self))]
    async fn fetch_title(&self, video_id: &str) -> Result<String> {
        let response: VideoListResponse = self
            .get_json(&self.videos_url, &[("part", "snippet"), ("id", video_id)])
            .await?;

        response
            .items
            .into_iter()
            .next()
            .map(|video| video.snippet.title)
            .ok_or_else(|| ChorusError::VideoNotFound(video_id.to_string()))
    }

    #[instrument(skip(self))]
    async fn fetch_page(&self, video_id: &str, page_token: Option<&str>) -> Result<CommentPage> {
        let page_size = self.page_size.to_string();
        let mut query = vec![
            ("part", "snippet"),
            ("videoId", video_id),
            ("maxResults", page_size.as_str()),
        ];
        if let Some(token) = page_token {
            query.push(("pageToken", token));
        }

        let response: CommentThreadListResponse = self.get_json(&self.comments_url, &query).await?;
        debug!("Received {} comment threads", response.items.len());

        Ok(CommentPage {
            comments: response.items.into_iter().map(CommentThread::into_text).collect(),
            next_page_token: response.next_page_token,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::youtube::fetch_all_comments;
    use httpmock::prelude::*;
    use serde_json::json;

    fn client(server: &MockServer) -> YoutubeClient {
        let settings = YoutubeSettings {
            api_key: Some("test_key".to_string()),
            comments_url: server.url("/commentThreads"),
            videos_url: server.url("/videos"),
            ..YoutubeSettings::default()
        };
        YoutubeClient::new(&settings).expect("client")
    }

    fn thread(text: &str) -> serde_json::Value {
        json!({ "snippet": { "topLevelComment": { "snippet": { "textDisplay": text } } } })
    }

    #[test]
    fn test_new_requires_api_key() {
        let settings = YoutubeSettings::default();
        assert!(matches!(YoutubeClient::new(&settings), Err(ChorusError::Config(_))));
    }

    #[tokio::test]
    async fn fetch_title_returns_first_item_title() {
        let server = MockServer::start_async().await;

        let videos_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/videos")
                .query_param("part", "snippet")
                .query_param("id", "abc123")
                .query_param("key", "test_key");
            then.status(200).json_body(json!({
                "items": [ { "snippet": { "title": "Rust in 100 Seconds" } } ]
            }));
        });

        let title = client(&server).fetch_title("abc123").await.unwrap();

        assert_eq!(title, "Rust in 100 Seconds");
        videos_mock.assert_calls(1);
    }

    #[tokio::test]
    async fn fetch_title_without_items_is_not_found() {
        let server = MockServer::start_async().await;

        server.mock(|when, then| {
            when.method(GET).path("/videos");
            then.status(200).json_body(json!({ "items": [] }));
        });

        let err = client(&server).fetch_title("gone").await.unwrap_err();
        assert!(matches!(err, ChorusError::VideoNotFound(id) if id == "gone"));
    }

    #[tokio::test]
    async fn fetch_page_sends_paging_parameters() {
        let server = MockServer::start_async().await;

        let page_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/commentThreads")
                .query_param("part", "snippet")
                .query_param("videoId", "abc123")
                .query_param("maxResults", "100")
                .query_param("pageToken", "t1")
                .query_param("key", "test_key");
            then.status(200).json_body(json!({
                "items": [thread("one"), thread("two")],
                "nextPageToken": "t2"
            }));
        });

        let page = client(&server).fetch_page("abc123", Some("t1")).await.unwrap();

        assert_eq!(page.comments, vec!["one", "two"]);
        assert_eq!(page.next_page_token.as_deref(), Some("t2"));
        page_mock.assert_calls(1);
    }

    #[tokio::test]
    async fn fetch_page_missing_comment_text_is_structural_error() {
        let server = MockServer::start_async().await;

        server.mock(|when, then| {
            when.method(GET).path("/commentThreads");
            then.status(200).json_body(json!({
                "items": [ { "snippet": { "topLevelComment": { "snippet": {} } } } ]
            }));
        });

        let err = client(&server).fetch_page("abc123", None).await.unwrap_err();
        assert!(matches!(err, ChorusError::Structure(_)));
    }

    #[tokio::test]
    async fn fetch_page_returns_error_on_non_success_status() {
        let server = MockServer::start_async().await;

        server.mock(|when, then| {
            when.method(GET).path("/commentThreads");
            then.status(500).body("backend error");
        });

        let err = client(&server).fetch_page("abc123", None).await.unwrap_err();
        match err {
            ChorusError::HttpStatus { status, url } => {
                assert_eq!(status.as_u16(), 500);
                assert!(url.ends_with("/commentThreads"));
                assert!(!url.contains("test_key"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn title_failure_aborts_before_paging() {
        let server = MockServer::start_async().await;

        server.mock(|when, then| {
            when.method(GET).path("/videos");
            then.status(403).json_body(json!({ "error": { "code": 403 } }));
        });
        let comments_mock = server.mock(|when, then| {
            when.method(GET).path("/commentThreads");
            then.status(200).json_body(json!({ "items": [thread("never")] }));
        });

        let err = fetch_all_comments(&client(&server), "abc123", None)
            .await
            .unwrap_err();

        assert!(matches!(err, ChorusError::HttpStatus { .. }));
        comments_mock.assert_calls(0);
    }

    #[tokio::test]
    async fn single_page_video_is_fetched_end_to_end() {
        let server = MockServer::start_async().await;

        server.mock(|when, then| {
            when.method(GET).path("/videos").query_param("id", "abc123");
            then.status(200)
                .json_body(json!({ "items": [ { "snippet": { "title": "Demo" } } ] }));
        });
        let comments_mock = server.mock(|when, then| {
            when.method(GET).path("/commentThreads").query_param("videoId", "abc123");
            then.status(200).json_body(json!({
                "items": [thread("a"), thread("b"), thread("c")]
            }));
        });

        let fetched = fetch_all_comments(&client(&server), "abc123", None).await.unwrap();

        assert_eq!(fetched.title, "Demo");
        assert_eq!(fetched.comments, vec!["a", "b", "c"]);
        assert_eq!(fetched.pages, 1);
        comments_mock.assert_calls(1);
    }
}
