//! Feed endpoint construction and retrieval.
//!
//! Endpoints come from a closed set of builders keyed by [`FeedMode`]:
//!
//! | Mode | Endpoint |
//! |------|----------|
//! | Top | `{base}` |
//! | Category | `{base}/headlines/section/topic/{TOPIC}` |
//! | Search | `{base}/search?q={TOPIC}` |
//!
//! Topics are upper-cased and percent-encoded before insertion.

use crate::error::FetchError;
use crate::models::{FeedMode, FeedQuery};
use reqwest::Client;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};
use url::Url;

/// Google News RSS, the default feed.
pub const DEFAULT_FEED_BASE_URL: &str = "https://news.google.com/rss";

/// Something that can return the raw feed document for a query.
pub trait FeedSource {
    /// Fetch the feed document. A single attempt; callers decide what a
    /// failure means for the batch.
    async fn fetch(&self, query: &FeedQuery) -> Result<String, FetchError>;
}

/// Build the endpoint URL for `mode` under `base_url`.
pub fn endpoint(base_url: &str, mode: &FeedMode) -> Result<Url, FetchError> {
    let base = base_url.trim_end_matches('/');
    let raw = match mode {
        FeedMode::Top => base.to_string(),
        FeedMode::Category(topic) => format!(
            "{base}/headlines/section/topic/{}",
            urlencoding::encode(&topic.to_uppercase())
        ),
        FeedMode::Search(topic) => {
            format!("{base}/search?q={}", urlencoding::encode(&topic.to_uppercase()))
        }
    };
    Ok(Url::parse(&raw)?)
}

/// [`FeedSource`] backed by an HTTP feed such as Google News RSS.
#[derive(Debug, Clone)]
pub struct HttpFeedSource {
    client: Client,
    base_url: String,
}

impl HttpFeedSource {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

impl FeedSource for HttpFeedSource {
    #[instrument(level = "info", skip_all, fields(query = %query))]
    async fn fetch(&self, query: &FeedQuery) -> Result<String, FetchError> {
        let url = endpoint(&self.base_url, query.mode())?;
        let t0 = Instant::now();
        debug!(%url, "Requesting feed");

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!(%url, status = status.as_u16(), "Feed endpoint returned an error status");
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        info!(
            %url,
            bytes = body.len(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Fetched feed document"
        );
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_endpoint() {
        let url = endpoint(DEFAULT_FEED_BASE_URL, &FeedMode::Top).unwrap();
        assert_eq!(url.as_str(), "https://news.google.com/rss");
    }

    #[test]
    fn test_category_endpoint_uppercases_topic() {
        let url = endpoint(
            DEFAULT_FEED_BASE_URL,
            &FeedMode::Category("Technology".to_string()),
        )
        .unwrap();
        assert_eq!(
            url.as_str(),
            "https://news.google.com/rss/headlines/section/topic/TECHNOLOGY"
        );
    }

    #[test]
    fn test_search_endpoint_encodes_topic() {
        let url = endpoint(
            DEFAULT_FEED_BASE_URL,
            &FeedMode::Search("economy&jobs".to_string()),
        )
        .unwrap();
        assert_eq!(
            url.as_str(),
            "https://news.google.com/rss/search?q=ECONOMY%26JOBS"
        );
        assert_eq!(
            url.query_pairs().next().map(|(k, v)| (k.into_owned(), v.into_owned())),
            Some(("q".to_string(), "ECONOMY&JOBS".to_string()))
        );
    }

    #[test]
    fn test_custom_base_url_trailing_slash() {
        let url = endpoint("http://127.0.0.1:8080/rss/", &FeedMode::Search("rust".to_string()))
            .unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8080/rss/search?q=RUST");
    }

    #[test]
    fn test_invalid_base_url() {
        let err = endpoint("not a url", &FeedMode::Top).unwrap_err();
        assert!(matches!(err, FetchError::InvalidEndpoint(_)));
    }

    #[tokio::test]
    async fn test_unreachable_feed_is_an_error() {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(2))
            .build()
            .unwrap();
        // port 9 (discard) on localhost refuses connections on test machines
        let source = HttpFeedSource::new(client, "http://127.0.0.1:9/rss");
        let query = FeedQuery::top(10).unwrap();
        assert!(source.fetch(&query).await.is_err());
    }
}
