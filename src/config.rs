//! Runtime settings for the pipeline and its HTTP client.

use crate::feed::DEFAULT_FEED_BASE_URL;
use reqwest::Client;
use std::time::Duration;

/// A desktop browser user agent; many publishers refuse unknown clients.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Maximum number of items resolved at the same time. `1` is strictly sequential.
    pub concurrency: usize,
    /// Deadline for resolving one item, download and extraction included.
    pub item_timeout: Duration,
    /// Timeout of a single HTTP request.
    pub request_timeout: Duration,
    pub user_agent: String,
    pub feed_base_url: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            concurrency: 8,
            item_timeout: Duration::from_secs(20),
            request_timeout: Duration::from_secs(15),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            feed_base_url: DEFAULT_FEED_BASE_URL.to_string(),
        }
    }
}

impl PipelineConfig {
    /// Build the HTTP client shared by the feed source and the resolver.
    pub fn http_client(&self) -> reqwest::Result<Client> {
        Client::builder()
            .user_agent(&self.user_agent)
            .timeout(self.request_timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
    }
}
