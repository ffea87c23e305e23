//! Error taxonomy for the news pipeline.
//!
//! Only [`FetchError`] is a batch-level condition: it is reported once and the
//! run continues with no items. [`ResolveError`] is scoped to a single feed
//! item and is absorbed by the pipeline, which still emits the item with its
//! derived fields missing. [`QueryError`] is raised while validating user
//! input, before anything touches the network.

use std::time::Duration;
use thiserror::Error;

/// Failure to retrieve the feed document for a query.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The endpoint could not be built into a valid URL.
    #[error("invalid feed endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),

    /// Transport failure (DNS, connect, timeout, body decoding).
    #[error("feed request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("feed endpoint {url} returned HTTP {status}")]
    Status { url: String, status: u16 },
}

/// Failure to resolve a single feed item into article content.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("article download failed: {0}")]
    Download(#[from] reqwest::Error),

    #[error("article {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// The page downloaded but no article body could be extracted from it.
    #[error("no article text could be extracted from {url}")]
    EmptyBody { url: String },

    #[error("article resolution exceeded the {0:?} deadline")]
    Timeout(Duration),
}

/// Invalid query input from the front end.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("the number of news items must be greater than zero")]
    ZeroLimit,

    #[error("a category topic is required")]
    EmptyTopic,

    #[error("please provide a topic to search with minimum {min} characters (got {term:?})")]
    SearchTermTooShort { term: String, min: usize },
}
