//! News feed retrieval and parsing.
//!
//! The feed stage runs once per query, in two steps:
//!
//! 1. **Fetching** ([`source`]): build the endpoint for the query mode and
//!    download the raw RSS document
//! 2. **Parsing** ([`parser`]): turn the document into ordered [`FeedItem`]s,
//!    skipping entries that cannot be used
//!
//! [`FeedItem`]: crate::models::FeedItem

pub mod parser;
pub mod source;

pub use parser::parse_items;
pub use source::{DEFAULT_FEED_BASE_URL, FeedSource, HttpFeedSource};
