//! Article resolution: download, extraction and summarization.
//!
//! Resolving a feed item happens in three steps:
//!
//! 1. **Download** ([`resolver`]): fetch the page behind the item's link
//! 2. **Extraction** ([`extract`]): pick out the main body, page title and
//!    lead image with `scraper`
//! 3. **Condensation** ([`summary`]): build an extractive summary and a
//!    keyword list from the body
//!
//! Any failure is reported as a [`ResolveError`](crate::error::ResolveError)
//! for that one item only.

pub mod extract;
pub mod resolver;
pub mod summary;

pub use resolver::{HttpResolver, ItemResolver};
