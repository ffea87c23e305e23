//! Output generation for terminal, JSON, and Markdown.
//!
//! # Submodules
//!
//! - [`terminal`]: Renders each result as it arrives, then the aggregate
//! - [`json`]: Writes a [`BatchReport`] to JSON files
//! - [`markdown`]: Converts a [`BatchReport`] to Markdown
//!
//! # Output Structure
//!
//! ```text
//! json_output_dir/
//! └── 2025-05-06/
//!     ├── top_081502.json
//!     └── search-economy_093011.json
//!
//! markdown_output_dir/
//! ├── 2025-05-06_top_081502.md
//! └── 2025-05-06_search-economy_093011.md
//! ```

pub mod json;
pub mod markdown;
pub mod terminal;

use crate::error::FetchError;
use crate::models::{FeedMode, FeedQuery, PerItemResult, SentimentLabel};
use crate::sentiment::AggregateSentiment;
use crate::utils::slugify_title;
use chrono::{Local, SecondsFormat, Utc};
use serde::Serialize;

/// Everything one run produced, in a shape suitable for serialization.
#[derive(Debug, Serialize)]
pub struct BatchReport {
    pub query: String,
    #[serde(flatten)]
    pub mode: FeedMode,
    pub limit: usize,
    pub generated_at: String,
    pub local_date: String,
    pub local_time: String,
    pub results: Vec<PerItemResult>,
    pub aggregate: AggregateSentiment,
    pub overall: SentimentLabel,
    pub fetch_warning: Option<String>,
}

impl BatchReport {
    pub fn new(
        query: &FeedQuery,
        results: Vec<PerItemResult>,
        aggregate: AggregateSentiment,
        fetch_warning: Option<&FetchError>,
    ) -> Self {
        let now = Local::now();
        Self {
            query: query.to_string(),
            mode: query.mode().clone(),
            limit: query.limit(),
            generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            local_date: now.date_naive().to_string(),
            local_time: now.format("%H:%M:%S").to_string(),
            results,
            overall: aggregate.overall(),
            aggregate,
            fetch_warning: fetch_warning.map(|e| e.to_string()),
        }
    }

    /// Short name of the query, usable in file names.
    pub fn slug(&self) -> String {
        match &self.mode {
            FeedMode::Top => "top".to_string(),
            FeedMode::Category(t) => format!("category-{}", slugify_title(t)),
            FeedMode::Search(t) => format!("search-{}", slugify_title(t)),
        }
    }

    /// File name stem shared by the JSON and Markdown writers.
    pub fn file_stem(&self) -> String {
        format!("{}_{}", self.slug(), self.local_time.replace(':', ""))
    }

    pub fn resolved_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_resolved()).count()
    }
}
