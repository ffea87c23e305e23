//! Command-line interface definitions for News Sentiment.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Every option can also be provided through an environment variable.

use crate::config::{DEFAULT_USER_AGENT, PipelineConfig};
use crate::error::QueryError;
use crate::feed::DEFAULT_FEED_BASE_URL;
use crate::models::FeedQuery;
use clap::{Parser, Subcommand, ValueEnum};
use std::time::Duration;

/// Smallest number of items a run asks for.
pub const MIN_LIMIT: usize = 10;
/// Largest number of items a run asks for.
pub const MAX_LIMIT: usize = 1000;
/// Limit granularity for top stories and categories.
pub const LIMIT_STEP: usize = 10;
/// Limit granularity for searches.
pub const SEARCH_LIMIT_STEP: usize = 100;

/// Command-line arguments for the News Sentiment application.
///
/// # Examples
///
/// ```sh
/// # Top stories, default limit
/// news_sentiment top
///
/// # Thirty technology headlines, with a JSON report
/// news_sentiment -n 30 -j ./json category technology
///
/// # Search, resolving four articles at a time
/// news_sentiment --concurrency 4 search interest rates
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub mode: Mode,

    /// Number of news items to analyze (10 to 1000, rounded up to the step)
    #[arg(short = 'n', long, env = "NEWS_SENTIMENT_LIMIT", default_value_t = MIN_LIMIT, global = true)]
    pub limit: usize,

    /// Maximum number of articles resolved at the same time
    #[arg(long, env = "NEWS_SENTIMENT_CONCURRENCY", default_value_t = 8, global = true)]
    pub concurrency: usize,

    /// Deadline in seconds for resolving one article
    #[arg(long, env = "NEWS_SENTIMENT_ITEM_TIMEOUT", default_value_t = 20, global = true)]
    pub item_timeout_secs: u64,

    /// Timeout in seconds for a single HTTP request
    #[arg(long, env = "NEWS_SENTIMENT_REQUEST_TIMEOUT", default_value_t = 15, global = true)]
    pub request_timeout_secs: u64,

    /// User agent sent with every request
    #[arg(long, env = "NEWS_SENTIMENT_USER_AGENT", default_value = DEFAULT_USER_AGENT, global = true)]
    pub user_agent: String,

    /// Base URL of the RSS feed service
    #[arg(long, env = "NEWS_SENTIMENT_FEED_BASE_URL", default_value = DEFAULT_FEED_BASE_URL, global = true)]
    pub feed_base_url: String,

    /// Output directory for the JSON report
    #[arg(short, long, env = "NEWS_SENTIMENT_JSON_DIR", global = true)]
    pub json_output_dir: Option<String>,

    /// Output directory for the Markdown report
    #[arg(short, long, env = "NEWS_SENTIMENT_MARKDOWN_DIR", global = true)]
    pub markdown_output_dir: Option<String>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Analyze the top stories
    Top,
    /// Analyze one news category
    Category {
        #[arg(value_enum, ignore_case = true)]
        topic: Category,
    },
    /// Analyze the results of a search
    Search {
        /// Search term; words are joined and whitespace is dropped
        #[arg(required = true, num_args = 1..)]
        term: Vec<String>,
    },
}

/// News sections offered by the feed service.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    World,
    Nation,
    Business,
    Technology,
    Entertainment,
    Sports,
    Science,
    Health,
}

impl Category {
    /// Section token as the feed service expects it.
    pub fn as_topic(self) -> &'static str {
        match self {
            Category::World => "WORLD",
            Category::Nation => "NATION",
            Category::Business => "BUSINESS",
            Category::Technology => "TECHNOLOGY",
            Category::Entertainment => "ENTERTAINMENT",
            Category::Sports => "SPORTS",
            Category::Science => "SCIENCE",
            Category::Health => "HEALTH",
        }
    }
}

/// Round `requested` up to the next multiple of `step` above [`MIN_LIMIT`]
/// and clamp it to [`MAX_LIMIT`].
pub fn clamp_limit(requested: usize, step: usize) -> usize {
    if requested <= MIN_LIMIT {
        return MIN_LIMIT;
    }
    let stepped = MIN_LIMIT + (requested - MIN_LIMIT).div_ceil(step.max(1)) * step.max(1);
    stepped.min(MAX_LIMIT)
}

impl Cli {
    /// Validate the chosen mode into a [`FeedQuery`].
    pub fn to_query(&self) -> Result<FeedQuery, QueryError> {
        match &self.mode {
            Mode::Top => FeedQuery::top(clamp_limit(self.limit, LIMIT_STEP)),
            Mode::Category { topic } => {
                FeedQuery::category(topic.as_topic(), clamp_limit(self.limit, LIMIT_STEP))
            }
            Mode::Search { term } => {
                FeedQuery::search(&term.join(" "), clamp_limit(self.limit, SEARCH_LIMIT_STEP))
            }
        }
    }

    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            concurrency: self.concurrency,
            item_timeout: Duration::from_secs(self.item_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            user_agent: self.user_agent.clone(),
            feed_base_url: self.feed_base_url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FeedMode;

    #[test]
    fn test_cli_parsing_top() {
        let cli = Cli::parse_from(["news_sentiment", "top"]);
        assert_eq!(cli.mode, Mode::Top);
        let query = cli.to_query().unwrap();
        assert_eq!(query.mode(), &FeedMode::Top);
        assert_eq!(query.limit(), 10);
    }

    #[test]
    fn test_cli_category_is_case_insensitive() {
        let cli = Cli::parse_from(["news_sentiment", "category", "World"]);
        assert_eq!(
            cli.mode,
            Mode::Category {
                topic: Category::World
            }
        );
        let query = cli.to_query().unwrap();
        assert_eq!(query.mode(), &FeedMode::Category("WORLD".to_string()));
    }

    #[test]
    fn test_cli_rejects_unknown_category() {
        assert!(Cli::try_parse_from(["news_sentiment", "category", "gardening"]).is_err());
    }

    #[test]
    fn test_cli_search_joins_words() {
        let cli = Cli::parse_from(["news_sentiment", "-n", "150", "search", "interest", "rates"]);
        let query = cli.to_query().unwrap();
        assert_eq!(query.mode(), &FeedMode::Search("interestrates".to_string()));
        assert_eq!(query.limit(), 210);
    }

    #[test]
    fn test_cli_short_search_term_is_rejected() {
        let cli = Cli::parse_from(["news_sentiment", "search", "a b"]);
        assert!(matches!(
            cli.to_query(),
            Err(QueryError::SearchTermTooShort { min: 3, .. })
        ));
    }

    #[test]
    fn test_cli_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "news_sentiment",
            "top",
            "--concurrency",
            "3",
            "--item-timeout-secs",
            "5",
            "-j",
            "/tmp/json",
            "-m",
            "/tmp/markdown",
        ]);
        assert_eq!(cli.json_output_dir.as_deref(), Some("/tmp/json"));
        assert_eq!(cli.markdown_output_dir.as_deref(), Some("/tmp/markdown"));

        let config = cli.pipeline_config();
        assert_eq!(config.concurrency, 3);
        assert_eq!(config.item_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_clamp_limit() {
        assert_eq!(clamp_limit(0, LIMIT_STEP), 10);
        assert_eq!(clamp_limit(10, LIMIT_STEP), 10);
        assert_eq!(clamp_limit(11, LIMIT_STEP), 20);
        assert_eq!(clamp_limit(30, LIMIT_STEP), 30);
        assert_eq!(clamp_limit(11, SEARCH_LIMIT_STEP), 110);
        assert_eq!(clamp_limit(5000, LIMIT_STEP), 1000);
        assert_eq!(clamp_limit(995, SEARCH_LIMIT_STEP), 1000);
    }
}
