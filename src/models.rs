//! Data models for feed queries, feed items, and their resolved representations.
//!
//! This module defines the core data structures that flow through the pipeline:
//! - [`FeedQuery`]: What to ask the feed for, and how many items to keep
//! - [`FeedItem`]: One entry of the feed document, before resolution
//! - [`ArticleContent`]: The downloaded, extracted and summarized article
//! - [`SentimentScore`]: The polarity profile of an article body
//! - [`PerItemResult`]: What the pipeline emits for every feed item
//!
//! Everything here derives `Serialize` so the report writers in
//! [`crate::outputs`] can emit JSON without an intermediate representation.

use crate::error::{QueryError, ResolveError};
use chrono::{DateTime, FixedOffset};
use serde::{Serialize, Serializer};
use std::fmt;

/// Minimum length of a search term once whitespace has been removed.
pub const MIN_SEARCH_TERM_LEN: usize = 3;

/// Which listing of the feed to request.
///
/// This is a closed set: each variant maps to exactly one endpoint builder in
/// [`crate::feed::source`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", content = "topic", rename_all = "snake_case")]
pub enum FeedMode {
    /// Top stories; takes no topic.
    Top,
    /// A named section such as `WORLD` or `TECHNOLOGY`.
    Category(String),
    /// A free-text search term.
    Search(String),
}

/// A validated request for a batch of news items.
///
/// Construct through [`FeedQuery::top`], [`FeedQuery::category`] or
/// [`FeedQuery::search`]; the fields are immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedQuery {
    mode: FeedMode,
    limit: usize,
}

impl FeedQuery {
    /// Query for the top stories.
    pub fn top(limit: usize) -> Result<Self, QueryError> {
        Self::new(FeedMode::Top, limit)
    }

    /// Query for one category listing. Surrounding whitespace is trimmed.
    pub fn category(topic: &str, limit: usize) -> Result<Self, QueryError> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(QueryError::EmptyTopic);
        }
        Self::new(FeedMode::Category(topic.to_string()), limit)
    }

    /// Query for a search term.
    ///
    /// All whitespace is removed from the term, and what remains must be at
    /// least [`MIN_SEARCH_TERM_LEN`] characters long.
    pub fn search(term: &str, limit: usize) -> Result<Self, QueryError> {
        let cleaned: String = term.chars().filter(|c| !c.is_whitespace()).collect();
        if cleaned.chars().count() < MIN_SEARCH_TERM_LEN {
            return Err(QueryError::SearchTermTooShort {
                term: term.to_string(),
                min: MIN_SEARCH_TERM_LEN,
            });
        }
        Self::new(FeedMode::Search(cleaned), limit)
    }

    fn new(mode: FeedMode, limit: usize) -> Result<Self, QueryError> {
        if limit == 0 {
            return Err(QueryError::ZeroLimit);
        }
        Ok(Self { mode, limit })
    }

    pub fn mode(&self) -> &FeedMode {
        &self.mode
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// The topic token for category and search queries.
    pub fn topic(&self) -> Option<&str> {
        match &self.mode {
            FeedMode::Top => None,
            FeedMode::Category(t) | FeedMode::Search(t) => Some(t),
        }
    }
}

impl fmt::Display for FeedQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.mode {
            FeedMode::Top => write!(f, "top stories (limit {})", self.limit),
            FeedMode::Category(t) => write!(f, "category {} (limit {})", t, self.limit),
            FeedMode::Search(t) => write!(f, "search {:?} (limit {})", t, self.limit),
        }
    }
}

/// One entry of the feed document.
///
/// Identity is the `link`. `published_at` is kept exactly as the feed wrote
/// it; use [`FeedItem::published_at_parsed`] for display purposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedItem {
    pub title: String,
    pub link: String,
    pub source_name: String,
    pub published_at: String,
}

impl FeedItem {
    /// Interpret the publication timestamp as RFC 2822, the RSS `pubDate` format.
    pub fn published_at_parsed(&self) -> Option<DateTime<FixedOffset>> {
        DateTime::parse_from_rfc2822(self.published_at.trim()).ok()
    }
}

/// Full article content resolved from a feed item's link.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArticleContent {
    /// The page's own headline, when the page declares one.
    pub title: Option<String>,
    /// The extracted main body, paragraphs separated by blank lines.
    pub full_text: String,
    /// The most prominent image of the page, as an absolute URL.
    pub lead_image_url: Option<String>,
    /// An extractive summary made of sentences drawn from `full_text`.
    pub summary: String,
    /// The most frequent content words of the body.
    pub keywords: Vec<String>,
}

/// Coarse polarity of a compound score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SentimentLabel::Positive => "Positive",
            SentimentLabel::Neutral => "Neutral",
            SentimentLabel::Negative => "Negative",
        };
        f.write_str(s)
    }
}

/// Polarity profile of a piece of text.
///
/// `positive + neutral + negative` is 1.0 up to floating point error, and
/// `compound` lies in `[-1, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SentimentScore {
    pub positive: f64,
    pub neutral: f64,
    pub negative: f64,
    pub compound: f64,
}

impl SentimentScore {
    /// Compound scores within this distance of zero are labelled neutral.
    pub const NEUTRAL_BAND: f64 = 0.05;

    /// The score of text that carries no sentiment at all.
    pub const fn neutral() -> Self {
        Self {
            positive: 0.0,
            neutral: 1.0,
            negative: 0.0,
            compound: 0.0,
        }
    }

    pub fn label(&self) -> SentimentLabel {
        if self.compound >= Self::NEUTRAL_BAND {
            SentimentLabel::Positive
        } else if self.compound <= -Self::NEUTRAL_BAND {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }
}

/// What the pipeline emits for a single feed item.
///
/// `content` and `score` are either both present or both absent. When they
/// are absent, `error` says why.
#[derive(Debug, Serialize)]
pub struct PerItemResult {
    /// Zero-based position of the item in the feed.
    pub index: usize,
    pub item: FeedItem,
    pub content: Option<ArticleContent>,
    pub score: Option<SentimentScore>,
    #[serde(serialize_with = "serialize_error")]
    pub error: Option<ResolveError>,
}

impl PerItemResult {
    pub fn resolved(
        index: usize,
        item: FeedItem,
        content: ArticleContent,
        score: SentimentScore,
    ) -> Self {
        Self {
            index,
            item,
            content: Some(content),
            score: Some(score),
            error: None,
        }
    }

    pub fn unresolved(index: usize, item: FeedItem, error: ResolveError) -> Self {
        Self {
            index,
            item,
            content: None,
            score: None,
            error: Some(error),
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.content.is_some()
    }
}

fn serialize_error<S>(error: &Option<ResolveError>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match error {
        Some(e) => serializer.serialize_some(&e.to_string()),
        None => serializer.serialize_none(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn item() -> FeedItem {
        FeedItem {
            title: "Markets rally".to_string(),
            link: "https://example.com/markets".to_string(),
            source_name: "Example".to_string(),
            published_at: "Tue, 06 May 2025 14:30:00 GMT".to_string(),
        }
    }

    #[test]
    fn test_search_query_strips_whitespace() {
        let q = FeedQuery::search("  world  cup ", 10).unwrap();
        assert_eq!(q.mode(), &FeedMode::Search("worldcup".to_string()));
        assert_eq!(q.topic(), Some("worldcup"));
        assert_eq!(q.limit(), 10);
    }

    #[test]
    fn test_search_query_rejects_short_terms() {
        assert_eq!(
            FeedQuery::search(" a b ", 10),
            Err(QueryError::SearchTermTooShort {
                term: " a b ".to_string(),
                min: MIN_SEARCH_TERM_LEN,
            })
        );
        assert!(FeedQuery::search("", 10).is_err());
    }

    #[test]
    fn test_query_rejects_zero_limit() {
        assert_eq!(FeedQuery::top(0), Err(QueryError::ZeroLimit));
        assert_eq!(FeedQuery::category("World", 0), Err(QueryError::ZeroLimit));
    }

    #[test]
    fn test_category_query_requires_topic() {
        assert_eq!(FeedQuery::category("   ", 10), Err(QueryError::EmptyTopic));
        let q = FeedQuery::category(" Business ", 20).unwrap();
        assert_eq!(q.topic(), Some("Business"));
    }

    #[test]
    fn test_top_query_has_no_topic() {
        let q = FeedQuery::top(30).unwrap();
        assert_eq!(q.topic(), None);
        assert_eq!(q.to_string(), "top stories (limit 30)");
    }

    #[test]
    fn test_published_at_parsed() {
        let parsed = item().published_at_parsed().unwrap();
        assert_eq!(parsed.to_rfc3339(), "2025-05-06T14:30:00+00:00");

        let mut odd = item();
        odd.published_at = "yesterday".to_string();
        assert!(odd.published_at_parsed().is_none());
    }

    #[test]
    fn test_sentiment_label_thresholds() {
        let mut s = SentimentScore::neutral();
        assert_eq!(s.label(), SentimentLabel::Neutral);
        s.compound = 0.2;
        assert_eq!(s.label(), SentimentLabel::Positive);
        s.compound = -0.05;
        assert_eq!(s.label(), SentimentLabel::Negative);
    }

    #[test]
    fn test_unresolved_result_serializes_error_as_text() {
        let result =
            PerItemResult::unresolved(2, item(), ResolveError::Timeout(Duration::from_secs(5)));
        assert!(!result.is_resolved());

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["index"], 2);
        assert!(json["content"].is_null());
        assert!(json["score"].is_null());
        assert!(json["error"].as_str().unwrap().contains("deadline"));
    }

    #[test]
    fn test_feed_mode_serialization() {
        let json = serde_json::to_string(&FeedMode::Category("WORLD".to_string())).unwrap();
        assert_eq!(json, r#"{"mode":"category","topic":"WORLD"}"#);
        let json = serde_json::to_string(&FeedMode::Top).unwrap();
        assert_eq!(json, r#"{"mode":"top"}"#);
    }
}
