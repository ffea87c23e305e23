//! Plain-text rendering for the terminal.
//!
//! Items are rendered one at a time, as the pipeline yields them, so a long
//! run shows progress instead of a single block at the end.

use crate::models::{FeedItem, FeedQuery, PerItemResult, SentimentScore};
use crate::sentiment::AggregateSentiment;
use std::fmt::Write;

/// Render one result as a numbered block.
pub fn render_item(result: &PerItemResult) -> String {
    let mut out = String::new();
    let item = &result.item;

    writeln!(out, "[{}] {}", result.index + 1, item.title).unwrap();
    match published_label(item) {
        Some(published) => writeln!(out, "    {} | {}", item.source_name, published).unwrap(),
        None => writeln!(out, "    {}", item.source_name).unwrap(),
    }

    match (&result.content, &result.score) {
        (Some(content), Some(score)) => {
            if let Some(image) = &content.lead_image_url {
                writeln!(out, "    Image: {}", image).unwrap();
            }
            if !content.summary.is_empty() {
                writeln!(out, "    {}", content.summary).unwrap();
            }
            if !content.keywords.is_empty() {
                writeln!(out, "    Keywords: {}", content.keywords.join(", ")).unwrap();
            }
            writeln!(out, "    {}", sentiment_line(score)).unwrap();
        }
        _ => {
            let reason = result
                .error
                .as_ref()
                .map(|e| e.to_string())
                .unwrap_or_else(|| "no content".to_string());
            writeln!(out, "    Article unavailable: {}", reason).unwrap();
        }
    }

    writeln!(out, "    Read more at {}: {}", item.source_name, item.link).unwrap();
    out
}

/// Render the batch-level summary.
pub fn render_aggregate(aggregate: &AggregateSentiment) -> String {
    let mut out = String::new();
    writeln!(out, "Overall news analysis ({} articles scored)", aggregate.count).unwrap();

    if aggregate.is_empty() {
        writeln!(out, "    No article could be scored.").unwrap();
        return out;
    }

    writeln!(out, "    Summed positive: {:.2}", aggregate.sum_positive).unwrap();
    writeln!(out, "    Summed neutral:  {:.2}", aggregate.sum_neutral).unwrap();
    writeln!(out, "    Summed negative: {:.2}", aggregate.sum_negative).unwrap();
    writeln!(out, "    Summed compound: {:.4}", aggregate.sum_compound).unwrap();
    if let Some(mean) = aggregate.mean_compound() {
        writeln!(out, "    Mean compound:   {:.4}", mean).unwrap();
    }
    writeln!(
        out,
        "    Overall sentiment is {} (based on the summed compound score)",
        aggregate.overall()
    )
    .unwrap();
    out
}

/// The line shown when a run produced no items at all.
pub fn render_no_news(query: &FeedQuery) -> String {
    match query.topic() {
        Some(topic) => format!("Sorry, we couldn't find any news for {}", topic),
        None => "Sorry, we couldn't find any news".to_string(),
    }
}

fn sentiment_line(score: &SentimentScore) -> String {
    format!(
        "Sentiment: {:.2}% Positive | {:.2}% Neutral | {:.2}% Negative | {} (compound {:.4})",
        score.positive * 100.0,
        score.neutral * 100.0,
        score.negative * 100.0,
        score.label(),
        score.compound
    )
}

fn published_label(item: &FeedItem) -> Option<String> {
    match item.published_at_parsed() {
        Some(dt) => Some(dt.format("%Y-%m-%d %H:%M %:z").to_string()),
        None if item.published_at.trim().is_empty() => None,
        None => Some(item.published_at.trim().to_string()),
    }
}
