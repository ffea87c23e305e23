//! # News Sentiment
//!
//! Fetches a news feed listing (top stories, a category, or a search),
//! resolves every item into its full article, summarizes it, and scores the
//! article body's sentiment. Results print as they become available, followed
//! by an overall analysis of the batch.
//!
//! ## Usage
//!
//! ```sh
//! news_sentiment top
//! news_sentiment -n 30 category technology
//! news_sentiment -j ./json -m ./markdown search economy
//! ```
//!
//! ## Architecture
//!
//! 1. **Fetching**: Download the feed document for the query
//! 2. **Parsing**: Turn it into feed items and keep the first `limit`
//! 3. **Resolving**: Download, extract and summarize each article (bounded concurrency)
//! 4. **Scoring**: Score each article body and fold it into the batch aggregate
//! 5. **Output**: Terminal, plus optional JSON and Markdown reports

use clap::Parser;
use futures::StreamExt;
use std::error::Error;
use tracing::{debug, error, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod article;
mod cli;
mod config;
mod error;
mod feed;
mod models;
mod outputs;
mod pipeline;
mod sentiment;
mod text;
mod utils;

use article::HttpResolver;
use cli::Cli;
use feed::HttpFeedSource;
use outputs::{BatchReport, json, markdown, terminal};
use pipeline::Pipeline;
use utils::ensure_writable_dir;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("news_sentiment starting up");

    let args = Cli::parse();
    debug!(?args.mode, args.limit, ?args.json_output_dir, ?args.markdown_output_dir, "Parsed CLI arguments");

    let query = match args.to_query() {
        Ok(q) => q,
        Err(e) => {
            warn!(error = %e, "Invalid query");
            println!("{}", e);
            return Ok(());
        }
    };

    // Early check: output dirs must be writable before any network work
    for dir in [&args.json_output_dir, &args.markdown_output_dir].into_iter().flatten() {
        if let Err(e) = ensure_writable_dir(dir).await {
            error!(
                path = %dir,
                error = %e,
                "Output directory is not writable (fix perms or choose a different path)"
            );
            return Err(e);
        }
    }

    let config = args.pipeline_config();
    let client = config.http_client()?;
    let source = HttpFeedSource::new(client.clone(), config.feed_base_url.clone());
    let resolver = HttpResolver::new(client);
    let pipeline = Pipeline::new(source, resolver, config);

    let mut run = pipeline.run(&query).await;
    if let Some(e) = run.warning() {
        println!("Error fetching news, {}", e);
    }

    let mut results = Vec::with_capacity(run.planned());
    while let Some(result) = run.next().await {
        println!("{}", terminal::render_item(&result));
        results.push(result);
    }
    let aggregate = run.snapshot();

    if results.is_empty() {
        println!("{}", terminal::render_no_news(&query));
    }
    println!("{}", terminal::render_aggregate(&aggregate));

    let report = BatchReport::new(&query, results, aggregate, run.warning());
    let resolved = report.resolved_count();
    info!(
        total = report.results.len(),
        resolved,
        failed = report.results.len() - resolved,
        overall = %report.overall,
        "Completed run"
    );

    if let Some(dir) = &args.json_output_dir {
        if let Err(e) = json::write_report(&report, dir).await {
            error!(error = %e, "Failed to write JSON report");
        }
    }
    if let Some(dir) = &args.markdown_output_dir {
        if let Err(e) = markdown::write_report(&report, dir).await {
            error!(error = %e, "Failed to write Markdown report");
        }
    }

    let elapsed = start_time.elapsed();
    info!(
        elapsed_secs = elapsed.as_secs(),
        elapsed_ms = elapsed.as_millis() as u64,
        "news_sentiment completed"
    );

    Ok(())
}
