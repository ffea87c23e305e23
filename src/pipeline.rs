//! The fetch, resolve, score and aggregate pipeline.
//!
//! A run fetches and parses the feed once, keeps the first `limit` items, and
//! then resolves and scores items with a bounded number in flight. Results are
//! yielded lazily, in feed order, as a [`Stream`]; the aggregate is updated as
//! soon as each item is scored, regardless of emission order.
//!
//! # Failure isolation
//!
//! - A feed fetch failure ends the run immediately with no items and is
//!   exposed through [`PipelineRun::warning`].
//! - A resolve failure or deadline expiry affects only that item: it is still
//!   emitted, with no content and no score, and is left out of the aggregate.

use crate::article::ItemResolver;
use crate::config::PipelineConfig;
use crate::error::{FetchError, ResolveError};
use crate::feed::{FeedSource, parse_items};
use crate::models::{FeedItem, FeedQuery, PerItemResult};
use crate::sentiment::{self, AggregateAccumulator, AggregateSentiment};
use crate::utils::truncate_for_log;
use futures::stream::{self, LocalBoxStream, Stream, StreamExt};
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::time::timeout;
use tracing::{debug, error, info, instrument, warn};

/// Composes a feed source and an item resolver into runs over one query.
#[derive(Debug)]
pub struct Pipeline<S, R> {
    source: S,
    resolver: R,
    config: PipelineConfig,
}

impl<S, R> Pipeline<S, R>
where
    S: FeedSource,
    R: ItemResolver,
{
    pub fn new(source: S, resolver: R, config: PipelineConfig) -> Self {
        Self {
            source,
            resolver,
            config,
        }
    }

    /// Start a run for `query`.
    ///
    /// The feed is fetched before this returns; item resolution happens as
    /// the returned [`PipelineRun`] is polled.
    #[instrument(level = "info", skip_all, fields(query = %query))]
    pub async fn run(&self, query: &FeedQuery) -> PipelineRun<'_> {
        let aggregate = AggregateAccumulator::new();

        let (items, warning) = match self.source.fetch(query).await {
            Ok(document) => {
                let mut items = parse_items(&document);
                items.truncate(query.limit());
                (items, None)
            }
            Err(e) => {
                error!(error = %e, "Error fetching news feed; no items for this query");
                (Vec::new(), Some(e))
            }
        };

        let planned = items.len();
        let concurrency = self.config.concurrency.max(1);
        info!(planned, concurrency, "Resolving feed items");

        let worker_aggregate = aggregate.clone();
        let results = stream::iter(items.into_iter().enumerate())
            .map(move |(index, item)| self.process(index, item, worker_aggregate.clone()))
            .buffered(concurrency)
            .boxed_local();

        PipelineRun {
            results,
            aggregate,
            warning,
            planned,
        }
    }

    async fn process(
        &self,
        index: usize,
        item: FeedItem,
        aggregate: AggregateAccumulator,
    ) -> PerItemResult {
        let deadline = self.config.item_timeout;
        let resolved = match timeout(deadline, self.resolver.resolve(&item)).await {
            Ok(result) => result,
            Err(_) => Err(ResolveError::Timeout(deadline)),
        };

        match resolved {
            Ok(content) => {
                let score = sentiment::score(&content.full_text);
                aggregate.accumulate(&score);
                debug!(
                    index,
                    compound = score.compound,
                    title = %truncate_for_log(&item.title, 80),
                    "Scored article"
                );
                PerItemResult::resolved(index, item, content, score)
            }
            Err(e) => {
                warn!(index, url = %item.link, error = %e, "Error resolving article; emitting item without content");
                PerItemResult::unresolved(index, item, e)
            }
        }
    }
}

/// One in-progress run: a lazy, feed-ordered stream of [`PerItemResult`]s
/// plus the run's aggregate.
pub struct PipelineRun<'a> {
    results: LocalBoxStream<'a, PerItemResult>,
    aggregate: AggregateAccumulator,
    warning: Option<FetchError>,
    planned: usize,
}

impl PipelineRun<'_> {
    /// The feed-level failure, if the feed could not be fetched.
    pub fn warning(&self) -> Option<&FetchError> {
        self.warning.as_ref()
    }

    /// Number of items this run will emit.
    pub fn planned(&self) -> usize {
        self.planned
    }

    /// Aggregate over the items scored so far.
    pub fn snapshot(&self) -> AggregateSentiment {
        self.aggregate.snapshot()
    }

    /// Drain the remaining results and return them with the final aggregate.
    #[cfg(test)]
    pub async fn finish(self) -> (Vec<PerItemResult>, AggregateSentiment) {
        let results: Vec<PerItemResult> = self.results.collect().await;
        (results, self.aggregate.snapshot())
    }
}

impl Stream for PipelineRun<'_> {
    type Item = PerItemResult;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.results.poll_next_unpin(cx)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.results.size_hint()
    }
}
