//! Batch-level sentiment aggregation.
//!
//! [`AggregateSentiment`] is a plain value: running sums of each score field
//! plus a count. Addition is commutative and associative, so the order in
//! which concurrent workers finish does not affect the result.
//!
//! [`AggregateAccumulator`] is the run-scoped, shareable handle the pipeline
//! hands to its workers. Cloning it shares the same state; every write goes
//! through one mutex so simultaneous completions cannot interleave.

use crate::models::{SentimentLabel, SentimentScore};
use serde::Serialize;
use std::sync::{Arc, Mutex, PoisonError};

/// Running sums over the successfully scored items of one batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct AggregateSentiment {
    pub sum_positive: f64,
    pub sum_neutral: f64,
    pub sum_negative: f64,
    pub sum_compound: f64,
    pub count: usize,
}

impl AggregateSentiment {
    /// Add one item's score.
    pub fn record(&mut self, score: &SentimentScore) {
        self.sum_positive += score.positive;
        self.sum_neutral += score.neutral;
        self.sum_negative += score.negative;
        self.sum_compound += score.compound;
        self.count += 1;
    }

    /// Combine two partial aggregates of disjoint item sets.
    #[cfg(test)]
    pub fn merge(self, other: AggregateSentiment) -> AggregateSentiment {
        AggregateSentiment {
            sum_positive: self.sum_positive + other.sum_positive,
            sum_neutral: self.sum_neutral + other.sum_neutral,
            sum_negative: self.sum_negative + other.sum_negative,
            sum_compound: self.sum_compound + other.sum_compound,
            count: self.count + other.count,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Mean compound score, or `None` for an empty batch.
    pub fn mean_compound(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum_compound / self.count as f64)
    }

    /// Overall direction of the batch: the sign of the summed compound score.
    pub fn overall(&self) -> SentimentLabel {
        if self.sum_compound > 0.0 {
            SentimentLabel::Positive
        } else if self.sum_compound < 0.0 {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }
}

impl FromIterator<SentimentScore> for AggregateSentiment {
    fn from_iter<I: IntoIterator<Item = SentimentScore>>(iter: I) -> Self {
        let mut agg = AggregateSentiment::default();
        for score in iter {
            agg.record(&score);
        }
        agg
    }
}

/// Shared, single-writer accumulator for one pipeline run.
#[derive(Debug, Clone, Default)]
pub struct AggregateAccumulator {
    inner: Arc<Mutex<AggregateSentiment>>,
}

impl AggregateAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn accumulate(&self, score: &SentimentScore) {
        // record() cannot panic, so a poisoned lock still holds consistent sums.
        let mut agg = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        agg.record(score);
    }

    /// Copy of the current totals; never blocks further accumulation for long.
    pub fn snapshot(&self) -> AggregateSentiment {
        *self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
