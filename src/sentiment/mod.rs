//! Sentiment scoring and batch aggregation.
//!
//! - [`scorer`]: pure, lexicon/rule-based polarity scoring of article text
//! - [`lexicon`]: the bundled valence lexicon and booster/negation lists
//! - [`aggregate`]: order-independent accumulation of per-item scores

pub mod aggregate;
pub mod lexicon;
pub mod scorer;

pub use aggregate::{AggregateAccumulator, AggregateSentiment};
pub use scorer::score;
