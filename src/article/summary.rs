//! Extractive summarization and keyword extraction.
//!
//! Each sentence is scored from four signals:
//! - **keyword density**: how frequent its content words are across the text
//! - **title overlap**: share of headline words it repeats
//! - **position**: leads and closing sentences of news copy carry the story
//! - **length**: sentences far from an ideal length are penalized
//!
//! The best sentences are returned in their original order. The summary is
//! always made of sentences taken verbatim from the text.

use crate::text::{content_words, split_sentences};
use itertools::Itertools;
use std::collections::{HashMap, HashSet};

/// Default number of sentences in a summary.
pub const SUMMARY_SENTENCES: usize = 5;

/// Default number of keywords reported per article.
pub const KEYWORD_COUNT: usize = 10;

const IDEAL_SENTENCE_WORDS: f64 = 20.0;

/// Summarize `text` into at most `max_sentences` of its own sentences.
///
/// When the text has more than one sentence, at least one is always left out,
/// so the summary is strictly shorter than the text.
pub fn summarize(text: &str, title: Option<&str>, max_sentences: usize) -> String {
    let sentences = split_sentences(text);
    let n = sentences.len();
    if n <= 1 {
        return sentences.first().map(|s| s.to_string()).unwrap_or_default();
    }
    let keep = max_sentences.clamp(1, n - 1);

    let freq = word_frequencies(text);
    let max_freq = freq.values().copied().max().unwrap_or(1) as f64;
    let title_words: HashSet<String> = title.map(|t| content_words(t).collect()).unwrap_or_default();

    sentences
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let score = sentence_score(s, i, n, &freq, max_freq, &title_words);
            (i, score)
        })
        .sorted_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)))
        .take(keep)
        .map(|(i, _)| i)
        .sorted()
        .map(|i| sentences[i])
        .join(" ")
}

/// The `count` most frequent content words, ties broken alphabetically.
pub fn keywords(text: &str, count: usize) -> Vec<String> {
    word_frequencies(text)
        .into_iter()
        .sorted_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)))
        .take(count)
        .map(|(word, _)| word)
        .collect()
}

fn word_frequencies(text: &str) -> HashMap<String, usize> {
    content_words(text).counts()
}

fn sentence_score(
    sentence: &str,
    index: usize,
    total: usize,
    freq: &HashMap<String, usize>,
    max_freq: f64,
    title_words: &HashSet<String>,
) -> f64 {
    let words: Vec<String> = content_words(sentence).collect();
    if words.is_empty() {
        return 0.0;
    }

    let density = words
        .iter()
        .map(|w| freq.get(w).copied().unwrap_or(0) as f64 / max_freq)
        .sum::<f64>()
        / words.len() as f64;

    let title_overlap = if title_words.is_empty() {
        0.0
    } else {
        words.iter().filter(|w| title_words.contains(*w)).count() as f64
            / title_words.len() as f64
    };

    let length = {
        let len = sentence.split_whitespace().count() as f64;
        (1.0 - (IDEAL_SENTENCE_WORDS - len).abs() / IDEAL_SENTENCE_WORDS).max(0.0)
    };

    2.0 * density + 1.5 * title_overlap + position_score(index, total) + 0.5 * length
}

fn position_score(index: usize, total: usize) -> f64 {
    let relative = (index + 1) as f64 / total as f64;
    match relative {
        r if r <= 0.1 => 0.17,
        r if r <= 0.2 => 0.23,
        r if r <= 0.3 => 0.14,
        r if r <= 0.4 => 0.08,
        r if r <= 0.5 => 0.05,
        r if r <= 0.6 => 0.04,
        r if r <= 0.7 => 0.06,
        r if r <= 0.8 => 0.04,
        r if r <= 0.9 => 0.04,
        _ => 0.15,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEXT: &str = "The central bank raised interest rates on Tuesday to fight inflation. \
        Inflation has stayed above the bank's target for two years. \
        The weather in the capital was mild. \
        Officials said further rate rises could follow if inflation does not ease. \
        A local bakery opened a second shop. \
        Markets fell after the rate decision was announced. \
        Analysts expect inflation to slow next year as rates bite.";

    #[test]
    fn test_summary_is_shorter_and_drawn_from_text() {
        let summary = summarize(TEXT, Some("Central bank raises rates to fight inflation"), 3);
        assert!(summary.len() < TEXT.len());
        let sentences = split_sentences(&summary);
        assert_eq!(sentences.len(), 3);
        for s in sentences {
            assert!(TEXT.contains(s), "{s:?} not in source text");
        }
    }

    #[test]
    fn test_summary_keeps_original_order() {
        let summary = summarize(TEXT, None, 4);
        let positions: Vec<usize> = split_sentences(&summary)
            .into_iter()
            .map(|s| TEXT.find(s).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_summary_prefers_on_topic_sentences() {
        let summary = summarize(TEXT, Some("Central bank raises rates to fight inflation"), 3);
        assert!(summary.contains("raised interest rates"));
        assert!(!summary.contains("bakery"));
    }

    #[test]
    fn test_summary_always_drops_a_sentence() {
        let text = "First sentence here. Second sentence here.";
        let summary = summarize(text, None, 5);
        assert_eq!(split_sentences(&summary).len(), 1);
        assert!(summary.len() < text.len());
    }

    #[test]
    fn test_summary_of_single_sentence_and_empty_text() {
        assert_eq!(summarize("Only one sentence", None, 5), "Only one sentence");
        assert_eq!(summarize("", None, 5), "");
    }

    #[test]
    fn test_keywords() {
        let kw = keywords(TEXT, 3);
        assert_eq!(kw[0], "inflation");
        assert_eq!(kw.len(), 3);
        assert!(kw.contains(&"bank".to_string()) || kw.contains(&"rate".to_string()));
    }

    #[test]
    fn test_keywords_tie_break_is_alphabetical() {
        assert_eq!(keywords("zebra apple mango", 2), vec!["apple", "mango"]);
    }
}
