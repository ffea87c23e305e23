//! Plain-text helpers shared by the summarizer and the sentiment scorer.
//!
//! - [`split_sentences`]: regex based sentence segmentation that keeps
//!   common abbreviations and initials attached to their sentence
//! - [`content_words`]: lowercase word tokens with stopwords removed
//! - [`normalize_whitespace`]: collapse runs of whitespace to single spaces

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

static SENTENCE_END: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"[.!?]+["'”’)\]]*(\s+|$)"#).expect("sentence boundary regex")
});

static WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z][A-Za-z'’-]*").expect("word regex"));

/// Tokens that end with a period without ending the sentence.
const ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "gen", "gov", "sen", "rep", "lt", "col",
    "capt", "sgt", "inc", "co", "corp", "ltd", "vs", "etc", "no", "jan", "feb", "mar", "apr",
    "aug", "sept", "sep", "oct", "nov", "dec", "u.s", "u.k", "u.n", "e.g", "i.e", "a.m", "p.m",
];

static STOPWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "a", "about", "above", "after", "again", "against", "all", "also", "am", "an", "and",
        "any", "are", "as", "at", "be", "because", "been", "before", "being", "below", "between",
        "both", "but", "by", "can", "could", "did", "do", "does", "doing", "down", "during",
        "each", "even", "few", "for", "from", "further", "had", "has", "have", "having", "he",
        "her", "here", "hers", "herself", "him", "himself", "his", "how", "i", "if", "in", "into",
        "is", "it", "it's", "its", "itself", "just", "like", "many", "may", "me", "might", "more",
        "most", "much", "must", "my", "myself", "new", "no", "nor", "not", "now", "of", "off",
        "on", "once", "one", "only", "or", "other", "our", "ours", "ourselves", "out", "over",
        "own", "said", "same", "says", "she", "should", "so", "some", "such", "than", "that",
        "that's", "the", "their", "theirs", "them", "themselves", "then", "there", "these",
        "they", "this", "those", "through", "to", "too", "two", "under", "until", "up", "us",
        "very", "was", "we", "were", "what", "when", "where", "which", "while", "who", "whom",
        "why", "will", "with", "would", "year", "years", "you", "your", "yours", "yourself",
    ]
    .into_iter()
    .collect()
});

/// Split text into sentences.
///
/// Returned slices borrow from `text`, are trimmed, never empty, and appear in
/// their original order. Text without terminal punctuation is returned as one
/// sentence.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;

    for m in SENTENCE_END.find_iter(text) {
        let candidate = text[start..m.end()].trim();
        if candidate.is_empty() || ends_with_abbreviation(candidate) {
            continue;
        }
        sentences.push(candidate);
        start = m.end();
    }

    let rest = text[start..].trim();
    if !rest.is_empty() {
        sentences.push(rest);
    }
    sentences
}

fn ends_with_abbreviation(sentence: &str) -> bool {
    let Some(last) = sentence.split_whitespace().last() else {
        return false;
    };
    if !last.ends_with('.') || last.ends_with("..") {
        return false;
    }
    let token = last
        .trim_start_matches(|c: char| !c.is_alphanumeric())
        .trim_end_matches('.')
        .to_lowercase();
    // single-letter initials such as "J." in "J. Smith"
    if token.chars().count() == 1 && token.chars().all(|c| c.is_alphabetic()) {
        return true;
    }
    ABBREVIATIONS.contains(&token.as_str())
}

/// Lowercase word tokens of at least three characters that are not stopwords.
pub fn content_words(text: &str) -> impl Iterator<Item = String> + '_ {
    WORD.find_iter(text)
        .map(|m| m.as_str().trim_end_matches(['\'', '’', '-']).to_lowercase())
        .filter(|w| w.chars().count() >= 3 && !is_stopword(w))
}

pub fn is_stopword(word: &str) -> bool {
    STOPWORDS.contains(word)
}

pub fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_sentences_basic() {
        let s = split_sentences("Stocks rose today. Investors cheered! Will it last? Nobody knows");
        assert_eq!(
            s,
            vec![
                "Stocks rose today.",
                "Investors cheered!",
                "Will it last?",
                "Nobody knows"
            ]
        );
    }

    #[test]
    fn test_split_sentences_keeps_abbreviations() {
        let s = split_sentences("Mr. Smith met Dr. Jones in the U.S. capital. They talked.");
        assert_eq!(
            s,
            vec!["Mr. Smith met Dr. Jones in the U.S. capital.", "They talked."]
        );
    }

    #[test]
    fn test_split_sentences_keeps_initials_and_quotes() {
        let s = split_sentences("J. K. Rowling said \"it is done.\" Fans reacted.");
        assert_eq!(s, vec!["J. K. Rowling said \"it is done.\"", "Fans reacted."]);
    }

    #[test]
    fn test_split_sentences_empty() {
        assert!(split_sentences("").is_empty());
        assert!(split_sentences("   \n ").is_empty());
    }

    #[test]
    fn test_content_words_filters_stopwords() {
        let words: Vec<String> = content_words("The Economy is growing, and the economy's outlook is bright").collect();
        assert_eq!(words, vec!["economy", "growing", "economy's", "outlook", "bright"]);
    }

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(normalize_whitespace("  a \n\t b  c "), "a b c");
    }
}
