//! Word lists for the rule-based scorer.
//!
//! The valence lexicon is bundled as `assets/sentiment_lexicon.tsv`
//! (`word<TAB>valence`, valences in `-4.0..=4.0`) and parsed once on first use.
//! Booster and negation lists are small enough to live in code.

use once_cell::sync::Lazy;
use std::collections::HashMap;
use tracing::warn;

const LEXICON_TSV: &str = include_str!("../../assets/sentiment_lexicon.tsv");

/// Scalar added to (or subtracted from) a valence by an intensifier.
pub const BOOST_INCREMENT: f64 = 0.293;
pub const BOOST_DECREMENT: f64 = -0.293;

/// Multiplier applied to a valence that follows a negation.
pub const NEGATION_SCALAR: f64 = -0.74;

/// Extra weight of an ALL-CAPS sentiment word in mixed-case text.
pub const CAPS_INCREMENT: f64 = 0.733;

static LEXICON: Lazy<HashMap<&'static str, f64>> = Lazy::new(|| parse_lexicon(LEXICON_TSV));

static BOOSTERS: Lazy<HashMap<&'static str, f64>> = Lazy::new(|| {
    const UP: &[&str] = &[
        "absolutely", "amazingly", "awfully", "completely", "considerably", "decidedly",
        "deeply", "effing", "enormously", "entirely", "especially", "exceptionally",
        "extremely", "fabulously", "greatly", "highly", "hugely", "incredibly", "intensely",
        "majorly", "more", "most", "particularly", "purely", "quite", "really", "remarkably",
        "so", "substantially", "thoroughly", "totally", "tremendously", "uber", "unbelievably",
        "unusually", "utterly", "very", "sharply", "massively", "severely",
    ];
    const DOWN: &[&str] = &[
        "almost", "barely", "hardly", "kinda", "less", "little", "marginally", "occasionally",
        "partly", "scarcely", "slightly", "somewhat", "sorta", "modestly", "mildly",
    ];
    UP.iter()
        .map(|w| (*w, BOOST_INCREMENT))
        .chain(DOWN.iter().map(|w| (*w, BOOST_DECREMENT)))
        .collect()
});

const NEGATIONS: &[&str] = &[
    "aint", "arent", "cannot", "cant", "couldnt", "darent", "didnt", "doesnt", "ain't",
    "aren't", "can't", "couldn't", "daren't", "didn't", "doesn't", "dont", "hadnt", "hasnt",
    "havent", "isnt", "mightnt", "mustnt", "neither", "don't", "hadn't", "hasn't", "haven't",
    "isn't", "mightn't", "mustn't", "neednt", "needn't", "never", "none", "nope", "nor", "not",
    "nothing", "nowhere", "oughtnt", "shant", "shouldnt", "uhuh", "wasnt", "werent",
    "oughtn't", "shan't", "shouldn't", "uh-uh", "wasn't", "weren't", "without", "wont",
    "wouldnt", "won't", "wouldn't", "rarely", "seldom", "despite",
];

fn parse_lexicon(tsv: &'static str) -> HashMap<&'static str, f64> {
    let mut map = HashMap::new();
    for (lineno, line) in tsv.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut parts = line.split('\t');
        match (parts.next(), parts.next().map(str::parse::<f64>)) {
            (Some(word), Some(Ok(valence))) => {
                map.insert(word, valence);
            }
            _ => warn!(line = lineno + 1, "Skipping malformed lexicon entry"),
        }
    }
    map
}

/// Valence of a lowercase word, if it carries sentiment.
pub fn valence(word: &str) -> Option<f64> {
    LEXICON.get(word).copied()
}

pub fn contains(word: &str) -> bool {
    LEXICON.contains_key(word)
}

/// Boost scalar of a lowercase intensifier or dampener.
pub fn booster(word: &str) -> Option<f64> {
    BOOSTERS.get(word).copied()
}

/// Whether a lowercase token negates what follows it.
pub fn is_negation(word: &str) -> bool {
    NEGATIONS.contains(&word) || word.contains("n't") || word.contains("n’t")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_lexicon_parses_every_line() {
        let expected = LEXICON_TSV
            .lines()
            .filter(|l| !l.trim().is_empty() && !l.starts_with('#'))
            .count();
        assert_eq!(LEXICON.len(), expected);
    }

    #[test]
    fn test_valences_are_in_range() {
        assert!(LEXICON.values().all(|v| (-4.0..=4.0).contains(v)));
    }

    #[test]
    fn test_lookup() {
        assert_eq!(valence("good"), Some(1.9));
        assert!(valence("war").unwrap() < 0.0);
        assert_eq!(valence("table"), None);
        assert!(contains("crisis"));
    }

    #[test]
    fn test_boosters_and_negations() {
        assert_eq!(booster("very"), Some(BOOST_INCREMENT));
        assert_eq!(booster("slightly"), Some(BOOST_DECREMENT));
        assert_eq!(booster("good"), None);
        assert!(is_negation("not"));
        assert!(is_negation("shouldn't"));
        assert!(is_negation("don’t"));
        assert!(is_negation("wouldn’t"));
        assert!(!is_negation("know"));
    }

    #[test]
    fn test_parse_skips_malformed_lines() {
        let map = parse_lexicon("# header\ngood\t1.9\nbroken line\nbad\tnot-a-number\n");
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("good"), Some(&1.9));
    }
}
