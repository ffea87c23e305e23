//! Rule-based polarity scoring.
//!
//! The scorer follows the VADER heuristics: every token gets a valence from
//! the lexicon, which is then adjusted by nearby intensifiers, negations,
//! ALL-CAPS emphasis, a contrastive "but", and trailing punctuation. The
//! summed valence is squashed into a compound score in `[-1, 1]`, and the
//! positive, negative and neutral masses are normalized into proportions.
//!
//! Local rules never look across sentence boundaries. Valences of all
//! sentences are summed, so a whole article is scored as one document.

use super::lexicon::{self, CAPS_INCREMENT, NEGATION_SCALAR};
use crate::models::SentimentScore;
use crate::text::split_sentences;

/// Approximates the maximum expected value of the summed valence.
const NORMALIZATION_ALPHA: f64 = 15.0;

const EXCLAMATION_INCREMENT: f64 = 0.292;
const MAX_EXCLAMATIONS: usize = 4;
const QUESTION_INCREMENT: f64 = 0.18;
const QUESTION_CAP: f64 = 0.96;

const BUT_BEFORE_WEIGHT: f64 = 0.5;
const BUT_AFTER_WEIGHT: f64 = 1.5;

struct Token<'a> {
    raw: &'a str,
    lower: String,
}

/// Score `text`.
///
/// Total and deterministic: any string input yields a score, and text with no
/// scoreable tokens yields [`SentimentScore::neutral`].
pub fn score(text: &str) -> SentimentScore {
    let mut sentiments = Vec::new();
    for sentence in split_sentences(text) {
        score_sentence(&tokenize(sentence), &mut sentiments);
    }
    if sentiments.is_empty() {
        return SentimentScore::neutral();
    }
    score_valence(&sentiments, text)
}

fn tokenize(sentence: &str) -> Vec<Token<'_>> {
    sentence
        .split_whitespace()
        .map(|tok| tok.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|tok| tok.chars().count() > 1)
        .map(|raw| Token {
            raw,
            lower: raw.to_lowercase(),
        })
        .collect()
}

fn score_sentence(tokens: &[Token<'_>], sentiments: &mut Vec<f64>) {
    let cap_diff = allcap_differential(tokens);
    let start = sentiments.len();

    for i in 0..tokens.len() {
        let lower = tokens[i].lower.as_str();
        let kind_of = lower == "kind" && tokens.get(i + 1).is_some_and(|t| t.lower == "of");
        if lexicon::booster(lower).is_some() || kind_of {
            sentiments.push(0.0);
            continue;
        }
        sentiments.push(token_valence(tokens, i, cap_diff));
    }

    but_check(tokens, &mut sentiments[start..]);
}

fn token_valence(tokens: &[Token<'_>], i: usize, cap_diff: bool) -> f64 {
    let Some(mut valence) = lexicon::valence(&tokens[i].lower) else {
        return 0.0;
    };

    if cap_diff && is_upper(tokens[i].raw) {
        valence += CAPS_INCREMENT.copysign(valence);
    }

    for start_i in 0..3 {
        if i <= start_i {
            break;
        }
        let prev = &tokens[i - start_i - 1];
        if lexicon::contains(&prev.lower) {
            continue;
        }
        let mut scalar = scalar_inc_dec(prev, valence, cap_diff);
        if start_i == 1 {
            scalar *= 0.95;
        } else if start_i == 2 {
            scalar *= 0.9;
        }
        valence += scalar;
        valence = negation_check(valence, tokens, start_i, i);
    }

    least_check(valence, tokens, i)
}

fn scalar_inc_dec(token: &Token<'_>, valence: f64, cap_diff: bool) -> f64 {
    let Some(mut scalar) = lexicon::booster(&token.lower) else {
        return 0.0;
    };
    if valence < 0.0 {
        scalar = -scalar;
    }
    if cap_diff && is_upper(token.raw) {
        if valence > 0.0 {
            scalar += CAPS_INCREMENT;
        } else {
            scalar -= CAPS_INCREMENT;
        }
    }
    scalar
}

fn negates(word: &str) -> bool {
    word == "no" || lexicon::is_negation(word)
}

fn negation_check(valence: f64, tokens: &[Token<'_>], start_i: usize, i: usize) -> f64 {
    let word = |offset: usize| tokens[i - offset].lower.as_str();
    let so_or_this = |w: &str| w == "so" || w == "this";

    match start_i {
        0 if negates(word(1)) => valence * NEGATION_SCALAR,
        1 if word(2) == "never" && so_or_this(word(1)) => valence * 1.25,
        1 if negates(word(2)) => valence * NEGATION_SCALAR,
        2 if word(3) == "never" && (so_or_this(word(2)) || so_or_this(word(1))) => valence * 1.25,
        2 if negates(word(3)) => valence * NEGATION_SCALAR,
        _ => valence,
    }
}

// "least" negates what follows unless it is part of "at least" / "very least"
fn least_check(valence: f64, tokens: &[Token<'_>], i: usize) -> f64 {
    if i == 0 || tokens[i - 1].lower != "least" {
        return valence;
    }
    if i > 1 && matches!(tokens[i - 2].lower.as_str(), "at" | "very") {
        return valence;
    }
    valence * NEGATION_SCALAR
}

fn but_check(tokens: &[Token<'_>], sentiments: &mut [f64]) {
    let Some(bi) = tokens.iter().position(|t| t.lower == "but") else {
        return;
    };
    for (j, s) in sentiments.iter_mut().enumerate() {
        if j < bi {
            *s *= BUT_BEFORE_WEIGHT;
        } else if j > bi {
            *s *= BUT_AFTER_WEIGHT;
        }
    }
}

fn is_upper(raw: &str) -> bool {
    raw.chars().any(char::is_alphabetic) && !raw.chars().any(char::is_lowercase)
}

fn allcap_differential(tokens: &[Token<'_>]) -> bool {
    let upper = tokens.iter().filter(|t| is_upper(t.raw)).count();
    upper > 0 && upper < tokens.len()
}

fn punctuation_emphasis(text: &str) -> f64 {
    let exclamations = text.matches('!').count().min(MAX_EXCLAMATIONS);
    let ep = exclamations as f64 * EXCLAMATION_INCREMENT;

    let questions = text.matches('?').count();
    let qm = match questions {
        0 | 1 => 0.0,
        2..=3 => questions as f64 * QUESTION_INCREMENT,
        _ => QUESTION_CAP,
    };
    ep + qm
}

fn normalize(sum: f64) -> f64 {
    (sum / (sum * sum + NORMALIZATION_ALPHA).sqrt()).clamp(-1.0, 1.0)
}

fn score_valence(sentiments: &[f64], text: &str) -> SentimentScore {
    let punct = punctuation_emphasis(text);

    let mut sum: f64 = sentiments.iter().sum();
    if sum > 0.0 {
        sum += punct;
    } else if sum < 0.0 {
        sum -= punct;
    }
    let compound = normalize(sum);

    let mut pos = 0.0;
    let mut neg = 0.0;
    let mut neu = 0.0;
    for &s in sentiments {
        if s > 0.0 {
            pos += s + 1.0;
        } else if s < 0.0 {
            neg += s - 1.0;
        } else {
            neu += 1.0;
        }
    }
    if pos > neg.abs() {
        pos += punct;
    } else if pos < neg.abs() {
        neg -= punct;
    }

    let total = pos + neg.abs() + neu;
    if total <= 0.0 {
        return SentimentScore::neutral();
    }
    let mut positive = round_proportion(pos / total);
    let mut negative = round_proportion(neg.abs() / total);
    // rounding both up can overshoot 1; take the excess from the larger share
    let excess = positive + negative - 1.0;
    if excess > 0.0 {
        if positive >= negative {
            positive = round_proportion(positive - excess);
        } else {
            negative = round_proportion(negative - excess);
        }
    }
    SentimentScore {
        positive,
        neutral: round_proportion(1.0 - positive - negative),
        negative,
        compound,
    }
}

/// Proportions are reported to 3 decimals.
fn round_proportion(p: f64) -> f64 {
    (p * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn assert_well_formed(s: &SentimentScore) {
        assert!((s.positive + s.neutral + s.negative - 1.0).abs() < EPS, "{s:?}");
        assert!((-1.0..=1.0).contains(&s.compound), "{s:?}");
        for p in [s.positive, s.neutral, s.negative] {
            assert!((0.0..=1.0).contains(&p), "{s:?}");
        }
    }

    #[test]
    fn test_empty_and_whitespace_are_neutral() {
        assert_eq!(score(""), SentimentScore::neutral());
        assert_eq!(score("   \n\t "), SentimentScore::neutral());
        assert_eq!(score("!!! ..."), SentimentScore::neutral());
    }

    #[test]
    fn test_text_without_sentiment_words() {
        let s = score("The committee met on Tuesday to review the schedule.");
        assert_eq!(s.compound, 0.0);
        assert_eq!(s.neutral, 1.0);
        assert_well_formed(&s);
    }

    #[test]
    fn test_polarity() {
        assert!(score("The results were good.").compound > 0.0);
        assert!(score("The results were terrible.").compound < 0.0);
    }

    #[test]
    fn test_negation_flips_polarity() {
        let s = score("This is not good.");
        assert!(s.compound < 0.0, "{s:?}");
        assert!(s.negative > 0.0);
    }

    #[test]
    fn test_booster_intensifies() {
        let plain = score("The food is good.");
        let boosted = score("The food is very good.");
        let dampened = score("The food is slightly good.");
        assert!(boosted.compound > plain.compound);
        assert!(dampened.compound < plain.compound);
    }

    #[test]
    fn test_caps_emphasis() {
        assert!(score("The food is GOOD.").compound > score("The food is good.").compound);
    }

    #[test]
    fn test_exclamation_amplifies() {
        assert!(score("The food is good!!!").compound > score("The food is good.").compound);
    }

    #[test]
    fn test_but_shifts_weight_to_second_clause() {
        let s = score("The food is good, but the service is terrible.");
        assert!(s.compound < 0.0, "{s:?}");
    }

    #[test]
    fn test_at_least_is_not_negated() {
        assert!(score("The outcome was at least good.").compound > 0.0);
        assert!(score("Least good of all the options.").compound < 0.0);
    }

    #[test]
    fn test_scores_are_well_formed_for_long_text() {
        let text = "Markets rallied strongly on Monday as investors welcomed the agreement. \
                    However, analysts warned of risks ahead and fears of a recession remain. \
                    The deal is a major victory for the government! Critics called it a disaster. \
                    Unemployment is falling and growth has improved.";
        let s = score(text);
        assert_well_formed(&s);
        assert!(s.positive > 0.0 && s.negative > 0.0 && s.neutral > 0.0);
    }

    #[test]
    fn test_score_is_deterministic() {
        let text = "Officials praised the rescue but mourned the victims of the flood.";
        let a = score(text);
        let b = score(text);
        assert_eq!(a.compound.to_bits(), b.compound.to_bits());
        assert_eq!(a.positive.to_bits(), b.positive.to_bits());
        assert_eq!(a.neutral.to_bits(), b.neutral.to_bits());
        assert_eq!(a.negative.to_bits(), b.negative.to_bits());
    }

    #[test]
    fn test_typographic_apostrophe_negates() {
        let curly = score("Voters don’t support the plan.");
        let ascii = score("Voters don't support the plan.");
        assert!(curly.compound < 0.0, "{curly:?}");
        assert_eq!(curly, ascii);
    }

    #[test]
    fn test_proportions_have_three_decimals() {
        let texts = [
            "The food is good, but the service is terrible.",
            "Officials praised the rescue but mourned the victims of the flood.",
            "Markets rallied strongly on Monday as investors welcomed the agreement!",
            "Good bad good bad terrible great",
        ];
        for text in texts {
            let s = score(text);
            for p in [s.positive, s.neutral, s.negative] {
                assert!((p * 1000.0 - (p * 1000.0).round()).abs() < 1e-6, "{text}: {s:?}");
            }
            assert_well_formed(&s);
        }
    }

    #[test]
    fn test_rounding_never_overshoots() {
        assert_eq!(round_proportion(0.12345), 0.123);
        assert_eq!(round_proportion(2.0 / 3.0), 0.667);
        let s = score("Good bad good bad terrible great");
        assert!(s.neutral >= 0.0, "{s:?}");
    }

    #[test]
    fn test_compound_saturates_within_bounds() {
        let text = "wonderful amazing great excellent fantastic ".repeat(50);
        let s = score(&text);
        assert!(s.compound > 0.99 && s.compound <= 1.0);
        assert_well_formed(&s);
    }
}
