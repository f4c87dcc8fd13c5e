//! Statistical features of a free-text answer.
//!
//! The layout of the vector is part of the trained models' contract: the
//! regressors were fit on exactly these 15 columns in exactly this order.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

use crate::communication::readability::flesch_reading_ease;

pub const FEATURE_COUNT: usize = 15;

/// Used when readability cannot be computed for a non-empty answer.
pub const READABILITY_FALLBACK: f64 = 50.0;

pub type FeatureVector = [f64; FEATURE_COUNT];

const TECHNICAL_TERMS: &[&str] = &[
    "api", "system", "database", "server", "code", "algorithm", "architecture",
    "performance", "security", "debugging", "compiler", "syntax", "spaced repetition",
    "flashcards", "mnemonic", "cheat sheet", "annotations", "ide", "vscode", "autocomplete",
    "leetcode", "hackerrank", "codewars", "git", "implement", "optimize", "deploy",
    "integrate", "refactor", "simulate", "unit test", "benchmark",
];
const QUALITY_WORDS: &[&str] = &["clear", "efficient", "scalable", "maintain", "optimize", "collaborate"];
const ACTION_WORDS: &[&str] = &["implemented", "created", "built", "designed", "led", "managed", "developed"];
const NEGATIVE_PHRASES: &[&str] = &["don't know", "no experience", "not familiar", "never used", "can't"];
const PROFESSIONAL_WORDS: &[&str] = &["strategy", "process", "methodology", "framework", "solution"];
const EXAMPLE_INDICATORS: &[&str] = &["example", "instance", "such as", "like", "including"];
const CONFIDENCE_WORDS: &[&str] = &["will", "would", "can", "able", "ensure", "achieve"];

const LONG_WORD_CHARS: usize = 8;

fn sentence_splitter() -> &'static Regex {
    static SPLITTER: OnceLock<Regex> = OnceLock::new();
    SPLITTER.get_or_init(|| Regex::new(r"[.!?]+").expect("static sentence regex"))
}

/// Number of list entries occurring as substrings of `lower`.
fn count_present(terms: &[&str], lower: &str) -> f64 {
    terms.iter().filter(|term| lower.contains(*term)).count() as f64
}

fn mean(values: impl Iterator<Item = usize>) -> f64 {
    let (sum, n) = values.fold((0usize, 0usize), |(sum, n), v| (sum + v, n + 1));
    if n == 0 {
        0.0
    } else {
        sum as f64 / n as f64
    }
}

/// Extracts the 15 statistical features. Blank text yields all zeros.
pub fn extract_features(text: &str) -> FeatureVector {
    let mut features = [0.0; FEATURE_COUNT];
    if text.trim().is_empty() {
        return features;
    }

    let words: Vec<&str> = text.split_whitespace().collect();
    let sentences: Vec<&str> = sentence_splitter()
        .split(text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();
    let lower = text.to_lowercase();
    let word_count = words.len() as f64;

    let unique_words: HashSet<String> = words.iter().map(|w| w.to_lowercase()).collect();

    features[0] = word_count;
    features[1] = sentences.len() as f64;
    features[2] = mean(words.iter().map(|w| w.chars().count()));
    features[3] = mean(sentences.iter().map(|s| s.split_whitespace().count()));
    features[4] = flesch_reading_ease(text).unwrap_or(READABILITY_FALLBACK);
    features[5] = unique_words.len() as f64 / word_count;
    features[6] = count_present(TECHNICAL_TERMS, &lower) / word_count;
    features[7] = count_present(QUALITY_WORDS, &lower) / word_count;
    features[8] = count_present(ACTION_WORDS, &lower) / word_count;
    features[9] = count_present(NEGATIVE_PHRASES, &lower);
    features[10] = words
        .iter()
        .filter(|w| w.chars().count() > LONG_WORD_CHARS)
        .count() as f64
        / word_count;
    features[11] = text.matches('?').count() as f64 / word_count;
    features[12] = count_present(PROFESSIONAL_WORDS, &lower) / word_count;
    features[13] = count_present(EXAMPLE_INDICATORS, &lower);
    features[14] = count_present(CONFIDENCE_WORDS, &lower) / word_count;

    features
}
