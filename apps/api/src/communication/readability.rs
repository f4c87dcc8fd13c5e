//! Flesch reading ease with a vowel-group syllable estimate.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ReadabilityError {
    #[error("text has no countable words")]
    NoWords,
}

/// `206.835 - 1.015 * (words / sentences) - 84.6 * (syllables / words)`.
///
/// Words are whitespace tokens stripped of surrounding punctuation that still
/// contain a letter. A text without terminal punctuation counts as one sentence.
pub fn flesch_reading_ease(text: &str) -> Result<f64, ReadabilityError> {
    let words: Vec<String> = text
        .split_whitespace()
        .map(|token| {
            token
                .trim_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase()
        })
        .filter(|word| word.chars().any(char::is_alphabetic))
        .collect();

    if words.is_empty() {
        return Err(ReadabilityError::NoWords);
    }

    let sentences = text
        .split(['.', '!', '?'])
        .filter(|piece| piece.chars().any(char::is_alphabetic))
        .count()
        .max(1);

    let syllables: usize = words.iter().map(|w| count_syllables(w)).sum();
    let word_count = words.len() as f64;

    Ok(206.835
        - 1.015 * (word_count / sentences as f64)
        - 84.6 * (syllables as f64 / word_count))
}

/// Counts vowel groups, dropping a silent trailing `e` (but not `-le`).
/// Every word has at least one syllable.
pub fn count_syllables(word: &str) -> usize {
    let letters: Vec<char> = word
        .chars()
        .filter(|c| c.is_alphabetic())
        .flat_map(char::to_lowercase)
        .collect();
    if letters.is_empty() {
        return 0;
    }

    let is_vowel = |c: char| matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y');
    let mut groups = 0;
    let mut previous_vowel = false;
    for &c in &letters {
        let vowel = is_vowel(c);
        if vowel && !previous_vowel {
            groups += 1;
        }
        previous_vowel = vowel;
    }

    let n = letters.len();
    let silent_e = n > 2
        && letters[n - 1] == 'e'
        && !is_vowel(letters[n - 2])
        && !(letters[n - 2] == 'l' && !is_vowel(letters[n - 3]));
    if silent_e && groups > 1 {
        groups -= 1;
    }

    groups.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syllable_counts() {
        assert_eq!(count_syllables("cat"), 1);
        assert_eq!(count_syllables("system"), 2);
        assert_eq!(count_syllables("make"), 1);
        assert_eq!(count_syllables("table"), 2);
        assert_eq!(count_syllables("algorithm"), 3);
        assert_eq!(count_syllables("rhythm"), 1);
    }

    #[test]
    fn test_simple_text_is_easy() {
        let score = flesch_reading_ease("The cat sat on the mat. The dog ran.").unwrap();
        assert!(score > 90.0, "score was {score}");
    }

    #[test]
    fn test_dense_text_is_harder() {
        let simple = flesch_reading_ease("I fixed the bug. It works now.").unwrap();
        let dense = flesch_reading_ease(
            "Architectural considerations regarding distributed consensus necessitate comprehensive evaluation.",
        )
        .unwrap();
        assert!(dense < simple);
    }

    #[test]
    fn test_punctuation_only_text_fails() {
        assert_eq!(flesch_reading_ease("?!..."), Err(ReadabilityError::NoWords));
        assert_eq!(flesch_reading_ease("42 17"), Err(ReadabilityError::NoWords));
    }

    #[test]
    fn test_text_without_terminal_punctuation_is_one_sentence() {
        let with = flesch_reading_ease("we ship small changes.").unwrap();
        let without = flesch_reading_ease("we ship small changes").unwrap();
        assert_eq!(with, without);
    }
}
