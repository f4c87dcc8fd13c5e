use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;
use serde::Deserialize;

use crate::inference::ModelError;

/// Default scikit-learn token pattern: two or more word characters.
fn token_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\b\w\w+\b").expect("static token regex"))
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Norm {
    #[default]
    L2,
    None,
}

/// A fitted TF-IDF vectorizer: vocabulary and idf weights are frozen.
#[derive(Debug, Clone, Deserialize)]
pub struct TfidfVectorizer {
    pub vocabulary: HashMap<String, usize>,
    pub idf: Vec<f64>,
    #[serde(default = "default_ngram_range")]
    pub ngram_range: (usize, usize),
    #[serde(default = "default_true")]
    pub lowercase: bool,
    #[serde(default)]
    pub sublinear_tf: bool,
    #[serde(default)]
    pub norm: Norm,
}

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

fn default_true() -> bool {
    true
}

impl TfidfVectorizer {
    pub fn dimensions(&self) -> usize {
        self.idf.len()
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        if self.idf.len() != self.vocabulary.len() {
            return Err(ModelError::InvalidArtifact(format!(
                "tfidf idf has {} weights for {} vocabulary terms",
                self.idf.len(),
                self.vocabulary.len()
            )));
        }
        if let Some((term, index)) = self.vocabulary.iter().find(|&(_, &i)| i >= self.idf.len()) {
            return Err(ModelError::InvalidArtifact(format!(
                "tfidf term '{term}' has out-of-range index {index}"
            )));
        }
        let (min_n, max_n) = self.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(ModelError::InvalidArtifact(format!(
                "invalid ngram_range ({min_n}, {max_n})"
            )));
        }
        Ok(())
    }

    pub fn transform(&self, text: &str) -> Vec<f64> {
        let mut vector: Vec<f64> = vec![0.0; self.dimensions()];

        let source = if self.lowercase {
            text.to_lowercase()
        } else {
            text.to_string()
        };
        let tokens: Vec<&str> = token_pattern()
            .find_iter(&source)
            .map(|m| m.as_str())
            .collect();

        let (min_n, max_n) = self.ngram_range;
        for n in min_n..=max_n {
            for gram in tokens.windows(n) {
                if let Some(&index) = self.vocabulary.get(&gram.join(" ")) {
                    vector[index] += 1.0;
                }
            }
        }

        for (index, value) in vector.iter_mut().enumerate() {
            if *value > 0.0 {
                let tf = if self.sublinear_tf {
                    1.0 + value.ln()
                } else {
                    *value
                };
                *value = tf * self.idf[index];
            }
        }

        if self.norm == Norm::L2 {
            let length = vector.iter().map(|v| v * v).sum::<f64>().sqrt();
            if length > 0.0 {
                vector.iter_mut().for_each(|v| *v /= length);
            }
        }

        vector
    }
}
