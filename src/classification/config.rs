use serde::{Deserialize, Serialize};

use crate::vectorizer::term::TermFrequency;

/// How a term that never occurred in a class's training text is scored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZeroFrequency {
    /// Unseen terms contribute `-inf`: a single unseen term rules the class out.
    ///
    /// Under add-one smoothing, classes with very little training text collect
    /// the unseen-term minimum for almost every term of a long document and win
    /// far too often.
    #[default]
    NegativeInfinity,
    /// Laplace smoothing over the class vocabulary:
    /// `(tf + 1) / (sum + |V_c|)`, unseen terms `1 / (sum + |V_c|)`.
    /// A class with an empty vocabulary scores `-inf`.
    AddOne,
}

impl ZeroFrequency {
    /// `ln P(term | class)` given the class's accumulated term counts
    #[inline]
    pub fn log_likelihood(&self, class_terms: &TermFrequency, term: &str) -> f64 {
        match self {
            ZeroFrequency::NegativeInfinity => match class_terms.get(term) {
                Some(tf) => (tf as f64 / class_terms.term_sum() as f64).ln(),
                None => f64::NEG_INFINITY,
            },
            ZeroFrequency::AddOne => {
                // a class without any training term has no distribution to smooth
                if class_terms.is_empty() {
                    return f64::NEG_INFINITY;
                }
                let denominator = class_terms.term_sum() as f64 + class_terms.term_num() as f64;
                ((class_terms.term_count(term) + 1) as f64 / denominator).ln()
            }
        }
    }
}

/// Naive Bayes settings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NaiveBayesConfig {
    pub zero_frequency: ZeroFrequency,
}

impl NaiveBayesConfig {
    pub fn with_zero_frequency(mut self, zero_frequency: ZeroFrequency) -> Self {
        self.zero_frequency = zero_frequency;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn class_terms() -> TermFrequency {
        TermFrequency::from(&["x", "x", "y"][..])
    }

    #[test]
    fn unsmoothed_is_relative_frequency() {
        let terms = class_terms();
        let ll = ZeroFrequency::NegativeInfinity.log_likelihood(&terms, "x");
        assert!((ll - (2.0f64 / 3.0).ln()).abs() < 1e-12);
        assert_eq!(ZeroFrequency::NegativeInfinity.log_likelihood(&terms, "z"), f64::NEG_INFINITY);
    }

    #[test]
    fn add_one_never_reaches_negative_infinity() {
        let terms = class_terms();
        // sum 3, vocabulary 2
        let seen = ZeroFrequency::AddOne.log_likelihood(&terms, "x");
        let unseen = ZeroFrequency::AddOne.log_likelihood(&terms, "z");
        assert!((seen - (3.0f64 / 5.0).ln()).abs() < 1e-12);
        assert!((unseen - (1.0f64 / 5.0).ln()).abs() < 1e-12);
    }

    #[test]
    fn add_one_on_empty_vocabulary_is_negative_infinity() {
        let empty = TermFrequency::new();
        assert_eq!(ZeroFrequency::AddOne.log_likelihood(&empty, "x"), f64::NEG_INFINITY);
        assert_eq!(ZeroFrequency::NegativeInfinity.log_likelihood(&empty, "x"), f64::NEG_INFINITY);
    }

    #[test]
    fn default_config_is_unsmoothed_and_deserializes_from_empty() {
        assert_eq!(NaiveBayesConfig::default().zero_frequency, ZeroFrequency::NegativeInfinity);
        let parsed: NaiveBayesConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed, NaiveBayesConfig::default());
        let smoothed: NaiveBayesConfig = serde_json::from_str(r#"{"zero_frequency":"add_one"}"#).unwrap();
        assert_eq!(smoothed, NaiveBayesConfig::default().with_zero_frequency(ZeroFrequency::AddOne));
    }
}
