use std::collections::HashSet;

use ahash::RandomState;
use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

/// Turns raw text into normalized tokens.
///
/// Splits on Unicode word boundaries, lowercases (by default),
/// drops tokens shorter than `min_len` characters and stop words.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Preprocessor {
    lowercase: bool,
    min_len: usize,
    stop_words: HashSet<String, RandomState>,
}

impl Default for Preprocessor {
    fn default() -> Self {
        Self::new()
    }
}

impl Preprocessor {
    /// Lowercasing, no length limit, no stop words
    pub fn new() -> Self {
        Self {
            lowercase: true,
            min_len: 1,
            stop_words: HashSet::with_hasher(RandomState::new()),
        }
    }

    pub fn with_lowercase(mut self, lowercase: bool) -> Self {
        self.lowercase = lowercase;
        self
    }

    /// Tokens with fewer chars are dropped
    pub fn with_min_len(mut self, min_len: usize) -> Self {
        self.min_len = min_len;
        self
    }

    /// Stop words are compared after normalization
    pub fn with_stop_words<I, S>(mut self, stop_words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let lowercase = self.lowercase;
        self.stop_words.extend(stop_words.into_iter().map(|w| {
            if lowercase {
                w.as_ref().to_lowercase()
            } else {
                w.as_ref().to_string()
            }
        }));
        self
    }

    /// Preprocesses a text
    pub fn process(&self, text: &str) -> Vec<String> {
        text.unicode_words()
            .map(|word| {
                if self.lowercase {
                    word.to_lowercase()
                } else {
                    word.to_string()
                }
            })
            .filter(|word| word.chars().count() >= self.min_len)
            .filter(|word| !self.stop_words.contains(word))
            .collect()
    }
}
