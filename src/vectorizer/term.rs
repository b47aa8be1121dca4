use std::collections::HashMap;
use ahash::RandomState;
use serde::{Deserialize, Serialize};


/// TermFrequency struct
/// Multiset of terms: how often each term occurred.
/// Backs both a single document and the per-class totals of the classifier.
///
/// # Examples
/// ```
/// use tf_idf_classifier::TermFrequency;
/// let mut term_freq = TermFrequency::new();
/// term_freq.add_term("term1");
/// term_freq.add_term("term2");
/// term_freq.add_term("term1");
///
/// assert_eq!(term_freq.term_count("term1"), 2);
/// assert_eq!(term_freq.term_sum(), 3);
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(from = "TermFrequencyData")]
pub struct TermFrequency {
    term_count: HashMap<String, u64, RandomState>,
    total_term_count: u64,
}

/// デシリアライズ用のデータ構造
/// 合計は保存値を使わず、各単語の出現回数から再計算します。
#[derive(Deserialize)]
struct TermFrequencyData {
    term_count: HashMap<String, u64, RandomState>,
}

impl From<TermFrequencyData> for TermFrequency {
    fn from(mut value: TermFrequencyData) -> Self {
        value.term_count.retain(|_, count| *count > 0);
        let total_term_count = value.term_count.values().sum();
        TermFrequency {
            term_count: value.term_count,
            total_term_count,
        }
    }
}

/// Implementation for adding terms
impl TermFrequency {
    /// Create a new TermFrequency
    pub fn new() -> Self {
        TermFrequency {
            term_count: HashMap::with_hasher(RandomState::new()),
            total_term_count: 0,
        }
    }

    /// Add a term
    ///
    /// # Arguments
    /// * `term` - term to add
    #[inline]
    pub fn add_term(&mut self, term: &str) -> &mut Self {
        self.add_term_count(term, 1)
    }

    /// Add multiple terms
    ///
    /// # Arguments
    /// * `terms` - Slice of terms to add
    #[inline]
    pub fn add_terms<T>(&mut self, terms: &[T]) -> &mut Self
    where T: AsRef<str>
    {
        for term in terms {
            self.add_term(term.as_ref());
        }
        self
    }

    /// Add `count` occurrences of a term
    /// A count of 0 is ignored, so every stored count stays positive.
    ///
    /// # Arguments
    /// * `term` - term
    /// * `count` - occurrences to add
    #[inline]
    pub fn add_term_count(&mut self, term: &str, count: u64) -> &mut Self {
        if count == 0 {
            return self;
        }
        match self.term_count.get_mut(term) {
            Some(current) => *current += count,
            None => {
                self.term_count.insert(term.to_string(), count);
            }
        }
        self.total_term_count += count;
        self
    }

    /// Merge with another TermFrequency
    /// # Arguments
    /// * `other` - Another TermFrequency to merge with
    pub fn add_terms_from_freq(&mut self, other: &TermFrequency) -> &mut Self {
        for (term, &count) in &other.term_count {
            self.add_term_count(term, count);
        }
        self
    }
}

impl<T> From<&[T]> for TermFrequency
where
    T: AsRef<str>,
{
    fn from(terms: &[T]) -> Self {
        let mut tf = TermFrequency::new();
        tf.add_terms(terms);
        tf
    }
}

impl<S> FromIterator<S> for TermFrequency
where
    S: AsRef<str>,
{
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut tf = TermFrequency::new();
        for term in iter {
            tf.add_term(term.as_ref());
        }
        tf
    }
}

/// Implementation for retrieving information from TermFrequency
impl TermFrequency {
    /// Get iterator over all terms and their counts
    ///
    /// # Returns
    /// * `impl Iterator<Item=(&str, u64)>` - Iterator over terms and their counts
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item=(&str, u64)> {
        self.term_count.iter().map(|(term, &count)| {
            (term.as_str(), count)
        })
    }

    /// Get the total count of all terms
    ///
    /// # Returns
    /// * `u64` - Total term count
    #[inline]
    pub fn term_sum(&self) -> u64 {
        self.total_term_count
    }

    /// Get the occurrence count for a specific term
    ///
    /// # Arguments
    /// * `term` - term
    ///
    /// # Returns
    /// * `u64` - Occurrence count for the term, 0 if never seen
    #[inline]
    pub fn term_count(&self, term: &str) -> u64 {
        *self.term_count.get(term).unwrap_or(&0)
    }

    /// Occurrence count for a term, `None` if never seen
    #[inline]
    pub fn get(&self, term: &str) -> Option<u64> {
        self.term_count.get(term).copied()
    }

    /// Check if a term exists
    #[inline]
    pub fn contains_term(&self, term: &str) -> bool {
        self.term_count.contains_key(term)
    }

    /// term_set_iter
    ///
    /// # Returns
    /// * `impl Iterator<Item=&str>` - Iterator over the set of terms
    #[inline]
    pub fn term_set_iter(&self) -> impl Iterator<Item=&str> {
        self.term_count.keys().map(|s| s.as_str())
    }

    /// Get the set of terms
    ///
    /// # Returns
    /// * `Vec<String>` - Set of terms
    #[inline]
    pub fn term_set(&self) -> Vec<String> {
        self.term_count.keys().cloned().collect()
    }

    /// Get the number of unique terms
    ///
    /// # Returns
    /// * `usize` - Number of unique terms
    #[inline]
    pub fn term_num(&self) -> usize {
        self.term_count.len()
    }

    /// Check if no term was added
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.term_count.is_empty()
    }

    /// Get a vector of terms sorted by dictionary order (ascending)
    ///
    /// # Returns
    /// * `Vec<(String, u64)>` - Vector of terms sorted by dictionary order
    #[inline]
    pub fn sorted_dict_order_vector(&self) -> Vec<(String, u64)> {
        let mut term_list: Vec<(String, u64)> = self.term_count
            .iter()
            .map(|(term, &count)| (term.clone(), count))
            .collect();

        term_list.sort_by(|a, b| a.0.cmp(&b.0));
        term_list
    }

    /// Get the probability P(term) for a specific term
    /// Returns 0.0 if total is 0
    #[inline]
    pub fn probability(&self, term: &str) -> f64 {
        if self.total_term_count == 0 {
            return 0.0;
        }
        (self.term_count(term) as f64) / (self.total_term_count as f64)
    }
}
