pub mod corpus;
pub mod document;
pub mod preprocess;
pub mod serde;
pub mod term;
pub mod tfidf;

use ::serde::{Deserialize, Serialize};
use num::Float;

use crate::vectorizer::corpus::Corpus;

/// Dense TF-IDF vector of one document
/// One weight per dictionary term, in dictionary order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector<N = f64>
where
    N: Float,
{
    /// weights, length == dictionary size at computation time
    values: Vec<N>,
    /// document count of the corpus at computation time
    doc_num: usize,
}

impl<N> FeatureVector<N>
where
    N: Float,
{
    pub fn new(values: Vec<N>, doc_num: usize) -> Self {
        Self { values, doc_num }
    }

    pub fn values(&self) -> &[N] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of documents the idf values were computed from
    pub fn doc_num(&self) -> usize {
        self.doc_num
    }

    /// The vector no longer matches `corpus`:
    /// its dictionary or its document count changed since computation.
    /// Cached vectors are never recomputed; callers that need fresh values
    /// compute a new vector with the engine.
    pub fn is_stale<C>(&self, corpus: &C) -> bool
    where
        C: Corpus + ?Sized,
    {
        self.values.len() != corpus.dictionary_len() || self.doc_num != corpus.number_of_documents()
    }

    /// Sparse view for adapters that want `(index, value)` pairs, 1-based, zeros skipped
    pub fn sparse_features(&self) -> Vec<(u32, N)> {
        self.values
            .iter()
            .enumerate()
            .filter(|(_, v)| !v.is_zero())
            .map(|(idx, v)| (idx as u32 + 1, *v))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vectorizer::{corpus::DocumentIndex, document::TermDocument};

    #[test]
    fn staleness_follows_dictionary_and_doc_count() {
        let mut corpus = DocumentIndex::new();
        corpus.add(TermDocument::new("a b", "mem://1", None));
        let vector = FeatureVector::<f64>::new(vec![0.0, 0.0], 1);
        assert!(!vector.is_stale(&corpus));

        // same dictionary, more documents
        corpus.add(TermDocument::new("a", "mem://2", None));
        assert!(vector.is_stale(&corpus));

        let refreshed = FeatureVector::<f64>::new(vec![0.0, 0.0], 2);
        assert!(!refreshed.is_stale(&corpus));
        corpus.add(TermDocument::new("c", "mem://3", None));
        assert!(refreshed.is_stale(&corpus));
    }

    #[test]
    fn sparse_features_skip_zeros() {
        let vector = FeatureVector::new(vec![0.0f32, 1.5, 0.0, 2.0], 3);
        assert_eq!(vector.sparse_features(), vec![(2, 1.5), (4, 2.0)]);
        assert_eq!(vector.doc_num(), 3);
    }
}
