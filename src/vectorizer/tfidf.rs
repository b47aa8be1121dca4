use num::Float;

use crate::error::{ClassifierError, Result};
use crate::vectorizer::{corpus::Corpus, document::Document, FeatureVector};

pub trait TFIDFEngine<N>
where
    N: Float,
{
    /// IDF of a single dictionary term
    /// # Arguments
    /// * `corpus` - corpus providing the document frequencies
    /// * `term` - a term of the corpus dictionary
    /// # Errors
    /// * `InconsistentCorpus` - the term is in the dictionary with document frequency 0
    fn idf<C>(corpus: &C, term: &str) -> Result<N>
    where
        C: Corpus + ?Sized;

    /// Weight of a term given its frequency in the document and its idf
    fn weight(term_frequency: u64, idf: N) -> N;

    /// Dense vector over the dictionary of `corpus`, in dictionary order
    fn feature_vector<D, C>(doc: &D, corpus: &C) -> Result<FeatureVector<N>>
    where
        D: Document + ?Sized,
        C: Corpus + ?Sized,
    {
        let mut values = Vec::with_capacity(corpus.dictionary_len());
        for term in corpus.terms() {
            let idf = Self::idf(corpus, term)?;
            values.push(Self::weight(doc.term_frequency(term), idf));
        }
        Ok(FeatureVector::new(values, corpus.number_of_documents()))
    }
}

/// デフォルトのTF-IDFエンジン
/// 生の出現回数で `tf * ln(N / df)` を計算します
/// `f32`、`f64`の型に対応
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultTFIDFEngine;

impl DefaultTFIDFEngine {
    #[inline]
    fn raw_idf<C>(corpus: &C, term: &str) -> Result<f64>
    where
        C: Corpus + ?Sized,
    {
        let doc_freq = corpus.document_frequency(term);
        if doc_freq == 0 {
            return Err(ClassifierError::InconsistentCorpus { term: term.to_string() });
        }
        Ok((corpus.number_of_documents() as f64 / doc_freq as f64).ln())
    }
}

impl TFIDFEngine<f32> for DefaultTFIDFEngine
{
    fn idf<C>(corpus: &C, term: &str) -> Result<f32>
    where
        C: Corpus + ?Sized,
    {
        Self::raw_idf(corpus, term).map(|idf| idf as f32)
    }

    fn weight(term_frequency: u64, idf: f32) -> f32 {
        term_frequency as f32 * idf
    }
}

impl TFIDFEngine<f64> for DefaultTFIDFEngine
{
    fn idf<C>(corpus: &C, term: &str) -> Result<f64>
    where
        C: Corpus + ?Sized,
    {
        Self::raw_idf(corpus, term)
    }

    fn weight(term_frequency: u64, idf: f64) -> f64 {
        term_frequency as f64 * idf
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vectorizer::{corpus::DocumentIndex, document::TermDocument};

    /// A corpus whose dictionary claims a term no document contains.
    struct BrokenCorpus {
        docs: Vec<TermDocument>,
    }

    impl Corpus for BrokenCorpus {
        type Doc = TermDocument;
        fn documents(&self) -> &[TermDocument] { &self.docs }
        fn document_frequency(&self, _term: &str) -> u64 { 0 }
        fn number_of_documents(&self) -> usize { self.docs.len() }
        fn terms(&self) -> impl Iterator<Item = &str> { ["phantom"].into_iter() }
        fn dictionary_len(&self) -> usize { 1 }
        fn add(&mut self, document: TermDocument) { self.docs.push(document); }
    }

    fn corpus() -> DocumentIndex {
        DocumentIndex::from_documents([
            TermDocument::new("a b", "mem://1", None),
            TermDocument::new("b c", "mem://2", None),
            TermDocument::new("b c c", "mem://3", None),
            TermDocument::new("d", "mem://4", None),
        ])
    }

    #[test]
    fn weights_follow_tf_times_log_idf() {
        let corpus = corpus();
        let probe = TermDocument::new("a c c x", "mem://probe", None);
        let vector: FeatureVector<f64> = DefaultTFIDFEngine::feature_vector(&probe, &corpus).unwrap();

        // dictionary order: a b c d
        let expected = [
            1.0 * (4.0f64 / 1.0).ln(),
            0.0,
            2.0 * (4.0f64 / 2.0).ln(),
            0.0,
        ];
        assert_eq!(vector.len(), 4);
        for (got, want) in vector.values().iter().zip(expected) {
            assert!((got - want).abs() < 1e-12, "{got} != {want}");
        }
    }

    #[test]
    fn term_in_every_document_weighs_zero() {
        let corpus = DocumentIndex::from_documents([
            TermDocument::new("a", "mem://1", None),
            TermDocument::new("a b", "mem://2", None),
        ]);
        let probe = TermDocument::new("a a a", "mem://probe", None);
        let vector: FeatureVector<f32> = DefaultTFIDFEngine::feature_vector(&probe, &corpus).unwrap();
        assert_eq!(vector.values()[0], 0.0);
    }

    #[test]
    fn f32_and_f64_agree() {
        let corpus = corpus();
        let probe = TermDocument::new("b d d", "mem://probe", None);
        let wide: FeatureVector<f64> = DefaultTFIDFEngine::feature_vector(&probe, &corpus).unwrap();
        let narrow: FeatureVector<f32> = DefaultTFIDFEngine::feature_vector(&probe, &corpus).unwrap();
        for (w, n) in wide.values().iter().zip(narrow.values()) {
            assert!((*w as f32 - n).abs() < 1e-5);
        }
    }

    #[test]
    fn zero_document_frequency_is_reported() {
        let broken = BrokenCorpus { docs: vec![TermDocument::new("a", "mem://1", None)] };
        let probe = TermDocument::new("a", "mem://probe", None);
        let result: Result<FeatureVector<f64>> = DefaultTFIDFEngine::feature_vector(&probe, &broken);
        assert_eq!(
            result.unwrap_err(),
            ClassifierError::InconsistentCorpus { term: "phantom".to_string() }
        );
    }

    #[test]
    fn empty_corpus_gives_empty_vector() {
        let corpus: DocumentIndex = DocumentIndex::new();
        let probe = TermDocument::new("a", "mem://probe", None);
        let vector: FeatureVector<f64> = DefaultTFIDFEngine::feature_vector(&probe, &corpus).unwrap();
        assert!(vector.is_empty());
    }
}
