pub mod config;
pub mod evaluate;
pub mod naive_bayes;

use std::fmt::{Debug, Formatter};

use ahash::RandomState;
use indexmap::IndexMap;
use rayon::prelude::*;

use crate::classification::evaluate::Evaluation;
use crate::classification::naive_bayes::{FrozenNaiveBayes, NaiveBayes};
use crate::error::Result;
use crate::vectorizer::document::Document;

/// Read side of a classifier: assigns one label to a document.
/// The document's own topic is never consulted.
pub trait Classifier {
    /// # Errors
    /// * `NotTrained` - nothing has been trained yet
    fn classify<D>(&self, document: &D) -> Result<String>
    where
        D: Document + ?Sized;
}

/// A trainable classification strategy.
///
/// New strategies plug into [`TextClassifier`] without touching
/// [`Document`] or the corpus.
pub trait ClassifierStrategy: Classifier {
    /// Fold one labeled document into the statistics.
    /// # Errors
    /// * `MissingLabel` - the document has no topic
    fn train<D>(&mut self, document: &D) -> Result<&mut Self>
    where
        D: Document + ?Sized;
}

/// Predicted labels keyed by document identity.
///
/// Two documents with the same text are still two entries; lookups go by
/// the address of the document, so the documents must outlive the map.
/// Iterates in insertion order.
pub struct Predictions<'a, D> {
    labels: IndexMap<usize, (&'a D, String), RandomState>,
}

impl<'a, D> Predictions<'a, D> {
    pub fn new() -> Self {
        Self {
            labels: IndexMap::with_hasher(RandomState::new()),
        }
    }

    #[inline]
    fn key(document: &D) -> usize {
        document as *const D as usize
    }

    /// Record `label` for `document`, returning the previous label if any
    pub fn insert(&mut self, document: &'a D, label: String) -> Option<String> {
        self.labels
            .insert(Self::key(document), (document, label))
            .map(|(_, previous)| previous)
    }

    pub fn get(&self, document: &D) -> Option<&str> {
        self.labels
            .get(&Self::key(document))
            .map(|(_, label)| label.as_str())
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a D, &str)> + '_ {
        self.labels.values().map(|(doc, label)| (*doc, label.as_str()))
    }
}

impl<D> Default for Predictions<'_, D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, D> FromIterator<(&'a D, String)> for Predictions<'a, D> {
    fn from_iter<T: IntoIterator<Item = (&'a D, String)>>(iter: T) -> Self {
        let mut predictions = Self::new();
        for (document, label) in iter {
            predictions.insert(document, label);
        }
        predictions
    }
}

impl<D> Debug for Predictions<'_, D>
where
    D: Document,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_map()
            .entries(self.iter().map(|(doc, label)| (doc.source(), label)))
            .finish()
    }
}

/// Runs a classifier over document collections.
///
/// Built from a strategy and a training set; classifies whole test sets and
/// scores the predictions against gold labels.
#[derive(Debug, Clone)]
pub struct TextClassifier<C> {
    classifier: C,
}

impl<C> TextClassifier<C>
where
    C: ClassifierStrategy,
{
    /// Train `classifier` on every document of `training`, in order.
    /// Stops at the first document without a label.
    pub fn train<'a, D, I>(mut classifier: C, training: I) -> Result<Self>
    where
        D: Document + 'a,
        I: IntoIterator<Item = &'a D>,
    {
        let mut count = 0usize;
        for document in training {
            classifier.train(document)?;
            count += 1;
        }
        log::debug!("trained {} documents", count);
        Ok(Self { classifier })
    }
}

impl<C> TextClassifier<C>
where
    C: Classifier,
{
    /// Wrap an already trained classifier
    pub fn new(classifier: C) -> Self {
        Self { classifier }
    }

    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    pub fn into_inner(self) -> C {
        self.classifier
    }

    pub fn classify<D>(&self, document: &D) -> Result<String>
    where
        D: Document + ?Sized,
    {
        self.classifier.classify(document)
    }

    /// Classify every document of `documents` one after another
    pub fn classify_all<'a, D, I>(&self, documents: I) -> Result<Predictions<'a, D>>
    where
        D: Document + 'a,
        I: IntoIterator<Item = &'a D>,
    {
        let predictions = documents
            .into_iter()
            .map(|doc| self.classifier.classify(doc).map(|label| (doc, label)))
            .collect::<Result<Predictions<'a, D>>>()?;
        log::debug!("classified {} documents", predictions.len());
        Ok(predictions)
    }

    /// Parallel version of [`classify_all`](Self::classify_all).
    /// Predictions keep the order of `documents`.
    pub fn par_classify_all<'a, D, I>(&self, documents: I) -> Result<Predictions<'a, D>>
    where
        C: Sync,
        D: Document + Sync + 'a,
        I: IntoParallelIterator<Item = &'a D>,
    {
        let labeled: Vec<(&'a D, String)> = documents
            .into_par_iter()
            .map(|doc| self.classifier.classify(doc).map(|label| (doc, label)))
            .collect::<Result<Vec<_>>>()?;
        log::debug!("classified {} documents in parallel", labeled.len());
        Ok(labeled.into_iter().collect())
    }

    /// Accuracy of `predictions` against the topics of `gold`
    pub fn evaluate<'a, 'b, D, I>(&self, predictions: &Predictions<'a, D>, gold: I) -> Result<Evaluation>
    where
        D: Document + 'b,
        I: IntoIterator<Item = &'b D>,
    {
        Evaluation::compute(predictions, gold)
    }
}

impl TextClassifier<NaiveBayes> {
    /// Ends training, see [`NaiveBayes::freeze`]
    pub fn freeze(self) -> TextClassifier<FrozenNaiveBayes> {
        TextClassifier {
            classifier: self.classifier.freeze(),
        }
    }
}
