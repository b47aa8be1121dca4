use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::classification::{config::NaiveBayesConfig, Classifier, ClassifierStrategy};
use crate::error::{ClassifierError, Result};
use crate::vectorizer::{document::Document, term::TermFrequency};

/// Training statistics of one class
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct ClassStatistics {
    /// number of training documents with this label
    documents: u64,
    /// cumulative term frequencies over those documents
    terms: TermFrequency,
}

/// Accumulated class statistics.
/// Classes iterate in the order they were first trained.
/// `document_count` is derived data and is recounted on deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "ClassModelData")]
struct ClassModel {
    document_count: u64,
    #[serde(with = "indexmap::map::serde_seq")]
    classes: IndexMap<String, ClassStatistics>,
}

/// Stored form of [`ClassModel`]; a stored `document_count` is ignored.
#[derive(Deserialize)]
struct ClassModelData {
    #[serde(with = "indexmap::map::serde_seq")]
    classes: IndexMap<String, ClassStatistics>,
}

impl From<ClassModelData> for ClassModel {
    fn from(mut value: ClassModelData) -> Self {
        // a class without training documents cannot come out of `train`
        value.classes.retain(|_, stats| stats.documents > 0);
        let document_count = value.classes.values().map(|stats| stats.documents).sum();
        Self {
            document_count,
            classes: value.classes,
        }
    }
}

impl ClassModel {
    fn add<D>(&mut self, label: &str, document: &D)
    where
        D: Document + ?Sized,
    {
        self.document_count += 1;
        if !self.classes.contains_key(label) {
            self.classes.insert(label.to_string(), ClassStatistics::default());
        }
        if let Some(stats) = self.classes.get_mut(label) {
            stats.documents += 1;
            for term in document.terms() {
                stats.terms.add_term_count(term, document.term_frequency(term));
            }
        }
    }

    #[inline]
    fn log_prior(&self, stats: &ClassStatistics) -> f64 {
        (stats.documents as f64 / self.document_count as f64).ln()
    }

    /// Per-class `prior + evidence`, in class order.
    /// `prior_of` supplies the log prior of the class at a given index.
    fn scores<D, F>(&self, config: &NaiveBayesConfig, document: &D, prior_of: F) -> Result<Vec<(&str, f64)>>
    where
        D: Document + ?Sized,
        F: Fn(usize, &ClassStatistics) -> f64,
    {
        if self.classes.is_empty() {
            return Err(ClassifierError::NotTrained);
        }
        Ok(self
            .classes
            .iter()
            .enumerate()
            .map(|(idx, (label, stats))| {
                let evidence: f64 = document
                    .terms()
                    .map(|term| config.zero_frequency.log_likelihood(&stats.terms, term))
                    .sum();
                (label.as_str(), prior_of(idx, stats) + evidence)
            })
            .collect())
    }
}

/// Maximum score with `>=`: the last class reaching the maximum wins.
/// With every score at `-inf` that is the last class.
fn best_label<'a>(scores: &[(&'a str, f64)]) -> Option<&'a str> {
    let mut max = f64::NEG_INFINITY;
    let mut best = None;
    for &(label, score) in scores {
        if score >= max {
            max = score;
            best = Some(label);
        }
    }
    if max == f64::NEG_INFINITY && best.is_some() {
        log::warn!("every class scored -inf, falling back to the last class {:?}", best);
    }
    best
}

/// Naive bayes classifier strategy to use for text classification.
///
/// Multinomial bag-of-words model over the term frequencies the documents
/// expose. `score(c) = ln P(c) + Σ ln P(t | c)` over the distinct terms of the
/// document, with `P(t | c)` the relative frequency of `t` in the training
/// text of `c`, unsmoothed unless [`NaiveBayesConfig`] says otherwise.
///
/// Training needs `&mut self` and classification `&self`, so all training
/// happens before any classification reads the statistics. [`freeze`](Self::freeze)
/// turns the classifier into an immutable model for concurrent use.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NaiveBayes {
    #[serde(default)]
    config: NaiveBayesConfig,
    model: ClassModel,
}

impl NaiveBayes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: NaiveBayesConfig) -> Self {
        Self {
            config,
            model: ClassModel::default(),
        }
    }

    pub fn config(&self) -> &NaiveBayesConfig {
        &self.config
    }

    /// Total number of trained documents
    pub fn document_count(&self) -> u64 {
        self.model.document_count
    }

    /// Number of training documents labeled `class`, 0 if unknown
    pub fn class_frequency(&self, class: &str) -> u64 {
        self.model.classes.get(class).map_or(0, |stats| stats.documents)
    }

    /// Cumulative frequency of `term` in the training text of `class`
    pub fn class_term_frequency(&self, class: &str, term: &str) -> u64 {
        self.model.classes.get(class).map_or(0, |stats| stats.terms.term_count(term))
    }

    /// Known classes in iteration (first-trained) order
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.model.classes.keys().map(|s| s.as_str())
    }

    /// `ln(class_frequency / document_count)`, `None` for unknown classes
    pub fn log_prior(&self, class: &str) -> Option<f64> {
        self.model.classes.get(class).map(|stats| self.model.log_prior(stats))
    }

    /// `prior + evidence` for every class, in iteration order
    pub fn scores<D>(&self, document: &D) -> Result<Vec<(&str, f64)>>
    where
        D: Document + ?Sized,
    {
        self.model
            .scores(&self.config, document, |_, stats| self.model.log_prior(stats))
    }

    /// Ends training. The frozen model precomputes the log priors and is
    /// `Send + Sync`, so it can be shared and classified from many threads.
    pub fn freeze(self) -> FrozenNaiveBayes {
        FrozenNaiveBayes::from(self)
    }
}

impl Classifier for NaiveBayes {
    fn classify<D>(&self, document: &D) -> Result<String>
    where
        D: Document + ?Sized,
    {
        let scores = self.scores(document)?;
        best_label(&scores)
            .map(str::to_string)
            .ok_or(ClassifierError::NotTrained)
    }
}

impl ClassifierStrategy for NaiveBayes {
    fn train<D>(&mut self, document: &D) -> Result<&mut Self>
    where
        D: Document + ?Sized,
    {
        let label = document.topic().ok_or_else(|| ClassifierError::MissingLabel {
            origin: document.source().to_string(),
        })?;
        self.model.add(label, document);
        log::trace!("trained document from {} as {}", document.source(), label);
        Ok(self)
    }
}

/// Immutable Naive Bayes model produced by [`NaiveBayes::freeze`].
/// Serializes as the [`NaiveBayes`] it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "NaiveBayes", into = "NaiveBayes")]
pub struct FrozenNaiveBayes {
    config: NaiveBayesConfig,
    model: ClassModel,
    /// aligned with the class order of `model`
    log_priors: Vec<f64>,
}

impl From<NaiveBayes> for FrozenNaiveBayes {
    fn from(value: NaiveBayes) -> Self {
        let log_priors = value
            .model
            .classes
            .values()
            .map(|stats| value.model.log_prior(stats))
            .collect();
        Self {
            config: value.config,
            model: value.model,
            log_priors,
        }
    }
}

impl From<FrozenNaiveBayes> for NaiveBayes {
    fn from(value: FrozenNaiveBayes) -> Self {
        Self {
            config: value.config,
            model: value.model,
        }
    }
}

impl FrozenNaiveBayes {
    pub fn document_count(&self) -> u64 {
        self.model.document_count
    }

    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.model.classes.keys().map(|s| s.as_str())
    }

    pub fn log_prior(&self, class: &str) -> Option<f64> {
        self.model
            .classes
            .get_index_of(class)
            .map(|idx| self.log_priors[idx])
    }

    pub fn scores<D>(&self, document: &D) -> Result<Vec<(&str, f64)>>
    where
        D: Document + ?Sized,
    {
        self.model
            .scores(&self.config, document, |idx, _| self.log_priors[idx])
    }

    /// Back to a trainable classifier
    pub fn thaw(self) -> NaiveBayes {
        NaiveBayes::from(self)
    }
}

impl Classifier for FrozenNaiveBayes {
    fn classify<D>(&self, document: &D) -> Result<String>
    where
        D: Document + ?Sized,
    {
        let scores = self.scores(document)?;
        best_label(&scores)
            .map(str::to_string)
            .ok_or(ClassifierError::NotTrained)
    }
}
