/// This crate is a text classification engine: Naive Bayes over a term-frequency corpus index,
/// with a TF-IDF feature extractor on the side.
pub mod classification;
pub mod error;
pub mod vectorizer;

/// Naive Bayes Classifier
/// Multinomial Naive Bayes over the term frequencies of labeled documents.
/// Training accumulates, per class:
/// - The number of training documents
/// - The cumulative frequency of every term
///
/// Classification picks the class maximizing `ln P(c) + Σ ln P(t | c)` over
/// the distinct terms of the document. Terms a class never saw make its score
/// `-inf` unless add-one smoothing is configured.
///
/// `freeze` turns a trained classifier into `FrozenNaiveBayes`, an immutable
/// model that can be classified from many threads at once.
///
/// # Serialization
/// Supported. `FrozenNaiveBayes` serializes as the `NaiveBayes` it came from.
pub use classification::naive_bayes::{FrozenNaiveBayes, NaiveBayes};

/// Naive Bayes Settings
/// `ZeroFrequency` decides how terms unseen by a class are scored:
/// - NegativeInfinity: the class is ruled out (default)
/// - AddOne: Laplace smoothing over the class vocabulary
pub use classification::config::{NaiveBayesConfig, ZeroFrequency};

/// Classifier Traits
/// `Classifier` labels documents, `ClassifierStrategy` additionally trains.
/// Any strategy implementing them can be driven by `TextClassifier`.
pub use classification::{Classifier, ClassifierStrategy};

/// Text Classifier Harness
/// Trains a strategy on a document collection, classifies whole test sets
/// (sequentially or with rayon) into `Predictions`, and evaluates them.
pub use classification::{Predictions, TextClassifier};

/// Evaluation
/// Accuracy of predictions against the gold topics of the documents.
pub use classification::evaluate::{evaluate, Evaluation};

/// Corpus for Classification and TF-IDF
/// `Corpus` is the capability the classifier and the extractor rely on.
/// `DocumentIndex` is the in-memory implementation. It manages:
/// - The documents, in insertion order
/// - The sorted dictionary of all terms
/// - The number of documents in which each term appears
///
/// # Serialization
/// Only the documents are stored; the index is rebuilt on deserialization.
pub use vectorizer::corpus::{Corpus, DocumentIndex};

/// Documents
/// `Document` is the read capability (terms, frequencies, topic, source).
/// `TermDocument` builds one from text or tokens and caches its TF-IDF vector.
pub use vectorizer::document::{Document, TermDocument, UNKNOWN_TOPIC};

/// Term Frequency structure
/// Manages the count of occurrences of each term and the total number of terms.
pub use vectorizer::term::TermFrequency;

/// Text Preprocessor
/// Unicode word segmentation, lowercasing, minimum length and stop words.
pub use vectorizer::preprocess::Preprocessor;

/// TF IDF Calculation Engine Trait
/// By implementing this trait, you can plug different TF-IDF weightings.
/// `DefaultTFIDFEngine` computes `tf * ln(N / df)` for `f32` and `f64`.
pub use vectorizer::tfidf::{DefaultTFIDFEngine, TFIDFEngine};

/// Dense TF-IDF vector over the corpus dictionary
pub use vectorizer::FeatureVector;

/// Errors and Result alias
pub use error::{ClassifierError, Result};
