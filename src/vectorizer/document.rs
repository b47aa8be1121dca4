use std::fmt::{Display, Formatter};
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::vectorizer::{corpus::Corpus, preprocess::Preprocessor, term::TermFrequency, tfidf::{DefaultTFIDFEngine, TFIDFEngine}, FeatureVector};

/// Topic used for documents whose class is not known (test documents).
pub const UNKNOWN_TOPIC: &str = "Unknown";

/// Read access to a document as the classifier and the feature extractor see it.
///
/// `terms` is exactly the key set of the frequency mapping, and every
/// frequency of a contained term is positive.
pub trait Document {
    /// Distinct terms of the document, in no particular order
    fn terms(&self) -> impl Iterator<Item = &str>;

    /// Occurrences of `term` in the document, 0 if absent
    fn term_frequency(&self, term: &str) -> u64;

    /// Class label, `None` if the document carries none
    fn topic(&self) -> Option<&str>;

    /// Identifier of the origin (e.g. a URL), used for filtering only
    fn source(&self) -> &str;
}

/// A document implementation that indexes term frequencies.
///
/// Built once from text or tokens; afterwards only read.
/// The TF-IDF vector is computed on first request and cached for the
/// lifetime of the document. The cache is never invalidated when the corpus
/// grows; use [`FeatureVector::is_stale`] to detect that.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TermDocument {
    content: String,
    source: String,
    topic: Option<String>,
    terms: TermFrequency,
    #[serde(skip)]
    vector: OnceLock<FeatureVector>,
}

impl TermDocument {
    /// Preprocesses `content` with the default [`Preprocessor`]
    pub fn new(content: impl Into<String>, source: impl Into<String>, topic: Option<String>) -> Self {
        Self::with_preprocessor(&Preprocessor::default(), content, source, topic)
    }

    pub fn with_preprocessor(
        preprocessor: &Preprocessor,
        content: impl Into<String>,
        source: impl Into<String>,
        topic: Option<String>,
    ) -> Self {
        let content = content.into();
        let terms = preprocessor.process(&content).iter().collect();
        Self {
            content,
            source: source.into(),
            topic,
            terms,
            vector: OnceLock::new(),
        }
    }

    /// Document from already preprocessed tokens; the text is the tokens joined by spaces
    pub fn from_tokens<T>(tokens: &[T], source: impl Into<String>, topic: Option<String>) -> Self
    where
        T: AsRef<str>,
    {
        let content = tokens.iter().map(|t| t.as_ref()).collect::<Vec<_>>().join(" ");
        Self {
            content,
            source: source.into(),
            topic,
            terms: TermFrequency::from(tokens),
            vector: OnceLock::new(),
        }
    }

    /// Add one occurrence of `term`, for cascading construction
    pub fn add(mut self, term: &str) -> Self {
        self.terms.add_term(term);
        self.vector = OnceLock::new();
        self
    }

    /// The original text
    pub fn text(&self) -> &str {
        &self.content
    }

    pub fn term_freq(&self) -> &TermFrequency {
        &self.terms
    }

    /// TF-IDF representation of this document as part of `corpus`.
    ///
    /// Computed with [`DefaultTFIDFEngine`] on the first call; later calls
    /// return the cached vector even if `corpus` has changed since.
    pub fn vector<C>(&self, corpus: &C) -> Result<&FeatureVector>
    where
        C: Corpus + ?Sized,
    {
        if let Some(vector) = self.vector.get() {
            return Ok(vector);
        }
        let computed = <DefaultTFIDFEngine as TFIDFEngine<f64>>::feature_vector(self, corpus)?;
        Ok(self.vector.get_or_init(|| computed))
    }

    /// Whether a vector has been cached
    pub fn has_cached_vector(&self) -> bool {
        self.vector.get().is_some()
    }
}

impl Document for TermDocument {
    fn terms(&self) -> impl Iterator<Item = &str> {
        self.terms.term_set_iter()
    }

    fn term_frequency(&self, term: &str) -> u64 {
        self.terms.term_count(term)
    }

    fn topic(&self) -> Option<&str> {
        self.topic.as_deref()
    }

    fn source(&self) -> &str {
        &self.source
    }
}

impl Display for TermDocument {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "TermDocument of length {}", self.content.chars().count())
    }
}
