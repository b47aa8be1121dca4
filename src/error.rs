//! Errors raised by the classifier, the feature extractor and the evaluator.

/// Crate result type.
pub type Result<T, E = ClassifierError> = core::result::Result<T, E>;

/// Errors for training, classification and evaluation.
///
/// All of them are caller contract violations: they are returned at the
/// offending call and never retried.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ClassifierError {
    /// `classify` was called before any document was trained.
    #[error("classifier has not been trained")]
    NotTrained,
    /// `train` was called with a document without a topic label.
    #[error("training document from '{origin}' has no topic label")]
    MissingLabel {
        /// Source identifier of the offending document.
        origin: String,
    },
    /// `evaluate` was called with an empty gold collection.
    #[error("gold set is empty, accuracy is undefined")]
    EmptyGoldSet,
    /// A dictionary term has a document frequency of zero.
    #[error("corpus is inconsistent: dictionary term '{term}' has document frequency 0")]
    InconsistentCorpus {
        /// The term without document frequency.
        term: String,
    },
}
