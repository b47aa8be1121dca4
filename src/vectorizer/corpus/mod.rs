use std::collections::{BTreeSet, HashMap};
use ahash::RandomState;

use crate::vectorizer::document::{Document, TermDocument};

/// Access to a collection of documents and their document frequencies.
///
/// The classifier and the TF-IDF extractor only talk to this trait, so any
/// storage behind it can be swapped without touching them.
pub trait Corpus {
    type Doc: Document;

    /// All documents in insertion order
    fn documents(&self) -> &[Self::Doc];

    /// Number of documents containing `term` at least once
    fn document_frequency(&self, term: &str) -> u64;

    /// Total number of documents
    fn number_of_documents(&self) -> usize;

    /// The dictionary in lexicographic order
    fn terms(&self) -> impl Iterator<Item = &str>;

    /// Size of the dictionary
    fn dictionary_len(&self) -> usize;

    /// Append a document and account for its terms
    fn add(&mut self, document: Self::Doc);

    /// Sequential `add`, in order
    fn add_all<I>(&mut self, documents: I)
    where
        I: IntoIterator<Item = Self::Doc>,
    {
        for document in documents {
            self.add(document);
        }
    }

    /// Documents whose source contains `query` (case-sensitive)
    fn documents_for_source(&self, query: &str) -> Vec<&Self::Doc> {
        self.documents()
            .iter()
            .filter(|doc| doc.source().contains(query))
            .collect()
    }

    /// Documents whose topic contains `query` (case-sensitive)
    fn documents_for_topic(&self, query: &str) -> Vec<&Self::Doc> {
        self.documents()
            .iter()
            .filter(|doc| doc.topic().is_some_and(|topic| topic.contains(query)))
            .collect()
    }

    /// Attach backing storage. Nothing to do in memory.
    fn open(&mut self) {}

    /// Detach backing storage. Nothing to do in memory.
    fn close(&mut self) {}
}

/// In-memory corpus indexing terms.
/// Keeps the documents, the sorted dictionary and the document frequency of
/// every term. Append-only.
#[derive(Debug, Clone)]
pub struct DocumentIndex<D = TermDocument> {
    pub(crate) docs: Vec<D>,
    dictionary: BTreeSet<String>,
    document_frequencies: HashMap<String, u64, RandomState>,
}

impl<D> Default for DocumentIndex<D> {
    fn default() -> Self {
        Self {
            docs: Vec::new(),
            dictionary: BTreeSet::new(),
            document_frequencies: HashMap::with_hasher(RandomState::new()),
        }
    }
}

impl<D> DocumentIndex<D>
where
    D: Document,
{
    /// Create a new empty instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index over `docs`, in order
    pub fn from_documents<I>(docs: I) -> Self
    where
        I: IntoIterator<Item = D>,
    {
        let mut index = Self::new();
        index.add_all(docs);
        index
    }

    /// Total term occurrences over all documents
    pub fn term_occurrences(&self) -> u64 {
        self.docs
            .iter()
            .map(|doc| doc.terms().map(|t| doc.term_frequency(t)).sum::<u64>())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }
}

impl<D> Corpus for DocumentIndex<D>
where
    D: Document,
{
    type Doc = D;

    fn documents(&self) -> &[D] {
        &self.docs
    }

    fn document_frequency(&self, term: &str) -> u64 {
        self.document_frequencies.get(term).copied().unwrap_or(0)
    }

    fn number_of_documents(&self) -> usize {
        self.docs.len()
    }

    fn terms(&self) -> impl Iterator<Item = &str> {
        self.dictionary.iter().map(|s| s.as_str())
    }

    fn dictionary_len(&self) -> usize {
        self.dictionary.len()
    }

    fn add(&mut self, document: D) {
        for term in document.terms() {
            match self.document_frequencies.get_mut(term) {
                Some(count) => *count += 1,
                None => {
                    self.document_frequencies.insert(term.to_string(), 1);
                    self.dictionary.insert(term.to_string());
                }
            }
        }
        self.docs.push(document);
        log::trace!("corpus now holds {} documents, {} terms", self.docs.len(), self.dictionary.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(text: &str, source: &str, topic: &str) -> TermDocument {
        TermDocument::new(text, source, Some(topic.to_string()))
    }

    fn sample() -> DocumentIndex {
        DocumentIndex::from_documents([
            doc("win the game the game", "http://www.spiegel.de/sport/1", "sport"),
            doc("the vote on the law", "http://www.welt.de/politik/2", "politik"),
            doc("game law", "http://www.spiegel.de/politik/3", "politik-ausland"),
        ])
    }

    #[test]
    fn document_frequency_counts_presence_not_occurrence() {
        let corpus = sample();
        assert_eq!(corpus.document_frequency("game"), 2);
        assert_eq!(corpus.document_frequency("the"), 2);
        assert_eq!(corpus.document_frequency("vote"), 1);
        assert_eq!(corpus.document_frequency("absent"), 0);
        assert_eq!(corpus.number_of_documents(), 3);
        assert_eq!(corpus.term_occurrences(), 5 + 5 + 2);
    }

    #[test]
    fn document_frequency_matches_a_recount_for_every_term() {
        let corpus = sample();
        for term in corpus.terms() {
            let expected = corpus
                .documents()
                .iter()
                .filter(|d| d.terms().any(|t| t == term))
                .count() as u64;
            assert_eq!(corpus.document_frequency(term), expected, "term {term}");
        }
    }

    #[test]
    fn dictionary_is_sorted_and_complete() {
        let corpus = sample();
        let terms: Vec<&str> = corpus.terms().collect();
        assert_eq!(terms, vec!["game", "law", "on", "the", "vote", "win"]);
        assert_eq!(corpus.dictionary_len(), 6);
    }

    #[test]
    fn add_all_preserves_order() {
        let corpus = sample();
        let sources: Vec<&str> = corpus.documents().iter().map(|d| d.source()).collect();
        assert_eq!(
            sources,
            vec![
                "http://www.spiegel.de/sport/1",
                "http://www.welt.de/politik/2",
                "http://www.spiegel.de/politik/3"
            ]
        );
    }

    #[test]
    fn substring_filters_are_case_sensitive() {
        let corpus = sample();
        assert_eq!(corpus.documents_for_source("spiegel").len(), 2);
        assert_eq!(corpus.documents_for_source("Spiegel").len(), 0);
        assert_eq!(corpus.documents_for_topic("politik").len(), 2);
        assert_eq!(corpus.documents_for_topic("sport")[0].source(), "http://www.spiegel.de/sport/1");
    }

    #[test]
    fn unlabeled_documents_never_match_a_topic_query() {
        let mut corpus = DocumentIndex::new();
        corpus.add(TermDocument::new("a", "mem://1", None));
        assert!(corpus.documents_for_topic("").is_empty());
        assert_eq!(corpus.documents_for_source("").len(), 1);
    }

    #[test]
    fn open_and_close_are_no_ops() {
        let mut corpus = sample();
        corpus.open();
        corpus.close();
        assert_eq!(corpus.number_of_documents(), 3);
        assert!(!corpus.is_empty());
    }
}
