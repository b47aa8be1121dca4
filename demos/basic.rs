use tf_idf_classifier::{
    Classifier, ClassifierStrategy, Corpus, DocumentIndex, NaiveBayes, TermDocument, UNKNOWN_TOPIC,
};

fn main() {
    // build corpus
    let mut corpus = DocumentIndex::new();
    corpus.add(TermDocument::new("Rust ist schnell und sicher", "http://example.org/tech/1", Some("tech".into())));
    corpus.add(TermDocument::new("Der Compiler prüft Speicher", "http://example.org/tech/2", Some("tech".into())));
    corpus.add(TermDocument::new("Das Tor fällt in der Nachspielzeit", "http://example.org/sport/3", Some("sport".into())));
    corpus.add(TermDocument::new("Der Ball ist rund", "http://example.org/sport/4", Some("sport".into())));

    // train on every document of the corpus
    let mut classifier = NaiveBayes::new();
    for doc in corpus.documents() {
        if let Err(e) = classifier.train(doc) {
            eprintln!("skipped: {}", e);
        }
    }

    // classify an unlabeled document
    let probe = TermDocument::new("der Ball", "http://example.org/new", Some(UNKNOWN_TOPIC.into()));
    match classifier.scores(&probe) {
        Ok(scores) => {
            for (class, score) in scores {
                println!("{class}\t{score}");
            }
        }
        Err(e) => eprintln!("{}", e),
    }
    match classifier.classify(&probe) {
        Ok(label) => println!("{} -> {}", probe, label),
        Err(e) => eprintln!("{}", e),
    }

    // tf-idf vector of the probe over the corpus dictionary
    match probe.vector(&corpus) {
        Ok(vector) => {
            let terms: Vec<&str> = corpus.terms().collect();
            for (idx, weight) in vector.sparse_features() {
                println!("{}\t{:.4}", terms[idx as usize - 1], weight);
            }
        }
        Err(e) => eprintln!("{}", e),
    }
}
