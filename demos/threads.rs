use std::sync::Arc;
use std::thread;

use tf_idf_classifier::{Corpus, DocumentIndex, NaiveBayes, TermDocument, TextClassifier, UNKNOWN_TOPIC};

fn main() {
    // two corpora built separately, then merged
    let mut corpus0 = DocumentIndex::new();
    corpus0.add(TermDocument::new("rust schnell parallel rust", "doc1", Some("rust".into())));
    corpus0.add(TermDocument::new("rust flexibel sicher rust", "doc2", Some("rust".into())));
    let corpus1 = DocumentIndex::from_documents([
        TermDocument::new("python dynamisch einfach", "doc3", Some("python".into())),
        TermDocument::new("python schnell geschrieben", "doc4", Some("python".into())),
    ]);
    corpus0.add_all(corpus1.documents().iter().cloned());
    println!("documents: {}, terms: {}", corpus0.number_of_documents(), corpus0.dictionary_len());

    // freeze after training and share the model between threads
    let classifier = match TextClassifier::train(NaiveBayes::new(), corpus0.documents()) {
        Ok(classifier) => Arc::new(classifier.freeze()),
        Err(e) => {
            eprintln!("{}", e);
            return;
        }
    };

    let handles: Vec<_> = ["rust sicher", "python einfach", "schnell"]
        .into_iter()
        .map(|text| {
            let classifier = Arc::clone(&classifier);
            thread::spawn(move || {
                let doc = TermDocument::new(text, "query", Some(UNKNOWN_TOPIC.into()));
                (text, classifier.classify(&doc))
            })
        })
        .collect();
    for handle in handles {
        match handle.join() {
            Ok((text, Ok(label))) => println!("{text}\t{label}"),
            Ok((text, Err(e))) => eprintln!("{text}\t{e}"),
            Err(_) => eprintln!("worker panicked"),
        }
    }
}
