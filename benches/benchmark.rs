use criterion::{criterion_group, criterion_main, Criterion};
use rayon::prelude::*;
use tf_idf_classifier::{ClassifierStrategy, Corpus, DocumentIndex, NaiveBayes, TermDocument, TextClassifier};

const TOPICS: [&str; 4] = ["sport", "politik", "wirtschaft", "kultur"];

// 疑似乱数 (xorshift) で再現可能な合成コーパスを作る
fn synthetic_corpus(docs_per_topic: usize, words_per_doc: usize) -> DocumentIndex {
    let mut state: u64 = 0x2545_F491_4F6C_DD1D;
    let mut next = move || {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        state
    };

    let mut corpus = DocumentIndex::new();
    for (t, topic) in TOPICS.iter().enumerate() {
        for n in 0..docs_per_topic {
            let tokens: Vec<String> = (0..words_per_doc)
                .map(|_| {
                    let r = next();
                    // 半分はトピック固有語、半分は共通語
                    if r % 2 == 0 {
                        format!("{}_{}", topic, r % 200)
                    } else {
                        format!("common_{}", r % 500)
                    }
                })
                .collect();
            corpus.add(TermDocument::from_tokens(
                &tokens,
                format!("mem://{}/{}/{}", t, topic, n),
                Some(topic.to_string()),
            ));
        }
    }
    corpus
}

fn train_and_classify_benchmark(c: &mut Criterion) {
    let corpus = synthetic_corpus(250, 120);

    c.bench_function("train", |b| {
        b.iter(|| {
            let mut nb = NaiveBayes::new();
            for doc in corpus.documents() {
                nb.train(doc).ok();
            }
            nb
        });
    });

    let classifier = TextClassifier::train(NaiveBayes::new(), corpus.documents())
        .map(TextClassifier::freeze);
    let Ok(classifier) = classifier else {
        return;
    };

    c.bench_function("classify_all", |b| {
        b.iter(|| classifier.classify_all(corpus.documents()));
    });

    c.bench_function("par_classify_all", |b| {
        b.iter(|| classifier.par_classify_all(corpus.documents().par_iter()));
    });

    c.bench_function("tf_idf_vector", |b| {
        b.iter(|| {
            let probe = TermDocument::from_tokens(&["sport_1", "common_2", "kultur_3"], "mem://probe", None);
            probe.vector(&corpus).map(|v| v.len())
        });
    });
}

criterion_group!(benches, train_and_classify_benchmark);
criterion_main!(benches);
