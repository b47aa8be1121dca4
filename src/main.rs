use std::{env, fs, io, path::Path, process::ExitCode, time::Instant};

use log::LevelFilter;
use rayon::prelude::*;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Logger, Root};
use log4rs::encode::pattern::PatternEncoder;
use log4rs::Config;
use tf_idf_classifier::{
    Corpus, DocumentIndex, NaiveBayes, NaiveBayesConfig, Preprocessor, TermDocument, TextClassifier, ZeroFrequency,
};

/// 実行時オプション
struct Options {
    docs_dir: String,
    source_query: String,
    zero_frequency: ZeroFrequency,
    min_len: usize,
    sequential: bool,
    level: LevelFilter,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            docs_dir: String::from("data/corpus"),
            source_query: String::new(),
            zero_frequency: ZeroFrequency::NegativeInfinity,
            min_len: 1,
            sequential: false,
            level: LevelFilter::Info,
        }
    }
}

fn init_logging(level: LevelFilter) {
    let console = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new("{l} - {d(%H:%M:%S)} - {m}{n}")))
        .build();

    let config = Config::builder()
        .appender(Appender::builder().build("err", Box::new(console)))
        .logger(Logger::builder().build("tf_idf_classifier", level))
        .build(Root::builder().appender("err").build(LevelFilter::Warn));

    match config {
        Ok(config) => {
            if let Err(e) = log4rs::init_config(config) {
                eprintln!("[warn] logging disabled: {}", e);
            }
        }
        Err(e) => eprintln!("[warn] logging disabled: {}", e),
    }
}

// <dir>/<topic>/*.txt を読み込む。トピックはサブディレクトリ名、ソースはファイルパス
fn load_documents<P: AsRef<Path>>(dir: P, preprocessor: &Preprocessor) -> io::Result<DocumentIndex> {
    let mut topics: Vec<_> = fs::read_dir(&dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_dir())
        .collect();
    topics.sort();

    let mut corpus = DocumentIndex::new();
    corpus.open();
    for topic_dir in topics {
        let Some(topic) = topic_dir.file_name().and_then(|s| s.to_str()).map(str::to_string) else {
            log::warn!("skipping directory with non UTF-8 name: {}", topic_dir.display());
            continue;
        };
        let mut files: Vec<_> = fs::read_dir(&topic_dir)?
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "txt"))
            .collect();
        files.sort();
        for path in files {
            let content = match fs::read_to_string(&path) {
                Ok(content) => content,
                Err(e) => {
                    log::warn!("skipping {}: {}", path.display(), e);
                    continue;
                }
            };
            let source = path.to_string_lossy().into_owned();
            corpus.add(TermDocument::with_preprocessor(preprocessor, content, source, Some(topic.clone())));
        }
    }
    corpus.close();
    Ok(corpus)
}

fn main() -> ExitCode {
    let program_start = Instant::now();
    // ---- 簡易 CLI 引数処理 ----
    // --docs DIR       : 文書ディレクトリ, 1 サブディレクトリ = 1 トピック (デフォ: data/corpus)
    // --source QUERY   : ソース (パス) に QUERY を含む文書だけを使う
    // --smoothing      : add-one smoothing
    // --min-len N      : N 文字未満のトークンを捨てる
    // --sequential     : 並列分類しない
    // -v / -q          : ログレベル
    let mut options = Options::default();
    let mut args = env::args().skip(1);
    while let Some(a) = args.next() {
        match a.as_str() {
            "--docs" => {
                if let Some(v) = args.next() { options.docs_dir = v; } else { eprintln!("[error] --docs requires a path"); return ExitCode::FAILURE; }
            }
            "--source" => {
                if let Some(v) = args.next() { options.source_query = v; } else { eprintln!("[error] --source requires a string"); return ExitCode::FAILURE; }
            }
            "--min-len" => {
                match args.next().map(|v| v.parse::<usize>()) {
                    Some(Ok(n)) => options.min_len = n,
                    _ => { eprintln!("[error] --min-len needs a non-negative integer"); return ExitCode::FAILURE; }
                }
            }
            "--smoothing" => options.zero_frequency = ZeroFrequency::AddOne,
            "--sequential" => options.sequential = true,
            "-v" | "--verbose" => options.level = LevelFilter::Debug,
            "-q" | "--quiet" => options.level = LevelFilter::Warn,
            "-h" | "--help" => {
                print_usage();
                return ExitCode::SUCCESS;
            }
            other => eprintln!("[warn] extra arg ignored: {}", other),
        }
    }
    init_logging(options.level);

    match run(&options) {
        Ok(()) => {
            log::info!("program_total={:.2}ms", program_start.elapsed().as_secs_f64() * 1000.0);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("[error] {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(options: &Options) -> Result<(), Box<dyn std::error::Error>> {
    let preprocessor = Preprocessor::default().with_min_len(options.min_len);

    // ---- 文書ロード ----
    let load_start = Instant::now();
    let corpus = load_documents(&options.docs_dir, &preprocessor)?;
    log::info!(
        "loaded {} documents, {} terms from {} in {:.2}ms",
        corpus.number_of_documents(),
        corpus.dictionary_len(),
        options.docs_dir,
        load_start.elapsed().as_secs_f64() * 1000.0
    );

    let training_set = corpus.documents_for_source(&options.source_query);
    if training_set.is_empty() {
        return Err(format!("no documents with source containing '{}'", options.source_query).into());
    }
    // 学習データと同じ集合で分類・評価する
    let test_set = &training_set;
    let gold_set = &training_set;
    log::info!("classifier: NaiveBayes ({:?})", options.zero_frequency);
    log::info!(
        "training set: {}, testing set: {}, gold set: {} documents",
        training_set.len(),
        test_set.len(),
        gold_set.len()
    );

    let start = Instant::now();
    let config = NaiveBayesConfig::default().with_zero_frequency(options.zero_frequency);
    let classifier = TextClassifier::train(NaiveBayes::with_config(config), training_set.iter().copied())?;
    let train_done = Instant::now();
    let classifier = classifier.freeze();
    let predictions = if options.sequential {
        classifier.classify_all(test_set.iter().copied())?
    } else {
        classifier.par_classify_all(test_set.par_iter().copied())?
    };
    let classify_done = Instant::now();
    log::debug!("Result: {:?}", predictions);
    let evaluation = classifier.evaluate(&predictions, gold_set.iter().copied())?;

    let elapsed = classify_done.duration_since(start);
    println!(
        "{}; Time: {:.2} ms ({:.2} s.) (train {:.2} ms, classify {:.2} ms)",
        evaluation,
        elapsed.as_secs_f64() * 1000.0,
        elapsed.as_secs_f64(),
        train_done.duration_since(start).as_secs_f64() * 1000.0,
        classify_done.duration_since(train_done).as_secs_f64() * 1000.0
    );
    Ok(())
}

fn print_usage() {
    eprintln!("Usage: tf-idf-classifier [--docs DIR] [--source QUERY] [--smoothing] [--min-len N] [--sequential] [-v|-q]");
    eprintln!("DIR contains one subdirectory per topic with .txt files.");
    eprintln!("Output format: Correct: <accuracy> (<percent>%); Time: <ms> ms (<s> s.)");
    eprintln!("With -v the predicted label of every document is logged.");
}
