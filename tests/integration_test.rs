use qvcorpus::corpus::{Category, Corpus, FilterArgs, FrequencyType};
use qvcorpus::errors::NoMatchingLetters;
use qvcorpus::input::Input;
use qvcorpus::letter::{self, Letter};
use qvcorpus::output::{Label, Value};
use qvcorpus::pattern;
use qvcorpus::query::{self, OutputMode, Query, Response};
use qvcorpus::snapshot::Snapshot;
use std::fs;
use std::path::PathBuf;

fn init() {
    let _ = pretty_env_logger::formatted_timed_builder()
        .filter_level(log::LevelFilter::Trace)
        .is_test(true)
        .try_init();
}

fn slurp(filename: &str) -> String {
    let dir = env!("CARGO_MANIFEST_DIR");
    let mut path = PathBuf::from(dir);
    path.push(filename);
    fs::read_to_string(path).unwrap()
}

fn sample_letters() -> Vec<Letter> {
    let data = slurp("sample-data/letters.json");
    let input: Input = serde_json::from_str(&data).unwrap();
    letter::letters_from_input(&input).unwrap()
}

fn query(term: &str, is_regex: bool, output: OutputMode) -> Query {
    Query {
        term: term.to_owned(),
        is_regex,
        case_sensitive: false,
        output,
        filter: FilterArgs::default(),
    }
}

fn total(response: Response) -> (u64, f64) {
    match response {
        Response::TotalFrequency(f) => (f.raw, f.normalized),
        r => panic!("unexpected {r:?}"),
    }
}

#[test]
fn test_word_counts() {
    init();
    let letters = sample_letters();
    let corpus = Corpus::from_letters(&letters);
    assert_eq!(corpus.len(), 7);
    assert_eq!(corpus.total_word_count(), 91);
    assert_eq!(letters[5].total_word_count(), 13);
    let filtered = corpus.create_subcorpus(&FilterArgs::default()).unwrap();
    assert_eq!(filtered.len(), 6);
    assert_eq!(filtered.total_word_count(), 83);
}

#[test]
fn test_total_frequency() {
    init();
    let letters = sample_letters();
    let corpus = Corpus::from_letters(&letters);
    let q = query("love", false, OutputMode::TotalFrequency);
    assert_eq!(total(query::run(&q, &corpus).unwrap()), (3, 36.14));
    let q = query("dear", false, OutputMode::TotalFrequency);
    assert_eq!(total(query::run(&q, &corpus).unwrap()).0, 1);
    let q = query("dear", true, OutputMode::TotalFrequency);
    assert_eq!(total(query::run(&q, &corpus).unwrap()).0, 4);
}

#[test]
fn test_by_year() {
    init();
    let letters = sample_letters();
    let corpus = Corpus::from_letters(&letters);
    let q = query(
        "letter",
        false,
        OutputMode::ByCategory {
            category: Category::Year,
            frequency: FrequencyType::Raw,
        },
    );
    let counts = match query::run(&q, &corpus).unwrap() {
        Response::ByCategory(counts) => counts,
        r => panic!("unexpected {r:?}"),
    };
    let counts = counts
        .into_iter()
        .map(|c| (c.label, c.value))
        .collect::<Vec<_>>();
    assert_eq!(
        counts,
        [
            (Label::Year(1837), Value::Raw(0)),
            (Label::Year(1838), Value::Raw(1)),
            (Label::Year(1839), Value::Raw(1)),
            (Label::Year(1840), Value::Raw(0)),
            (Label::Year(1841), Value::Raw(0)),
        ]
    );
}

#[test]
fn test_by_writer_normalized() {
    init();
    let letters = sample_letters();
    let corpus = Corpus::from_letters(&letters);
    let re = pattern::compile("queen", false).unwrap();
    let filtered = corpus.create_subcorpus(&FilterArgs::default()).unwrap();
    let counts = filtered
        .get_counts_by_category(&re, Category::Writer, FrequencyType::Normalized)
        .unwrap();
    let counts = counts
        .into_iter()
        .map(|c| (c.label.to_string(), c.value))
        .collect::<Vec<_>>();
    assert_eq!(
        counts,
        [
            ("king of the belgians".to_owned(), Value::Normalized(0.0)),
            ("prince albert".to_owned(), Value::Normalized(0.0)),
            ("queen victoria".to_owned(), Value::Normalized(75.0)),
            ("viscount melbourne".to_owned(), Value::Normalized(0.0)),
        ]
    );
}

#[test]
fn test_concordance() {
    init();
    let letters = sample_letters();
    let corpus = Corpus::from_letters(&letters);
    let q = query("Majesty", false, OutputMode::Concordance { context_len: 3 });
    let lines = match query::run(&q, &corpus).unwrap() {
        Response::Concordance(lines) => lines,
        r => panic!("unexpected {r:?}"),
    };
    assert_eq!(lines.len(), 2);
    assert_eq!(
        lines[0].to_string(),
        "(Viscount Melbourne to Queen Victoria, 1838)\tduty to Your\tMAJESTY\t, and has"
    );
    assert_eq!(lines[1].pre, "letter of Your");
    assert_eq!(lines[1].post, ".");
}

#[test]
fn test_filters() {
    init();
    let letters = sample_letters();
    let corpus = Corpus::from_letters(&letters);
    let mut q = query("love", false, OutputMode::TotalFrequency);
    q.filter.writer = pattern::selection_to_regex(&["Queen Victoria", "Prince Albert"]).unwrap();
    q.filter.from_year = 1840;
    q.filter.to_year = 1841;
    assert_eq!(total(query::run(&q, &corpus).unwrap()), (2, 105.26));

    let mut q = query("Brief", false, OutputMode::TotalFrequency);
    q.filter.language = "de".to_owned();
    assert_eq!(total(query::run(&q, &corpus).unwrap()).0, 1);

    q.filter.language = "it".to_owned();
    let e = query::run(&q, &corpus).unwrap_err();
    let e = e.downcast_ref::<NoMatchingLetters>().unwrap();
    assert_eq!(e.0.language, "it");
}

#[test]
fn test_snapshot_file() {
    init();
    let letters = sample_letters();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("corpus.json");
    let snapshot = Snapshot::new(&letters);
    fs::write(&path, serde_json::to_string_pretty(&snapshot).unwrap()).unwrap();
    let reloaded: Snapshot = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(reloaded.years, [1837, 1838, 1839, 1840, 1841]);
    assert_eq!(reloaded.writers.len(), 5);
    let reloaded = reloaded.into_letters();
    assert_eq!(reloaded, letters);
    assert_eq!(Corpus::from_letters(&reloaded).total_word_count(), 91);
}
