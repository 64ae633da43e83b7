//! Main entry point for searching the corpus.

use crate::corpus::{Category, Corpus, FilterArgs, FrequencyType};
use crate::errors::{self, Result};
use crate::output::{CategoryCount, ConcordanceLine, Frequency};
use crate::pattern;
use log::{debug, info};
use serde::{Deserialize, Serialize};

/// Number of context words used when not specified.
pub const DEFAULT_CONTEXT_LEN: usize = 5;

/// How to report the results.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case", tag = "mode")]
pub enum OutputMode {
    /// Every hit with `context_len` words before and after it.
    Concordance { context_len: usize },
    /// Raw and normalized frequency in the whole (filtered) corpus.
    TotalFrequency,
    /// Frequency for each writer, addressee or year.
    ByCategory {
        category: Category,
        frequency: FrequencyType,
    },
}

/// What to search for.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Query {
    /// Word, phrase, or regular expression.
    pub term: String,

    /// Is [Query::term] a regular expression?
    /// If not, it is matched literally as a whole word or phrase,
    /// tolerating any amount of whitespace between its words.
    /// Word boundaries include hyphens and apostrophes, so a literal
    /// "love" also matches in "self-love", "love-letter" and "love's".
    pub is_regex: bool,

    pub case_sensitive: bool,

    pub output: OutputMode,

    /// Which letters to search.
    #[serde(default)]
    pub filter: FilterArgs,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case", tag = "mode", content = "result")]
pub enum Response {
    Concordance(Vec<ConcordanceLine>),
    TotalFrequency(Frequency),
    ByCategory(Vec<CategoryCount>),
}

impl Query {
    /// The regular expression that is actually searched for.
    pub fn search_pattern(&self) -> Result<String> {
        if self.term.trim().is_empty() {
            return Err(errors::NoSearchTerm.into());
        }
        if self.is_regex {
            Ok(self.term.clone())
        } else {
            Ok(pattern::phrase_to_regex(&self.term))
        }
    }
}

/// Run a query against a corpus.
///
/// The corpus is first restricted with [Query::filter];
/// this fails if no letters are left.
pub fn run(query: &Query, corpus: &Corpus) -> Result<Response> {
    let search = query.search_pattern()?;
    let re = pattern::compile(&search, query.case_sensitive)?;
    debug!("search pattern: {search}");
    let corpus = corpus.create_subcorpus(&query.filter)?;
    info!(
        "searching {} letters, {} words",
        corpus.len(),
        corpus.total_word_count()
    );
    let response = match query.output {
        OutputMode::Concordance { context_len } => {
            Response::Concordance(corpus.get_concordances(&re, context_len))
        }
        OutputMode::TotalFrequency => Response::TotalFrequency(corpus.get_frequency(&re)?),
        OutputMode::ByCategory {
            category,
            frequency,
        } => Response::ByCategory(corpus.get_counts_by_category(&re, category, frequency)?),
    };
    info!("{}", response.summary());
    Ok(response)
}

impl Response {
    pub fn summary(&self) -> String {
        match self {
            Response::Concordance(lines) => format!("{} concordance lines", lines.len()),
            Response::TotalFrequency(f) => {
                format!("{} hits, {} per 1000 words", f.raw, f.normalized)
            }
            Response::ByCategory(counts) => format!("{} categories", counts.len()),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::letter::Letter;
    use crate::output::{Label, Value};

    fn letters() -> Vec<Letter> {
        vec![
            Letter::new(
                "Queen Victoria".to_owned(),
                "Prince Albert".to_owned(),
                1840,
                "en".to_owned(),
                "My dearest Albert I love you".to_owned(),
                0,
            ),
            Letter::new(
                "Prince Albert".to_owned(),
                "Queen Victoria".to_owned(),
                1841,
                "en".to_owned(),
                "My dearest Victoria I love you too. Lovely weather.".to_owned(),
                1,
            ),
        ]
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

    #[test]
    fn literal_phrase_whole_words() {
        let letters = letters();
        let corpus = Corpus::from_letters(&letters);
        let q = query("love", false, OutputMode::TotalFrequency);
        match run(&q, &corpus).unwrap() {
            Response::TotalFrequency(f) => assert_eq!(f.raw, 2),
            r => panic!("unexpected {r:?}"),
        }
        let q = query("love", true, OutputMode::TotalFrequency);
        match run(&q, &corpus).unwrap() {
            Response::TotalFrequency(f) => assert_eq!(f.raw, 3),
            r => panic!("unexpected {r:?}"),
        }
    }

    #[test]
    fn literal_phrase_escaped() {
        let letters = letters();
        let corpus = Corpus::from_letters(&letters);
        let q = query("you too.", false, OutputMode::Concordance { context_len: 1 });
        match run(&q, &corpus).unwrap() {
            Response::Concordance(lines) => {
                assert_eq!(lines.len(), 1);
                assert_eq!(lines[0].hit, "YOU TOO.");
                assert_eq!(lines[0].pre, "love");
                assert_eq!(lines[0].post, "Lovely");
            }
            r => panic!("unexpected {r:?}"),
        }
    }

    #[test]
    fn by_category() {
        let letters = letters();
        let corpus = Corpus::from_letters(&letters);
        let q = query(
            "dearest",
            false,
            OutputMode::ByCategory {
                category: Category::Writer,
                frequency: FrequencyType::Raw,
            },
        );
        match run(&q, &corpus).unwrap() {
            Response::ByCategory(counts) => {
                assert_eq!(counts.len(), 2);
                assert_eq!(counts[0].label, Label::Name("prince albert".to_owned()));
                assert_eq!(counts[0].value, Value::Raw(1));
            }
            r => panic!("unexpected {r:?}"),
        }
    }

    #[test]
    fn filtered() {
        let letters = letters();
        let corpus = Corpus::from_letters(&letters);
        let mut q = query("my", false, OutputMode::TotalFrequency);
        q.filter.from_year = 1841;
        match run(&q, &corpus).unwrap() {
            Response::TotalFrequency(f) => {
                assert_eq!(f.raw, 1);
                assert_eq!(f.normalized, 111.11);
            }
            r => panic!("unexpected {r:?}"),
        }
        q.filter.from_year = 1850;
        let e = run(&q, &corpus).unwrap_err();
        assert!(e.downcast_ref::<errors::NoMatchingLetters>().is_some());
    }

    #[test]
    fn error_kinds() {
        let letters = letters();
        let corpus = Corpus::from_letters(&letters);
        let q = query("  ", false, OutputMode::TotalFrequency);
        let e = run(&q, &corpus).unwrap_err();
        assert!(e.downcast_ref::<errors::NoSearchTerm>().is_some());
        let q = query("lov(e", true, OutputMode::TotalFrequency);
        let e = run(&q, &corpus).unwrap_err();
        assert_eq!(
            e.downcast_ref::<errors::MalformedPattern>().unwrap().pattern,
            "lov(e"
        );
        let q = query("lov(e", false, OutputMode::TotalFrequency);
        assert!(run(&q, &corpus).is_ok());
    }

    #[test]
    fn literal_phrase_hyphenated() {
        let letters = vec![Letter::new(
            "Queen Victoria".to_owned(),
            "Prince Albert".to_owned(),
            1840,
            "en".to_owned(),
            "self-love and a love-letter, lovely".to_owned(),
            0,
        )];
        let corpus = Corpus::from_letters(&letters);
        let q = query("love", false, OutputMode::TotalFrequency);
        match run(&q, &corpus).unwrap() {
            Response::TotalFrequency(f) => assert_eq!(f.raw, 2),
            r => panic!("unexpected {r:?}"),
        }
    }

    #[test]
    fn query_json() {
        let data = r#"{
            "term": "dear",
            "is_regex": false,
            "case_sensitive": true,
            "output": {"mode": "by_category", "category": "year", "frequency": "normalized"},
            "filter": {"writer": "victoria"}
        }"#;
        let q: Query = serde_json::from_str(data).unwrap();
        assert_eq!(
            q.output,
            OutputMode::ByCategory {
                category: Category::Year,
                frequency: FrequencyType::Normalized
            }
        );
        assert_eq!(q.filter.writer, "victoria");
        assert_eq!(q.filter.language, "(en)|(fr)");
    }
}
