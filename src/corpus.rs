//! The corpus and the search algorithms.

use crate::errors::{self, Result};
use crate::input::Year;
use crate::letter::Letter;
use crate::output::{CategoryCount, ConcordanceLine, Frequency, Label, Value};
use crate::parallelism;
use crate::pattern;
use itertools::Itertools;
use log::debug;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Languages included unless the caller asks otherwise: English or French.
pub const DEFAULT_LANGUAGE: &str = "(en)|(fr)";

/// Pattern that matches anything.
pub const ANY: &str = ".*";

/// Which letters to keep.
///
/// Language, writer and addressee are regular expressions that are searched
/// (not fully matched) in the corresponding field, ignoring case.
/// Years are an inclusive range.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct FilterArgs {
    pub language: String,
    pub writer: String,
    pub addressee: String,
    pub from_year: Year,
    pub to_year: Year,
}

impl Default for FilterArgs {
    fn default() -> Self {
        FilterArgs {
            language: DEFAULT_LANGUAGE.to_owned(),
            writer: ANY.to_owned(),
            addressee: ANY.to_owned(),
            from_year: Year::MIN,
            to_year: Year::MAX,
        }
    }
}

impl fmt::Display for FilterArgs {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "language '{}', writer '{}', addressee '{}', years ",
            self.language, self.writer, self.addressee
        )?;
        match (self.from_year, self.to_year) {
            (Year::MIN, Year::MAX) => write!(f, "any"),
            (a, b) if a == b => write!(f, "{a}"),
            (a, b) => write!(f, "{a}-{b}"),
        }
    }
}

/// Compiled form of [FilterArgs].
pub struct Filter {
    args: FilterArgs,
    language: Regex,
    writer: Regex,
    addressee: Regex,
}

impl Filter {
    pub fn new(args: &FilterArgs) -> Result<Filter> {
        Ok(Filter {
            args: args.clone(),
            language: pattern::compile_filter(&args.language)?,
            writer: pattern::compile_filter(&args.writer)?,
            addressee: pattern::compile_filter(&args.addressee)?,
        })
    }

    pub fn args(&self) -> &FilterArgs {
        &self.args
    }

    pub fn matches(&self, letter: &Letter) -> bool {
        self.args.from_year <= letter.year()
            && letter.year() <= self.args.to_year
            && self.language.is_match(letter.language())
            && self.writer.is_match(letter.writer())
            && self.addressee.is_match(letter.addressee())
    }
}

/// What to break frequencies down by.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Writer,
    Addressee,
    Year,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Category::Writer => write!(f, "writer"),
            Category::Addressee => write!(f, "addressee"),
            Category::Year => write!(f, "year"),
        }
    }
}

/// Raw or normalized frequency.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FrequencyType {
    Raw,
    Normalized,
}

impl fmt::Display for FrequencyType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FrequencyType::Raw => write!(f, "raw"),
            FrequencyType::Normalized => write!(f, "normalized"),
        }
    }
}

/// Occurrences per 1000 words, rounded half away from zero to two decimals.
///
/// The rounding is done on the exact ratio in integer hundredths,
/// so 201 hits in 200000 words is 1.01.
pub fn normalize(raw_count: u64, total_word_count: u64) -> Result<f64> {
    if total_word_count == 0 {
        return Err(errors::UndefinedNormalization.into());
    }
    let raw = u128::from(raw_count);
    let words = u128::from(total_word_count);
    let hundredths = (raw * 200_000 + words) / (2 * words);
    Ok(hundredths as f64 / 100.0)
}

/// An ordered collection of letters with derived statistics.
///
/// All derived statistics are computed when the corpus is constructed,
/// and the corpus cannot be modified afterwards.
/// Sub-corpora borrow the letters of the corpus they were made from.
#[derive(Debug)]
pub struct Corpus<'a> {
    letters: Vec<&'a Letter>,
    total_word_count: u64,
    writers: BTreeSet<String>,
    addressees: BTreeSet<String>,
    years: BTreeSet<Year>,
}

fn compute_total_word_count(letters: &[&Letter]) -> u64 {
    letters.iter().map(|l| l.total_word_count()).sum()
}

fn compute_writers(letters: &[&Letter]) -> BTreeSet<String> {
    letters.iter().map(|l| l.writer().to_lowercase()).collect()
}

fn compute_addressees(letters: &[&Letter]) -> BTreeSet<String> {
    letters.iter().map(|l| l.addressee().to_lowercase()).collect()
}

fn compute_years(letters: &[&Letter]) -> BTreeSet<Year> {
    letters.iter().map(|l| l.year()).collect()
}

impl<'a> Corpus<'a> {
    pub fn new(letters: Vec<&'a Letter>) -> Corpus<'a> {
        Corpus {
            total_word_count: compute_total_word_count(&letters),
            writers: compute_writers(&letters),
            addressees: compute_addressees(&letters),
            years: compute_years(&letters),
            letters,
        }
    }

    pub fn from_letters(letters: &'a [Letter]) -> Corpus<'a> {
        Corpus::new(letters.iter().collect_vec())
    }

    pub fn letters(&self) -> &[&'a Letter] {
        &self.letters
    }

    pub fn len(&self) -> usize {
        self.letters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    pub fn total_word_count(&self) -> u64 {
        self.total_word_count
    }

    /// Distinct writers, lowercased.
    pub fn writers(&self) -> &BTreeSet<String> {
        &self.writers
    }

    /// Distinct addressees, lowercased.
    pub fn addressees(&self) -> &BTreeSet<String> {
        &self.addressees
    }

    /// Distinct years, ascending.
    pub fn years(&self) -> &BTreeSet<Year> {
        &self.years
    }

    /// Recount the words of all letters, ignoring the cached total.
    pub fn compute_total_word_count(&self) -> u64 {
        compute_total_word_count(&self.letters)
    }

    pub fn filter_letters(&self, filter: &Filter) -> Vec<&'a Letter> {
        self.letters
            .iter()
            .copied()
            .filter(|l| filter.matches(l))
            .collect_vec()
    }

    /// Build a corpus with the letters that pass `filter`.
    ///
    /// Fails with [errors::NoMatchingLetters] if there are none.
    pub fn subcorpus(&self, filter: &Filter) -> Result<Corpus<'a>> {
        let letters = self.filter_letters(filter);
        if letters.is_empty() {
            return Err(errors::NoMatchingLetters(filter.args().clone()).into());
        }
        let c = Corpus::new(letters);
        debug!(
            "{}: {} letters, {} words",
            filter.args(),
            c.len(),
            c.total_word_count
        );
        Ok(c)
    }

    pub fn create_subcorpus(&self, args: &FilterArgs) -> Result<Corpus<'a>> {
        self.subcorpus(&Filter::new(args)?)
    }

    pub fn get_total_raw_count(&self, re: &Regex) -> u64 {
        self.letters.iter().map(|l| l.raw_count(re)).sum()
    }

    pub fn get_normalized_count(&self, raw_count: u64) -> Result<f64> {
        normalize(raw_count, self.total_word_count)
    }

    pub fn get_frequency(&self, re: &Regex) -> Result<Frequency> {
        let raw = self.get_total_raw_count(re);
        Ok(Frequency {
            raw,
            normalized: self.get_normalized_count(raw)?,
        })
    }

    fn labels(&self, category: Category) -> Vec<Label> {
        match category {
            Category::Writer => self.writers.iter().cloned().map(Label::Name).collect_vec(),
            Category::Addressee => self
                .addressees
                .iter()
                .cloned()
                .map(Label::Name)
                .collect_vec(),
            Category::Year => self.years.iter().copied().map(Label::Year).collect_vec(),
        }
    }

    /// Filter that selects the letters of one category value, in any language.
    fn label_filter(category: Category, label: &Label) -> FilterArgs {
        let mut args = FilterArgs {
            language: ANY.to_owned(),
            ..FilterArgs::default()
        };
        match (category, label) {
            (Category::Writer, Label::Name(name)) => args.writer = pattern::name_to_regex(name),
            (Category::Addressee, Label::Name(name)) => {
                args.addressee = pattern::name_to_regex(name)
            }
            (Category::Year, Label::Year(year)) => {
                args.from_year = *year;
                args.to_year = *year;
            }
            _ => unreachable!("label does not belong to category {category}"),
        }
        args
    }

    /// Frequency of a search term for each value of `category`, sorted by value.
    pub fn get_counts_by_category(
        &self,
        re: &Regex,
        category: Category,
        frequency_type: FrequencyType,
    ) -> Result<Vec<CategoryCount>> {
        let labels = self.labels(category);
        let counts = parallelism::map_parallel(&labels, |label| {
            let args = Corpus::label_filter(category, label);
            let filter = Filter::new(&args).expect("escaped names are valid patterns");
            let c = self
                .subcorpus(&filter)
                .expect("category value is present in its own corpus");
            (c.get_total_raw_count(re), c.total_word_count)
        });
        let mut result = labels
            .into_iter()
            .zip(counts)
            .map(|(label, (raw, words))| -> Result<CategoryCount> {
                let value = match frequency_type {
                    FrequencyType::Raw => Value::Raw(raw),
                    FrequencyType::Normalized => Value::Normalized(normalize(raw, words)?),
                };
                debug!("{category} {label}: {value}");
                Ok(CategoryCount { label, value })
            })
            .collect::<Result<Vec<_>>>()?;
        result.sort_by(|a, b| a.label.cmp(&b.label));
        Ok(result)
    }

    /// Every match of `re` with up to `context_len` words of context on each side.
    pub fn get_concordances(&self, re: &Regex, context_len: usize) -> Vec<ConcordanceLine> {
        let mut lines = vec![];
        for l in &self.letters {
            let text = l.text();
            for m in re.find_iter(text) {
                let mut pre = text[..m.start()]
                    .split_whitespace()
                    .rev()
                    .take(context_len)
                    .collect_vec();
                pre.reverse();
                let mut post = text[m.end()..].split_whitespace().take(context_len);
                lines.push(ConcordanceLine {
                    writer: l.writer().to_owned(),
                    addressee: l.addressee().to_owned(),
                    year: l.year(),
                    pre: pre.join(" "),
                    hit: m.as_str().to_uppercase(),
                    post: post.join(" "),
                });
            }
        }
        lines
    }
}
