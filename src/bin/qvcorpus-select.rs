use anyhow::{Context, Result};
use clap::Parser;
use cliclack::log;
use itertools::Itertools;
use qvcorpus::corpus::{self, Category, Corpus, FilterArgs, FrequencyType};
use qvcorpus::export;
use qvcorpus::input::Year;
use qvcorpus::pattern;
use qvcorpus::query::{self, DEFAULT_CONTEXT_LEN, OutputMode, Query};
use qvcorpus::snapshot::Snapshot;
use std::{fs, io};

/// Search the corpus interactively
#[derive(Parser)]
#[command(version)]
struct Args {
    /// Corpus snapshot (JSON)
    corpus: String,
    /// Default file name for saving queries (JSON)
    #[arg(long, default_value = "query.json")]
    queryfile: String,
    /// Default file name for saving results (.txt, .json or .xlsx)
    #[arg(long, default_value = "results.txt")]
    outfile: String,
}

#[derive(Clone, PartialEq, Eq)]
enum Action {
    Term,
    ToggleRegex,
    ToggleCase,
    Output,
    Language,
    Writers,
    Addressees,
    Years,
    ClearFilters,
    Run,
    SaveQuery,
    Quit,
}

/// Current selections; turned into a [Query] when run.
struct State {
    term: String,
    is_regex: bool,
    case_sensitive: bool,
    output: OutputMode,
    language: String,
    writers: Vec<String>,
    addressees: Vec<String>,
    years: Option<(Year, Year)>,
}

impl State {
    fn new() -> State {
        State {
            term: String::new(),
            is_regex: false,
            case_sensitive: false,
            output: OutputMode::Concordance {
                context_len: DEFAULT_CONTEXT_LEN,
            },
            language: corpus::DEFAULT_LANGUAGE.to_owned(),
            writers: vec![],
            addressees: vec![],
            years: None,
        }
    }

    fn query(&self) -> std::result::Result<Query, String> {
        let names = |names: &[String]| {
            if names.is_empty() {
                Ok(corpus::ANY.to_owned())
            } else {
                pattern::selection_to_regex(names).map_err(|e| e.to_string())
            }
        };
        let (from_year, to_year) = self.years.unwrap_or((Year::MIN, Year::MAX));
        Ok(Query {
            term: self.term.clone(),
            is_regex: self.is_regex,
            case_sensitive: self.case_sensitive,
            output: self.output,
            filter: FilterArgs {
                language: self.language.clone(),
                writer: names(&self.writers)?,
                addressee: names(&self.addressees)?,
                from_year,
                to_year,
            },
        })
    }

    fn summary(&self) -> String {
        let options = textwrap::Options::new(70).subsequent_indent("  ");
        let quoted = |v: &[String]| v.iter().map(|x| format!("'{x}'")).join(" or ");
        let mut lines = vec![];
        lines.push(format!(
            "term: '{}' ({}, {})",
            self.term,
            if self.is_regex { "regex" } else { "literal" },
            if self.case_sensitive {
                "case-sensitive"
            } else {
                "ignore case"
            }
        ));
        lines.push(match self.output {
            OutputMode::Concordance { context_len } => {
                format!("output: concordance, {context_len} context words")
            }
            OutputMode::TotalFrequency => "output: total frequency".to_owned(),
            OutputMode::ByCategory {
                category,
                frequency,
            } => format!("output: {frequency} frequency by {category}"),
        });
        lines.push(format!("language: {}", self.language));
        if !self.writers.is_empty() {
            lines.push(format!("writers: {}", quoted(&self.writers)));
        }
        if !self.addressees.is_empty() {
            lines.push(format!("addressees: {}", quoted(&self.addressees)));
        }
        if let Some((a, b)) = self.years {
            lines.push(format!("years: {a}-{b}"));
        }
        lines
            .iter()
            .map(|l| textwrap::fill(l, &options))
            .join("\n")
    }
}

fn select_names(what: &str, names: &[String], current: &[String]) -> Result<Vec<String>> {
    let items = names
        .iter()
        .map(|n| (n.clone(), n.clone(), ""))
        .collect_vec();
    let choices = cliclack::multiselect(format!("Select {what} (or none for all)"))
        .items(&items)
        .initial_values(current.to_vec())
        .required(false)
        .interact()?;
    Ok(choices)
}

fn select_output() -> Result<OutputMode> {
    let mode = cliclack::select("Output?")
        .items(&[
            (0, "Concordance", ""),
            (1, "Total frequency", ""),
            (2, "Frequency by category", ""),
        ])
        .interact()?;
    Ok(match mode {
        0 => {
            let context_len: usize = cliclack::input("Number of context words")
                .default_input(&DEFAULT_CONTEXT_LEN.to_string())
                .interact()?;
            OutputMode::Concordance { context_len }
        }
        1 => OutputMode::TotalFrequency,
        _ => {
            let category = cliclack::select("Category?")
                .items(&[
                    (Category::Writer, "Writer", ""),
                    (Category::Addressee, "Addressee", ""),
                    (Category::Year, "Year", ""),
                ])
                .interact()?;
            let frequency = cliclack::select("Frequency?")
                .items(&[
                    (FrequencyType::Raw, "Raw", ""),
                    (FrequencyType::Normalized, "Normalized per 1000 words", ""),
                ])
                .interact()?;
            OutputMode::ByCategory {
                category,
                frequency,
            }
        }
    })
}

fn select_years(years: &[Year]) -> Result<Option<(Year, Year)>> {
    let (Some(&first), Some(&last)) = (years.first(), years.last()) else {
        return Ok(None);
    };
    let from: Year = cliclack::input("First year")
        .default_input(&first.to_string())
        .interact()?;
    let to: Year = cliclack::input("Last year")
        .default_input(&last.to_string())
        .interact()?;
    if from > to {
        log::warning(format!("{from} is after {to}, ignoring"))?;
        return Ok(None);
    }
    Ok(Some((from, to)))
}

fn run(args: &Args, state: &State, corpus: &Corpus) -> Result<()> {
    let query = match state.query() {
        Ok(q) => q,
        Err(e) => {
            log::error(e)?;
            return Ok(());
        }
    };
    let response = match query::run(&query, corpus) {
        Ok(r) => r,
        Err(e) => {
            log::error(format!("{e}"))?;
            return Ok(());
        }
    };
    let text = export::render_text(&query, &response);
    if text.is_empty() {
        cliclack::note("Results", format!("No results found for {}", query.term))?;
    } else {
        cliclack::note("Results", text.trim_end())?;
    }
    let save = cliclack::confirm("Save results to a file?")
        .initial_value(false)
        .interact()?;
    if save {
        let filename: String = cliclack::input("file name")
            .default_input(&args.outfile)
            .interact()?;
        match export::write(&filename, &query, &response) {
            Ok(()) => log::info(format!("Wrote to {filename}"))?,
            Err(e) => log::error(format!("{e}"))?,
        }
    }
    Ok(())
}

fn save_query(args: &Args, state: &State) -> Result<()> {
    let query = match state.query() {
        Ok(q) => q,
        Err(e) => {
            log::error(e)?;
            return Ok(());
        }
    };
    let filename: String = cliclack::input("file name")
        .default_input(&args.queryfile)
        .interact()?;
    let file = fs::File::create(&filename).with_context(|| format!("cannot create {filename}"))?;
    let writer = io::BufWriter::new(file);
    serde_json::to_writer_pretty(writer, &query)?;
    log::info(format!("Wrote to {filename}"))?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    cliclack::intro("qvcorpus-select")?;
    log::info(format!("Reading {}...", args.corpus))?;
    let data =
        fs::read_to_string(&args.corpus).with_context(|| format!("cannot read {}", args.corpus))?;
    let snapshot: Snapshot =
        serde_json::from_str(&data).with_context(|| format!("cannot parse {}", args.corpus))?;
    let writers = snapshot.writers.clone();
    let addressees = snapshot.addressees.clone();
    let years = snapshot.years.clone();
    let letters = snapshot.into_letters();
    let corpus = Corpus::from_letters(&letters);
    log::info(format!(
        "{} letters, {} words",
        corpus.len(),
        corpus.total_word_count()
    ))?;

    let mut state = State::new();
    loop {
        cliclack::note("Query", state.summary())?;
        let items = vec![
            (Action::Term, "Enter search term", ""),
            (Action::ToggleRegex, "Toggle regular expression", ""),
            (Action::ToggleCase, "Toggle case sensitivity", ""),
            (Action::Output, "Choose output", ""),
            (Action::Language, "Set language pattern", ""),
            (Action::Writers, "Filter by writer", ""),
            (Action::Addressees, "Filter by addressee", ""),
            (Action::Years, "Filter by year", ""),
            (Action::ClearFilters, "Remove all filters", ""),
            (Action::Run, "Search", ""),
            (Action::SaveQuery, "Save query to a file", ""),
            (Action::Quit, "Quit", ""),
        ];
        let choice = cliclack::select("Action?").items(&items).interact()?;
        match choice {
            Action::Quit => break,
            Action::Term => {
                state.term = cliclack::input("Search term")
                    .default_input(&state.term)
                    .interact()?;
            }
            Action::ToggleRegex => state.is_regex = !state.is_regex,
            Action::ToggleCase => state.case_sensitive = !state.case_sensitive,
            Action::Output => state.output = select_output()?,
            Action::Language => {
                state.language = cliclack::input("Language pattern")
                    .default_input(&state.language)
                    .interact()?;
            }
            Action::Writers => state.writers = select_names("writers", &writers, &state.writers)?,
            Action::Addressees => {
                state.addressees = select_names("addressees", &addressees, &state.addressees)?
            }
            Action::Years => state.years = select_years(&years)?,
            Action::ClearFilters => {
                state.language = corpus::DEFAULT_LANGUAGE.to_owned();
                state.writers.clear();
                state.addressees.clear();
                state.years = None;
            }
            Action::Run => run(&args, &state, &corpus)?,
            Action::SaveQuery => save_query(&args, &state)?,
        }
    }
    cliclack::outro("Bye!")?;
    Ok(())
}
