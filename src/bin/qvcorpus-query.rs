use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use log::{error, info};
use qvcorpus::corpus::{self, Category, Corpus, FilterArgs, FrequencyType};
use qvcorpus::errors::{self, Result};
use qvcorpus::export;
use qvcorpus::information;
use qvcorpus::input::Year;
use qvcorpus::output::OError;
use qvcorpus::pattern;
use qvcorpus::query::{self, DEFAULT_CONTEXT_LEN, OutputMode, Query};
use qvcorpus::snapshot::Snapshot;
use std::{error, fs, io, process};

#[derive(Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum Mode {
    /// Every hit with its context
    Concordance,
    /// Raw and normalized frequency
    Total,
    /// Frequency by writer, addressee or year
    Category,
}

/// Search the correspondence corpus
#[derive(Parser)]
#[command(author, version, about)]
struct Args {
    /// Corpus snapshot (JSON)
    corpus: String,
    /// Word, phrase or regular expression to search for
    term: Option<String>,
    /// Read the whole query from a JSON file instead
    #[arg(long, conflicts_with = "term")]
    query: Option<String>,
    /// Treat the search term as a regular expression
    #[arg(short, long)]
    regex: bool,
    /// Case-sensitive search
    #[arg(short = 's', long)]
    case_sensitive: bool,
    /// What to report
    #[arg(short, long, value_enum, default_value_t = Mode::Concordance)]
    mode: Mode,
    /// Number of context words on each side (concordance)
    #[arg(short = 'n', long, default_value_t = DEFAULT_CONTEXT_LEN)]
    context: usize,
    /// Category to break frequencies down by
    #[arg(long, value_enum, default_value_t = Category::Writer)]
    category: Category,
    /// Type of frequency (category mode)
    #[arg(long, value_enum, default_value_t = FrequencyType::Raw)]
    frequency: FrequencyType,
    /// Language pattern
    #[arg(long, default_value = corpus::DEFAULT_LANGUAGE)]
    language: String,
    /// Keep only letters by these writers (repeatable)
    #[arg(long = "writer")]
    writers: Vec<String>,
    /// Keep only letters to these addressees (repeatable)
    #[arg(long = "addressee")]
    addressees: Vec<String>,
    /// First year to include
    #[arg(long, default_value_t = Year::MIN, hide_default_value = true)]
    from: Year,
    /// Last year to include
    #[arg(long, default_value_t = Year::MAX, hide_default_value = true)]
    to: Year,
    /// Write results to this file (.txt, .json or .xlsx) instead of standard output
    #[arg(short, long)]
    output: Option<String>,
    /// Report errors as a JSON file
    #[arg(long)]
    error_file: Option<String>,
    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,
}

fn names_to_pattern(names: &[String]) -> Result<String> {
    if names.is_empty() {
        Ok(corpus::ANY.to_owned())
    } else {
        pattern::selection_to_regex(names)
    }
}

fn build_query(args: &Args) -> Result<Query> {
    if let Some(filename) = &args.query {
        info!("read: {filename}");
        let data = fs::read_to_string(filename)?;
        return Ok(serde_json::from_str(&data)?);
    }
    if args.from > args.to {
        return Err(errors::invalid_argument(format!(
            "starting year {} is after ending year {}",
            args.from, args.to
        )));
    }
    let output = match args.mode {
        Mode::Concordance => OutputMode::Concordance {
            context_len: args.context,
        },
        Mode::Total => OutputMode::TotalFrequency,
        Mode::Category => OutputMode::ByCategory {
            category: args.category,
            frequency: args.frequency,
        },
    };
    Ok(Query {
        term: args.term.clone().unwrap_or_default(),
        is_regex: args.regex,
        case_sensitive: args.case_sensitive,
        output,
        filter: FilterArgs {
            language: args.language.clone(),
            writer: names_to_pattern(&args.writers)?,
            addressee: names_to_pattern(&args.addressees)?,
            from_year: args.from,
            to_year: args.to,
        },
    })
}

fn process(args: &Args) -> Result<()> {
    let query = build_query(args)?;
    info!("read: {}", args.corpus);
    let data = fs::read_to_string(&args.corpus)?;
    let snapshot: Snapshot = serde_json::from_str(&data)?;
    let letters = snapshot.into_letters();
    let corpus = Corpus::from_letters(&letters);
    information::statistics(&corpus);
    let response = query::run(&query, &corpus)?;
    match &args.output {
        Some(filename) => export::write(filename, &query, &response)?,
        None => print!("{}", export::render_text(&query, &response)),
    }
    Ok(())
}

fn store_error(error_file: &str, e: &dyn error::Error) -> Result<()> {
    let error = OError {
        error: format!("{e}"),
    };
    let file = fs::File::create(error_file)?;
    let writer = io::BufWriter::new(file);
    serde_json::to_writer(writer, &error)?;
    Ok(())
}

fn main() {
    let args = Args::parse();
    pretty_env_logger::formatted_timed_builder()
        .filter_level(args.verbose.log_level_filter())
        .init();
    match process(&args) {
        Ok(()) => (),
        Err(e) => {
            match &args.error_file {
                Some(filename) => match store_error(filename, &*e) {
                    Ok(()) => {
                        info!("error reported: {e}");
                    }
                    Err(e2) => {
                        error!("{e}");
                        error!("{e2}");
                    }
                },
                None => error!("{e}"),
            }
            process::exit(1);
        }
    }
}
