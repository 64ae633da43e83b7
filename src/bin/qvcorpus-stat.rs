use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use log::{error, info};
use qvcorpus::corpus::{Category, Corpus};
use qvcorpus::errors::{self, Result};
use qvcorpus::information;
use qvcorpus::snapshot::Snapshot;
use std::collections::BTreeMap;
use std::{fs, process};

/// Print letter and word counts of the corpus
#[derive(Parser)]
#[command(author, version, about)]
struct Args {
    /// Corpus snapshot (JSON)
    corpus: String,
    /// Break the counts down by this category
    #[arg(long, value_enum, default_value_t = Category::Year)]
    category: Category,
    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,
}

#[derive(Default)]
struct RawStat {
    letters: u64,
    words: u64,
}

fn stat(args: &Args, corpus: &Corpus) -> Result<()> {
    if corpus.is_empty() {
        return Err(errors::invalid_input(format!(
            "{}: no letters found",
            args.corpus
        )));
    }
    let mut by_label: BTreeMap<String, RawStat> = BTreeMap::new();
    for l in corpus.letters() {
        let label = match args.category {
            Category::Writer => l.writer().to_lowercase(),
            Category::Addressee => l.addressee().to_lowercase(),
            Category::Year => l.year().to_string(),
        };
        let s = by_label.entry(label).or_default();
        s.letters += 1;
        s.words += l.total_word_count();
    }
    println!("years: {}", information::pretty_years(corpus));
    println!("- letters: {}", corpus.len());
    println!("- words: {}", corpus.total_word_count());
    println!(
        "- writers: {}, addressees: {}",
        corpus.writers().len(),
        corpus.addressees().len()
    );
    let width = by_label.keys().map(|k| k.chars().count()).max().unwrap_or(0);
    for (label, s) in &by_label {
        println!(
            "  {label:width$}  {:>5} letters  {:>7} words",
            s.letters, s.words
        );
    }
    Ok(())
}

fn process(args: &Args) -> Result<()> {
    info!("read: {}", args.corpus);
    let data = fs::read_to_string(&args.corpus)?;
    let snapshot: Snapshot = serde_json::from_str(&data)?;
    let letters = snapshot.into_letters();
    let corpus = Corpus::from_letters(&letters);
    information::statistics(&corpus);
    stat(args, &corpus)?;
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
            error!("{e}");
            process::exit(1);
        }
    }
}
