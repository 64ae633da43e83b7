use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};
use log::{error, info};
use qvcorpus::corpus::Corpus;
use qvcorpus::errors::{self, Result};
use qvcorpus::information;
use qvcorpus::input::Input;
use qvcorpus::letter;
use qvcorpus::snapshot::Snapshot;
use std::{fs, io, process};

/// Build a corpus snapshot from scraped letters
#[derive(Parser)]
#[command(author, version, about)]
struct Args {
    /// Input file: JSON array of scraped letters
    infile: String,
    /// Output file: corpus snapshot (JSON)
    outfile: String,
    /// Produce compact JSON files
    #[arg(long)]
    compact: bool,
    #[command(flatten)]
    verbose: Verbosity<InfoLevel>,
}

fn process(args: &Args) -> Result<()> {
    info!("read: {}", args.infile);
    let indata = fs::read_to_string(&args.infile)?;
    let input: Input = serde_json::from_str(&indata)?;
    if input.letters.is_empty() {
        return Err(errors::invalid_input(format!(
            "{}: no letters found",
            args.infile
        )));
    }
    let letters = letter::letters_from_input(&input)?;
    information::statistics(&Corpus::from_letters(&letters));
    let snapshot = Snapshot::new(&letters);
    info!("write: {}", args.outfile);
    let file = fs::File::create(&args.outfile)?;
    let writer = io::BufWriter::new(file);
    if args.compact {
        serde_json::to_writer(writer, &snapshot)?;
    } else {
        serde_json::to_writer_pretty(writer, &snapshot)?;
    }
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
