use crate::corpus::Corpus;
use itertools::Itertools;
use log::info;
use std::collections::BTreeMap;

fn explain_languages(corpus: &Corpus) -> String {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for l in corpus.letters() {
        *counts.entry(l.language()).or_default() += 1;
    }
    counts
        .iter()
        .map(|(lang, count)| format!("{lang} = {count}"))
        .join(", ")
}

pub fn pretty_years(corpus: &Corpus) -> String {
    match (corpus.years().first(), corpus.years().last()) {
        (Some(a), Some(b)) if a == b => format!("{a}"),
        (Some(a), Some(b)) => format!("{a}-{b}"),
        _ => "none".to_owned(),
    }
}

pub fn statistics(corpus: &Corpus) {
    info!("letters: {}", corpus.len());
    info!("words: {}", corpus.total_word_count());
    info!("distinct writers: {}", corpus.writers().len());
    info!("distinct addressees: {}", corpus.addressees().len());
    info!(
        "years: {} ({} distinct)",
        pretty_years(corpus),
        corpus.years().len()
    );
    info!("languages: {}", explain_languages(corpus));
}
