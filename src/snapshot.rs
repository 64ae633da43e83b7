//! Persisted state: the letters and the label lists used to populate selections.

use crate::errors::Result;
use crate::input::{Input, Year};
use crate::letter::{self, Letter};
use itertools::Itertools;
use log::warn;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct SLetter {
    pub writer: String,
    pub addressee: String,
    pub year: Year,
    pub language: String,
    pub text: String,
    pub total_word_count: u64,
    pub index: usize,
}

impl From<&Letter> for SLetter {
    fn from(l: &Letter) -> Self {
        SLetter {
            writer: l.writer().to_owned(),
            addressee: l.addressee().to_owned(),
            year: l.year(),
            language: l.language().to_owned(),
            text: l.text().to_owned(),
            total_word_count: l.total_word_count(),
            index: l.index(),
        }
    }
}

/// A flat, readable copy of a corpus.
///
/// `writers` and `addressees` are display names as they appear in the letters,
/// sorted and without duplicates; `years` are ascending.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Snapshot {
    pub letters: Vec<SLetter>,
    pub total_word_count: u64,
    pub writers: Vec<String>,
    pub addressees: Vec<String>,
    pub years: Vec<Year>,
}

impl Snapshot {
    pub fn new(letters: &[Letter]) -> Snapshot {
        Snapshot {
            letters: letters.iter().map(SLetter::from).collect_vec(),
            total_word_count: letters.iter().map(|l| l.total_word_count()).sum(),
            writers: letters
                .iter()
                .map(|l| l.writer().to_owned())
                .sorted()
                .dedup()
                .collect_vec(),
            addressees: letters
                .iter()
                .map(|l| l.addressee().to_owned())
                .sorted()
                .dedup()
                .collect_vec(),
            years: letters.iter().map(|l| l.year()).sorted().dedup().collect_vec(),
        }
    }

    /// Rebuild the letters. Word counts are always recomputed from the text.
    pub fn into_letters(self) -> Vec<Letter> {
        let letters = self
            .letters
            .into_iter()
            .map(|s| {
                let stored = s.total_word_count;
                let l = Letter::new(s.writer, s.addressee, s.year, s.language, s.text, s.index);
                if l.total_word_count() != stored {
                    warn!(
                        "letter {}: stored word count {} differs from computed {}",
                        l.index(),
                        stored,
                        l.total_word_count()
                    );
                }
                l
            })
            .collect_vec();
        let total: u64 = letters.iter().map(|l| l.total_word_count()).sum();
        if total != self.total_word_count {
            warn!(
                "stored total word count {} differs from computed {}",
                self.total_word_count, total
            );
        }
        letters
    }
}

/// Build a snapshot straight from scraped input.
pub fn from_input(input: &Input) -> Result<Snapshot> {
    let letters = letter::letters_from_input(input)?;
    Ok(Snapshot::new(&letters))
}
