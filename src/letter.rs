//! A single letter of the correspondence.

use crate::errors::Result;
use crate::input::{ILetter, Input, Year};
use crate::pattern;
use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

/// One letter. Immutable once constructed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Letter {
    writer: String,
    addressee: String,
    year: Year,
    language: String,
    text: String,
    total_word_count: u64,
    index: usize,
}

const APOSTROPHES: [char; 2] = ['\'', '\u{2019}'];
const CLITICS: [&str; 6] = ["s", "ll", "re", "ve", "d", "m"];

/// `word` without an English clitic such as `'s` or `n't`.
fn strip_clitic(word: &str) -> &str {
    let Some(i) = word.rfind(APOSTROPHES) else {
        return word;
    };
    let stem = &word[..i];
    let tail = word[i..].trim_start_matches(APOSTROPHES).to_lowercase();
    if CLITICS.contains(&tail.as_str()) {
        stem
    } else if tail == "t" && (stem.ends_with('n') || stem.ends_with('N')) {
        &stem[..stem.len() - 1]
    } else {
        word
    }
}

/// Number of words in `text`.
///
/// A word is a segment between Unicode word boundaries that consists of
/// letters and digits only, so punctuation and whitespace are not counted.
/// A trailing clitic is split off first: "Majesty's" and "don't" are one word each.
pub fn count_words(text: &str) -> u64 {
    text.split_word_bounds()
        .map(strip_clitic)
        .filter(|w| !w.is_empty() && w.chars().all(char::is_alphanumeric))
        .count() as u64
}

impl Letter {
    pub fn new(
        writer: String,
        addressee: String,
        year: Year,
        language: String,
        text: String,
        index: usize,
    ) -> Letter {
        let total_word_count = count_words(&text);
        Letter {
            writer,
            addressee,
            year,
            language,
            text,
            total_word_count,
            index,
        }
    }

    pub fn from_input(l: &ILetter, index: usize) -> Result<Letter> {
        Ok(Letter::new(
            l.writer.clone(),
            l.addressee.clone(),
            l.year.to_year()?,
            l.language.clone(),
            l.text.clone(),
            index,
        ))
    }

    pub fn writer(&self) -> &str {
        &self.writer
    }

    pub fn addressee(&self) -> &str {
        &self.addressee
    }

    pub fn year(&self) -> Year {
        self.year
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn total_word_count(&self) -> u64 {
        self.total_word_count
    }

    /// Position in the collection this letter was ingested from.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Number of non-overlapping matches of `re` in the text.
    pub fn raw_count(&self, re: &Regex) -> u64 {
        re.find_iter(&self.text).count() as u64
    }

    /// Like [Letter::raw_count], compiling `search_term` first.
    pub fn get_raw_count(&self, search_term: &str, case_sensitive: bool) -> Result<u64> {
        let re = pattern::compile(search_term, case_sensitive)?;
        Ok(self.raw_count(&re))
    }
}

/// Build letters from scraped input, numbering them in input order.
pub fn letters_from_input(input: &Input) -> Result<Vec<Letter>> {
    input
        .letters
        .iter()
        .enumerate()
        .map(|(i, l)| Letter::from_input(l, i))
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;

    fn letter(text: &str) -> Letter {
        Letter::new(
            "Queen Victoria".to_owned(),
            "Prince Albert".to_owned(),
            1840,
            "en".to_owned(),
            text.to_owned(),
            0,
        )
    }

    #[test]
    fn words_basic() {
        assert_eq!(count_words("My dearest Albert I love you"), 6);
        assert_eq!(count_words(""), 0);
        assert_eq!(count_words("   "), 0);
    }

    #[test]
    fn words_punctuation() {
        assert_eq!(count_words("Dear Uncle, I am well ; very well !"), 7);
        assert_eq!(count_words(", . -- ?"), 0);
    }

    #[test]
    fn words_clitics() {
        assert_eq!(count_words("Your Majesty's letter"), 3);
        assert_eq!(count_words("I don't know"), 3);
        assert_eq!(count_words("We can\u{2019}t, we'll see; the Queen\u{2019}s wish"), 7);
        assert_eq!(count_words("DON'T"), 1);
    }

    #[test]
    fn words_elision_not_split() {
        assert_eq!(count_words("l'enfant o'clock"), 0);
    }

    #[test]
    fn words_french() {
        assert_eq!(count_words("Mon très cher Oncle"), 4);
    }

    #[test]
    fn derived_word_count() {
        let l = letter("the quick brown fox, jumps.");
        assert_eq!(l.total_word_count(), 5);
    }

    #[test]
    fn raw_count_case() {
        let l = letter("Love is love and LOVE");
        assert_eq!(l.get_raw_count("love", true).unwrap(), 1);
        assert_eq!(l.get_raw_count("love", false).unwrap(), 3);
        assert_eq!(l.get_raw_count("hate", false).unwrap(), 0);
    }

    #[test]
    fn raw_count_non_overlapping() {
        let l = letter("aaaa");
        assert_eq!(l.get_raw_count("aa", true).unwrap(), 2);
    }

    #[test]
    fn raw_count_regex() {
        let l = letter("dear Albert, dearest Albert");
        assert_eq!(l.get_raw_count(r"dear\w*", true).unwrap(), 2);
        assert!(l.get_raw_count("dear(", true).is_err());
    }
}
