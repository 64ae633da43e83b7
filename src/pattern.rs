//! Turning user input into regular expressions.
//!
//! Escaping rules for free text (names and literal phrases): regex
//! metacharacters are escaped with [regex::escape], and every run of
//! whitespace becomes `\s+`, so that a name matches regardless of how the
//! whitespace in the source text was formatted.

use crate::errors::{self, Result};
use itertools::Itertools;
use regex::{Regex, RegexBuilder};

const ANY_WHITESPACE: &str = r"\s+";

/// Compile a search pattern, optionally ignoring case.
pub fn compile(pattern: &str, case_sensitive: bool) -> Result<Regex> {
    RegexBuilder::new(pattern)
        .case_insensitive(!case_sensitive)
        .build()
        .map_err(|e| errors::malformed_pattern(pattern, e))
}

/// Compile a filter pattern. Filters always ignore case.
pub fn compile_filter(pattern: &str) -> Result<Regex> {
    compile(pattern, false)
}

/// Convert a literal name into a whitespace-tolerant regular expression.
pub fn name_to_regex(name: &str) -> String {
    let mut out = String::new();
    let mut literal = String::new();
    let mut in_space = false;
    for c in name.chars() {
        if c.is_whitespace() {
            if !in_space {
                out.push_str(&regex::escape(&literal));
                out.push_str(ANY_WHITESPACE);
                literal.clear();
                in_space = true;
            }
        } else {
            literal.push(c);
            in_space = false;
        }
    }
    out.push_str(&regex::escape(&literal));
    out
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Convert a literal word or phrase into a regular expression that only matches
/// whole words.
///
/// Word boundaries are added only on the sides that start or end with a word
/// character; `\b` next to punctuation would never match.
pub fn phrase_to_regex(phrase: &str) -> String {
    let phrase = phrase.trim();
    let mut re = name_to_regex(phrase);
    if phrase.chars().next().is_some_and(is_word_char) {
        re.insert_str(0, r"\b");
    }
    if phrase.chars().last().is_some_and(is_word_char) {
        re.push_str(r"\b");
    }
    re
}

/// Convert a selection of names into one alternation.
pub fn selection_to_regex<S: AsRef<str>>(selection: &[S]) -> Result<String> {
    match selection {
        [] => Err(errors::invalid_argument_ref("nothing selected")),
        [one] => Ok(name_to_regex(one.as_ref())),
        many => Ok(many
            .iter()
            .map(|s| format!("({})", name_to_regex(s.as_ref())))
            .join("|")),
    }
}
