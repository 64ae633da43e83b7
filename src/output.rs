//! Data structures for representing the output.

use crate::input::Year;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One hit with its surrounding words.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct ConcordanceLine {
    pub writer: String,
    pub addressee: String,
    pub year: Year,
    pub pre: String,
    pub hit: String,
    pub post: String,
}

impl fmt::Display for ConcordanceLine {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "({} to {}, {})\t{}\t{}\t{}",
            self.writer, self.addressee, self.year, self.pre, self.hit, self.post
        )
    }
}

/// Total frequency of a search term.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
pub struct Frequency {
    pub raw: u64,
    /// Occurrences per 1000 words, rounded to two decimals.
    pub normalized: f64,
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Raw frequency:\t{}", self.raw)?;
        write!(f, "Normalized frequency per 1000 words:\t{}", self.normalized)
    }
}

/// A value of a category: a (lowercased) name or a year.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Label {
    Year(Year),
    Name(String),
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Label::Name(name) => write!(f, "{name}"),
            Label::Year(year) => write!(f, "{year}"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Value {
    Raw(u64),
    Normalized(f64),
}

impl Value {
    pub fn as_f64(&self) -> f64 {
        match self {
            Value::Raw(x) => *x as f64,
            Value::Normalized(x) => *x,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Raw(x) => write!(f, "{x}"),
            Value::Normalized(x) => write!(f, "{x}"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct CategoryCount {
    pub label: Label,
    pub value: Value,
}

#[derive(Serialize)]
pub struct OError {
    pub error: String,
}
