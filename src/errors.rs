//! Errors and error-related utilities.

use crate::corpus::FilterArgs;
use std::{error, fmt, result};

/// The result type used throughout this library.
pub type Result<T> = result::Result<T, Box<dyn error::Error>>;

/// Invalid input.
#[derive(Debug)]
pub struct InvalidInput(pub String);

/// Invalid command line argument.
#[derive(Debug)]
pub struct InvalidArgument(pub String);

/// A sub-corpus filter did not match any letters.
///
/// Carries the attempted filter so that it can be shown to the user.
#[derive(Debug)]
pub struct NoMatchingLetters(pub FilterArgs);

/// Normalized frequency was requested for a corpus without words.
#[derive(Debug)]
pub struct UndefinedNormalization;

/// A search or filter pattern is not a valid regular expression.
#[derive(Debug)]
pub struct MalformedPattern {
    pub pattern: String,
    pub message: String,
}

/// The search term was empty.
#[derive(Debug)]
pub struct NoSearchTerm;

impl fmt::Display for InvalidInput {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "invalid input: {}", self.0)
    }
}

impl fmt::Display for InvalidArgument {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "invalid argument: {}", self.0)
    }
}

impl fmt::Display for NoMatchingLetters {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "no letters found for {}; please enter different specifications",
            self.0
        )
    }
}

impl fmt::Display for UndefinedNormalization {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "cannot normalize: corpus has no words")
    }
}

impl fmt::Display for MalformedPattern {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "malformed search pattern '{}': {}",
            self.pattern, self.message
        )
    }
}

impl fmt::Display for NoSearchTerm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "no search term was entered")
    }
}

impl error::Error for InvalidInput {}

impl error::Error for InvalidArgument {}

impl error::Error for NoMatchingLetters {}

impl error::Error for UndefinedNormalization {}

impl error::Error for MalformedPattern {}

impl error::Error for NoSearchTerm {}

/// A helper for constructing [InvalidInput].
pub fn invalid_input(s: String) -> Box<dyn error::Error> {
    InvalidInput(s).into()
}

/// A helper for constructing [InvalidArgument].
pub fn invalid_argument(s: String) -> Box<dyn error::Error> {
    InvalidArgument(s).into()
}

/// A helper for constructing [InvalidArgument].
pub fn invalid_argument_ref(s: &str) -> Box<dyn error::Error> {
    InvalidArgument(s.to_owned()).into()
}

/// A helper for constructing [MalformedPattern] from a regex error.
pub fn malformed_pattern(pattern: &str, e: regex::Error) -> Box<dyn error::Error> {
    MalformedPattern {
        pattern: pattern.to_owned(),
        message: e.to_string(),
    }
    .into()
}
