//! Data structures for representing the scraped input.

use crate::errors::{self, Result};
use serde::{Deserialize, Serialize};

pub type Year = i32;

/// Year as it appears in the scraped data: either a number or a string of digits.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum IYear {
    Number(Year),
    Text(String),
}

impl IYear {
    pub fn to_year(&self) -> Result<Year> {
        match self {
            IYear::Number(y) => Ok(*y),
            IYear::Text(s) => s
                .trim()
                .parse()
                .map_err(|_| errors::invalid_input(format!("year '{s}' is not a number"))),
        }
    }
}

/// One scraped letter.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct ILetter {
    pub writer: String,
    pub addressee: String,
    pub year: IYear,
    pub language: String,
    pub text: String,
}

/// The whole scraped collection, in ingestion order.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Input {
    pub letters: Vec<ILetter>,
}
