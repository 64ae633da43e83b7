pub mod corpus;
pub mod errors;
pub mod export;
pub mod information;
pub mod input;
pub mod letter;
pub mod output;
mod parallelism;
pub mod pattern;
pub mod query;
pub mod snapshot;
