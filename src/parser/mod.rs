//! Command line parsing
//!
//! Turns an edited line into an argument vector and provides the small
//! parsing helpers the built-in commands share (option flags, lexical paths).

mod options;
pub mod path;
mod tokenizer;

pub use options::OptFlags;
pub use tokenizer::{tokenize, Argv, Tokenizer, ARGV_CAPACITY};
