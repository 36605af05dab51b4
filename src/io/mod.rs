//! Input handling for the command-line front end.

pub mod pair_reader;

pub use pair_reader::{open_input, read_pairs, SeqPair};
