//! Reader for sequence-pair input files.
//!
//! The format is line based: a `>` line carries a query sequence and the
//! following `<` line carries its target. Blank lines are skipped.
//! Files ending in `.gz` are transparently decompressed and `-` reads
//! from standard input.

use std::fs::File;
use std::io::{self, stdin, BufRead, BufReader, Read};
use std::path::Path;

use flate2::read::GzDecoder;

/// One query/target pair from an input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeqPair {
    pub query: Vec<u8>,
    pub target: Vec<u8>,
}

/// Open a pair file, decompressing `.gz` input and mapping `-` to stdin.
pub fn open_input(path: &Path) -> io::Result<Box<dyn BufRead>> {
    if path.to_str() == Some("-") {
        return Ok(Box::new(BufReader::new(stdin())));
    }

    let file = File::open(path)?;
    let reader: Box<dyn Read> = if path.extension().and_then(|s| s.to_str()) == Some("gz") {
        Box::new(GzDecoder::new(file))
    } else {
        Box::new(file)
    };
    Ok(Box::new(BufReader::new(reader)))
}

/// Parse every `>query` / `<target` pair from `reader`.
///
/// Sequences are uppercased. A `<` line without a preceding `>` line, a
/// `>` line following an unpaired `>` line, a line with neither marker,
/// and a trailing unpaired query are all reported as `InvalidData`.
pub fn read_pairs<R: BufRead>(reader: R) -> io::Result<Vec<SeqPair>> {
    let mut pairs = Vec::new();
    let mut pending_query: Option<Vec<u8>> = None;

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match line.as_bytes()[0] {
            b'>' => {
                if pending_query.is_some() {
                    return Err(invalid_line(line_no, "query line without a target"));
                }
                pending_query = Some(to_sequence(&line[1..]));
            }
            b'<' => match pending_query.take() {
                Some(query) => pairs.push(SeqPair {
                    query,
                    target: to_sequence(&line[1..]),
                }),
                None => {
                    return Err(invalid_line(line_no, "target line without a query"));
                }
            },
            _ => {
                return Err(invalid_line(line_no, "expected a '>' or '<' line"));
            }
        }
    }

    if pending_query.is_some() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "unpaired query at end of input",
        ));
    }

    Ok(pairs)
}

fn to_sequence(text: &str) -> Vec<u8> {
    let mut seq = text.trim().as_bytes().to_vec();
    seq.make_ascii_uppercase();
    seq
}

fn invalid_line(line_no: usize, msg: &str) -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidData,
        format!("line {}: {}", line_no + 1, msg),
    )
}
