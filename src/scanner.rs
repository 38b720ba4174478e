//! Edge-file tokenizer
//!
//! An edge file is a sequence of records `u v [w] ;`. Tokens are separated
//! by whitespace, and a `;` may touch the token before it. A missing weight
//! means unit weight.

use crate::graph::{VertexId, Weight};
use std::io::Read;
use thiserror::Error;

/// Errors raised while reading an edge file
#[derive(Debug, Error)]
pub enum InputError {
    /// A token that should have been an integer or `;`, or a weight above
    /// `u32::MAX`
    #[error("line {line}: malformed token `{token}`")]
    Malformed { line: usize, token: String },

    /// A weight below zero
    #[error("line {line}: negative weight `{token}`")]
    NegativeWeight { line: usize, token: String },

    /// Input ended in the middle of a record
    #[error("line {line}: unexpected end of input inside an edge record")]
    UnexpectedEof { line: usize },

    /// The underlying reader failed
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),
}

/// One `u v [w] ;` record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeRecord {
    pub u: VertexId,
    pub v: VertexId,
    pub weight: Weight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
    Word(&'a str),
    Semicolon,
}

/// Splits the input into `(line, token)` pairs
fn tokenize(input: &str) -> impl Iterator<Item = (usize, Token<'_>)> + '_ {
    input.lines().enumerate().flat_map(|(index, line)| {
        line.split_whitespace().flat_map(move |word| {
            let mut tokens = Vec::new();
            let mut rest = word;
            while let Some(at) = rest.find(';') {
                if at > 0 {
                    tokens.push((index + 1, Token::Word(&rest[..at])));
                }
                tokens.push((index + 1, Token::Semicolon));
                rest = &rest[at + 1..];
            }
            if !rest.is_empty() {
                tokens.push((index + 1, Token::Word(rest)));
            }
            tokens
        })
    })
}

/// Parses every edge record in `input`
///
/// # Example
///
/// ```rust
/// use prim_mst::scanner::{parse_edges, EdgeRecord};
///
/// let edges = parse_edges("1 2 5 ;\n2 3;").unwrap();
/// assert_eq!(edges[0], EdgeRecord { u: 1, v: 2, weight: 5 });
/// assert_eq!(edges[1].weight, 1);
/// ```
pub fn parse_edges(input: &str) -> Result<Vec<EdgeRecord>, InputError> {
    let mut tokens = tokenize(input);
    let mut records = Vec::new();
    let mut last_line = 1;

    while let Some((line, token)) = tokens.next() {
        last_line = line;
        let u = parse_vertex(line, token)?;

        let (line, token) = tokens
            .next()
            .ok_or(InputError::UnexpectedEof { line: last_line })?;
        last_line = line;
        let v = parse_vertex(line, token)?;

        let (line, token) = tokens
            .next()
            .ok_or(InputError::UnexpectedEof { line: last_line })?;
        last_line = line;
        let weight = match token {
            Token::Semicolon => 1,
            Token::Word(word) => {
                let weight = parse_weight(line, word)?;
                match tokens.next() {
                    Some((_, Token::Semicolon)) => weight,
                    Some((line, Token::Word(word))) => {
                        return Err(InputError::Malformed {
                            line,
                            token: word.to_string(),
                        })
                    }
                    None => return Err(InputError::UnexpectedEof { line: last_line }),
                }
            }
        };

        records.push(EdgeRecord { u, v, weight });
    }

    Ok(records)
}

/// Reads `reader` to the end and parses it
pub fn read_edges<R: Read>(mut reader: R) -> Result<Vec<EdgeRecord>, InputError> {
    let mut input = String::new();
    reader.read_to_string(&mut input)?;
    parse_edges(&input)
}

fn parse_vertex(line: usize, token: Token<'_>) -> Result<VertexId, InputError> {
    match token {
        Token::Word(word) => word.parse().map_err(|_| InputError::Malformed {
            line,
            token: word.to_string(),
        }),
        Token::Semicolon => Err(InputError::Malformed {
            line,
            token: ";".to_string(),
        }),
    }
}

fn parse_weight(line: usize, word: &str) -> Result<Weight, InputError> {
    let value: i64 = word.parse().map_err(|_| InputError::Malformed {
        line,
        token: word.to_string(),
    })?;
    if value < 0 {
        return Err(InputError::NegativeWeight {
            line,
            token: word.to_string(),
        });
    }
    Weight::try_from(value).map_err(|_| InputError::Malformed {
        line,
        token: word.to_string(),
    })
}
