//! Minimum spanning trees with Prim's algorithm
//!
//! This crate reads an undirected weighted graph from an edge list and grows
//! a minimum spanning tree from its first vertex. Two data structures are
//! built from scratch for it:
//!
//! - **AVL multiset** ([`avl`]): height-balanced search tree with duplicate
//!   counters, on top of a plain arena-backed BST ([`bst`]). Used to
//!   de-duplicate vertices and edges while the graph is built.
//! - **Binomial heap** ([`binomial`]): O(log n) insert, delete-min,
//!   decrease-key and union, with stable handles. Drives the greedy
//!   selection in [`prim`].
//!
//! # Example
//!
//! ```rust
//! let mut out = Vec::new();
//! prim_mst::render("1 2 1 ;\n2 3 2 ;\n3 4 1 ;\n1 4 4 ;", &mut out).unwrap();
//! let text = String::from_utf8(out).unwrap();
//! assert!(text.ends_with("weight: 4\n"));
//! ```

pub mod avl;
pub mod binomial;
pub mod bst;
pub mod config;
pub mod error;
pub mod graph;
pub mod prim;
pub mod scanner;
pub mod traits;

pub use error::{MstError, Result};
pub use traits::{DecreaseKeyHeap, Heap, HeapError};

use config::{Config, InputSource, UsageError};
use graph::Graph;
use std::fs::File;
use std::io::{self, Write};

/// Runs one configured invocation, writing program output to `out`
pub fn run<W: Write>(config: &Config, out: &mut W) -> Result<()> {
    if config.show_banner {
        writeln!(out, "{}", config::banner())?;
        return Ok(());
    }

    let input = match &config.input {
        None => return Err(UsageError::TooFewArguments.into()),
        Some(InputSource::Stdin) => io::read_to_string(io::stdin().lock())
            .map_err(scanner::InputError::from)?,
        Some(InputSource::File(path)) => {
            let file = File::open(path).map_err(|source| UsageError::Open {
                path: path.clone(),
                source,
            })?;
            io::read_to_string(file).map_err(scanner::InputError::from)?
        }
    };

    render(&input, out)
}

/// Parses `input`, computes the tree and prints it (or `EMPTY`)
pub fn render<W: Write>(input: &str, out: &mut W) -> Result<()> {
    let records = scanner::parse_edges(input)?;
    let mut graph = Graph::from_records(records);
    match prim::minimum_spanning_tree(&mut graph) {
        None => writeln!(out, "EMPTY")?,
        Some(tree) => writeln!(out, "{tree}")?,
    }
    Ok(())
}
