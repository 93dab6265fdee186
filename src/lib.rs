//! A canonical LR(1) parser generator and table-driven parser runtime.
//!
//! [`build`] is the generator-time entry point: it validates a [`Grammar`],
//! computes FIRST sets, constructs the canonical LR(1) automaton, and
//! assembles the action/goto table, failing on the first conflict found.
//! The resulting [`ParserTables`] pairs with [`parser::run`] to drive a
//! table-driven shift-reduce parse over any [`parser::TokenSource`].

pub mod automaton;
pub mod debug;
pub mod dsl;
pub mod error;
pub mod first;
pub mod grammar;
pub mod item;
pub mod parser;
pub mod symbol;
pub mod table;

pub use error::{GrammarError, ParseError, ParseResult, Result};
pub use grammar::{Grammar, Rule};
pub use symbol::Symbol;

use automaton::Automaton;
use first::FirstSets;
use table::Table;

/// Everything produced by generator-time construction: the FIRST sets and
/// automaton are kept alongside the table mainly for debug stringification
/// (§6.4); the parser runtime only needs `table`.
#[derive(Debug, Clone)]
pub struct ParserTables {
    pub first_sets: FirstSets,
    pub automaton: Automaton,
    pub table: Table,
}

/// Runs the full generator-time pipeline over `grammar`: validate, compute
/// FIRST sets, build the canonical LR(1) automaton, assemble the action/goto
/// table. Returns the first conflict or validation error encountered.
pub fn build(grammar: &Grammar) -> Result<ParserTables> {
    grammar.validate()?;

    let first_sets = first::compute_first_sets(grammar);
    let automaton = automaton::build(grammar, &first_sets);
    let table = table::build(grammar, &automaton)?;

    Ok(ParserTables {
        first_sets,
        automaton,
        table,
    })
}
