//! Symbol types for context-free grammars.
//!
//! This module defines the core `Symbol` type used throughout the crate:
//! terminals (token classes and literals) and non-terminals share a single
//! string namespace, exactly as table lookups expect.

use std::fmt;

/// The five reserved token-class names a terminal may carry instead of a
/// literal lexeme.
pub const TOKEN_CLASSES: [&str; 5] = ["INT", "REAL", "HEX", "ID", "STR"];

/// The end-of-input marker, stored bare (no colon prefix) like the other
/// token classes.
pub const END: &str = "END";

/// A symbol in a context-free grammar: either a terminal or a non-terminal.
///
/// Terminals carry a string that is either a bare token-class name (`INT`,
/// `REAL`, `HEX`, `ID`, `STR`, `END`) or a colon-prefixed literal (`:+`,
/// `:(`, `:while`). The prefix is what lets the automaton and the table use
/// one symbol namespace instead of two.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Symbol {
    /// A terminal, named by its colon-prefixed literal or bare token class.
    Terminal(String),
    /// A non-terminal, named by its identifier.
    NonTerminal(String),
}

impl Symbol {
    /// Builds a terminal for a literal lexeme, adding the colon prefix.
    pub fn literal(lexeme: impl Into<String>) -> Self {
        Symbol::Terminal(format!(":{}", lexeme.into()))
    }

    /// Builds a terminal for one of the reserved token classes.
    ///
    /// Panics if `class` is not one of `INT`, `REAL`, `HEX`, `ID`, `STR`, or
    /// `END` (callers are expected to use this only for the fixed
    /// reserved set, never for arbitrary user input).
    pub fn token_class(class: impl Into<String>) -> Self {
        let class = class.into();
        debug_assert!(
            TOKEN_CLASSES.contains(&class.as_str()) || class == END,
            "not a reserved token class: {class}"
        );
        Symbol::Terminal(class)
    }

    /// Builds a non-terminal with the given identifier.
    pub fn non_terminal(name: impl Into<String>) -> Self {
        Symbol::NonTerminal(name.into())
    }

    /// The end-of-input terminal.
    pub fn end() -> Self {
        Symbol::Terminal(END.to_string())
    }

    /// True if this is a terminal symbol.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Symbol::Terminal(_))
    }

    /// True if this is a non-terminal symbol.
    pub fn is_non_terminal(&self) -> bool {
        matches!(self, Symbol::NonTerminal(_))
    }

    /// True if this terminal is a colon-prefixed literal rather than a
    /// bare token-class name. Non-terminals are never literals.
    pub fn is_literal(&self) -> bool {
        matches!(self, Symbol::Terminal(s) if s.starts_with(':'))
    }

    /// True if this is the end-of-input marker.
    pub fn is_end(&self) -> bool {
        matches!(self, Symbol::Terminal(s) if s == END)
    }

    /// The raw key string used in table lookups: the literal's colon-prefixed
    /// form, the bare token-class name, or the non-terminal's identifier.
    pub fn key(&self) -> &str {
        match self {
            Symbol::Terminal(s) => s,
            Symbol::NonTerminal(s) => s,
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Terminal(s) => write!(f, "{s}"),
            Symbol::NonTerminal(s) => write!(f, "{s}"),
        }
    }
}
