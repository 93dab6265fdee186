//! Error types for grammar construction, table building, and parsing.

use thiserror::Error;

/// Errors raised while validating a grammar or building its LR(1) table.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GrammarError {
    #[error("grammar has no rules")]
    EmptyGrammar,

    #[error("non-terminal '{0}' appears on a right-hand side but is never defined")]
    UndefinedNonTerminal(String),

    #[error(
        "reduce/reduce conflict in state {state} on '{symbol}':\n  {rule1}\n  {rule2}"
    )]
    ReduceReduceConflict {
        state: usize,
        symbol: String,
        rule1: String,
        rule2: String,
    },

    #[error(
        "shift/reduce conflict in state {state} on '{symbol}': shift to {shift_dest} vs. {reduce_rule}"
    )]
    ShiftReduceConflict {
        state: usize,
        symbol: String,
        shift_dest: usize,
        reduce_rule: String,
    },

    /// Two outgoing edges of the same label disagree on destination, or two
    /// GOTO edges disagree on destination. This should be unreachable for a
    /// canonical LR(1) automaton built by this crate; surfaced as a
    /// structured error rather than a panic so a caller can report it.
    #[error(
        "internal invariant violated: state {state} has conflicting entries for '{symbol}' ({existing} vs {incoming})"
    )]
    InternalConflict {
        state: usize,
        symbol: String,
        existing: String,
        incoming: String,
    },

    #[error("syntax error in grammar DSL at line {line}: {message}")]
    DslSyntax { line: usize, message: String },
}

/// Result alias for generator-time operations.
pub type Result<T> = std::result::Result<T, GrammarError>;

/// Errors raised while running the table-driven parser.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unexpected token '{lexeme}' ({kind}) in state {state}")]
    UnexpectedToken {
        state: usize,
        kind: String,
        lexeme: String,
    },

    #[error("callback '{0}' is not registered")]
    UnimplementedCallback(String),

    #[error("expected end of input but found '{lexeme}' ({kind})")]
    PrematureEnd { kind: String, lexeme: String },

    #[error("no GOTO entry for state {state} on non-terminal '{symbol}'")]
    MissingGoto { state: usize, symbol: String },

    #[error("{0}")]
    TokenSource(String),
}

/// Result alias for parse-time operations.
pub type ParseResult<T> = std::result::Result<T, ParseError>;
