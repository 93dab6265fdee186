//! Grammar model: rules, productions, and the declared non-terminal set.

use crate::error::{GrammarError, Result};
use crate::symbol::Symbol;
use std::collections::HashSet;
use std::fmt;

/// A single production: `lhs -> rhs`, with an optional semantic-action
/// identifier fired on reduction.
///
/// Rules are appended to a [`Grammar`] in order; `index` is assigned
/// positionally and becomes the reduce value emitted into the parse table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub index: usize,
    pub lhs: String,
    pub rhs: Vec<Symbol>,
    pub callback: Option<String>,
}

impl Rule {
    /// Appends a terminal to this rule's right-hand side.
    pub fn terminal(&mut self, symbol: Symbol) -> &mut Self {
        debug_assert!(symbol.is_terminal());
        self.rhs.push(symbol);
        self
    }

    /// Appends a non-terminal, named by identifier, to this rule's
    /// right-hand side.
    pub fn non_terminal(&mut self, name: impl Into<String>) -> &mut Self {
        self.rhs.push(Symbol::non_terminal(name));
        self
    }

    /// Sets the callback identifier fired when this rule reduces.
    pub fn callback(&mut self, name: impl Into<String>) -> &mut Self {
        self.callback = Some(name.into());
        self
    }

    /// The left-hand side as a `Symbol`.
    pub fn lhs_symbol(&self) -> Symbol {
        Symbol::non_terminal(self.lhs.clone())
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ->", self.lhs)?;
        for symbol in &self.rhs {
            write!(f, " {symbol}")?;
        }
        if let Some(cb) = &self.callback {
            write!(f, " {{{cb}}}")?;
        }
        Ok(())
    }
}

/// An ordered sequence of rules plus the derived set of declared
/// non-terminals.
///
/// The first rule registered is the root rule; its left-hand side is the
/// grammar's start symbol. Rules are immutable once [`Grammar::validate`]
/// (implicitly run at the start of table construction) has succeeded.
#[derive(Debug, Clone, Default)]
pub struct Grammar {
    rules: Vec<Rule>,
    non_terminals: HashSet<String>,
}

impl Grammar {
    /// Creates an empty grammar.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new rule with the given left-hand side and returns a
    /// mutable handle so the caller can append RHS symbols and set a
    /// callback. The first call establishes the root rule.
    pub fn add_rule(&mut self, lhs: impl Into<String>) -> &mut Rule {
        let lhs = lhs.into();
        let index = self.rules.len();
        self.non_terminals.insert(lhs.clone());
        self.rules.push(Rule {
            index,
            lhs,
            rhs: Vec::new(),
            callback: None,
        });
        self.rules.last_mut().unwrap()
    }

    /// All rules, in registration order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// All rules whose left-hand side is `nonterminal`, in registration
    /// order.
    pub fn rules_for(&self, nonterminal: &str) -> impl Iterator<Item = &Rule> {
        self.rules.iter().filter(move |r| r.lhs == nonterminal)
    }

    /// The set of declared non-terminal names (every rule's LHS).
    pub fn non_terminals(&self) -> &HashSet<String> {
        &self.non_terminals
    }

    /// The root rule: the first one registered.
    pub fn root_rule(&self) -> &Rule {
        &self.rules[0]
    }

    /// The grammar's start symbol: the root rule's left-hand side.
    pub fn start_symbol(&self) -> &str {
        &self.root_rule().lhs
    }

    /// Validates the grammar's structural invariants:
    /// - at least one rule is registered;
    /// - every non-terminal referenced on a right-hand side is some rule's
    ///   left-hand side.
    pub fn validate(&self) -> Result<()> {
        if self.rules.is_empty() {
            return Err(GrammarError::EmptyGrammar);
        }

        for rule in &self.rules {
            for symbol in &rule.rhs {
                if let Symbol::NonTerminal(name) = symbol {
                    if !self.non_terminals.contains(name) {
                        return Err(GrammarError::UndefinedNonTerminal(name.clone()));
                    }
                }
            }
        }

        Ok(())
    }
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rule in &self.rules {
            writeln!(f, "[{}] {}", rule.index, rule)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arithmetic_grammar() -> Grammar {
        let mut g = Grammar::new();
        g.add_rule("term").non_terminal("add");
        g.add_rule("add").non_terminal("add").terminal(Symbol::literal("+")).non_terminal("mul");
        g.add_rule("add").non_terminal("mul");
        g.add_rule("mul").non_terminal("mul").terminal(Symbol::literal("*")).non_terminal("unary");
        g.add_rule("mul").non_terminal("unary");
        g.add_rule("unary").terminal(Symbol::token_class("INT"));
        g.add_rule("unary")
            .terminal(Symbol::literal("("))
            .non_terminal("add")
            .terminal(Symbol::literal(")"));
        g
    }

    #[test]
    fn root_rule_is_first_registered() {
        let g = arithmetic_grammar();
        assert_eq!(g.root_rule().lhs, "term");
        assert_eq!(g.start_symbol(), "term");
    }

    #[test]
    fn indices_are_positional() {
        let g = arithmetic_grammar();
        for (i, rule) in g.rules().iter().enumerate() {
            assert_eq!(rule.index, i);
        }
    }

    #[test]
    fn repeated_lhs_is_alternation() {
        let g = arithmetic_grammar();
        let add_rules: Vec<_> = g.rules_for("add").collect();
        assert_eq!(add_rules.len(), 2);
    }

    #[test]
    fn validate_accepts_well_formed_grammar() {
        assert!(arithmetic_grammar().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_grammar() {
        let g = Grammar::new();
        assert_eq!(g.validate(), Err(GrammarError::EmptyGrammar));
    }

    #[test]
    fn validate_rejects_undefined_non_terminal() {
        let mut g = Grammar::new();
        g.add_rule("s").non_terminal("undefined");
        assert_eq!(
            g.validate(),
            Err(GrammarError::UndefinedNonTerminal("undefined".to_string()))
        );
    }

    #[test]
    fn display_matches_registration_order() {
        let g = arithmetic_grammar();
        let text = g.to_string();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 7);
        assert!(lines[0].starts_with("[0] term ->"));
    }
}
