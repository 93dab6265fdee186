//! FIRST-set fixed-point computation.
//!
//! Computes, for every non-terminal `A`, FIRST(A): the set of terminals that
//! can begin any sentential form derivable from `A`. This engine assumes no
//! production is epsilon (see the crate-level docs and DESIGN.md for why);
//! only the leftmost RHS symbol of each production is ever consulted.

use crate::grammar::Grammar;
use crate::symbol::Symbol;
use log::trace;
use std::collections::{HashMap, HashSet};

/// Mapping from non-terminal identifier to its FIRST set of terminals.
pub type FirstSets = HashMap<String, HashSet<Symbol>>;

/// Computes FIRST(A) for every non-terminal `A` in `grammar` by fixed-point
/// iteration.
///
/// For a rule `A -> X β`:
/// - if `X` is a terminal `t`, `t` is added to FIRST(A);
/// - if `X` is a non-terminal `Y`, FIRST(Y) is unioned into FIRST(A).
///
/// Iteration continues until a full pass over every rule adds nothing new.
pub fn compute_first_sets(grammar: &Grammar) -> FirstSets {
    let mut first_sets: FirstSets = grammar
        .non_terminals()
        .iter()
        .map(|nt| (nt.clone(), HashSet::new()))
        .collect();

    let mut pass = 0usize;
    let mut changed = true;
    while changed {
        changed = false;
        pass += 1;

        for rule in grammar.rules() {
            let Some(first_symbol) = rule.rhs.first() else {
                continue;
            };

            let additions: Vec<Symbol> = match first_symbol {
                Symbol::Terminal(_) => vec![first_symbol.clone()],
                Symbol::NonTerminal(name) => first_sets
                    .get(name)
                    .map(|set| set.iter().cloned().collect())
                    .unwrap_or_default(),
            };

            let entry = first_sets.entry(rule.lhs.clone()).or_default();
            for symbol in additions {
                if entry.insert(symbol) {
                    changed = true;
                }
            }
        }

        trace!("FIRST fixed-point pass {pass}: changed = {changed}");
    }

    first_sets
}
