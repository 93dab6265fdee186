//! Deterministic, human-readable stringification of grammars, FIRST sets,
//! automaton states, and tables (§6.4). Iterates sorted views rather than
//! raw `HashMap` order so the output is stable across runs.

use crate::automaton::Automaton;
use crate::first::FirstSets;
use crate::grammar::Grammar;
use crate::item::State;
use crate::table::Table;
use std::collections::BTreeMap;
use std::fmt::Write as _;

/// Renders every rule, one per line, in registration order (identical to
/// `Grammar`'s own `Display` impl, exposed here so callers needn't know
/// that the two coincide).
pub fn format_grammar(grammar: &Grammar) -> String {
    grammar.to_string()
}

/// Renders FIRST sets sorted by non-terminal name, each set's terminals
/// sorted as well.
pub fn format_first_sets(first_sets: &FirstSets) -> String {
    let sorted: BTreeMap<&String, Vec<String>> = first_sets
        .iter()
        .map(|(name, set)| {
            let mut terms: Vec<String> = set.iter().map(|s| s.to_string()).collect();
            terms.sort();
            (name, terms)
        })
        .collect();

    let mut out = String::new();
    for (name, terms) in sorted {
        let _ = writeln!(out, "FIRST({name}) = {{{}}}", terms.join(", "));
    }
    out
}

/// Renders one automaton state: its items (with the dot drawn in place),
/// then its incoming and outgoing edges sorted by peer index.
pub fn format_state(state: &State, grammar: &Grammar) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "state {}:", state.index);
    for item in state.items.iter() {
        let _ = writeln!(out, "  {}", item.display(grammar));
    }

    let mut in_edges: Vec<_> = state.in_edges.iter().collect();
    in_edges.sort_by_key(|e| (e.src, e.label.to_string()));
    for edge in in_edges {
        let _ = writeln!(out, "  <- {} from {}", edge.label, edge.src);
    }

    let mut out_edges: Vec<_> = state.out_edges.iter().collect();
    out_edges.sort_by_key(|e| (e.dest, e.label.to_string()));
    for edge in out_edges {
        let _ = writeln!(out, "  -> {} to {}", edge.label, edge.dest);
    }

    out
}

/// Renders every state of `automaton`, in index order.
pub fn format_automaton(automaton: &Automaton, grammar: &Grammar) -> String {
    let mut out = String::new();
    for state in &automaton.states {
        out.push_str(&format_state(state, grammar));
    }
    out
}

/// Renders the action/goto table, one row per state, with action and goto
/// keys sorted for determinism.
pub fn format_table(table: &Table) -> String {
    let mut out = String::new();
    for (index, row) in table.rows.iter().enumerate() {
        let _ = writeln!(out, "state {index}:");

        let mut actions: Vec<_> = row.action.iter().collect();
        actions.sort_by_key(|(k, _)| k.clone());
        for (symbol, action) in actions {
            let _ = writeln!(out, "  action[{symbol}] = {action}");
        }

        let mut gotos: Vec<_> = row.goto.iter().collect();
        gotos.sort_by_key(|(k, _)| k.clone());
        for (symbol, dest) in gotos {
            let _ = writeln!(out, "  goto[{symbol}] = {dest}");
        }
    }
    out
}
