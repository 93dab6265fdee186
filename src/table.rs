//! Table assembly: translating the automaton into action/goto rows, with
//! strict conflict detection.

use crate::automaton::Automaton;
use crate::error::{GrammarError, Result};
use crate::grammar::Grammar;
use crate::symbol::Symbol;
use log::debug;
use std::collections::HashMap;
use std::fmt;

/// A single action-table entry: either shift to a destination state, or
/// reduce by a rule index. There is no separate `Accept` entry, the root
/// rule's reduce is recognized specially by the parser runtime (§4.6).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Shift(usize),
    Reduce(usize),
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Shift(s) => write!(f, "shift {s}"),
            Action::Reduce(r) => write!(f, "reduce {r}"),
        }
    }
}

/// One row of the table, corresponding to one automaton state.
#[derive(Debug, Clone, Default)]
pub struct Row {
    pub action: HashMap<String, Action>,
    pub goto: HashMap<String, usize>,
}

/// The assembled action/goto table, indexed identically to the automaton's
/// states.
#[derive(Debug, Clone)]
pub struct Table {
    pub rows: Vec<Row>,
    pub initial: usize,
}

/// Inserts an action-table entry for `symbol`, raising a structured conflict
/// error instead of silently overwriting an existing entry (spec §4.5's "no
/// overwrites" invariant).
fn insert_action(
    grammar: &Grammar,
    state: usize,
    symbol: &Symbol,
    incoming: Action,
    action: &mut HashMap<String, Action>,
) -> Result<()> {
    let key = symbol.key().to_string();
    match action.get(&key) {
        None => {
            action.insert(key, incoming);
            Ok(())
        }
        Some(&existing) if existing == incoming => Ok(()),
        Some(&existing) => Err(match (existing, incoming) {
            (Action::Reduce(r1), Action::Reduce(r2)) => GrammarError::ReduceReduceConflict {
                state,
                symbol: key,
                rule1: grammar.rules()[r1].to_string(),
                rule2: grammar.rules()[r2].to_string(),
            },
            (Action::Shift(dest), Action::Reduce(r)) | (Action::Reduce(r), Action::Shift(dest)) => {
                GrammarError::ShiftReduceConflict {
                    state,
                    symbol: key,
                    shift_dest: dest,
                    reduce_rule: grammar.rules()[r].to_string(),
                }
            }
            (Action::Shift(d1), Action::Shift(d2)) => GrammarError::InternalConflict {
                state,
                symbol: key,
                existing: format!("shift {d1}"),
                incoming: format!("shift {d2}"),
            },
        }),
    }
}

/// Inserts a GOTO-table entry, raising `GrammarError::InternalConflict` if a
/// different destination is already recorded (a canonical LR(1) automaton
/// should never produce this; it would indicate a bug in `automaton::build`).
fn insert_goto(state: usize, symbol: &Symbol, dest: usize, goto: &mut HashMap<String, usize>) -> Result<()> {
    let key = symbol.key().to_string();
    match goto.get(&key) {
        None => {
            goto.insert(key, dest);
            Ok(())
        }
        Some(&existing) if existing == dest => Ok(()),
        Some(&existing) => Err(GrammarError::InternalConflict {
            state,
            symbol: key,
            existing: format!("goto {existing}"),
            incoming: format!("goto {dest}"),
        }),
    }
}

/// Builds the action/goto table for `automaton`, one row per state in index
/// order, failing on the first detected conflict.
pub fn build(grammar: &Grammar, automaton: &Automaton) -> Result<Table> {
    let mut rows = Vec::with_capacity(automaton.states.len());

    for state in &automaton.states {
        let mut row = Row::default();

        for edge in &state.out_edges {
            match &edge.label {
                Symbol::Terminal(_) => {
                    insert_action(grammar, state.index, &edge.label, Action::Shift(edge.dest), &mut row.action)?;
                }
                Symbol::NonTerminal(_) => {
                    insert_goto(state.index, &edge.label, edge.dest, &mut row.goto)?;
                }
            }
        }

        for item in state.items.iter() {
            if item.is_reduce(grammar) {
                let rule = item.rule(grammar);
                for symbol in &item.lookahead {
                    insert_action(grammar, state.index, symbol, Action::Reduce(rule.index), &mut row.action)?;
                }
            }
        }

        debug!(
            "state {}: {} actions, {} gotos",
            state.index,
            row.action.len(),
            row.goto.len()
        );
        rows.push(row);
    }

    Ok(Table {
        rows,
        initial: automaton.initial,
    })
}
