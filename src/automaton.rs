//! Canonical LR(1) automaton construction: closure, GOTO, and the
//! worklist-driven state builder with deduplication.

use crate::first::FirstSets;
use crate::grammar::Grammar;
use crate::item::{Edge, Item, ItemSet, State};
use crate::symbol::Symbol;
use log::debug;
use std::collections::{BTreeSet, HashMap};

/// The canonical LR(1) automaton: an arena of admitted states, each owning
/// its incoming and outgoing edges by index rather than by pointer, so the
/// graph (which routinely contains cycles) needs no tracing collector.
#[derive(Debug, Clone)]
pub struct Automaton {
    pub states: Vec<State>,
    pub initial: usize,
}

/// Computes the lookahead set to propagate into items introduced by closure
/// for the symbols following `dot` in `rhs`.
///
/// - If `beta` (the symbols after the one the dot just passed) starts with a
///   terminal, the lookahead is that single terminal.
/// - If `beta` starts with a non-terminal, the lookahead is FIRST of that
///   non-terminal.
/// - If `beta` is empty, the lookahead propagates unchanged from `L`.
///
/// Only the leftmost symbol of `beta` is consulted, which is sound under
/// this crate's no-epsilon-production assumption (see `first.rs`).
fn closure_lookahead(beta: &[Symbol], propagated: &BTreeSet<Symbol>, first_sets: &FirstSets) -> BTreeSet<Symbol> {
    match beta.first() {
        None => propagated.clone(),
        Some(Symbol::Terminal(_)) => BTreeSet::from([beta[0].clone()]),
        Some(Symbol::NonTerminal(name)) => first_sets
            .get(name)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default(),
    }
}

/// Computes the closure of an item set in place: while any item
/// `[A -> α · B β, L]` has a non-terminal `B` after the dot, adds
/// `[B -> · γ, look]` for every production `B -> γ`, merging lookaheads into
/// any existing core-equal item.
fn closure(grammar: &Grammar, first_sets: &FirstSets, items: &mut ItemSet) {
    loop {
        let mut changed = false;
        let snapshot: Vec<Item> = items.iter().cloned().collect();

        for item in &snapshot {
            let Some(Symbol::NonTerminal(name)) = item.symbol_after_dot(grammar) else {
                continue;
            };
            let name = name.clone();
            let rule = item.rule(grammar);
            let beta = &rule.rhs[item.dot + 1..];
            let look = closure_lookahead(beta, &item.lookahead, first_sets);

            for production in grammar.rules_for(&name) {
                let new_item = Item::new(production.index, 0, look.clone());
                if items.insert(new_item) {
                    changed = true;
                }
            }
        }

        if !changed {
            break;
        }
    }
}

/// The seed items of `GOTO(items, symbol)`: every item whose dot advances
/// past `symbol`. Not yet closed, closure happens once the seed is admitted
/// or merged, per the builder's worklist discipline.
fn goto_seed(grammar: &Grammar, items: &ItemSet, symbol: &Symbol) -> ItemSet {
    let mut seed = ItemSet::new();
    for item in items.iter() {
        if item.symbol_after_dot(grammar) == Some(symbol) {
            seed.insert(Item::new(item.rule_index, item.dot + 1, item.lookahead.clone()));
        }
    }
    seed
}

/// Distinct symbols immediately right of the dot across an item set, in a
/// deterministic (sorted) order.
fn advancing_symbols(grammar: &Grammar, items: &ItemSet) -> Vec<Symbol> {
    let set: BTreeSet<Symbol> = items
        .iter()
        .filter_map(|item| item.symbol_after_dot(grammar).cloned())
        .collect();
    set.into_iter().collect()
}

/// Adds an edge `src --label--> dest` to both endpoints' edge lists, unless
/// an edge with the same `(dest, label)` already exists on `src` (edges are
/// equal when src, dest, and label coincide).
fn add_edge(states: &mut [State], src: usize, dest: usize, label: Symbol) {
    let exists = states[src]
        .out_edges
        .iter()
        .any(|e| e.dest == dest && e.label == label);
    if exists {
        return;
    }

    let edge = Edge { src, dest, label };

    if src == dest {
        states[src].out_edges.push(edge.clone());
        states[src].in_edges.push(edge);
        return;
    }

    let (lo, hi) = if src < dest { (src, dest) } else { (dest, src) };
    let (left, right) = states.split_at_mut(hi);
    let lo_state = &mut left[lo];
    let hi_state = &mut right[0];

    if src < dest {
        lo_state.out_edges.push(edge.clone());
        hi_state.in_edges.push(edge);
    } else {
        hi_state.out_edges.push(edge.clone());
        lo_state.in_edges.push(edge);
    }
}

/// A state waiting to be closed and either admitted or merged into an
/// existing state. `via` is `None` only for the single initial state.
struct Pending {
    items: ItemSet,
    via: Option<(usize, Symbol)>,
}

/// Builds the canonical LR(1) automaton for `grammar`.
///
/// Seeds a worklist with the initial state `[root -> · rhs, {END}]`, then
/// repeatedly pops a pending state, closes it, and either admits it as a new
/// state (enqueueing its successors) or folds it into an item-set-equal
/// admitted state (wiring the incoming edge to the existing state instead).
/// The worklist is a `Vec`-backed LIFO stack; the algorithm is confluent, so
/// any discipline yields the same automaton up to state numbering.
pub fn build(grammar: &Grammar, first_sets: &FirstSets) -> Automaton {
    let root = grammar.root_rule();
    let mut initial_items = ItemSet::new();
    initial_items.insert(Item::new(root.index, 0, BTreeSet::from([Symbol::end()])));

    let mut worklist: Vec<Pending> = vec![Pending {
        items: initial_items,
        via: None,
    }];
    let mut states: Vec<State> = Vec::new();
    let mut canonical: HashMap<Vec<(usize, usize, BTreeSet<Symbol>)>, usize> = HashMap::new();
    let mut initial_index = 0;

    while let Some(pending) = worklist.pop() {
        let mut items = pending.items;
        closure(grammar, first_sets, &mut items);

        let key = items.canonical_key();
        if let Some(&existing) = canonical.get(&key) {
            if let Some((src, label)) = pending.via {
                debug!("state folds into existing state {existing}");
                add_edge(&mut states, src, existing, label);
            }
            continue;
        }

        let new_index = states.len();
        canonical.insert(key, new_index);
        states.push(State::new(new_index, items.clone()));
        debug!("admitted state {new_index} with {} items", items.len());

        if pending.via.is_none() {
            initial_index = new_index;
        } else if let Some((src, label)) = pending.via {
            add_edge(&mut states, src, new_index, label);
        }

        for symbol in advancing_symbols(grammar, &items) {
            let seed = goto_seed(grammar, &items, &symbol);
            if seed.is_empty() {
                continue;
            }
            worklist.push(Pending {
                items: seed,
                via: Some((new_index, symbol)),
            });
        }
    }

    Automaton {
        states,
        initial: initial_index,
    }
}
