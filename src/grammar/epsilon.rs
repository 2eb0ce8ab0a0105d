/*
    This module removes epsilon rules from a grammar by spelling out every way
    a nullable nonterminal can disappear from a right side
*/

use std::collections::{HashSet, VecDeque};

use indexmap::IndexSet;
use tracing::debug;

use super::{Rule, Symbol};

/// Every keep/drop vector of length `n`, `true` meaning the occurrence is
/// kept. The all-kept vector comes first and the all-dropped one last.
///
/// There are `2^n` of them, so the cost is exponential in the number of
/// occurrences of one nonterminal on a single right side. No cap is applied.
pub fn combinations(n: usize) -> Vec<Vec<bool>> {
    branch(Vec::with_capacity(n), n)
}

// Each branch gets its own copy of the prefix
fn branch(prefix: Vec<bool>, remaining: usize) -> Vec<Vec<bool>> {
    if remaining == 0 {
        return vec![prefix];
    }

    let mut kept = prefix.clone();
    kept.push(true);
    let mut dropped = prefix;
    dropped.push(false);

    let mut result = branch(kept, remaining - 1);
    result.extend(branch(dropped, remaining - 1));
    result
}

// Removes the occurrences of `symbol` whose flag in `keep` is false, leaving
// every other symbol where it was
fn delete_occurrences(right: &[Symbol], symbol: Symbol, keep: &[bool]) -> Vec<Symbol> {
    let mut flags = keep.iter().copied();
    right
        .iter()
        .filter(|&&s| s != symbol || flags.next().unwrap_or(true))
        .copied()
        .collect()
}

/// Closes `rules` under deletion of nullable nonterminals.
///
/// `nullable` seeds the worklist with the nonterminals that had an epsilon
/// rule. Whenever dropping occurrences empties a right side, its left side is
/// nullable too and gets queued. The result keeps the input rules first, in
/// their order, followed by the new rules in the order they were found. It
/// never contains an epsilon rule or a generated `A->A`.
///
/// Panics if `rules` contains an epsilon rule.
pub fn eliminate(rules: Vec<Rule>, nullable: Vec<char>) -> Vec<Rule> {
    assert!(
        rules.iter().all(|rule| !rule.is_epsilon()),
        "epsilon rules must be split off before elimination"
    );

    let mut rules: IndexSet<Rule> = rules.into_iter().collect();
    let mut seen = HashSet::new();
    let mut worklist: VecDeque<char> = nullable.into_iter().filter(|n| seen.insert(*n)).collect();

    while let Some(nonterminal) = worklist.pop_front() {
        let symbol = Symbol::Nonterminal(nonterminal);
        let before = rules.len();

        let affected: Vec<Rule> = rules.iter().filter(|rule| rule.count(symbol) > 0).cloned().collect();
        for rule in affected {
            for keep in combinations(rule.count(symbol)) {
                let candidate = Rule::new(rule.left, delete_occurrences(&rule.right, symbol, &keep));

                if candidate.is_epsilon() {
                    if seen.insert(rule.left) {
                        debug!(nonterminal = %rule.left, via = %rule, "nonterminal became nullable");
                        worklist.push_back(rule.left);
                    }
                } else if !candidate.is_self_loop() && !rules.contains(&candidate) {
                    debug!(rule = %candidate, from = %rule, "added rule");
                    rules.insert(candidate);
                }
            }
        }

        debug!(%nonterminal, added = rules.len() - before, "expanded nullable nonterminal");
    }

    rules.into_iter().collect()
}
