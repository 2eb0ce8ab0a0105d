/*
    This module builds Lambert graphs (hypergraphs with ordered tails) from
    epsilon-free grammars
*/

use std::collections::BTreeMap;
use std::fmt::Display;

use itertools::Itertools;
use tracing::debug;

use crate::grammar::{alphabet, Rule, Symbol};

// How rules are numbered before they become edges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RuleOrder {
    // Sorted by their textual form, the same grammar always gets the same numbering
    #[default]
    Lexicographic,
    // In the order they were written (new rules from epsilon elimination last)
    Insertion,
}

// The node standing for one grammar symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub Symbol);

impl Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "q_{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LambertGraph {
    pub nodes: Vec<NodeId>,
    // Edge index -> ordered tail. Position `i` in the tail is the edge's `i`th input.
    pub edges: BTreeMap<usize, Vec<NodeId>>,
    // Edge index -> the symbol the edge points to
    pub edge_head: BTreeMap<usize, Symbol>,
    // Edge index -> the rule the edge was made from, for rule edges only
    pub rules: BTreeMap<usize, Rule>,
}

impl LambertGraph {
    /// Head of edge 0, which renderers mark as the start node.
    pub fn start(&self) -> Option<NodeId> {
        self.edge_head.get(&0).map(|&head| NodeId(head))
    }

    pub fn edge(&self, index: usize) -> Option<(&[NodeId], Symbol)> {
        let tail = self.edges.get(&index)?;
        let head = self.edge_head.get(&index)?;
        Some((tail.as_slice(), *head))
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn rule_edges(&self) -> impl Iterator<Item = (usize, &Rule)> + '_ {
        self.rules.iter().map(|(&i, rule)| (i, rule))
    }

    // Edges with an empty tail, one per terminal
    pub fn terminal_edges(&self) -> impl Iterator<Item = (usize, Symbol)> + '_ {
        self.edges
            .iter()
            .filter(|(_, tail)| tail.is_empty())
            .filter_map(|(i, _)| self.edge_head.get(i).map(|&head| (*i, head)))
    }
}

impl Display for LambertGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "nodes: [{}]", self.nodes.iter().join(", "))?;
        writeln!(
            f,
            "edges: {{{}}}",
            self.edges.iter().map(|(i, tail)| format!("{}: [{}]", i, tail.iter().join(", "))).join(", ")
        )?;
        write!(
            f,
            "edge heads: {{{}}}",
            self.edge_head.iter().map(|(i, head)| format!("{}: {}", i, head)).join(", ")
        )
    }
}

/// Builds the Lambert graph of an epsilon-free rule set.
///
/// Rules get the indices `0..R` in the chosen order, then every terminal gets
/// a tailless edge, numbered on from `R` in character order. Each rule edge
/// points to the rule's left side and its tail lists the right side's symbols
/// in the order they are written.
///
/// Panics if a rule is an epsilon rule or has a lowercase left side.
pub fn build(rules: &[Rule], order: RuleOrder) -> LambertGraph {
    assert!(
        rules.iter().all(|rule| !rule.is_epsilon() && rule.left.is_ascii_uppercase()),
        "can only build a Lambert graph from validated, epsilon-free rules"
    );

    let ordered: Vec<&Rule> = match order {
        RuleOrder::Lexicographic => rules.iter().sorted_by_cached_key(|rule| rule.to_string()).collect(),
        RuleOrder::Insertion => rules.iter().collect(),
    };

    let symbols = alphabet(rules);
    let nodes = symbols.iter().map(|&symbol| NodeId(symbol)).collect_vec();

    let mut edges: BTreeMap<usize, Vec<NodeId>> = BTreeMap::new();
    let mut edge_head = BTreeMap::new();
    let mut indexed = BTreeMap::new();

    for (index, rule) in ordered.iter().enumerate() {
        edges.insert(index, rule.right.iter().map(|&symbol| NodeId(symbol)).collect());
        edge_head.insert(index, Symbol::Nonterminal(rule.left));
        indexed.insert(index, (*rule).clone());
    }

    let terminals = symbols.into_iter().filter(Symbol::is_terminal);
    for (index, terminal) in (ordered.len()..).zip(terminals) {
        edges.insert(index, Vec::new());
        edge_head.insert(index, terminal);
    }

    debug!(nodes = nodes.len(), edges = edges.len(), rules = indexed.len(), "built Lambert graph");

    LambertGraph {
        nodes,
        edges,
        edge_head,
        rules: indexed,
    }
}
