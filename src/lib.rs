//! Compiles context-free rewrite grammars such as `S->aSb;S->ab` into Lambert
//! graphs: directed hypergraphs whose hyperedges have ordered tails.
//!
//! The text is validated, its epsilon rules (`A->\`) are eliminated and the
//! remaining rules become hyperedges, one per rule plus one tailless edge per
//! terminal.

pub mod error_handling;
pub mod grammar;
pub mod lambert;
pub mod parser;

pub use grammar::{Grammar, Rule, Symbol};
pub use lambert::{build, LambertGraph, NodeId, RuleOrder};
pub use parser::{parse_grammar, validate, GrammarResult, LambertError, ViolationKind, Violations};

// Settings for turning a grammar into a graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Options {
    pub order: RuleOrder,
}

/// Validates `text` and compiles it with the default options.
pub fn compile(text: &str) -> GrammarResult<LambertGraph> {
    compile_with(text, &Options::default())
}

pub fn compile_with(text: &str, options: &Options) -> GrammarResult<LambertGraph> {
    let grammar = parse_grammar(text)?.without_epsilon();
    Ok(build(&grammar.rules, options.order))
}
