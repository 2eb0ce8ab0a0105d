/*
    This module is for storing and manipulating grammars
*/

pub mod epsilon;

use std::collections::BTreeSet;
use std::fmt::Display;

use itertools::Itertools;

// Separates the two sides of a rule
pub const ARROW: &str = "->";

// Separates rules from each other
pub const RULE_SEPARATOR: char = ';';

// Stands alone as the right side of an epsilon rule
pub const EMPTY_MARKER: char = '\\';

// The base unit in a grammar rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Symbol {
    Terminal(char),
    Nonterminal(char),
}

impl Symbol {
    /// Classifies a character, `None` when it is not an ASCII letter.
    pub fn from_char(c: char) -> Option<Symbol> {
        if c.is_ascii_uppercase() {
            Some(Symbol::Nonterminal(c))
        } else if c.is_ascii_lowercase() {
            Some(Symbol::Terminal(c))
        } else {
            None
        }
    }

    pub fn as_char(&self) -> char {
        match self {
            Symbol::Terminal(c) | Symbol::Nonterminal(c) => *c,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Symbol::Terminal(_))
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

// The symbols on the right side of a rule
pub type Alternative = Vec<Symbol>;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Rule {
    pub left: char,
    pub right: Alternative,
}

impl Rule {
    pub fn new(left: char, right: Alternative) -> Self {
        Rule { left, right }
    }

    pub fn is_epsilon(&self) -> bool {
        self.right.is_empty()
    }

    // A rule such as `A->A`, which rewrites a nonterminal into itself
    pub fn is_self_loop(&self) -> bool {
        self.right == [Symbol::Nonterminal(self.left)]
    }

    pub fn count(&self, symbol: Symbol) -> usize {
        self.right.iter().filter(|&&s| s == symbol).count()
    }
}

impl Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.right.is_empty() {
            write!(f, "{}{}{}", self.left, ARROW, EMPTY_MARKER)
        } else {
            write!(f, "{}{}{}", self.left, ARROW, self.right.iter().join(""))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Grammar {
    pub rules: Vec<Rule>,
}

impl Grammar {
    pub fn new(rules: Vec<Rule>) -> Self {
        Grammar { rules }
    }

    // Every symbol used anywhere, terminals first, each group in character order
    pub fn alphabet(&self) -> BTreeSet<Symbol> {
        alphabet(&self.rules)
    }

    pub fn nonterminals(&self) -> BTreeSet<char> {
        self.rules.iter().map(|rule| rule.left).collect()
    }

    pub fn terminals(&self) -> BTreeSet<char> {
        self.alphabet()
            .into_iter()
            .filter(Symbol::is_terminal)
            .map(|symbol| symbol.as_char())
            .collect()
    }

    // Nonterminals owning an epsilon rule, in order of first appearance
    pub fn nullable(&self) -> Vec<char> {
        self.rules
            .iter()
            .filter(|rule| rule.is_epsilon())
            .map(|rule| rule.left)
            .unique()
            .collect()
    }

    /// Separates the epsilon rules out, returning the remaining rules and the
    /// nonterminals that had an epsilon rule.
    pub fn split_epsilon(self) -> (Vec<Rule>, Vec<char>) {
        let nullable = self.nullable();
        let rules = self.rules.into_iter().filter(|rule| !rule.is_epsilon()).collect();
        (rules, nullable)
    }

    /// Runs epsilon elimination, giving an equivalent grammar (minus the empty
    /// word) with no epsilon rules.
    pub fn without_epsilon(self) -> Grammar {
        let (rules, nullable) = self.split_epsilon();
        Grammar::new(epsilon::eliminate(rules, nullable))
    }
}

impl Display for Grammar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.rules.iter().join(&RULE_SEPARATOR.to_string()))
    }
}

pub fn alphabet(rules: &[Rule]) -> BTreeSet<Symbol> {
    rules
        .iter()
        .flat_map(|rule| std::iter::once(Symbol::Nonterminal(rule.left)).chain(rule.right.iter().copied()))
        .collect()
}
