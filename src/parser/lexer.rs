use crate::grammar::{Alternative, Rule, Symbol, ARROW, EMPTY_MARKER, RULE_SEPARATOR};

use super::{Result, ViolationKind};

// One `;`-separated piece of the input, cut on the arrow but not yet checked
#[derive(PartialEq, Debug)]
pub struct RawRule<'a> {
    // 1-based position in the input
    pub position: usize,
    pub text: &'a str,
    pub sides: Vec<&'a str>
}

impl<'a> RawRule<'a> {
    pub fn left(&self) -> &'a str {
        self.sides.first().copied().unwrap_or("")
    }

    pub fn right(&self) -> Option<&'a str> {
        self.sides.get(1).copied()
    }

    pub fn is_epsilon(&self) -> bool {
        self.sides.len() == 2 && is_empty_marker(self.sides[1])
    }
}

pub fn is_empty_marker(side: &str) -> bool {
    let mut chars = side.chars();
    chars.next() == Some(EMPTY_MARKER) && chars.next().is_none()
}

pub fn split_rules(text: &str) -> Vec<RawRule<'_>> {
    text.split(RULE_SEPARATOR)
        .enumerate()
        .map(|(i, rule)| RawRule {
            position: i + 1,
            text: rule,
            sides: rule.split(ARROW).collect()
        })
        .collect()
}

pub fn lex_left(side: &str) -> Result<char> {
    let mut chars = side.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => match Symbol::from_char(c) {
            Some(Symbol::Nonterminal(c)) => Ok(c),
            Some(Symbol::Terminal(_)) => Err(ViolationKind::LeftNotNonterminal),
            None => Err(ViolationKind::NonAlphabeticSymbol),
        },
        _ => Err(ViolationKind::LeftNotSingleSymbol),
    }
}

pub fn lex_right(side: &str) -> Result<Alternative> {
    if is_empty_marker(side) {
        return Ok(Vec::new());
    }
    if side.is_empty() {
        return Err(ViolationKind::NonAlphabeticSymbol);
    }

    side.chars()
        .map(|c| Symbol::from_char(c).ok_or(ViolationKind::NonAlphabeticSymbol))
        .collect()
}

pub fn lex_rule(raw: &RawRule) -> Result<Rule> {
    match raw.sides[..] {
        [left, right] => Ok(Rule::new(lex_left(left)?, lex_right(right)?)),
        _ => Err(ViolationKind::MalformedArrow),
    }
}
