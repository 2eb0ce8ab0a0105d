/*
    This module checks and parses grammar text such as `S->aSb;S->ab`
*/

pub mod lexer;
mod verifier;

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::error_handling::{self, ErrorType, Errors, Location};
use crate::grammar::Grammar;
use lexer::{lex_rule, split_rules};
use verifier::verify_rules;

#[derive(Debug, Error, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
pub enum ViolationKind {
    // A rule does not have exactly one `->`
    #[error("You have incorrectly used '->' in at least one rule.")]
    MalformedArrow,
    // The left side is empty or longer than one symbol
    #[error("For a context free grammar, the left side of the rule must be one letter long.")]
    LeftNotSingleSymbol,
    // The left side is a terminal
    #[error("For a context free grammar, the left side of the rule must be a nonterminal symbol.")]
    LeftNotNonterminal,
    // Something other than a letter, or a misplaced empty marker
    #[error("You may only use alphabetical characters for this program, and '\\' only as a whole right side.")]
    NonAlphabeticSymbol,
    // A nonterminal whose only rules are epsilon rules
    #[error("A nonterminal with a rule to '\\' needs at least one other rule.")]
    DanglingEpsilon,
}

impl ErrorType for ViolationKind {}

pub type Violation = error_handling::Error<ViolationKind>;
pub type Violations = Errors<ViolationKind>;

pub type Result<T> = std::result::Result<T, ViolationKind>;
pub type GrammarResult<T> = std::result::Result<T, Violations>;

#[derive(Debug, Error)]
pub enum LambertError {
    #[error("the grammar was rejected with {} problem(s)", .0.len())]
    Invalid(Violations),
    #[error("could not read `{}`: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error
    },
}

impl From<Violations> for LambertError {
    fn from(violations: Violations) -> Self {
        LambertError::Invalid(violations)
    }
}

/// Every problem with the grammar text, each kind reported once. An empty
/// list means the text is a well-formed grammar.
pub fn validate(text: &str) -> Violations {
    verify_rules(&split_rules(text))
}

pub fn parse_grammar(text: &str) -> GrammarResult<Grammar> {
    let raw = split_rules(text);

    let violations = verify_rules(&raw);
    if !violations.is_empty() {
        debug!(count = violations.len(), "grammar rejected");
        return Err(violations);
    }

    let rules = raw.iter()
        .map(|rule| lex_rule(rule).map_err(|error| vec![Violation {
            location: Location {
                rule: rule.position,
                text: rule.text.to_owned()
            },
            error
        }]))
        .collect::<GrammarResult<Vec<_>>>()?;

    debug!(rules = rules.len(), "grammar parsed");
    Ok(Grammar::new(rules))
}

// Reads grammar text from a file, ignoring leading and trailing whitespace
pub fn read_grammar_file(path: &Path) -> std::result::Result<String, LambertError> {
    fs::read_to_string(path)
        .map(|text| text.trim().to_owned())
        .map_err(|source| LambertError::Io {
            path: path.to_path_buf(),
            source
        })
}

pub fn parse_file(path: &Path) -> std::result::Result<Grammar, LambertError> {
    let text = read_grammar_file(path)?;
    Ok(parse_grammar(&text)?)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::error_handling::kinds;
    use crate::grammar::tests::rules;

    #[test]
    fn parse_normal_grammar() {
        let grammar = parse_grammar("S->aSb;S->ab;S->\\").unwrap();
        assert_eq!(grammar, Grammar::new(rules("S->aSb;S->ab;S->\\")));
    }

    #[test]
    fn parse_malformed_grammar() {
        let violations = parse_grammar("S->aSb;s->1").unwrap_err();
        assert_eq!(violations, vec![
            Violation {
                location: Location { rule: 2, text: "s->1".to_string() },
                error: ViolationKind::LeftNotNonterminal
            },
            Violation {
                location: Location { rule: 2, text: "s->1".to_string() },
                error: ViolationKind::NonAlphabeticSymbol
            }
        ]);
    }

    #[test]
    fn messages_follow_kind_order() {
        let messages = validate("S->\\;s->a;S").iter().map(|v| v.error.to_string()).collect::<Vec<_>>();
        assert_eq!(messages, vec![
            "You have incorrectly used '->' in at least one rule.",
            "For a context free grammar, the left side of the rule must be a nonterminal symbol.",
            "A nonterminal with a rule to '\\' needs at least one other rule."
        ]);
    }

    #[test]
    fn parse_normal_file() {
        let grammar = parse_file(Path::new("example_data/anbn.cfg")).unwrap();
        assert_eq!(grammar, Grammar::new(rules("S->aSb;S->ab")));
    }

    #[test]
    fn parse_malformed_file() {
        match parse_file(Path::new("example_data/malformed.cfg")) {
            Err(LambertError::Invalid(violations)) => {
                assert_eq!(kinds(&violations).into_iter().collect::<Vec<_>>(), vec![
                    ViolationKind::LeftNotSingleSymbol,
                    ViolationKind::LeftNotNonterminal,
                    ViolationKind::DanglingEpsilon
                ]);
            }
            other => panic!("expected a rejected grammar, got {:?}", other),
        }
    }

    #[test]
    fn parse_missing_file() {
        let error = parse_file(Path::new("example_data/missing.cfg")).unwrap_err();
        assert!(matches!(error, LambertError::Io { .. }));
        assert!(error.to_string().starts_with("could not read `example_data/missing.cfg`"));
    }
}
