use std::collections::HashSet;

use tracing::trace;

use super::lexer::{is_empty_marker, RawRule};
use super::ViolationKind::{self, *};
use super::{Location, Violation, Violations};

// Same meaning as Python's `str.islower`: there is a cased character and
// none of the cased characters are uppercase
fn is_lower(text: &str) -> bool {
    text.chars().any(char::is_lowercase) && !text.chars().any(char::is_uppercase)
}

fn is_alphabetic(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| c.is_ascii_alphabetic())
}

// Every kind of problem a single rule has. Each check only looks at what it
// needs, so a rule failing one check never stops the others.
fn rule_violations(rule: &RawRule) -> Vec<ViolationKind> {
    let mut found = Vec::new();
    let left = rule.left();

    if rule.sides.len() != 2 {
        found.push(MalformedArrow);
    }
    if left.chars().count() != 1 {
        found.push(LeftNotSingleSymbol);
    }
    if is_lower(left) {
        found.push(LeftNotNonterminal);
    }
    let right_ok = rule.right().map_or(true, |right| is_alphabetic(right) || is_empty_marker(right));
    if !is_alphabetic(left) || !right_ok {
        found.push(NonAlphabeticSymbol);
    }

    found
}

// Nonterminals that only have epsilon rules, each with the first epsilon rule
// mentioning it
fn dangling_epsilons<'a>(rules: &'a [RawRule<'a>]) -> Vec<&'a RawRule<'a>> {
    let productive: HashSet<&str> = rules.iter()
        .filter(|rule| rule.sides.len() == 2 && !rule.is_epsilon())
        .map(|rule| rule.left())
        .collect();

    let mut reported = HashSet::new();
    rules.iter()
        .filter(|rule| rule.is_epsilon())
        .filter(|rule| !productive.contains(rule.left()))
        .filter(|rule| reported.insert(rule.left()))
        .collect()
}

fn location(rule: &RawRule) -> Location {
    Location {
        rule: rule.position,
        text: rule.text.to_owned()
    }
}

// Checks every rule against every constraint, reporting each kind of
// violation once, at the first rule that shows it
pub fn verify_rules<'a>(rules: &'a [RawRule<'a>]) -> Violations {
    let mut violations: Violations = Vec::new();

    let per_rule = rules.iter()
        .flat_map(|rule| rule_violations(rule).into_iter().map(move |kind| (kind, rule)));
    let epsilon = dangling_epsilons(rules).into_iter().map(|rule| (DanglingEpsilon, rule));

    for (kind, rule) in per_rule.chain(epsilon) {
        trace!(%kind, rule = rule.text, "violation");
        if violations.iter().all(|v| v.error != kind) {
            violations.push(Violation {
                location: location(rule),
                error: kind
            });
        }
    }

    violations.sort_by_key(|v| v.error);
    violations
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::error_handling::kinds;
    use crate::parser::lexer::split_rules;

    fn verify(text: &str) -> Vec<ViolationKind> {
        kinds(&verify_rules(&split_rules(text))).into_iter().collect()
    }

    #[test]
    fn python_style_lowercase() {
        assert!(is_lower("s"));
        assert!(is_lower("ab1"));
        assert!(!is_lower("S"));
        assert!(!is_lower("aB"));
        assert!(!is_lower(""));
        assert!(!is_lower("1"));
    }

    #[test]
    fn verify_normal_grammars() {
        assert_eq!(verify("S->aSb;S->ab"), Vec::<ViolationKind>::new());
        assert_eq!(verify("S->ab;S->\\"), Vec::<ViolationKind>::new());
        assert_eq!(verify("S->AB;A->a;A->\\;B->b;B->\\"), Vec::<ViolationKind>::new());
        assert_eq!(verify("S->\\;S->a"), Vec::<ViolationKind>::new());
    }

    #[test]
    fn verify_single_violations() {
        assert_eq!(verify("S->aSb;S"), vec![MalformedArrow]);
        assert_eq!(verify("S->a->b"), vec![MalformedArrow]);
        assert_eq!(verify("ST->a"), vec![LeftNotSingleSymbol]);
        assert_eq!(verify("s->ab"), vec![LeftNotNonterminal]);
        assert_eq!(verify("S->a1"), vec![NonAlphabeticSymbol]);
        assert_eq!(verify("S->"), vec![NonAlphabeticSymbol]);
        assert_eq!(verify("S->\\"), vec![DanglingEpsilon]);
    }

    #[test]
    fn verify_survives_empty_pieces() {
        assert_eq!(verify(""), vec![MalformedArrow, LeftNotSingleSymbol, NonAlphabeticSymbol]);
        assert_eq!(verify("S->a;"), vec![MalformedArrow, LeftNotSingleSymbol, NonAlphabeticSymbol]);
        assert_eq!(verify("->a"), vec![LeftNotSingleSymbol, NonAlphabeticSymbol]);
    }

    #[test]
    fn verify_reports_each_kind_once() {
        let violations = verify_rules(&split_rules("s->a;S->\\;t->b;1->c;U->\\"));

        assert_eq!(violations.iter().map(|v| v.error).collect::<Vec<_>>(), vec![
            LeftNotNonterminal,
            NonAlphabeticSymbol,
            DanglingEpsilon
        ]);
        assert_eq!(violations[0].location, Location { rule: 1, text: "s->a".to_string() });
        assert_eq!(violations[1].location, Location { rule: 4, text: "1->c".to_string() });
        assert_eq!(violations[2].location, Location { rule: 2, text: "S->\\".to_string() });
    }

    #[test]
    fn verify_epsilon_needs_an_alternative() {
        assert_eq!(verify("S->aA;A->\\;A->\\"), vec![DanglingEpsilon]);
        assert_eq!(verify("S->aA;A->\\;A->a"), Vec::<ViolationKind>::new());
        // the alternative has to be a well-formed rule
        assert_eq!(verify("S->aA;A->\\;A->a->b"), vec![MalformedArrow, DanglingEpsilon]);
    }

    #[test]
    fn verify_is_deterministic() {
        let text = "S->aSb;s->\\;AB->c;D->\\";
        assert_eq!(verify_rules(&split_rules(text)), verify_rules(&split_rules(text)));
    }
}
