use std::fmt::Write;
use std::path::PathBuf;

use clap::Parser;
use tracing::info;

use lambert::parser::{parse_grammar, read_grammar_file};
use lambert::{build, LambertError, Options, RuleOrder};

const LONG_ABOUT: &str = "\
Turns a context free rewrite grammar into a Lambert graph (a directed hypergraph \
whose edges have ordered tails).

A context free rewrite grammar contains rules of the form A->B where A is a \
nonterminal symbol, and B is a string containing any number of nonterminal and \
terminal symbols. This program uses uppercase letters for nonterminal symbols and \
lowercase letters for the alphabet. Please enter the rules with '->' for the arrows, \
with semicolons in between each rule. A lone '\\' on the right side stands for the \
empty string. For example: 'S->aSb;S->ab' is a^nb^n.";

pub const USAGE_HINT: &str = "Run with --help for a description of the grammar format.";

#[derive(Parser)]
#[command(version, about, long_about = LONG_ABOUT)]
pub struct Cli {
    /// The grammar, for example `S->aSb;S->ab`
    #[arg(required_unless_present = "file", conflicts_with = "file")]
    pub grammar: Option<String>,

    /// File containing the grammar
    #[arg(short, long, value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Number the rules in the order they were written instead of sorting them
    #[arg(long)]
    pub insertion_order: bool,

    /// Also list the rules left after removing epsilon rules
    #[arg(short, long)]
    pub rules: bool,

    /// Log more (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8
}

impl Cli {
    pub fn options(&self) -> Options {
        Options {
            order: if self.insertion_order { RuleOrder::Insertion } else { RuleOrder::Lexicographic }
        }
    }

    // Log filter used when RUST_LOG is not set
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace"
        }
    }
}

// Compiles the grammar named on the command line and renders the graph as text
pub fn run(cli: &Cli) -> Result<String, LambertError> {
    let text = match (&cli.grammar, &cli.file) {
        (Some(grammar), _) => grammar.clone(),
        (None, Some(path)) => read_grammar_file(path)?,
        (None, None) => String::new()
    };

    let grammar = parse_grammar(&text)?;
    info!(rules = grammar.rules.len(), nullable = grammar.nullable().len(), "grammar accepted");

    let grammar = grammar.without_epsilon();
    info!(rules = grammar.rules.len(), "epsilon rules removed");

    let graph = build(&grammar.rules, cli.options().order);

    let mut output = String::new();
    if cli.rules {
        for (index, rule) in graph.rule_edges() {
            // Writing to a String cannot fail
            let _ = writeln!(output, "{}: {}", index, rule);
        }
    }
    let _ = writeln!(output, "{}", graph);
    Ok(output)
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;

    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("lambert").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn command_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_arguments() {
        let args = cli(&["S->ab", "--insertion-order", "-vv"]);
        assert_eq!(args.grammar.as_deref(), Some("S->ab"));
        assert_eq!(args.options(), Options { order: RuleOrder::Insertion });
        assert_eq!(args.log_level(), "debug");

        let args = cli(&["--file", "example_data/anbn.cfg"]);
        assert_eq!(args.file, Some(PathBuf::from("example_data/anbn.cfg")));
        assert_eq!(args.options(), Options::default());
        assert_eq!(args.log_level(), "warn");
    }

    #[test]
    fn grammar_source_is_required() {
        assert!(Cli::try_parse_from(["lambert"]).is_err());
        assert!(Cli::try_parse_from(["lambert", "S->a", "--file", "x.cfg"]).is_err());
    }

    #[test]
    fn run_prints_graph() {
        let output = run(&cli(&["S->aSb;S->ab"])).unwrap();
        assert_eq!(output, [
            "nodes: [q_a, q_b, q_S]",
            "edges: {0: [q_a, q_S, q_b], 1: [q_a, q_b], 2: [], 3: []}",
            "edge heads: {0: S, 1: S, 2: a, 3: b}",
            ""
        ].join("\n"));
    }

    #[test]
    fn run_lists_rules_from_file() {
        let output = run(&cli(&["--file", "example_data/nullable.cfg", "--rules", "--insertion-order"])).unwrap();
        let listed = output.lines().take(5).collect::<Vec<_>>();
        assert_eq!(listed, vec!["0: S->AB", "1: A->a", "2: B->b", "3: S->B", "4: S->A"]);
    }

    #[test]
    fn run_reports_violations() {
        match run(&cli(&["s->ab"])) {
            Err(LambertError::Invalid(violations)) => assert_eq!(violations.len(), 1),
            other => panic!("expected a rejected grammar, got {:?}", other)
        }
    }
}
