use anyhow::Context as _;
use clap::Parser;
use lr1::{Automaton, Grammar};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Terminal symbols, one character each.
    #[arg(short, long)]
    terminals: String,

    /// Nonterminal symbols, one character each.
    ///
    /// The left-hand side of each rule is added implicitly.
    #[arg(short, long, default_value = "")]
    nonterminals: String,

    /// Production rule in the form `S=aSb` (`S=` for an empty production).
    #[arg(short, long = "rule", required = true)]
    rules: Vec<String>,

    /// The start symbol (defaults to the left-hand side of the first rule).
    #[arg(short, long)]
    start: Option<char>,

    /// Print the grammar and the generated automaton.
    #[arg(long)]
    dump: bool,

    /// The words to recognize.
    words: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    tracing::debug!("parsed CLI args = {:?}", args);

    let grammar = define_grammar(&args)?;

    let s = Instant::now();
    let automaton = Automaton::generate(&grammar)
        .with_context(|| anyhow::anyhow!("failed to build the automaton"))?;
    tracing::info!("build: {:?} elapsed", s.elapsed());

    if args.dump {
        println!("{}", grammar);
        println!("{}", automaton);
    }

    for word in &args.words {
        let verdict = if automaton.recognize(word) {
            "accept"
        } else {
            "reject"
        };
        println!("{}\t{:?}", verdict, word);
    }

    Ok(())
}

fn define_grammar(args: &Args) -> anyhow::Result<Grammar> {
    let mut builder = Grammar::builder();
    builder
        .terminals(&args.terminals)
        .nonterminals(&args.nonterminals);

    for rule in &args.rules {
        let (left, right) = rule
            .split_once('=')
            .with_context(|| anyhow::anyhow!("missing `=' in rule `{}'", rule))?;
        let mut left_chars = left.chars();
        let left = match (left_chars.next(), left_chars.next()) {
            (Some(c), None) => c,
            _ => anyhow::bail!("the left-hand side of `{}' must be one symbol", rule),
        };
        builder.rule(left, right);
    }

    if let Some(start) = args.start {
        builder.start(start);
    }

    Ok(builder.build())
}
