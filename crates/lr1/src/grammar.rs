//! Grammar types.

use crate::util::Set;
use std::{fmt, mem};

/// Reserved symbol that means the end of input (and the empty string while
/// computing first sets).
///
/// A grammar must not use this symbol as a terminal or nonterminal.
pub const END_MARKER: char = '\0';

/// The type that represents a production rule in grammar.
///
/// Two rules are equal when their left-hand and right-hand sides are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProductionRule {
    left: char,
    right: Vec<char>,
}

impl ProductionRule {
    pub fn new<I>(left: char, right: I) -> Self
    where
        I: IntoIterator<Item = char>,
    {
        Self {
            left,
            right: right.into_iter().collect(),
        }
    }

    /// Return the left-hand side of this production.
    pub fn left(&self) -> char {
        self.left
    }

    /// Return the right-hand side of this production.
    ///
    /// An empty slice means an epsilon production.
    pub fn right(&self) -> &[char] {
        &self.right[..]
    }
}

// `"S := a S b S"`
impl fmt::Display for ProductionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} :=", self.left)?;
        if self.right.is_empty() {
            return f.write_str(" @empty");
        }
        for symbol in &self.right {
            write!(f, " {}", symbol)?;
        }
        Ok(())
    }
}

/// A context-free grammar over single-character symbols.
///
/// `Grammar` only holds the definition. Consistency checks (disjoint
/// alphabets, known symbols, reserved symbols) happen when an automaton is
/// built from it.
#[derive(Debug, Clone)]
pub struct Grammar {
    terminals: Set<char>,
    nonterminals: Set<char>,
    rules: Vec<ProductionRule>,
    start: char,
}

impl Grammar {
    pub fn new<T, N, R>(terminals: T, nonterminals: N, rules: R, start: char) -> Self
    where
        T: IntoIterator<Item = char>,
        N: IntoIterator<Item = char>,
        R: IntoIterator<Item = ProductionRule>,
    {
        Self {
            terminals: terminals.into_iter().collect(),
            nonterminals: nonterminals.into_iter().collect(),
            rules: rules.into_iter().collect(),
            start,
        }
    }

    pub fn builder() -> Builder {
        Builder::default()
    }

    pub fn start_symbol(&self) -> char {
        self.start
    }

    pub fn terminals(&self) -> &Set<char> {
        &self.terminals
    }

    pub fn nonterminals(&self) -> &Set<char> {
        &self.nonterminals
    }

    /// Return the production rules in the order they were supplied.
    pub fn rules(&self) -> &[ProductionRule] {
        &self.rules[..]
    }
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## terminals:")?;
        for terminal in &self.terminals {
            writeln!(f, "{}", terminal.escape_default())?;
        }

        writeln!(f, "\n## nonterminals:")?;
        for nonterminal in &self.nonterminals {
            write!(f, "{}", nonterminal.escape_default())?;
            if *nonterminal == self.start {
                write!(f, " (start)")?;
            }
            writeln!(f)?;
        }

        writeln!(f, "\n## rules:")?;
        for rule in &self.rules {
            writeln!(f, "{}", rule)?;
        }

        Ok(())
    }
}

/// A builder object for `Grammar`.
#[derive(Debug, Default)]
pub struct Builder {
    terminals: Set<char>,
    nonterminals: Set<char>,
    rules: Vec<ProductionRule>,
    start: Option<char>,
}

impl Builder {
    /// Register some terminal symbols into this grammar.
    pub fn terminals(&mut self, symbols: &str) -> &mut Self {
        self.terminals.extend(symbols.chars());
        self
    }

    /// Register some nonterminal symbols into this grammar.
    ///
    /// The left-hand side of each rule is registered automatically.
    pub fn nonterminals(&mut self, symbols: &str) -> &mut Self {
        self.nonterminals.extend(symbols.chars());
        self
    }

    /// Register a production rule `left := right` into this grammar.
    ///
    /// Each character of `right` is one symbol; an empty string means
    /// an epsilon production.
    pub fn rule(&mut self, left: char, right: &str) -> &mut Self {
        self.rules.push(ProductionRule::new(left, right.chars()));
        self
    }

    /// Specify the start symbol.
    ///
    /// If omitted, the left-hand side of the first rule is used.
    pub fn start(&mut self, symbol: char) -> &mut Self {
        self.start.replace(symbol);
        self
    }

    pub fn build(&mut self) -> Grammar {
        let Self {
            terminals,
            mut nonterminals,
            rules,
            start,
        } = mem::take(self);

        nonterminals.extend(rules.iter().map(|rule| rule.left()));

        let start = start
            .or_else(|| rules.first().map(|rule| rule.left()))
            .unwrap_or(END_MARKER);

        Grammar {
            terminals,
            nonterminals,
            rules,
            start,
        }
    }
}
