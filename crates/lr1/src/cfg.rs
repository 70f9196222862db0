//! The augmented grammar used while constructing the automaton.

use crate::{
    automaton::BuildError,
    grammar::{Grammar, END_MARKER},
    util::{display_fn, Map, Set},
};
use std::fmt;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SymbolID {
    T(char),
    N(char),
    /// Reserved terminal that means the end of input.
    Eoi,
    /// Reserved nonterminal used as the left-hand side of the accepting rule.
    Start,
}

impl SymbolID {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::T(..) | Self::Eoi)
    }

    pub fn to_char(self) -> char {
        match self {
            Self::T(c) | Self::N(c) => c,
            Self::Eoi | Self::Start => END_MARKER,
        }
    }
}

impl fmt::Display for SymbolID {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::T(c) | Self::N(c) => write!(f, "{}", c.escape_default()),
            Self::Eoi => f.write_str("$eoi"),
            Self::Start => f.write_str("$start"),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct RuleID {
    raw: usize,
}

impl RuleID {
    /// The synthetic rule `$start := S`.
    pub const ACCEPT: Self = Self::new(0);

    const OFFSET: usize = 1;

    #[inline]
    const fn new(raw: usize) -> Self {
        Self { raw }
    }
}

impl fmt::Display for RuleID {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.raw, f)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub left: SymbolID,
    pub right: Vec<SymbolID>,
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} :=", self.left)?;
        for symbol in &self.right {
            write!(f, " {}", symbol)?;
        }
        Ok(())
    }
}

/// A validated copy of the caller's grammar with the accepting rule added.
#[derive(Debug)]
pub struct Cfg {
    pub terminals: Set<char>,
    pub nonterminals: Set<char>,
    pub rules: Map<RuleID, Rule>,
    pub start: char,
}

impl Cfg {
    pub fn augment(grammar: &Grammar) -> Result<Self, BuildError> {
        let terminals = grammar.terminals().clone();
        let nonterminals = grammar.nonterminals().clone();

        for &symbol in terminals.iter().chain(&nonterminals) {
            if symbol == END_MARKER {
                return Err(BuildError::ReservedSymbolCollision(symbol));
            }
        }
        if let Some(&symbol) = terminals.iter().find(|t| nonterminals.contains(*t)) {
            return Err(BuildError::OverlappingSymbol(symbol));
        }

        let start = grammar.start_symbol();
        if !nonterminals.contains(&start) {
            return Err(BuildError::UnknownStartSymbol(start));
        }

        let classify = |symbol: char| {
            if symbol == END_MARKER {
                Err(BuildError::ReservedSymbolCollision(symbol))
            } else if terminals.contains(&symbol) {
                Ok(SymbolID::T(symbol))
            } else if nonterminals.contains(&symbol) {
                Ok(SymbolID::N(symbol))
            } else {
                Err(BuildError::UnrecognizedSymbol(symbol))
            }
        };

        let mut rules = Map::default();
        rules.insert(
            RuleID::ACCEPT,
            Rule {
                left: SymbolID::Start,
                right: vec![SymbolID::N(start)],
            },
        );
        for (i, rule) in grammar.rules().iter().enumerate() {
            let left = match classify(rule.left())? {
                left @ SymbolID::N(..) => left,
                _ => return Err(BuildError::UnrecognizedSymbol(rule.left())),
            };
            let right = rule
                .right()
                .iter()
                .map(|&symbol| classify(symbol))
                .collect::<Result<_, _>>()?;
            rules.insert(RuleID::new(RuleID::OFFSET + i), Rule { left, right });
        }

        Ok(Self {
            terminals,
            nonterminals,
            rules,
            start,
        })
    }

    /// Iterate over the grammar symbols that can label a transition.
    pub fn symbols(&self) -> impl Iterator<Item = SymbolID> + '_ {
        let terminals = self.terminals.iter().map(|&t| SymbolID::T(t));
        let nonterminals = self.nonterminals.iter().map(|&n| SymbolID::N(n));
        terminals.chain(nonterminals)
    }

    /// Iterate over the rules whose left-hand side is `left`.
    pub fn rules_of(&self, left: SymbolID) -> impl Iterator<Item = (RuleID, &Rule)> + '_ {
        self.rules
            .iter()
            .filter(move |(_, rule)| rule.left == left)
            .map(|(id, rule)| (*id, rule))
    }

    /// Return whether two rules derive the same symbols.
    ///
    /// Distinct `RuleID`s may hold structurally identical rules when the
    /// caller supplies duplicates.
    pub fn same_rule(&self, r1: RuleID, r2: RuleID) -> bool {
        r1 == r2 || self.rules.get(&r1) == self.rules.get(&r2)
    }

    // `"(S := a . S b S)"`
    pub fn display_item<'g>(&'g self, rule: RuleID, marker: usize) -> impl fmt::Display + 'g {
        display_fn(move |f| {
            let rule = match self.rules.get(&rule) {
                Some(rule) => rule,
                None => return f.write_str("(<unknown>)"),
            };
            write!(f, "({} :=", rule.left)?;
            for (i, symbol) in rule.right.iter().enumerate() {
                if i == marker {
                    f.write_str(" .")?;
                }
                write!(f, " {}", symbol)?;
            }
            if marker == rule.right.len() {
                f.write_str(" .")?;
            }
            f.write_str(")")
        })
    }
}
