//! Calculation of first set function.

use crate::{
    automaton::BuildError,
    cfg::{Cfg, RuleID, SymbolID},
    util::{Map, Set},
};

/// The first sets of every symbol in an augmented grammar.
///
/// Only the leading symbol of a production is inspected: a rule `X := Y Z`
/// contributes `First(Y)` to `First(X)`, and never `First(Z)`, even when `Y`
/// derives the empty string. An epsilon production contributes the
/// end-of-input marker instead.
#[derive(Debug)]
pub struct FirstSets {
    map: Map<SymbolID, Set<SymbolID>>,
}

impl FirstSets {
    #[tracing::instrument(skip_all)]
    pub fn new(cfg: &Cfg) -> Self {
        let mut map: Map<SymbolID, Set<SymbolID>> = Map::default();

        // First(T) = {T}
        map.insert(SymbolID::Eoi, Some(SymbolID::Eoi).into_iter().collect());
        for symbol in cfg.terminals.iter().map(|&t| SymbolID::T(t)) {
            map.insert(symbol, Some(symbol).into_iter().collect());
        }

        // First(N) = {} until the constraints are resolved
        for symbol in cfg.nonterminals.iter().map(|&n| SymbolID::N(n)) {
            map.insert(symbol, Set::default());
        }

        // X := Y ...  gives First(X) ⊇ First(Y)
        // X := @empty gives First(X) ∋ $eoi
        #[derive(Debug)]
        struct Constraint {
            sup: SymbolID,
            sub: SymbolID,
        }
        let mut constraints = vec![];
        for (_, rule) in cfg.rules.iter().filter(|(id, _)| **id != RuleID::ACCEPT) {
            match rule.right.first() {
                None => {
                    map.entry(rule.left).or_default().insert(SymbolID::Eoi);
                }
                Some(&symbol) if symbol != rule.left => constraints.push(Constraint {
                    sup: rule.left,
                    sub: symbol,
                }),
                Some(..) => (),
            }
        }

        // Propagate until no first set changes.
        let mut changed = true;
        while changed {
            changed = false;
            for Constraint { sup, sub } in &constraints {
                let subset = match map.get(sub) {
                    Some(subset) => subset.clone(),
                    None => continue,
                };
                let superset = map.entry(*sup).or_default();
                for symbol in subset {
                    changed |= superset.insert(symbol);
                }
            }
        }

        tracing::trace!("first sets of {} symbols", map.len());

        Self { map }
    }

    /// `First(symbols)`
    ///
    /// The empty sequence yields `{$eoi}`.
    pub fn first(&self, symbols: &[SymbolID]) -> Result<&Set<SymbolID>, BuildError> {
        let leading = symbols.first().copied().unwrap_or(SymbolID::Eoi);
        self.map
            .get(&leading)
            .ok_or_else(|| BuildError::UnrecognizedSymbol(leading.to_char()))
    }

    /// `First(prefix lookahead)`
    pub fn get(
        &self,
        prefix: &[SymbolID],
        lookahead: SymbolID,
    ) -> Result<&Set<SymbolID>, BuildError> {
        match prefix {
            [] => self.first(&[lookahead]),
            prefix => self.first(prefix),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::Grammar;
    use SymbolID::*;

    fn first_sets(grammar: &Grammar) -> FirstSets {
        FirstSets::new(&Cfg::augment(grammar).unwrap())
    }

    fn sorted(set: &Set<SymbolID>) -> Vec<SymbolID> {
        let mut symbols: Vec<_> = set.iter().copied().collect();
        symbols.sort();
        symbols
    }

    #[test]
    fn terminals_and_empty_sequence() {
        let grammar = Grammar::builder()
            .terminals("ab")
            .rule('S', "aSbS")
            .rule('S', "")
            .build();
        let first = first_sets(&grammar);

        assert_eq!(sorted(first.first(&[]).unwrap()), [Eoi]);
        assert_eq!(sorted(first.first(&[T('b'), N('S')]).unwrap()), [T('b')]);
        assert_eq!(sorted(first.first(&[N('S')]).unwrap()), [T('a'), Eoi]);
        assert_eq!(sorted(first.get(&[], T('a')).unwrap()), [T('a')]);
        assert_eq!(sorted(first.get(&[], Eoi).unwrap()), [Eoi]);
    }

    #[test]
    fn left_recursion_terminates() {
        let grammar = Grammar::builder()
            .terminals("xyz()+*")
            .rule('S', "S+P")
            .rule('S', "P")
            .rule('P', "P*T")
            .rule('P', "T")
            .rule('T', "(S)")
            .rule('T', "x")
            .rule('T', "y")
            .rule('T', "z")
            .start('S')
            .build();
        let first = first_sets(&grammar);

        let expected = [T('('), T('x'), T('y'), T('z')];
        assert_eq!(sorted(first.first(&[N('S')]).unwrap()), expected);
        assert_eq!(sorted(first.first(&[N('P'), T('+')]).unwrap()), expected);
    }

    #[test]
    fn mutual_recursion_terminates() {
        let grammar = Grammar::builder()
            .terminals("ab")
            .rule('S', "Ta")
            .rule('T', "Sb")
            .rule('S', "")
            .start('S')
            .build();
        let first = first_sets(&grammar);

        assert_eq!(sorted(first.first(&[N('S')]).unwrap()), [Eoi]);
        assert_eq!(sorted(first.first(&[N('T')]).unwrap()), [Eoi]);
    }

    #[test]
    fn nullable_leading_symbol_hides_the_rest() {
        let grammar = Grammar::builder()
            .terminals("ab")
            .rule('S', "Ab")
            .rule('A', "a")
            .rule('A', "")
            .start('S')
            .build();
        let first = first_sets(&grammar);

        // a full nullable-aware computation would also yield `b` here.
        assert_eq!(sorted(first.first(&[N('S')]).unwrap()), [T('a'), Eoi]);
        assert_eq!(sorted(first.first(&[N('A'), T('b')]).unwrap()), [T('a'), Eoi]);
    }

    #[test]
    fn unknown_symbol() {
        let grammar = Grammar::builder().terminals("a").rule('S', "a").build();
        let first = first_sets(&grammar);

        assert!(matches!(
            first.first(&[T('q')]),
            Err(BuildError::UnrecognizedSymbol('q'))
        ));
    }
}
