//! The implementation of the LR(1) recognizer.

use crate::definition::{ParseAction, ParseTable};
use std::fmt;

/// A shift-reduce recognizer driven by a parse table.
///
/// The recognizer only decides whether the input belongs to the language;
/// it keeps no reduction results.
#[derive(Debug)]
pub struct Recognizer<TDef> {
    definition: TDef,
}

impl<TDef> Recognizer<TDef>
where
    TDef: ParseTable,
    TDef::State: fmt::Debug,
    TDef::Symbol: fmt::Debug,
{
    pub fn new(definition: TDef) -> Self {
        Self { definition }
    }

    /// Run the automaton over `tokens`, and return whether it reaches the accepting state.
    ///
    /// Any missing table entry rejects the input.
    pub fn recognize<I>(&self, tokens: I) -> bool
    where
        I: IntoIterator<Item = TDef::Symbol>,
    {
        let mut tokens = tokens.into_iter();

        // The bottom entry has no symbol; it stands for the end-of-input sentinel.
        let mut stack: Vec<(Option<TDef::Symbol>, TDef::State)> =
            vec![(None, self.definition.initial_state())];
        let mut lookahead = tokens.next();

        loop {
            let current = match stack.last() {
                Some((_, state)) => *state,
                None => return false,
            };

            let action = match self.definition.action(current, lookahead) {
                Some(action) => action,
                None => {
                    tracing::trace!("reject: state={:?}, lookahead={:?}", current, lookahead);
                    return false;
                }
            };

            match action {
                ParseAction::Shift(next) => {
                    tracing::trace!("shift: {:?} -> {:?}", lookahead, next);
                    if lookahead.is_none() {
                        // shifting the end of input would run past it.
                        return false;
                    }
                    stack.push((lookahead, next));
                    lookahead = tokens.next();
                }

                ParseAction::Reduce(lhs, n) => {
                    if n >= stack.len() {
                        return false;
                    }
                    stack.truncate(stack.len() - n);

                    let top = match stack.last() {
                        Some((_, state)) => *state,
                        None => return false,
                    };
                    let next = match self.definition.goto(top, lhs) {
                        Some(next) => next,
                        None => return false,
                    };
                    tracing::trace!("reduce: {:?} ({} symbols), goto {:?}", lhs, n, next);
                    stack.push((Some(lhs), next));
                }

                ParseAction::Accept => {
                    tracing::trace!("accept");
                    return true;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Hand-written table for `S := a S | b`.
    struct Table;

    impl ParseTable for Table {
        type State = u8;
        type Symbol = char;

        fn initial_state(&self) -> u8 {
            0
        }

        fn action(&self, current: u8, lookahead: Option<char>) -> Option<ParseAction<u8, char>> {
            use ParseAction::*;
            match (current, lookahead) {
                (0 | 1, Some('a')) => Some(Shift(1)),
                (0 | 1, Some('b')) => Some(Shift(2)),
                (2, None) => Some(Reduce('S', 1)),
                (3, None) => Some(Accept),
                (4, None) => Some(Reduce('S', 2)),
                _ => None,
            }
        }

        fn goto(&self, current: u8, symbol: char) -> Option<u8> {
            match (current, symbol) {
                (0, 'S') => Some(3),
                (1, 'S') => Some(4),
                _ => None,
            }
        }
    }

    #[test]
    fn accepts_sentences() {
        let recognizer = Recognizer::new(Table);
        assert!(recognizer.recognize("b".chars()));
        assert!(recognizer.recognize("ab".chars()));
        assert!(recognizer.recognize("aaaab".chars()));
    }

    #[test]
    fn rejects_non_sentences() {
        let recognizer = Recognizer::new(&Table);
        assert!(!recognizer.recognize("".chars()));
        assert!(!recognizer.recognize("a".chars()));
        assert!(!recognizer.recognize("ba".chars()));
        assert!(!recognizer.recognize("bb".chars()));
        assert!(!recognizer.recognize("abc".chars()));
    }
}
