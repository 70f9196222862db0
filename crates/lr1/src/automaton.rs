//! The implementation of canonical LR(1) automaton.

use crate::{
    cfg::{Cfg, RuleID, SymbolID},
    first_sets::FirstSets,
    grammar::Grammar,
    util::{display_fn, Map},
};
use lr1_runtime::{ParseAction, ParseTable, Recognizer};
use std::{collections::BTreeSet, fmt};

#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("ambiguous grammar: conflicting actions in state {state} on lookahead {symbol}")]
    AmbiguousGrammar { state: StateID, symbol: SymbolID },

    #[error("symbol `{}' is neither a terminal nor a nonterminal", .0.escape_default())]
    UnrecognizedSymbol(char),

    #[error("symbol `{}' is reserved as the end-of-input marker", .0.escape_default())]
    ReservedSymbolCollision(char),

    #[error("symbol `{}' is declared as both a terminal and a nonterminal", .0.escape_default())]
    OverlappingSymbol(char),

    #[error("start symbol `{}' is not a nonterminal", .0.escape_default())]
    UnknownStartSymbol(char),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct StateID {
    raw: usize,
}

impl StateID {
    pub const START: Self = Self::new(0);

    const fn new(raw: usize) -> Self {
        Self { raw }
    }
}

impl fmt::Display for StateID {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.raw)
    }
}

/// The action that the automaton in a state performs on a particular symbol.
///
/// Transitions on nonterminal symbols (gotos) are stored as `Shift`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Action {
    /// Read a lookahead symbol and transition to the specified state.
    Shift(StateID),

    /// Reduce to the specified production rule.
    Reduce(RuleID),

    Accept,
}

// LR(1) item
// `[X := Y1 ... Yk . Yk+1 ... Yn, a]`: the first `marker` symbols of the
// rule have been recognized, and `a` is expected after the whole rule.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
struct LRItem {
    rule: RuleID,
    marker: usize,
    lookahead: SymbolID,
}

type LRItemSet = BTreeSet<LRItem>;

#[derive(Debug)]
struct State {
    item_set: LRItemSet,
    actions: Map<SymbolID, Action>,
}

/// Tables derived from one successful build.
#[derive(Debug)]
struct Tables {
    cfg: Cfg,
    states: Vec<State>,
}

impl Tables {
    fn lookup(&self, state: StateID, symbol: SymbolID) -> Option<Action> {
        self.states.get(state.raw)?.actions.get(&symbol).copied()
    }
}

impl ParseTable for Tables {
    type State = StateID;
    type Symbol = SymbolID;

    fn initial_state(&self) -> StateID {
        StateID::START
    }

    fn action(
        &self,
        current: StateID,
        lookahead: Option<SymbolID>,
    ) -> Option<ParseAction<StateID, SymbolID>> {
        let lookahead = lookahead.unwrap_or(SymbolID::Eoi);
        if !lookahead.is_terminal() {
            return None;
        }
        match self.lookup(current, lookahead)? {
            Action::Shift(next) => Some(ParseAction::Shift(next)),
            Action::Reduce(rule) => {
                let rule = self.cfg.rules.get(&rule)?;
                Some(ParseAction::Reduce(rule.left, rule.right.len()))
            }
            Action::Accept => Some(ParseAction::Accept),
        }
    }

    fn goto(&self, current: StateID, symbol: SymbolID) -> Option<StateID> {
        match self.lookup(current, symbol)? {
            Action::Shift(next) => Some(next),
            _ => None,
        }
    }
}

/// A canonical LR(1) automaton that recognizes the language of a grammar.
///
/// An automaton is empty until [`build`](Self::build) succeeds, and rejects
/// every input while empty.
#[derive(Debug, Default)]
pub struct Automaton {
    tables: Option<Tables>,
}

impl Automaton {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an automaton and build it from `grammar`.
    pub fn generate(grammar: &Grammar) -> Result<Self, BuildError> {
        let mut automaton = Self::new();
        automaton.build(grammar)?;
        Ok(automaton)
    }

    /// Construct the LR(1) states and the action table from `grammar`,
    /// replacing the previous build.
    ///
    /// On error, the automaton is left empty.
    #[tracing::instrument(skip_all)]
    pub fn build(&mut self, grammar: &Grammar) -> Result<(), BuildError> {
        self.tables = None;

        let cfg = Cfg::augment(grammar)?;
        let states = Generator::new(&cfg).generate()?;
        let tables = Tables { cfg, states };

        tracing::debug!(
            "built {} states, {} actions",
            tables.states.len(),
            tables.states.iter().map(|s| s.actions.len()).sum::<usize>()
        );
        self.tables = Some(tables);

        Ok(())
    }

    pub fn is_built(&self) -> bool {
        self.tables.is_some()
    }

    /// Return the number of states.
    pub fn num_states(&self) -> usize {
        self.tables.as_ref().map_or(0, |t| t.states.len())
    }

    /// Look up the action table.
    ///
    /// `symbol` is a terminal, a nonterminal (for gotos), or
    /// [`END_MARKER`](crate::grammar::END_MARKER).
    pub fn action(&self, state: usize, symbol: char) -> Option<Action> {
        let tables = self.tables.as_ref()?;
        let symbol = if symbol == crate::grammar::END_MARKER {
            SymbolID::Eoi
        } else if tables.cfg.terminals.contains(&symbol) {
            SymbolID::T(symbol)
        } else if tables.cfg.nonterminals.contains(&symbol) {
            SymbolID::N(symbol)
        } else {
            return None;
        };
        tables.lookup(StateID::new(state), symbol)
    }

    /// Return whether `input` is a sentence of the grammar.
    ///
    /// Each character is a terminal symbol. Characters outside the
    /// terminal alphabet make the input rejected.
    pub fn recognize(&self, input: &str) -> bool {
        match &self.tables {
            Some(tables) => Recognizer::new(tables).recognize(input.chars().map(SymbolID::T)),
            None => false,
        }
    }
}

impl fmt::Display for Automaton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tables = match &self.tables {
            Some(tables) => tables,
            None => return f.write_str("(not built)\n"),
        };
        let cfg = &tables.cfg;

        for (i, state) in tables.states.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            writeln!(f, "#### State {}", StateID::new(i))?;

            writeln!(f, "## item_set")?;
            for item in &state.item_set {
                writeln!(
                    f,
                    "- {}  [{}]",
                    cfg.display_item(item.rule, item.marker),
                    item.lookahead
                )?;
            }

            writeln!(f, "## actions")?;
            for (symbol, action) in &state.actions {
                match action {
                    Action::Shift(n) if symbol.is_terminal() => {
                        writeln!(f, "- {} => shift({})", symbol, n)?
                    }
                    Action::Shift(n) => writeln!(f, "- {} => goto({})", symbol, n)?,
                    Action::Reduce(rule) => writeln!(
                        f,
                        "- {} => reduce({})",
                        symbol,
                        display_fn(|f| match cfg.rules.get(rule) {
                            Some(rule) => write!(f, "{}", rule),
                            None => write!(f, "#{}", rule),
                        })
                    )?,
                    Action::Accept => writeln!(f, "- {} => accept", symbol)?,
                }
            }
        }
        Ok(())
    }
}

// === Generator ===

#[derive(Debug)]
struct Generator<'g> {
    cfg: &'g Cfg,
    first_sets: FirstSets,
}

impl<'g> Generator<'g> {
    fn new(cfg: &'g Cfg) -> Self {
        Self {
            cfg,
            first_sets: FirstSets::new(cfg),
        }
    }

    fn generate(&self) -> Result<Vec<State>, BuildError> {
        let mut states = self.populate_states()?;
        for (i, state) in states.iter_mut().enumerate() {
            self.insert_reductions(StateID::new(i), state)?;
        }
        Ok(states)
    }

    /// Build the canonical collection of LR(1) item sets, starting from
    /// `closure({[$start := . S, $eoi]})`.
    ///
    /// Every transition is recorded as a `Shift` action.
    #[tracing::instrument(skip_all)]
    fn populate_states(&self) -> Result<Vec<State>, BuildError> {
        let mut states: Vec<State> = vec![];
        let mut indices: Map<LRItemSet, StateID> = Map::default();

        let start = self.closure(
            Some(LRItem {
                rule: RuleID::ACCEPT,
                marker: 0,
                lookahead: SymbolID::Eoi,
            })
            .into_iter()
            .collect(),
        )?;
        indices.insert(start.clone(), StateID::START);
        states.push(State {
            item_set: start,
            actions: Map::default(),
        });

        // States are appended while the loop runs, so iterate by index.
        let mut current = 0;
        while current < states.len() {
            let mut actions = Map::default();
            for symbol in self.cfg.symbols() {
                let next_set = self.goto(&states[current].item_set, symbol)?;
                if next_set.is_empty() {
                    continue;
                }

                let next = match indices.get(&next_set) {
                    Some(&id) => id,
                    None => {
                        let id = StateID::new(states.len());
                        tracing::trace!("new state {} ({} items)", id, next_set.len());
                        indices.insert(next_set.clone(), id);
                        states.push(State {
                            item_set: next_set,
                            actions: Map::default(),
                        });
                        id
                    }
                };
                actions.insert(symbol, Action::Shift(next));
            }
            states[current].actions = actions;
            current += 1;
        }

        Ok(states)
    }

    /// Add the reduce/accept actions derived from the complete items.
    fn insert_reductions(&self, id: StateID, state: &mut State) -> Result<(), BuildError> {
        for item in &state.item_set {
            let rule = match self.cfg.rules.get(&item.rule) {
                Some(rule) => rule,
                None => continue,
            };
            if item.marker < rule.right.len() {
                continue;
            }

            let (symbol, action) = if item.rule == RuleID::ACCEPT {
                (SymbolID::Eoi, Action::Accept)
            } else {
                (item.lookahead, Action::Reduce(item.rule))
            };

            match state.actions.get(&symbol) {
                Some(existing) if self.is_same_action(*existing, action) => (),
                Some(existing) => {
                    tracing::trace!(
                        "conflict in state {} on {}: {:?} vs {:?}",
                        id,
                        symbol,
                        existing,
                        action
                    );
                    return Err(BuildError::AmbiguousGrammar { state: id, symbol });
                }
                None => {
                    state.actions.insert(symbol, action);
                }
            }
        }
        Ok(())
    }

    fn is_same_action(&self, a1: Action, a2: Action) -> bool {
        match (a1, a2) {
            (Action::Reduce(r1), Action::Reduce(r2)) => self.cfg.same_rule(r1, r2),
            (a1, a2) => a1 == a2,
        }
    }

    /// Expand `items` with every item reachable by zero-width nonterminal expansion.
    fn closure(&self, mut items: LRItemSet) -> Result<LRItemSet, BuildError> {
        let mut pending: Vec<LRItem> = items.iter().copied().collect();
        while let Some(item) = pending.pop() {
            let rule = match self.cfg.rules.get(&item.rule) {
                Some(rule) => rule,
                None => continue,
            };

            // [X := ... . Y beta, a]
            //  Y: one nonterminal symbol
            let (y_symbol, beta) = match &rule.right[item.marker..] {
                [y_symbol @ SymbolID::N(..), beta @ ..] => (*y_symbol, beta),
                _ => continue,
            };

            // [Y := . gamma, b] for each b in First(beta a)
            let lookaheads = self.first_sets.get(beta, item.lookahead)?;
            for (rule, _) in self.cfg.rules_of(y_symbol) {
                for &lookahead in lookaheads {
                    let new_item = LRItem {
                        rule,
                        marker: 0,
                        lookahead,
                    };
                    if items.insert(new_item) {
                        pending.push(new_item);
                    }
                }
            }
        }
        Ok(items)
    }

    /// Advance the marker over `symbol` and take the closure.
    ///
    /// An empty set means there is no transition on `symbol`.
    fn goto(&self, items: &LRItemSet, symbol: SymbolID) -> Result<LRItemSet, BuildError> {
        let kernel = items
            .iter()
            .filter(|item| {
                self.cfg
                    .rules
                    .get(&item.rule)
                    .and_then(|rule| rule.right.get(item.marker))
                    == Some(&symbol)
            })
            .map(|item| LRItem {
                marker: item.marker + 1,
                ..*item
            })
            .collect();
        self.closure(kernel)
    }
}
