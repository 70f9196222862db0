//! Parse table definition.

/// The trait for abstracting the generated LR(1) parse table.
pub trait ParseTable {
    /// The number to identify the state of LR(1) automaton.
    type State: Copy;

    /// The number to identify the terminal/nonterminal symbols.
    type Symbol: Copy;

    /// Return the initial state number.
    fn initial_state(&self) -> Self::State;

    /// Return the action corresponding to the specified state number and
    /// lookahead symbol, or `None` if the lookahead is not acceptable there.
    ///
    /// If there is no lookahead symbol, a `None` is passed as the end of input.
    fn action(
        &self,
        current: Self::State,
        lookahead: Option<Self::Symbol>,
    ) -> Option<ParseAction<Self::State, Self::Symbol>>;

    /// Return the state to transition to after reducing to `symbol`.
    fn goto(&self, current: Self::State, symbol: Self::Symbol) -> Option<Self::State>;
}

impl<T: ?Sized> ParseTable for &T
where
    T: ParseTable,
{
    type State = T::State;
    type Symbol = T::Symbol;

    fn initial_state(&self) -> Self::State {
        (**self).initial_state()
    }

    fn action(
        &self,
        current: Self::State,
        lookahead: Option<Self::Symbol>,
    ) -> Option<ParseAction<Self::State, Self::Symbol>> {
        (**self).action(current, lookahead)
    }

    fn goto(&self, current: Self::State, symbol: Self::Symbol) -> Option<Self::State> {
        (**self).goto(current, symbol)
    }
}

impl<T: ?Sized> ParseTable for std::sync::Arc<T>
where
    T: ParseTable,
{
    type State = T::State;
    type Symbol = T::Symbol;

    fn initial_state(&self) -> Self::State {
        (**self).initial_state()
    }

    fn action(
        &self,
        current: Self::State,
        lookahead: Option<Self::Symbol>,
    ) -> Option<ParseAction<Self::State, Self::Symbol>> {
        (**self).action(current, lookahead)
    }

    fn goto(&self, current: Self::State, symbol: Self::Symbol) -> Option<Self::State> {
        (**self).goto(current, symbol)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ParseAction<TState, TSymbol> {
    /// Consume the lookahead symbol and transition to the specified state.
    Shift(TState),

    /// Pop `n` entries and push the left-hand side symbol.
    Reduce(TSymbol, usize),

    Accept,
}
