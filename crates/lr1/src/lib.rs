//! A canonical LR(1) automaton generator and recognizer over single-character symbols.

pub mod automaton;
pub mod cfg;
pub mod first_sets;
pub mod grammar;
pub mod util;

pub use crate::{
    automaton::{Action, Automaton, BuildError},
    grammar::{Grammar, ProductionRule, END_MARKER},
};
