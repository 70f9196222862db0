//! Runtime implementation of the table-driven LR(1) recognizer.

pub mod definition;
pub mod engine;

pub use crate::{
    definition::{ParseAction, ParseTable},
    engine::Recognizer,
};
