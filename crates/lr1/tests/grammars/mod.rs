//! Grammar definitions for integration tests.

#![allow(dead_code)]

use lr1::Grammar;

/// `S := a S b S | @empty`
pub fn braces() -> Grammar {
    Grammar::builder()
        .terminals("ab")
        .nonterminals("S")
        .rule('S', "aSbS")
        .rule('S', "")
        .start('S')
        .build()
}

/// `S := C C`, `C := c C | d`
pub fn strange() -> Grammar {
    Grammar::builder()
        .terminals("dc")
        .nonterminals("SC")
        .rule('S', "CC")
        .rule('C', "cC")
        .rule('C', "d")
        .start('S')
        .build()
}

pub fn arithmetic() -> Grammar {
    Grammar::builder()
        .terminals("xyz()+*")
        .nonterminals("SPT")
        .rule('S', "S+P") // expr '+' term
        .rule('S', "P")
        .rule('P', "P*T") // term '*' factor
        .rule('P', "T")
        .rule('T', "(S)") // '(' expr ')'
        .rule('T', "x")
        .rule('T', "y")
        .rule('T', "z")
        .start('S')
        .build()
}

/// `S := T a | @empty`, `T := S b`
pub fn mutually_recursive() -> Grammar {
    Grammar::builder()
        .terminals("ab")
        .nonterminals("ST")
        .rule('S', "Ta")
        .rule('T', "Sb")
        .rule('S', "")
        .start('S')
        .build()
}

/// `E := E + E | x` (ambiguous associativity, shift/reduce conflict)
pub fn shift_reduce() -> Grammar {
    Grammar::builder()
        .terminals("x+")
        .rule('E', "E+E")
        .rule('E', "x")
        .start('E')
        .build()
}

/// `S := A | B`, `A := x`, `B := x` (reduce/reduce conflict)
pub fn reduce_reduce() -> Grammar {
    Grammar::builder()
        .terminals("x")
        .rule('S', "A")
        .rule('S', "B")
        .rule('A', "x")
        .rule('B', "x")
        .start('S')
        .build()
}
