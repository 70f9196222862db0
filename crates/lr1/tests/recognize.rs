mod grammars;

use lr1::Automaton;
use std::{sync::Arc, thread};

fn automaton(grammar: lr1::Grammar) -> Automaton {
    Automaton::generate(&grammar).unwrap()
}

#[test]
fn braces() {
    let automaton = automaton(grammars::braces());

    for word in ["", "ab", "aabb", "ababab", "aaabbabb", "aaabbbabab"] {
        assert!(automaton.recognize(word), "should accept {:?}", word);
    }
    for word in ["a", "b", "ba", "bb", "aa", "abba", "bbbaaa"] {
        assert!(!automaton.recognize(word), "should reject {:?}", word);
    }
}

#[test]
fn strange() {
    let automaton = automaton(grammars::strange());

    assert!(automaton.recognize("dd"));
    assert!(automaton.recognize("ccccccdd"));
    assert!(automaton.recognize("cdcd"));
    assert!(!automaton.recognize("c"));
    assert!(!automaton.recognize("cc"));
    assert!(!automaton.recognize("d"));
    assert!(!automaton.recognize("ddd"));
    assert!(!automaton.recognize(""));
}

#[test]
fn arithmetic() {
    let automaton = automaton(grammars::arithmetic());

    for word in [
        "x",
        "x+z",
        "((((((((((x))))))))))",
        "x+(y+(x+(z+x)))",
        "x+x*y+x*y*z+(x*(x*(x*(y+z))))",
        "x*((y+z)*z+(x*y+(x+y*z)*(x+y)))",
    ] {
        assert!(automaton.recognize(word), "should accept {:?}", word);
    }
    for word in ["", "x+", "x+(y+z", "x+y*)z(", "(((((((((x(((((((((", "xy"] {
        assert!(!automaton.recognize(word), "should reject {:?}", word);
    }
}

#[test]
fn mutually_recursive() {
    let automaton = automaton(grammars::mutually_recursive());

    assert!(automaton.recognize(""));
    assert!(automaton.recognize("ba"));
    assert!(automaton.recognize("baba"));
    assert!(automaton.recognize("bababa"));
    assert!(!automaton.recognize("b"));
    assert!(!automaton.recognize("ab"));
    assert!(!automaton.recognize("bab"));
}

#[test]
fn foreign_symbols_are_rejected() {
    let automaton = automaton(grammars::braces());

    assert!(!automaton.recognize("abc"));
    assert!(!automaton.recognize("S"));
    assert!(!automaton.recognize("aSb"));
    assert!(!automaton.recognize("\0"));
    assert!(!automaton.recognize("ab\0"));
    assert!(!automaton.recognize("あい"));
}

#[test]
fn unbuilt_automaton_rejects_everything() {
    let automaton = Automaton::new();
    assert!(!automaton.is_built());
    assert!(!automaton.recognize(""));
    assert!(!automaton.recognize("ab"));
}

#[test]
fn rebuild_is_idempotent() {
    let words = ["", "ab", "aabb", "abab", "a", "ba", "abba", "aab"];

    let mut automaton = automaton(grammars::braces());
    let first: Vec<bool> = words.iter().map(|w| automaton.recognize(w)).collect();

    automaton.build(&grammars::braces()).unwrap();
    let second: Vec<bool> = words.iter().map(|w| automaton.recognize(w)).collect();
    assert_eq!(first, second);

    // a different grammar replaces every derived table.
    automaton.build(&grammars::strange()).unwrap();
    assert!(automaton.recognize("dd"));
    assert!(!automaton.recognize("ab"));
}

#[test]
fn concurrent_recognition() {
    let automaton = Arc::new(automaton(grammars::arithmetic()));

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let automaton = Arc::clone(&automaton);
            thread::spawn(move || {
                let open = "(".repeat(i + 1);
                let close = ")".repeat(i + 1);
                let word = format!("{}x+y{}*z", open, close);
                automaton.recognize(&word) && !automaton.recognize(&open)
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap());
    }
}
