// tests/property_tests.rs

use frog::{ch, epsilon, lit, parse, set, Choice, Symbol};
use frog::{choice, seq};
use proptest::prelude::*;

fn grammar_zoo() -> Vec<Symbol> {
    vec![
        ch('a'),
        lit("ab"),
        set("abc"),
        epsilon(),
        seq!['a', 'b', 'c'],
        choice![seq!['a', 'b', 'x'], seq!['a', 'c'], 'b'],
        choice![seq!['a', choice!['b', 'c']], epsilon()],
        frog::regex("[ab]+c?").unwrap(),
    ]
}

proptest! {
    #[test]
    fn spans_stay_inside_text(text in "[abcx]{0,12}") {
        for symbol in grammar_zoo() {
            let tree = parse(&text, &symbol);
            prop_assert!(tree.end() <= text.len());
            let mut stack = vec![&tree];
            while let Some(node) = stack.pop() {
                prop_assert!(node.end() <= text.len());
                stack.extend(node.children());
            }
        }
    }

    #[test]
    fn epsilon_never_consumes(text in "[abcx]{0,12}") {
        let tree = parse(&text, &epsilon());
        prop_assert!(tree.is_success());
        prop_assert_eq!((tree.start(), tree.len()), (0, 0));
    }

    #[test]
    fn choice_picks_first_matching_alternative(text in "[abc]{0,6}") {
        let alternatives = vec![lit("abc"), lit("ab"), ch('a'), epsilon()];
        let tree = parse(&text, &Choice::new(alternatives.clone()).into());
        prop_assert!(tree.is_success());
        let first = alternatives
            .iter()
            .position(|alt| parse(&text, alt).is_success());
        prop_assert_eq!(Some(tree.index()), first);
    }

    #[test]
    fn failed_choice_reports_earliest_longest(text in "[abx]{0,6}") {
        let alternatives = vec![seq!['a', 'x', 'x'], seq!['a', 'b', 'x'], seq!['a', 'a', 'x'], seq!['b', 'x']];
        let tree = parse(&text, &Choice::new(alternatives.clone()).into());
        if !tree.is_success() {
            let lengths: Vec<usize> = alternatives.iter().map(|alt| parse(&text, alt).len()).collect();
            let longest = lengths.iter().copied().max().unwrap_or(0);
            let earliest = lengths.iter().position(|&l| l == longest).unwrap_or(0);
            prop_assert_eq!(tree.index(), earliest);
            prop_assert_eq!(tree.len(), longest);
        }
    }

    #[test]
    fn sequence_succeeds_iff_members_succeed_in_order(text in "[ab]{0,4}") {
        let tree = parse(&text, &seq!['a', 'b']);
        let expected = text.starts_with("ab");
        prop_assert_eq!(tree.is_success(), expected);
        if !expected {
            prop_assert!(!tree.children().last().map_or(true, |c| c.is_success()));
        }
    }

    #[test]
    fn backtracking_leaves_no_partial_consumption(text in "[abc]{0,6}") {
        // whatever the inner choice does, the trailing 'c' must start where the choice ended
        let s = seq![choice![seq!['a', 'b', 'b'], seq!['a', 'b'], epsilon()], 'c'];
        let tree = parse(&text, &s);
        let chosen = &tree[0];
        prop_assert!(chosen.is_success());
        if let Some(next) = tree.child(1) {
            prop_assert_eq!(next.start(), chosen.end());
        }
    }
}
