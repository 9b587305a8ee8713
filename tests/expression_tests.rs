// tests/expression_tests.rs

use frog::grammars::expression::{self, evaluate, grammar, NUMBER};
use frog::{ErrorCategory, FrogError};

#[test]
fn integer_literal() {
    let tree = grammar().unwrap().parse_rule("123", NUMBER).unwrap();
    assert!(tree.is_success());
    assert_eq!(expression::number(&tree).unwrap(), 123);
}

#[test]
fn multiplication_binds_tighter() {
    assert_eq!(evaluate("1+2*3").unwrap(), 7);
}

#[test]
fn parentheses_override_precedence() {
    assert_eq!(evaluate("(1+2)*3").unwrap(), 9);
}

#[test]
fn non_numeric_input_fails_with_zero_length() {
    let tree = grammar().unwrap().parse_rule("abc", NUMBER).unwrap();
    assert!(!tree.is_success());
    assert_eq!(tree.len(), 0);
}

#[test]
fn expression_rule_evaluates_directly() {
    let tree = grammar()
        .unwrap()
        .parse_rule("2*(3+4)-5", expression::EXPRESSION)
        .unwrap();
    assert!(tree.is_complete());
    assert_eq!(expression::expression(&tree).unwrap(), 9);
}

#[test]
fn trailing_garbage_is_a_parse_error() {
    let err = evaluate("1+2)").unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Parse);
    match err {
        FrogError::ParseFailed { span, .. } => assert_eq!(span.offset(), 3),
        other => panic!("expected ParseFailed, got {other:?}"),
    }
}

#[test]
fn unbalanced_parenthesis() {
    assert!(matches!(evaluate("(1+2"), Err(FrogError::ParseFailed { .. })));
}

#[test]
fn overflow_is_reported() {
    assert!(matches!(
        evaluate("9223372036854775807+1"),
        Err(FrogError::Overflow)
    ));
}

#[test]
fn actions_refuse_failed_trees() {
    let tree = grammar().unwrap().parse_rule("x", expression::START).unwrap();
    assert!(matches!(
        expression::start(&tree),
        Err(FrogError::MalformedTree { .. })
    ));
}
