// tests/json_tests.rs

use std::collections::BTreeMap;

use frog::grammars::json::{self, grammar, JsonValue, ARRAY, OBJECT};
use frog::FrogError;

#[test]
fn array_of_integers() {
    let tree = grammar().unwrap().parse_rule("[1,2,3]", ARRAY).unwrap();
    assert!(tree.is_complete());
    assert_eq!(
        json::array(&tree).unwrap(),
        JsonValue::Array(vec![
            JsonValue::Integer(1),
            JsonValue::Integer(2),
            JsonValue::Integer(3)
        ])
    );
}

#[test]
fn object_with_two_members() {
    let tree = grammar()
        .unwrap()
        .parse_rule(r#"{"a":1,"b":2}"#, OBJECT)
        .unwrap();
    assert!(tree.is_complete());
    let mut expected = BTreeMap::new();
    expected.insert("a".to_string(), JsonValue::Integer(1));
    expected.insert("b".to_string(), JsonValue::Integer(2));
    assert_eq!(json::object(&tree).unwrap(), JsonValue::Object(expected));
}

#[test]
fn empty_containers() {
    assert_eq!(json::parse("[]").unwrap(), JsonValue::Array(vec![]));
    assert_eq!(json::parse("{ }").unwrap(), JsonValue::Object(BTreeMap::new()));
}

#[test]
fn nested_document_with_whitespace() {
    let v = json::parse(" {\n  \"list\": [ [], {\"x\": \"y\"} ],\n  \"n\": -0.5\n} ").unwrap();
    assert_eq!(v.to_string(), r#"{"list":[[],{"x":"y"}],"n":-0.5}"#);
}

#[test]
fn trailing_comma_is_rejected() {
    let err = json::parse("[1,2,]").unwrap_err();
    assert!(matches!(err, FrogError::ParseFailed { .. }));
}

#[test]
fn trailing_content_is_rejected() {
    assert!(matches!(
        json::parse("[1] 2"),
        Err(FrogError::ParseFailed { .. })
    ));
}

#[test]
fn value_index_follows_declaration_order() {
    let g = grammar().unwrap();
    let cases = [("1", 0), ("\"s\"", 1), ("[]", 2), ("{}", 3), ("true", 4), ("false", 5), ("null", 6)];
    for (text, index) in cases {
        let tree = g.parse_rule(text, json::VALUE).unwrap();
        assert!(tree.is_success(), "{text}");
        assert_eq!(tree.index(), index, "{text}");
    }
}
