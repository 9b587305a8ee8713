//! # JSON
//!
//! ```text
//! document    := ws value ws <end of input>
//! value       := number | string | array | object | "true" | "false" | "null"
//! array       := '[' ws elements ']'
//! elements    := value_list | ε
//! value_list  := value ws value_rest
//! value_rest  := ',' ws value_list | ε
//! object      := '{' ws members '}'
//! members     := member_list | ε
//! member_list := member ws member_rest
//! member_rest := ',' ws member_list | ε
//! member      := string ws ':' ws value
//! ```
//!
//! `array` and `object` are sequences rather than choices, so picking one of
//! them as a `value` alternative loses no alternative index of their own.

use std::collections::BTreeMap;
use std::fmt;

use once_cell::sync::OnceCell;
use serde::Serialize;

use crate::errors::FrogError;
use crate::grammar::Grammar;
use crate::grammars::{child, ensure_success};
use crate::pattern::{end_of_input, epsilon, regex, rule, Choice};
use crate::result::ParseResult;
use crate::seq;

pub const WS: &str = "ws";
pub const NUMBER: &str = "number";
pub const STRING: &str = "string";
pub const VALUE: &str = "value";
pub const ARRAY: &str = "array";
pub const ELEMENTS: &str = "elements";
pub const VALUE_LIST: &str = "value_list";
pub const VALUE_REST: &str = "value_rest";
pub const OBJECT: &str = "object";
pub const MEMBERS: &str = "members";
pub const MEMBER_LIST: &str = "member_list";
pub const MEMBER_REST: &str = "member_rest";
pub const MEMBER: &str = "member";
pub const DOCUMENT: &str = "document";

// ============================================================================
// VALUE MODEL
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum JsonValue {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Array(Vec<JsonValue>),
    Object(BTreeMap<String, JsonValue>),
}

impl fmt::Display for JsonValue {
    /// Compact JSON.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&rendered)
    }
}

impl From<i64> for JsonValue {
    fn from(n: i64) -> Self {
        JsonValue::Integer(n)
    }
}

impl From<&str> for JsonValue {
    fn from(s: &str) -> Self {
        JsonValue::String(s.to_string())
    }
}

impl From<Vec<JsonValue>> for JsonValue {
    fn from(items: Vec<JsonValue>) -> Self {
        JsonValue::Array(items)
    }
}

// ============================================================================
// GRAMMAR
// ============================================================================

static GRAMMAR: OnceCell<Grammar> = OnceCell::new();

/// The JSON grammar, built and validated on first use.
pub fn grammar() -> Result<&'static Grammar, FrogError> {
    GRAMMAR.get_or_try_init(build)
}

fn build() -> Result<Grammar, FrogError> {
    let mut g = Grammar::new();
    g.define(WS, regex(r"[ \t\r\n]*")?)?;
    g.define(
        NUMBER,
        regex(r"-?(?:0|[1-9][0-9]*)(?:\.[0-9]+)?(?:[eE][+-]?[0-9]+)?")?,
    )?;
    g.define(STRING, regex(r#""(?:[^"\\\x00-\x1f]|\\.)*""#)?)?;
    g.define(
        VALUE,
        Choice::default()
            | rule(NUMBER)
            | rule(STRING)
            | rule(ARRAY)
            | rule(OBJECT)
            | "true"
            | "false"
            | "null",
    )?;
    g.define(ARRAY, seq!['[', rule(WS), rule(ELEMENTS), ']'])?;
    g.define(ELEMENTS, rule(VALUE_LIST) | epsilon())?;
    g.define(VALUE_LIST, seq![rule(VALUE), rule(WS), rule(VALUE_REST)])?;
    g.define(VALUE_REST, seq![',', rule(WS), rule(VALUE_LIST)] | epsilon())?;
    g.define(OBJECT, seq!['{', rule(WS), rule(MEMBERS), '}'])?;
    g.define(MEMBERS, rule(MEMBER_LIST) | epsilon())?;
    g.define(MEMBER_LIST, seq![rule(MEMBER), rule(WS), rule(MEMBER_REST)])?;
    g.define(MEMBER_REST, seq![',', rule(WS), rule(MEMBER_LIST)] | epsilon())?;
    g.define(MEMBER, seq![rule(STRING), rule(WS), ':', rule(WS), rule(VALUE)])?;
    g.define(DOCUMENT, seq![rule(WS), rule(VALUE), rule(WS), end_of_input()])?;
    g.validate()?;
    Ok(g)
}

/// Parses a complete JSON document.
pub fn parse(text: &str) -> Result<JsonValue, FrogError> {
    let tree = grammar()?.parse_rule(text, DOCUMENT)?;
    FrogError::check_complete("json", &tree)?;
    document(&tree)
}

// ============================================================================
// ACTIONS
// ============================================================================

pub fn document(tree: &ParseResult<'_>) -> Result<JsonValue, FrogError> {
    ensure_success(tree, DOCUMENT)?;
    value(child(tree, 1, DOCUMENT)?)
}

pub fn value(tree: &ParseResult<'_>) -> Result<JsonValue, FrogError> {
    ensure_success(tree, VALUE)?;
    match tree.index() {
        0 => number(tree),
        1 => string(tree).map(JsonValue::String),
        2 => array(tree),
        3 => object(tree),
        4 => Ok(JsonValue::Bool(true)),
        5 => Ok(JsonValue::Bool(false)),
        6 => Ok(JsonValue::Null),
        index => Err(FrogError::UnreachableAlternative { rule: VALUE, index }),
    }
}

pub fn number(tree: &ParseResult<'_>) -> Result<JsonValue, FrogError> {
    ensure_success(tree, NUMBER)?;
    let lexeme = tree.as_str();
    let invalid = || FrogError::InvalidNumber {
        lexeme: lexeme.to_string(),
    };
    if !lexeme.contains(['.', 'e', 'E']) {
        if let Ok(n) = lexeme.parse() {
            return Ok(JsonValue::Integer(n));
        }
    }
    // Integers outside `i64` fall back to a float; infinities are not JSON.
    match lexeme.parse::<f64>() {
        Ok(f) if f.is_finite() => Ok(JsonValue::Float(f)),
        _ => Err(invalid()),
    }
}

/// The unescaped contents of a string token.
pub fn string(tree: &ParseResult<'_>) -> Result<String, FrogError> {
    ensure_success(tree, STRING)?;
    let quoted = tree.as_str();
    let inner = quoted
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .ok_or_else(|| FrogError::malformed(STRING, "missing quotes"))?;
    unescape(inner)
}

pub fn array(tree: &ParseResult<'_>) -> Result<JsonValue, FrogError> {
    ensure_success(tree, ARRAY)?;
    let mut items = Vec::new();
    let elements = child(tree, 2, ARRAY)?;
    match elements.index() {
        0 => {
            let mut list = elements;
            loop {
                items.push(value(child(list, 0, VALUE_LIST)?)?);
                let rest = child(list, 2, VALUE_LIST)?;
                match rest.index() {
                    0 => list = child(rest, 2, VALUE_REST)?,
                    1 => break,
                    index => return Err(FrogError::UnreachableAlternative { rule: VALUE_REST, index }),
                }
            }
        }
        1 => {}
        index => return Err(FrogError::UnreachableAlternative { rule: ELEMENTS, index }),
    }
    Ok(JsonValue::Array(items))
}

pub fn object(tree: &ParseResult<'_>) -> Result<JsonValue, FrogError> {
    ensure_success(tree, OBJECT)?;
    let mut entries = BTreeMap::new();
    let members = child(tree, 2, OBJECT)?;
    match members.index() {
        0 => {
            let mut list = members;
            loop {
                let (key, val) = member(child(list, 0, MEMBER_LIST)?)?;
                entries.insert(key, val);
                let rest = child(list, 2, MEMBER_LIST)?;
                match rest.index() {
                    0 => list = child(rest, 2, MEMBER_REST)?,
                    1 => break,
                    index => return Err(FrogError::UnreachableAlternative { rule: MEMBER_REST, index }),
                }
            }
        }
        1 => {}
        index => return Err(FrogError::UnreachableAlternative { rule: MEMBERS, index }),
    }
    Ok(JsonValue::Object(entries))
}

pub fn member(tree: &ParseResult<'_>) -> Result<(String, JsonValue), FrogError> {
    ensure_success(tree, MEMBER)?;
    let key = string(child(tree, 0, MEMBER)?)?;
    let val = value(child(tree, 4, MEMBER)?)?;
    Ok((key, val))
}

// ============================================================================
// ESCAPES
// ============================================================================

fn unescape(raw: &str) -> Result<String, FrogError> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let escaped = chars.next().ok_or_else(|| invalid_escape("\\"))?;
        match escaped {
            '"' => out.push('"'),
            '\\' => out.push('\\'),
            '/' => out.push('/'),
            'b' => out.push('\u{8}'),
            'f' => out.push('\u{c}'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'u' => out.push(unicode_escape(&mut chars)?),
            other => return Err(invalid_escape(&format!("\\{other}"))),
        }
    }
    Ok(out)
}

fn unicode_escape(chars: &mut std::str::Chars<'_>) -> Result<char, FrogError> {
    let high = hex4(chars)?;
    if !(0xD800..0xDC00).contains(&high) {
        return char::from_u32(high).ok_or_else(|| invalid_escape(&format!("\\u{high:04x}")));
    }
    // surrogate pair: the low half must follow immediately
    let sequence = format!("\\u{high:04x}");
    if chars.next() != Some('\\') || chars.next() != Some('u') {
        return Err(invalid_escape(&sequence));
    }
    let low = hex4(chars)?;
    if !(0xDC00..0xE000).contains(&low) {
        return Err(invalid_escape(&sequence));
    }
    let code = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
    char::from_u32(code).ok_or_else(|| invalid_escape(&sequence))
}

fn hex4(chars: &mut std::str::Chars<'_>) -> Result<u32, FrogError> {
    let digits: String = chars.by_ref().take(4).collect();
    if digits.len() != 4 {
        return Err(invalid_escape(&format!("\\u{digits}")));
    }
    u32::from_str_radix(&digits, 16).map_err(|_| invalid_escape(&format!("\\u{digits}")))
}

fn invalid_escape(sequence: &str) -> FrogError {
    FrogError::InvalidEscape {
        sequence: sequence.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literals() {
        assert_eq!(parse("true").unwrap(), JsonValue::Bool(true));
        assert_eq!(parse("false").unwrap(), JsonValue::Bool(false));
        assert_eq!(parse("null").unwrap(), JsonValue::Null);
    }

    #[test]
    fn numbers() {
        assert_eq!(parse("-12").unwrap(), JsonValue::Integer(-12));
        assert_eq!(parse("2.5e1").unwrap(), JsonValue::Float(25.0));
    }

    #[test]
    fn integer_beyond_i64_becomes_float() {
        assert_eq!(
            parse("12345678901234567890").unwrap(),
            JsonValue::Float(12345678901234567890.0)
        );
        assert_eq!(
            parse("-9223372036854775808").unwrap(),
            JsonValue::Integer(i64::MIN)
        );
    }

    #[test]
    fn overflowing_float_is_rejected() {
        assert!(matches!(
            parse("1e400"),
            Err(FrogError::InvalidNumber { ref lexeme }) if lexeme == "1e400"
        ));
        assert!(matches!(parse("[-1e999]"), Err(FrogError::InvalidNumber { .. })));
    }

    #[test]
    fn escapes() {
        assert_eq!(
            parse(r#""a\"b\né😀""#).unwrap(),
            JsonValue::from("a\"b\né😀")
        );
        assert!(matches!(parse(r#""\q""#), Err(FrogError::InvalidEscape { .. })));
        assert!(matches!(parse(r#""\ud83d""#), Err(FrogError::InvalidEscape { .. })));
    }

    #[test]
    fn display_is_compact_json() {
        let v = parse(r#"{ "b" : [1, "x", null], "a": true }"#).unwrap();
        assert_eq!(v.to_string(), r#"{"a":true,"b":[1,"x",null]}"#);
    }

    #[test]
    fn duplicate_keys_last_wins() {
        let v = parse(r#"{"k":1,"k":2}"#).unwrap();
        let mut expected = BTreeMap::new();
        expected.insert("k".to_string(), JsonValue::Integer(2));
        assert_eq!(v, JsonValue::Object(expected));
    }
}
