//! # Arithmetic Expressions
//!
//! ```text
//! number          := [0-9]+
//! factor          := number | '(' expression ')'
//! term_tail       := '*' factor term_tail | '/' factor term_tail | ε
//! term            := factor term_tail
//! expression_tail := '+' term expression_tail | '-' term expression_tail | ε
//! expression      := term expression_tail
//! start           := expression <end of input>
//! ```
//!
//! Operators are left-associative and `* /` bind tighter than `+ -`.
//! Evaluation uses checked `i64` arithmetic.

use once_cell::sync::OnceCell;

use crate::errors::FrogError;
use crate::grammar::Grammar;
use crate::grammars::{child, ensure_success};
use crate::pattern::{end_of_input, epsilon, regex, rule};
use crate::result::ParseResult;
use crate::seq;

pub const NUMBER: &str = "number";
pub const FACTOR: &str = "factor";
pub const TERM_TAIL: &str = "term_tail";
pub const TERM: &str = "term";
pub const EXPRESSION_TAIL: &str = "expression_tail";
pub const EXPRESSION: &str = "expression";
pub const START: &str = "start";

static GRAMMAR: OnceCell<Grammar> = OnceCell::new();

/// The arithmetic grammar, built and validated on first use.
pub fn grammar() -> Result<&'static Grammar, FrogError> {
    GRAMMAR.get_or_try_init(build)
}

fn build() -> Result<Grammar, FrogError> {
    let mut g = Grammar::new();
    g.define(NUMBER, regex("[0-9]+")?)?;
    g.define(FACTOR, rule(NUMBER) | seq!['(', rule(EXPRESSION), ')'])?;
    g.define(
        TERM_TAIL,
        seq!['*', rule(FACTOR), rule(TERM_TAIL)] | seq!['/', rule(FACTOR), rule(TERM_TAIL)] | epsilon(),
    )?;
    g.define(TERM, seq![rule(FACTOR), rule(TERM_TAIL)])?;
    g.define(
        EXPRESSION_TAIL,
        seq!['+', rule(TERM), rule(EXPRESSION_TAIL)]
            | seq!['-', rule(TERM), rule(EXPRESSION_TAIL)]
            | epsilon(),
    )?;
    g.define(EXPRESSION, seq![rule(TERM), rule(EXPRESSION_TAIL)])?;
    g.define(START, seq![rule(EXPRESSION), end_of_input()])?;
    g.validate()?;
    Ok(g)
}

/// Parses and evaluates `text`, which must be a complete expression.
pub fn evaluate(text: &str) -> Result<i64, FrogError> {
    let tree = grammar()?.parse_rule(text, START)?;
    FrogError::check_complete("expression", &tree)?;
    start(&tree)
}

// ============================================================================
// ACTIONS
// ============================================================================

pub fn start(tree: &ParseResult<'_>) -> Result<i64, FrogError> {
    ensure_success(tree, START)?;
    expression(child(tree, 0, START)?)
}

pub fn number(tree: &ParseResult<'_>) -> Result<i64, FrogError> {
    ensure_success(tree, NUMBER)?;
    let lexeme = tree.as_str();
    lexeme.parse().map_err(|_| FrogError::InvalidNumber {
        lexeme: lexeme.to_string(),
    })
}

pub fn factor(tree: &ParseResult<'_>) -> Result<i64, FrogError> {
    ensure_success(tree, FACTOR)?;
    match tree.index() {
        0 => number(tree),
        1 => expression(child(tree, 1, FACTOR)?),
        index => Err(FrogError::UnreachableAlternative { rule: FACTOR, index }),
    }
}

pub fn term(tree: &ParseResult<'_>) -> Result<i64, FrogError> {
    ensure_success(tree, TERM)?;
    let mut acc = factor(child(tree, 0, TERM)?)?;
    let mut tail = child(tree, 1, TERM)?;
    loop {
        match tail.index() {
            0 => acc = acc.checked_mul(factor(child(tail, 1, TERM_TAIL)?)?).ok_or(FrogError::Overflow)?,
            1 => acc = divide(acc, factor(child(tail, 1, TERM_TAIL)?)?)?,
            2 => return Ok(acc),
            index => return Err(FrogError::UnreachableAlternative { rule: TERM_TAIL, index }),
        }
        tail = child(tail, 2, TERM_TAIL)?;
    }
}

pub fn expression(tree: &ParseResult<'_>) -> Result<i64, FrogError> {
    ensure_success(tree, EXPRESSION)?;
    let mut acc = term(child(tree, 0, EXPRESSION)?)?;
    let mut tail = child(tree, 1, EXPRESSION)?;
    loop {
        let operand = match tail.index() {
            0 | 1 => term(child(tail, 1, EXPRESSION_TAIL)?)?,
            2 => return Ok(acc),
            index => {
                return Err(FrogError::UnreachableAlternative {
                    rule: EXPRESSION_TAIL,
                    index,
                })
            }
        };
        acc = if tail.index() == 0 {
            acc.checked_add(operand)
        } else {
            acc.checked_sub(operand)
        }
        .ok_or(FrogError::Overflow)?;
        tail = child(tail, 2, EXPRESSION_TAIL)?;
    }
}

fn divide(lhs: i64, rhs: i64) -> Result<i64, FrogError> {
    if rhs == 0 {
        return Err(FrogError::DivisionByZero);
    }
    lhs.checked_div(rhs).ok_or(FrogError::Overflow)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grammar_is_valid_and_cached() {
        let first = grammar().unwrap() as *const Grammar;
        let second = grammar().unwrap() as *const Grammar;
        assert_eq!(first, second);
    }

    #[test]
    fn left_associative_subtraction_and_division() {
        assert_eq!(evaluate("10-3-2").unwrap(), 5);
        assert_eq!(evaluate("100/10/5").unwrap(), 2);
    }

    #[test]
    fn division_by_zero() {
        assert!(matches!(evaluate("1/0"), Err(FrogError::DivisionByZero)));
    }

    #[test]
    fn overflowing_literal() {
        assert!(matches!(
            evaluate("99999999999999999999"),
            Err(FrogError::InvalidNumber { .. })
        ));
    }

    #[test]
    fn unknown_alternative_is_an_error() {
        let tree = ParseResult::matched("7", 0, 1).with_index(5);
        assert!(matches!(
            factor(&tree),
            Err(FrogError::UnreachableAlternative { rule: FACTOR, index: 5 })
        ));
    }
}
