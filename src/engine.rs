//! # Matching Engine
//!
//! Symbol resolution and the top-level entry point.
//!
//! Rule references are resolved when they are matched, never when the grammar
//! is built. That is what lets a rule mention itself or a rule defined later
//! without producing an infinite structure.
//!
//! ## Recursion
//!
//! There is no depth counter and no cycle guard. A rule that reaches itself
//! again before consuming input (left recursion) recurses until the thread's
//! stack is exhausted. Grammars must be written right-recursively, using
//! [`epsilon`](crate::epsilon) as the base case of repetition chains.

use crate::combinators::{match_choice, match_sequence};
use crate::context::ParseContext;
use crate::pattern::{Pattern, Symbol};
use crate::result::ParseResult;
use crate::terminals::{
    match_char, match_epsilon, match_literal, match_regex, match_set, Step,
};

/// Parses `text` from offset 0 with `start`.
///
/// The match is not required to cover the whole text; check
/// [`ParseResult::is_complete`] or end the grammar with
/// [`end_of_input`](crate::end_of_input). Named rules cannot be resolved here,
/// use [`Grammar::parse`](crate::Grammar::parse) for registry grammars.
pub fn parse<'t>(text: &'t str, start: &Symbol) -> ParseResult<'t> {
    let ctx = ParseContext::new(text);
    let (result, _) = match_symbol(&ctx, start, 0);
    result
}

/// Matches one symbol at `at`, resolving deferred and named rules first.
pub fn match_symbol<'t>(ctx: &ParseContext<'t, '_>, symbol: &Symbol, at: usize) -> Step<'t> {
    match symbol {
        Symbol::Pattern(pattern) => match_pattern(ctx, pattern, at),
        Symbol::Deferred(produce) => match_pattern(ctx, &produce(), at),
        Symbol::Rule(name) => match ctx.grammar().and_then(|g| g.get(name)) {
            Some(body) => match_symbol(ctx, body, at),
            None => (ParseResult::failed(ctx.text(), at), at),
        },
    }
}

pub fn match_pattern<'t>(ctx: &ParseContext<'t, '_>, pattern: &Pattern, at: usize) -> Step<'t> {
    match pattern {
        Pattern::Char(c) => match_char(ctx, *c, at),
        Pattern::Set(set) => match_set(ctx, set, at),
        Pattern::Literal(literal) => match_literal(ctx, literal, at),
        Pattern::Regex(re) => match_regex(ctx, re, at),
        Pattern::Choice(choice) => match_choice(ctx, choice, at),
        Pattern::Sequence(seq) => match_sequence(ctx, seq, at),
        Pattern::Epsilon => match_epsilon(ctx, at),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::{ch, deferred, epsilon, rule, Choice, Sequence};

    // as := 'a' as | ε
    fn many_a() -> Pattern {
        Pattern::from(Choice::new(vec![
            Symbol::from(Sequence::new(vec![ch('a'), deferred(many_a)])),
            epsilon(),
        ]))
    }

    #[test]
    fn deferred_rule_recurses() {
        let r = parse("aaab", &deferred(many_a));
        assert!(r.is_success());
        assert_eq!(r.len(), 3);
    }

    #[test]
    fn parse_does_not_require_full_consumption() {
        let r = parse("ab", &ch('a'));
        assert!(r.is_success());
        assert!(!r.is_complete());
    }

    #[test]
    fn named_rule_without_grammar_fails() {
        let r = parse("a", &rule("anything"));
        assert!(!r.is_success());
        assert_eq!(r.len(), 0);
    }
}
