//! # Terminal Matchers
//!
//! Each matcher starts at the given cursor and returns the result together
//! with the cursor to continue from. A failed terminal never moves the cursor
//! and always reports a zero-length failure at its starting point.

use crate::context::ParseContext;
use crate::pattern::{AnchoredRegex, CharSet};
use crate::result::ParseResult;

/// Outcome of one matcher: the result and the cursor after it.
pub type Step<'t> = (ParseResult<'t>, usize);

fn advance<'t>(ctx: &ParseContext<'t, '_>, at: usize, length: usize) -> Step<'t> {
    (ParseResult::matched(ctx.text(), at, length), at + length)
}

fn reject<'t>(ctx: &ParseContext<'t, '_>, at: usize) -> Step<'t> {
    (ParseResult::failed(ctx.text(), at), at)
}

pub fn match_char<'t>(ctx: &ParseContext<'t, '_>, expected: char, at: usize) -> Step<'t> {
    match ctx.char_at(at) {
        Some(c) if c == expected => advance(ctx, at, c.len_utf8()),
        _ => reject(ctx, at),
    }
}

pub fn match_set<'t>(ctx: &ParseContext<'t, '_>, set: &CharSet, at: usize) -> Step<'t> {
    match ctx.char_at(at) {
        Some(c) if set.contains(c) => advance(ctx, at, c.len_utf8()),
        _ => reject(ctx, at),
    }
}

pub fn match_literal<'t>(ctx: &ParseContext<'t, '_>, literal: &str, at: usize) -> Step<'t> {
    let matches = ctx
        .text()
        .get(at..)
        .is_some_and(|rest| rest.starts_with(literal));
    if matches {
        advance(ctx, at, literal.len())
    } else {
        reject(ctx, at)
    }
}

pub fn match_regex<'t>(ctx: &ParseContext<'t, '_>, re: &AnchoredRegex, at: usize) -> Step<'t> {
    match re.match_len(ctx.text(), at) {
        Some(length) => advance(ctx, at, length),
        None => reject(ctx, at),
    }
}

pub fn match_epsilon<'t>(ctx: &ParseContext<'t, '_>, at: usize) -> Step<'t> {
    advance(ctx, at, 0)
}
