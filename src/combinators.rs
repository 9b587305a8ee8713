//! # Combinator Engine
//!
//! Sequence (ordered, short-circuiting) and Choice (ordered, backtracking).
//!
//! A Choice hands every alternative the same starting cursor, so a failed
//! alternative can never leak partial consumption into its siblings. When all
//! alternatives fail, the one that got furthest is reported instead of a bare
//! failure; on equal length the earlier alternative is kept.

use crate::context::ParseContext;
use crate::engine::match_symbol;
use crate::pattern::{Choice, Sequence};
use crate::result::ParseResult;
use crate::terminals::Step;

pub fn match_sequence<'t>(ctx: &ParseContext<'t, '_>, seq: &Sequence, at: usize) -> Step<'t> {
    let mut children = Vec::with_capacity(seq.members().len());
    let mut cursor = at;

    for member in seq.members() {
        let (result, next) = match_symbol(ctx, member, cursor);
        cursor = next;
        let failed = !result.is_success();
        children.push(result);
        if failed {
            break;
        }
    }

    (ParseResult::composite(ctx.text(), at, children), cursor)
}

/// The result of the chosen alternative carries that alternative's ordinal.
/// A Choice listed directly as an alternative of another Choice loses its own
/// ordinal this way; wrap it in a one-member Sequence to keep it.
pub fn match_choice<'t>(ctx: &ParseContext<'t, '_>, choice: &Choice, at: usize) -> Step<'t> {
    let mut best: Option<ParseResult<'t>> = None;

    for (index, alternative) in choice.alternatives().iter().enumerate() {
        let (result, next) = match_symbol(ctx, alternative, at);
        let result = result.with_index(index);
        if result.is_success() {
            return (result, next);
        }
        match &best {
            Some(longest) if result.len() <= longest.len() => {}
            _ => best = Some(result),
        }
    }

    let outcome = best.unwrap_or_else(|| ParseResult::failed(ctx.text(), at));
    (outcome, at)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::{ch, epsilon, lit};
    use crate::{choice, seq};

    fn seq_of(members: Vec<crate::Symbol>) -> Sequence {
        Sequence::new(members)
    }

    #[test]
    fn sequence_stops_at_first_failure() {
        let ctx = ParseContext::new("abx");
        let seq = seq_of(vec![ch('a'), ch('b'), ch('c'), ch('d')]);
        let (r, cursor) = match_sequence(&ctx, &seq, 0);
        assert!(!r.is_success());
        assert_eq!(r.children().len(), 3);
        assert!(!r[2].is_success());
        assert_eq!(r.len(), 2);
        // no rewind on its own failure
        assert_eq!(cursor, 2);
    }

    #[test]
    fn choice_prefers_first_success() {
        let ctx = ParseContext::new("ab");
        let c = Choice::new(vec![ch('a'), lit("ab")]);
        let (r, cursor) = match_choice(&ctx, &c, 0);
        assert_eq!((r.index(), r.len(), cursor), (0, 1, 1));
    }

    #[test]
    fn choice_rewinds_between_alternatives() {
        let ctx = ParseContext::new("abd");
        let c = Choice::new(vec![seq![ 'a', 'b', 'c' ], seq![ 'a', 'b', 'd' ]]);
        let (r, cursor) = match_choice(&ctx, &c, 0);
        assert!(r.is_success());
        assert_eq!((r.index(), cursor), (1, 3));
    }

    #[test]
    fn failed_choice_reports_longest_alternative() {
        let ctx = ParseContext::new("abcz");
        let c = Choice::new(vec![
            seq!['a', 'x'],
            seq!['a', 'b', 'c', 'd'],
            seq!['a', 'b', 'y'],
        ]);
        let (r, cursor) = match_choice(&ctx, &c, 0);
        assert!(!r.is_success());
        assert_eq!((r.index(), r.len(), cursor), (1, 3, 0));
    }

    #[test]
    fn failed_choice_keeps_earliest_on_tie() {
        let ctx = ParseContext::new("ab");
        let c = Choice::new(vec![seq!['a', 'x'], seq!['a', 'y']]);
        let (r, _) = match_choice(&ctx, &c, 0);
        assert_eq!((r.index(), r.len()), (0, 1));
    }

    #[test]
    fn nested_choice_keeps_its_own_numbering() {
        let ctx = ParseContext::new("c");
        let inner = choice!['b', 'c'];
        let outer = Choice::new(vec![ch('a'), seq![inner]]);
        let (r, _) = match_choice(&ctx, &outer, 0);
        assert_eq!(r.index(), 1);
        assert_eq!(r[0].index(), 1);
    }

    #[test]
    fn directly_nested_choice_takes_outer_ordinal() {
        let ctx = ParseContext::new("c");
        let outer = Choice::new(vec![ch('a'), choice!['b', 'c']]);
        let (r, _) = match_choice(&ctx, &outer, 0);
        assert!(r.is_success());
        assert_eq!(r.index(), 1);
        assert!(r.children().is_empty());
    }

    #[test]
    fn empty_choice_fails_without_consuming() {
        let ctx = ParseContext::new("a");
        let (r, cursor) = match_choice(&ctx, &Choice::default(), 0);
        assert!(!r.is_success());
        assert_eq!((r.len(), cursor), (0, 0));
    }

    #[test]
    fn epsilon_alternative_catches_everything() {
        let ctx = ParseContext::new("q");
        let c = Choice::new(vec![ch('a'), epsilon()]);
        let (r, cursor) = match_choice(&ctx, &c, 0);
        assert!(r.is_success());
        assert_eq!((r.index(), r.len(), cursor), (1, 0, 0));
    }
}
