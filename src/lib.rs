//! # Frog
//!
//! A parsing expression grammar engine built from a handful of composable
//! patterns: single characters, character sets, literals, cursor-anchored
//! regular expressions, the empty pattern, ordered sequences and ordered
//! choices. Matching produces a [`ParseResult`] tree that semantic actions
//! walk into domain values.
//!
//! ```rust
//! use frog::{epsilon, parse, rule, seq, Grammar};
//!
//! let tree = parse("ab", &seq!['a', 'b']);
//! assert!(tree.is_complete());
//!
//! let mut grammar = Grammar::new();
//! grammar.define("digits", seq![frog::set("0123456789"), rule("digits")] | epsilon()).unwrap();
//! assert_eq!(grammar.parse_rule("42x", "digits").unwrap().len(), 2);
//! ```

pub use crate::errors::{print_error, ErrorCategory, FrogError};
pub use crate::grammar::Grammar;
pub use crate::pattern::{
    ch, deferred, end_of_input, epsilon, lit, regex, rule, set, AnchoredRegex, CharSet, Choice,
    Pattern, RuleFn, Sequence, Symbol,
};
pub use crate::engine::parse;
pub use crate::result::ParseResult;

pub mod cli;
pub mod combinators;
pub mod context;
pub mod engine;
pub mod errors;
pub mod grammar;
pub mod grammars;
pub mod pattern;
pub mod result;
pub mod terminals;
