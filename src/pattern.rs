//! # Pattern Model
//!
//! The closed vocabulary of matchable constructs and the `Symbol` indirection
//! that lets rules mention each other before (or while) they are defined.
//!
//! ## Kinds
//!
//! - **Terminals**: [`Pattern::Char`], [`Pattern::Set`], [`Pattern::Literal`],
//!   [`Pattern::Regex`], [`Pattern::Epsilon`]
//! - **Combinators**: [`Pattern::Sequence`], [`Pattern::Choice`]
//!
//! Patterns are immutable once built. Combinators hold [`Symbol`]s, never
//! patterns directly, so any member may be a deferred rule reference.

use std::fmt;
use std::ops::BitOr;

use regex_automata::meta::Regex;
use regex_automata::{Anchored, Input};

use crate::errors::FrogError;

// ============================================================================
// CORE TYPES
// ============================================================================

/// A zero-argument rule producer, invoked each time the rule is matched.
pub type RuleFn = fn() -> Pattern;

/// One matchable construct.
#[derive(Debug, Clone)]
pub enum Pattern {
    Char(char),
    Set(CharSet),
    Literal(String),
    Regex(AnchoredRegex),
    Choice(Choice),
    Sequence(Sequence),
    Epsilon,
}

/// Either an inline pattern or a reference resolved only at match time.
#[derive(Clone)]
pub enum Symbol {
    Pattern(Pattern),
    /// Materialized by calling the function when matched.
    Deferred(RuleFn),
    /// Looked up by name in the [`Grammar`](crate::Grammar) driving the parse.
    Rule(String),
}

/// Ordered alternation. The first alternative that succeeds wins.
#[derive(Debug, Clone, Default)]
pub struct Choice(pub Vec<Symbol>);

/// Ordered concatenation, evaluated left to right.
#[derive(Debug, Clone, Default)]
pub struct Sequence(pub Vec<Symbol>);

/// A set of single characters. Membership is a linear scan; duplicates are harmless.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharSet {
    members: Vec<char>,
}

/// A regular expression that can only match starting exactly at the cursor.
///
/// Every search is an anchored search starting at the cursor over the whole
/// text, so look-around assertions (`\b`, `^`, `\A`) see the characters
/// before the cursor. `^` and `\A` only match at offset 0.
#[derive(Clone)]
pub struct AnchoredRegex {
    source: String,
    compiled: Regex,
}

// ============================================================================
// CHARACTER SETS
// ============================================================================

impl CharSet {
    pub fn new(members: impl IntoIterator<Item = char>) -> Self {
        Self {
            members: members.into_iter().collect(),
        }
    }

    /// Every character in the inclusive range `first..=last`.
    pub fn range(first: char, last: char) -> Self {
        Self::new(first..=last)
    }

    /// Extends the set with another set's members, keeping order.
    pub fn union(mut self, other: CharSet) -> Self {
        self.members.extend(other.members);
        self
    }

    pub fn contains(&self, c: char) -> bool {
        self.members.contains(&c)
    }

    pub fn members(&self) -> &[char] {
        &self.members
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl From<&str> for CharSet {
    fn from(members: &str) -> Self {
        Self::new(members.chars())
    }
}

// ============================================================================
// ANCHORED REGULAR EXPRESSIONS
// ============================================================================

impl AnchoredRegex {
    /// Compiles `source`. Invalid expressions are a grammar construction failure.
    pub fn new(source: &str) -> Result<Self, FrogError> {
        let compiled = Regex::new(source).map_err(|e| FrogError::InvalidRegex {
            pattern: source.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            source: source.to_string(),
            compiled,
        })
    }

    /// The expression as the grammar author wrote it.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Length in bytes of the match beginning exactly at `at`, if any.
    pub fn match_len(&self, text: &str, at: usize) -> Option<usize> {
        if !text.is_char_boundary(at) {
            return None;
        }
        let input = Input::new(text)
            .span(at..text.len())
            .anchored(Anchored::Yes);
        self.compiled.find(input).map(|m| m.end() - at)
    }
}

impl fmt::Debug for AnchoredRegex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AnchoredRegex").field(&self.source).finish()
    }
}

// ============================================================================
// SYMBOLS
// ============================================================================

impl Symbol {
    /// Builds a Choice `[self, other]`.
    pub fn or(self, other: impl Into<Symbol>) -> Choice {
        Choice(vec![self, other.into()])
    }

    /// Name of the registry rule this symbol refers to, if it is one.
    pub fn rule_name(&self) -> Option<&str> {
        match self {
            Symbol::Rule(name) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Pattern(p) => p.fmt(f),
            Symbol::Deferred(func) => write!(f, "Deferred({:p})", *func as *const ()),
            Symbol::Rule(name) => write!(f, "Rule({name})"),
        }
    }
}

impl From<Pattern> for Symbol {
    fn from(p: Pattern) -> Self {
        Symbol::Pattern(p)
    }
}

impl From<RuleFn> for Symbol {
    fn from(f: RuleFn) -> Self {
        Symbol::Deferred(f)
    }
}

impl From<char> for Symbol {
    fn from(c: char) -> Self {
        Symbol::Pattern(Pattern::Char(c))
    }
}

impl From<&str> for Symbol {
    fn from(s: &str) -> Self {
        Symbol::Pattern(Pattern::Literal(s.to_string()))
    }
}

impl From<String> for Symbol {
    fn from(s: String) -> Self {
        Symbol::Pattern(Pattern::Literal(s))
    }
}

impl From<CharSet> for Symbol {
    fn from(s: CharSet) -> Self {
        Symbol::Pattern(Pattern::Set(s))
    }
}

impl From<AnchoredRegex> for Symbol {
    fn from(r: AnchoredRegex) -> Self {
        Symbol::Pattern(Pattern::Regex(r))
    }
}

impl From<Choice> for Symbol {
    fn from(c: Choice) -> Self {
        Symbol::Pattern(Pattern::Choice(c))
    }
}

impl From<Sequence> for Symbol {
    fn from(s: Sequence) -> Self {
        Symbol::Pattern(Pattern::Sequence(s))
    }
}

impl From<Choice> for Pattern {
    fn from(c: Choice) -> Self {
        Pattern::Choice(c)
    }
}

impl From<Sequence> for Pattern {
    fn from(s: Sequence) -> Self {
        Pattern::Sequence(s)
    }
}

// ============================================================================
// BUILDERS
// ============================================================================

impl Choice {
    pub fn new(alternatives: Vec<Symbol>) -> Self {
        Self(alternatives)
    }

    /// Appends an alternative at the end. Nested choices are kept as-is.
    pub fn or(mut self, alternative: impl Into<Symbol>) -> Self {
        self.0.push(alternative.into());
        self
    }

    pub fn alternatives(&self) -> &[Symbol] {
        &self.0
    }
}

impl Sequence {
    pub fn new(members: Vec<Symbol>) -> Self {
        Self(members)
    }

    /// Appends a member at the end.
    pub fn then(mut self, member: impl Into<Symbol>) -> Self {
        self.0.push(member.into());
        self
    }

    pub fn members(&self) -> &[Symbol] {
        &self.0
    }
}

impl<S: Into<Symbol>> BitOr<S> for Choice {
    type Output = Choice;

    fn bitor(self, rhs: S) -> Choice {
        self.or(rhs)
    }
}

impl<S: Into<Symbol>> BitOr<S> for Symbol {
    type Output = Choice;

    fn bitor(self, rhs: S) -> Choice {
        self.or(rhs)
    }
}

impl<S: Into<Symbol>> BitOr<S> for Sequence {
    type Output = Choice;

    fn bitor(self, rhs: S) -> Choice {
        Symbol::from(self).or(rhs)
    }
}

impl<S: Into<Symbol>> BitOr<S> for Pattern {
    type Output = Choice;

    fn bitor(self, rhs: S) -> Choice {
        Symbol::from(self).or(rhs)
    }
}

impl<S: Into<Symbol>> BitOr<S> for CharSet {
    type Output = Choice;

    fn bitor(self, rhs: S) -> Choice {
        Symbol::from(self).or(rhs)
    }
}

impl<S: Into<Symbol>> BitOr<S> for AnchoredRegex {
    type Output = Choice;

    fn bitor(self, rhs: S) -> Choice {
        Symbol::from(self).or(rhs)
    }
}

/// Builds a [`Sequence`] symbol, converting each member with `Into<Symbol>`.
#[macro_export]
macro_rules! seq {
    ($($member:expr),* $(,)?) => {
        $crate::Symbol::from($crate::Sequence::new(vec![$($crate::Symbol::from($member)),*]))
    };
}

/// Builds a [`Choice`] symbol, converting each alternative with `Into<Symbol>`.
#[macro_export]
macro_rules! choice {
    ($($alt:expr),* $(,)?) => {
        $crate::Symbol::from($crate::Choice::new(vec![$($crate::Symbol::from($alt)),*]))
    };
}

// ============================================================================
// CONSTRUCTORS
// ============================================================================

pub fn ch(c: char) -> Symbol {
    Symbol::from(c)
}

pub fn set(members: impl Into<CharSet>) -> Symbol {
    Symbol::from(members.into())
}

pub fn lit(literal: impl Into<String>) -> Symbol {
    Symbol::from(literal.into())
}

/// Compiles a cursor-anchored regular expression terminal.
pub fn regex(source: &str) -> Result<Symbol, FrogError> {
    AnchoredRegex::new(source).map(Symbol::from)
}

pub fn epsilon() -> Symbol {
    Symbol::Pattern(Pattern::Epsilon)
}

/// A reference to a named rule in the grammar driving the parse.
pub fn rule(name: impl Into<String>) -> Symbol {
    Symbol::Rule(name.into())
}

pub fn deferred(f: RuleFn) -> Symbol {
    Symbol::Deferred(f)
}

/// Zero-length match that succeeds only when the cursor is at the end of the text.
pub fn end_of_input() -> Symbol {
    // `\z` is always a valid expression.
    match AnchoredRegex::new(r"\z") {
        Ok(re) => Symbol::from(re),
        Err(_) => unreachable!("end-of-input expression failed to compile"),
    }
}
