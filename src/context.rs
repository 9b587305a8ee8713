//! Per-parse state: the borrowed source text and the registry used to
//! resolve named rules.
//!
//! The cursor does not live here. Every matcher takes the cursor it starts
//! from and hands back the cursor it stopped at, so backtracking is simply
//! reusing a value the caller already holds.

use crate::grammar::Grammar;

#[derive(Debug, Clone, Copy)]
pub struct ParseContext<'t, 'g> {
    text: &'t str,
    grammar: Option<&'g Grammar>,
}

impl<'t, 'g> ParseContext<'t, 'g> {
    /// A context without a registry. `Symbol::Rule` cannot be resolved in it.
    pub fn new(text: &'t str) -> Self {
        Self {
            text,
            grammar: None,
        }
    }

    pub fn with_grammar(text: &'t str, grammar: &'g Grammar) -> Self {
        Self {
            text,
            grammar: Some(grammar),
        }
    }

    pub fn text(&self) -> &'t str {
        self.text
    }

    pub fn grammar(&self) -> Option<&'g Grammar> {
        self.grammar
    }

    /// The character starting at byte offset `at`, if any.
    pub fn char_at(&self, at: usize) -> Option<char> {
        self.text.get(at..).and_then(|rest| rest.chars().next())
    }
}
