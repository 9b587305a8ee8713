//! # Grammar Registry
//!
//! Named rules resolved by [`Symbol::Rule`] at match time. Keeping rules in a
//! registry instead of closures that capture each other makes the rule graph
//! inspectable: [`Grammar::references`] lists what a rule mentions and
//! [`Grammar::validate`] rejects references to rules that were never defined.
//!
//! ## Usage Workflow
//! ```rust
//! use frog::{epsilon, rule, seq, Grammar};
//! let mut grammar = Grammar::new();
//! grammar.define("as", seq!['a', rule("as")] | epsilon()).unwrap();
//! grammar.validate().unwrap();
//! let tree = grammar.parse_rule("aaa", "as").unwrap();
//! assert!(tree.is_complete());
//! ```

use std::collections::HashMap;

use crate::context::ParseContext;
use crate::engine::match_symbol;
use crate::errors::FrogError;
use crate::pattern::{Pattern, Symbol};
use crate::result::ParseResult;

#[derive(Debug, Clone, Default)]
pub struct Grammar {
    rules: HashMap<String, Symbol>,
    order: Vec<String>,
}

impl Grammar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a rule. A name may only be defined once.
    pub fn define(&mut self, name: &str, body: impl Into<Symbol>) -> Result<(), FrogError> {
        if self.rules.contains_key(name) {
            return Err(FrogError::DuplicateRule {
                rule: name.to_string(),
            });
        }
        self.rules.insert(name.to_string(), body.into());
        self.order.push(name.to_string());
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Symbol> {
        self.rules.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    /// Rule names in definition order.
    pub fn rule_names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Named rules mentioned directly by `name`'s body, in order of appearance.
    ///
    /// Deferred function references are opaque and not followed.
    pub fn references(&self, name: &str) -> Vec<&str> {
        let mut found = Vec::new();
        if let Some(body) = self.rules.get(name) {
            collect_references(body, &mut found);
        }
        found
    }

    /// Checks that every named reference resolves to a defined rule.
    pub fn validate(&self) -> Result<(), FrogError> {
        for name in &self.order {
            if let Some(reference) = self
                .references(name)
                .into_iter()
                .find(|reference| !self.contains(reference))
            {
                return Err(FrogError::UndefinedRule {
                    rule: name.clone(),
                    reference: reference.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Parses `text` from offset 0 with `start`, resolving named rules here.
    pub fn parse<'t>(&self, text: &'t str, start: &Symbol) -> ParseResult<'t> {
        let ctx = ParseContext::with_grammar(text, self);
        let (result, _) = match_symbol(&ctx, start, 0);
        result
    }

    /// Parses `text` starting from the rule called `start`.
    pub fn parse_rule<'t>(&self, text: &'t str, start: &str) -> Result<ParseResult<'t>, FrogError> {
        let body = self.get(start).ok_or_else(|| FrogError::UnknownRule {
            rule: start.to_string(),
        })?;
        Ok(self.parse(text, body))
    }
}

fn collect_references<'a>(symbol: &'a Symbol, found: &mut Vec<&'a str>) {
    match symbol {
        Symbol::Rule(name) => {
            if !found.contains(&name.as_str()) {
                found.push(name);
            }
        }
        Symbol::Deferred(_) => {}
        Symbol::Pattern(Pattern::Choice(choice)) => {
            for alt in choice.alternatives() {
                collect_references(alt, found);
            }
        }
        Symbol::Pattern(Pattern::Sequence(seq)) => {
            for member in seq.members() {
                collect_references(member, found);
            }
        }
        Symbol::Pattern(_) => {}
    }
}
