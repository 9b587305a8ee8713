//! Frog Error Handling
//!
//! One error enum for everything outside the matching loop. The engine itself
//! never produces these: a failed match is a `ParseResult` with
//! `is_success() == false`. Errors come from three places:
//!
//! - **Grammar construction**: bad regular expressions, duplicate or missing rules
//! - **Parse diagnostics**: turning a failed or partial tree into a report
//! - **Actions**: semantic layers walking a tree into a value

use std::sync::Arc;

use miette::{Diagnostic, NamedSource, Report, SourceSpan};
use thiserror::Error;

use crate::result::ParseResult;

// ============================================================================
// ERROR TYPE
// ============================================================================

#[derive(Error, Diagnostic, Debug)]
pub enum FrogError {
    // Grammar construction
    #[error("invalid regular expression `{pattern}`: {reason}")]
    #[diagnostic(code(frog::grammar::invalid_regex))]
    InvalidRegex { pattern: String, reason: String },

    #[error("rule `{rule}` is defined more than once")]
    #[diagnostic(code(frog::grammar::duplicate_rule))]
    DuplicateRule { rule: String },

    #[error("rule `{rule}` references undefined rule `{reference}`")]
    #[diagnostic(code(frog::grammar::undefined_rule))]
    UndefinedRule { rule: String, reference: String },

    #[error("no rule named `{rule}`")]
    #[diagnostic(code(frog::grammar::unknown_rule))]
    UnknownRule { rule: String },

    // Parse diagnostics
    #[error("unable to parse input")]
    #[diagnostic(code(frog::parse::failed))]
    ParseFailed {
        #[source_code]
        src: Arc<NamedSource<String>>,
        #[label("{label}")]
        span: SourceSpan,
        label: String,
        #[help]
        help: Option<String>,
    },

    #[error("input was only partially parsed")]
    #[diagnostic(
        code(frog::parse::incomplete),
        help("the grammar matched a prefix; everything from here on is left over")
    )]
    IncompleteParse {
        #[source_code]
        src: Arc<NamedSource<String>>,
        #[label("unexpected trailing input")]
        span: SourceSpan,
    },

    // Actions
    #[error("unreachable alternative {index} in rule `{rule}`")]
    #[diagnostic(
        code(frog::action::unreachable_alternative),
        help("the tree does not come from this grammar; this is a bug in the caller")
    )]
    UnreachableAlternative { rule: &'static str, index: usize },

    #[error("malformed tree for rule `{rule}`: {detail}")]
    #[diagnostic(code(frog::action::malformed_tree))]
    MalformedTree { rule: &'static str, detail: String },

    #[error("invalid number `{lexeme}`")]
    #[diagnostic(code(frog::action::invalid_number))]
    InvalidNumber { lexeme: String },

    #[error("invalid escape sequence `{sequence}`")]
    #[diagnostic(code(frog::action::invalid_escape))]
    InvalidEscape { sequence: String },

    #[error("division by zero")]
    #[diagnostic(code(frog::action::division_by_zero))]
    DivisionByZero,

    #[error("arithmetic overflow")]
    #[diagnostic(code(frog::action::overflow))]
    Overflow,

    // Environment
    #[error("failed to read {path}")]
    #[diagnostic(code(frog::io))]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Grammar,
    Parse,
    Action,
    Io,
}

impl FrogError {
    /// Error category for assertions and exit handling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidRegex { .. }
            | Self::DuplicateRule { .. }
            | Self::UndefinedRule { .. }
            | Self::UnknownRule { .. } => ErrorCategory::Grammar,

            Self::ParseFailed { .. } | Self::IncompleteParse { .. } => ErrorCategory::Parse,

            Self::UnreachableAlternative { .. }
            | Self::MalformedTree { .. }
            | Self::InvalidNumber { .. }
            | Self::InvalidEscape { .. }
            | Self::DivisionByZero
            | Self::Overflow => ErrorCategory::Action,

            Self::Io { .. } => ErrorCategory::Io,
        }
    }

    /// Builds a report pointing at the furthest point a failed tree reached.
    ///
    /// Returns `None` if the tree actually succeeded.
    pub fn parse_failed(name: &str, tree: &ParseResult<'_>) -> Option<Self> {
        let failure = tree.furthest_failure()?;
        let at = failure.start();
        let label = match tree.text()[at..].chars().next() {
            Some(c) => format!("unexpected {c:?}"),
            None => "unexpected end of input".to_string(),
        };
        let width = tree.text()[at..].chars().next().map_or(0, char::len_utf8);
        Some(Self::ParseFailed {
            src: named_source(name, tree.text()),
            span: (at, width).into(),
            label,
            help: Some(format!("matching gave up after {} bytes", tree.end())),
        })
    }

    /// Builds a report for a successful tree that left input unconsumed.
    ///
    /// Returns `None` if the tree failed or covers the whole text.
    pub fn incomplete(name: &str, tree: &ParseResult<'_>) -> Option<Self> {
        if !tree.is_success() || tree.is_complete() {
            return None;
        }
        let text = tree.text();
        Some(Self::IncompleteParse {
            src: named_source(name, text),
            span: (tree.end(), text.len() - tree.end()).into(),
        })
    }

    /// Failure or trailing-input report for `tree`, whichever applies.
    pub fn check_complete(name: &str, tree: &ParseResult<'_>) -> Result<(), Self> {
        match Self::parse_failed(name, tree).or_else(|| Self::incomplete(name, tree)) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    pub(crate) fn malformed(rule: &'static str, detail: impl Into<String>) -> Self {
        Self::MalformedTree {
            rule,
            detail: detail.into(),
        }
    }
}

fn named_source(name: &str, text: &str) -> Arc<NamedSource<String>> {
    Arc::new(NamedSource::new(name, text.to_string()))
}

// ============================================================================
// ERROR FORMATTING
// ============================================================================

/// Prints an error with full miette diagnostics to stderr.
pub fn print_error(error: FrogError) {
    let report = Report::new(error);
    eprintln!("{report:?}");
}
