//! # Bundled Grammars
//!
//! Two grammars built on the engine together with the semantic actions that
//! walk their trees into values:
//!
//! - **`expression`**: integer arithmetic with `+ - * /` and parentheses
//! - **`json`**: JSON documents into [`json::JsonValue`]
//!
//! Actions interpret a Choice's `index()` using the alternative order of the
//! rule that produced it. An index the rule never defined is reported as
//! [`FrogError::UnreachableAlternative`] instead of being ignored.

use crate::errors::FrogError;
use crate::result::ParseResult;

pub mod expression;
pub mod json;

/// Actions only interpret successful trees.
pub(crate) fn ensure_success(tree: &ParseResult<'_>, rule: &'static str) -> Result<(), FrogError> {
    if tree.is_success() {
        Ok(())
    } else {
        Err(FrogError::malformed(rule, "tree did not match"))
    }
}

pub(crate) fn child<'a, 't>(
    tree: &'a ParseResult<'t>,
    i: usize,
    rule: &'static str,
) -> Result<&'a ParseResult<'t>, FrogError> {
    tree.child(i).ok_or_else(|| {
        FrogError::malformed(
            rule,
            format!("expected child {i}, found {} children", tree.children().len()),
        )
    })
}
