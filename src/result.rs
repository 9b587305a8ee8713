//! # Parse Result Tree
//!
//! The immutable output of matching a [`Symbol`](crate::Symbol). Every
//! attempted symbol produces one `ParseResult`; only sequences carry children.
//!
//! Spans are byte offsets into the original text, which the tree borrows.

use std::fmt::Write as _;
use std::ops::{Index, Range};

use serde::ser::{Serialize, SerializeStruct, Serializer};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseResult<'t> {
    success: bool,
    index: usize,
    text: &'t str,
    start: usize,
    length: usize,
    children: Vec<ParseResult<'t>>,
}

impl<'t> ParseResult<'t> {
    /// A childless success covering `start..start + length`.
    pub fn matched(text: &'t str, start: usize, length: usize) -> Self {
        Self {
            success: true,
            index: 0,
            text,
            start,
            length,
            children: Vec::new(),
        }
    }

    /// A zero-length failure at `start`.
    pub fn failed(text: &'t str, start: usize) -> Self {
        Self {
            success: false,
            index: 0,
            text,
            start,
            length: 0,
            children: Vec::new(),
        }
    }

    /// A sequence node spanning from the first to the last attempted child.
    ///
    /// With no children the node is a zero-length success at `at`.
    pub fn composite(text: &'t str, at: usize, children: Vec<ParseResult<'t>>) -> Self {
        let success = children.iter().all(|c| c.success);
        let (start, length) = match (children.first(), children.last()) {
            (Some(first), Some(last)) => (first.start, last.end() - first.start),
            _ => (at, 0),
        };
        Self {
            success,
            index: 0,
            text,
            start,
            length,
            children,
        }
    }

    pub(crate) fn with_index(mut self, index: usize) -> Self {
        self.index = index;
        self
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Ordinal of the alternative a Choice picked (or judged best on failure).
    pub fn index(&self) -> usize {
        self.index
    }

    /// The full source text, not just the matched part.
    pub fn text(&self) -> &'t str {
        self.text
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    pub fn end(&self) -> usize {
        self.start + self.length
    }

    pub fn span(&self) -> Range<usize> {
        self.start..self.end()
    }

    /// The matched slice of the source text.
    pub fn as_str(&self) -> &'t str {
        &self.text[self.span()]
    }

    pub fn children(&self) -> &[ParseResult<'t>] {
        &self.children
    }

    pub fn child(&self, i: usize) -> Option<&ParseResult<'t>> {
        self.children.get(i)
    }

    // ------------------------------------------------------------------------
    // Diagnostics
    // ------------------------------------------------------------------------

    /// Succeeded and consumed the whole text.
    pub fn is_complete(&self) -> bool {
        self.success && self.start == 0 && self.end() == self.text.len()
    }

    /// The failing leaf of a failed tree, or `None` on success.
    ///
    /// A failing sequence always ends with its failing member, so following
    /// the last child reaches the point where matching gave up.
    pub fn furthest_failure(&self) -> Option<&ParseResult<'t>> {
        if self.success {
            return None;
        }
        let mut node = self;
        while let Some(last) = node.children.last() {
            node = last;
        }
        Some(node)
    }

    /// Indented, one node per line dump of the tree.
    pub fn to_tree_string(&self) -> String {
        let mut out = String::new();
        self.write_tree(&mut out, 0);
        out
    }

    fn write_tree(&self, out: &mut String, depth: usize) {
        let mark = if self.success { "ok" } else { "FAIL" };
        let _ = writeln!(
            out,
            "{:indent$}{} #{} [{}..{}] {:?}",
            "",
            mark,
            self.index,
            self.start,
            self.end(),
            self.as_str(),
            indent = depth * 2
        );
        for child in &self.children {
            child.write_tree(out, depth + 1);
        }
    }
}

impl<'t> Index<usize> for ParseResult<'t> {
    type Output = ParseResult<'t>;

    fn index(&self, i: usize) -> &Self::Output {
        &self.children[i]
    }
}

impl Serialize for ParseResult<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut node = serializer.serialize_struct("ParseResult", 6)?;
        node.serialize_field("success", &self.success)?;
        node.serialize_field("index", &self.index)?;
        node.serialize_field("start", &self.start)?;
        node.serialize_field("length", &self.length)?;
        node.serialize_field("text", self.as_str())?;
        node.serialize_field("children", &self.children)?;
        node.end()
    }
}
