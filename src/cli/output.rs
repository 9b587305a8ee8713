//! Handles all user-facing output for the CLI.
//!
//! Results go to stdout, tree dumps and diagnostics to stderr when they
//! accompany a result. Coloring goes through `termcolor` so `--color` is
//! honored everywhere.

use std::fmt::Display;
use std::io::Write;

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::cli::args::ColorMode;
use crate::result::ParseResult;

impl From<ColorMode> for ColorChoice {
    fn from(mode: ColorMode) -> Self {
        match mode {
            ColorMode::Auto => ColorChoice::Auto,
            ColorMode::Always => ColorChoice::Always,
            ColorMode::Never => ColorChoice::Never,
        }
    }
}

/// Prints a final value in bold green.
pub fn print_value(mode: ColorMode, value: &dyn Display) {
    let mut stdout = StandardStream::stdout(mode.into());
    let _ = stdout.set_color(ColorSpec::new().set_fg(Some(Color::Green)).set_bold(true));
    let _ = writeln!(stdout, "{value}");
    let _ = stdout.reset();
}

/// Prints plain lines, one per item.
pub fn print_lines(items: &[String]) {
    for item in items {
        println!("{item}");
    }
}

/// Prints a tree to stdout, successes in green and failures in red.
pub fn print_tree(mode: ColorMode, tree: &ParseResult<'_>) {
    let mut stdout = StandardStream::stdout(mode.into());
    write_tree(&mut stdout, tree, 0);
    let _ = stdout.reset();
}

/// Same as [`print_tree`] but on stderr, for `--verbose`.
pub fn trace_tree(mode: ColorMode, tree: &ParseResult<'_>) {
    let mut stderr = StandardStream::stderr(mode.into());
    write_tree(&mut stderr, tree, 0);
    let _ = stderr.reset();
}

// ============================================================================
// PRIVATE HELPERS
// ============================================================================

fn write_tree(out: &mut impl WriteColor, node: &ParseResult<'_>, depth: usize) {
    let (mark, color) = if node.is_success() {
        ("ok", Color::Green)
    } else {
        ("FAIL", Color::Red)
    };
    let _ = write!(out, "{:indent$}", "", indent = depth * 2);
    let _ = out.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true));
    let _ = write!(out, "{mark}");
    let _ = out.reset();
    let _ = writeln!(
        out,
        " #{} [{}..{}] {:?}",
        node.index(),
        node.start(),
        node.end(),
        node.as_str()
    );
    for child in node.children() {
        write_tree(out, child, depth + 1);
    }
}
