//! The Frog Command-Line Interface.
//!
//! This module is the main entry point for all CLI commands and drives the
//! bundled grammars through the library API.

use std::io::Read;
use std::{fs, process};

use clap::Parser;

use crate::cli::args::{ColorMode, Command, FrogArgs, GrammarName, InputArgs, TreeFormat};
use crate::errors::{print_error, FrogError};
use crate::grammar::Grammar;
use crate::grammars::{expression, json};

pub mod args;
pub mod output;

/// The main entry point for the CLI.
pub fn run() {
    let args = FrogArgs::parse();

    let result = match args.command {
        Command::Eval { input } => handle_eval(&input, args.color, args.verbose),
        Command::Json { input } => handle_json(&input, args.color, args.verbose),
        Command::Tree {
            grammar,
            rule,
            format,
            input,
        } => handle_tree(grammar, rule.as_deref(), format, &input, args.color),
        Command::Rules { grammar } => handle_rules(grammar),
    };

    if let Err(e) = result {
        print_error(e);
        process::exit(1);
    }
}

// ============================================================================
// COMMAND HANDLERS
// ============================================================================

fn handle_eval(input: &InputArgs, color: ColorMode, verbose: bool) -> Result<(), FrogError> {
    let (name, text) = read_input(input)?;
    let tree = expression::grammar()?.parse_rule(&text, expression::START)?;
    if verbose {
        output::trace_tree(color, &tree);
    }
    FrogError::check_complete(&name, &tree)?;
    let value = expression::start(&tree)?;
    output::print_value(color, &value);
    Ok(())
}

fn handle_json(input: &InputArgs, color: ColorMode, verbose: bool) -> Result<(), FrogError> {
    let (name, text) = read_input(input)?;
    let tree = json::grammar()?.parse_rule(&text, json::DOCUMENT)?;
    if verbose {
        output::trace_tree(color, &tree);
    }
    FrogError::check_complete(&name, &tree)?;
    let value = json::document(&tree)?;
    output::print_value(color, &value);
    Ok(())
}

/// Prints the tree even when matching failed; the failure is reported afterwards.
fn handle_tree(
    grammar: GrammarName,
    rule: Option<&str>,
    format: TreeFormat,
    input: &InputArgs,
    color: ColorMode,
) -> Result<(), FrogError> {
    let (name, text) = read_input(input)?;
    let (g, default_rule) = bundled(grammar)?;
    let tree = g.parse_rule(&text, rule.unwrap_or(default_rule))?;

    match format {
        TreeFormat::Text => output::print_tree(color, &tree),
        TreeFormat::Json => {
            // ParseResult serialization cannot fail: all fields are plain data.
            let rendered = serde_json::to_string_pretty(&tree).unwrap_or_default();
            println!("{rendered}");
        }
    }

    match FrogError::parse_failed(&name, &tree) {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

fn handle_rules(grammar: GrammarName) -> Result<(), FrogError> {
    let (g, _) = bundled(grammar)?;
    let lines: Vec<String> = g
        .rule_names()
        .map(|name| format!("{name} -> {}", g.references(name).join(", ")))
        .collect();
    output::print_lines(&lines);
    Ok(())
}

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

fn bundled(grammar: GrammarName) -> Result<(&'static Grammar, &'static str), FrogError> {
    match grammar {
        GrammarName::Expression => Ok((expression::grammar()?, expression::START)),
        GrammarName::Json => Ok((json::grammar()?, json::DOCUMENT)),
    }
}

/// Returns a display name for diagnostics and the input text.
fn read_input(input: &InputArgs) -> Result<(String, String), FrogError> {
    match (&input.text, &input.file) {
        (Some(text), _) => Ok(("<input>".to_string(), text.clone())),
        (None, Some(path)) if path.as_os_str() == "-" => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .map_err(|source| FrogError::Io {
                    path: "<stdin>".to_string(),
                    source,
                })?;
            Ok(("<stdin>".to_string(), text))
        }
        (None, Some(path)) => {
            let display = path.display().to_string();
            let text = fs::read_to_string(path).map_err(|source| FrogError::Io {
                path: display.clone(),
                source,
            })?;
            Ok((display, text))
        }
        // clap requires one of the two
        (None, None) => Ok(("<input>".to_string(), String::new())),
    }
}
