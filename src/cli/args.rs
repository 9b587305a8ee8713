//! Defines the command-line arguments and subcommands for the Frog CLI.
//!
//! This module uses the `clap` crate with its "derive" feature to create a
//! declarative and type-safe argument parsing structure.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "frog",
    version,
    about = "Parse text with parsing expression grammars."
)]
pub struct FrogArgs {
    /// When to colorize output.
    #[arg(long, value_enum, default_value_t = ColorMode::Auto, global = true)]
    pub color: ColorMode,

    /// Also print the parse tree to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// An enumeration of all available CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Evaluate an integer arithmetic expression.
    Eval {
        #[command(flatten)]
        input: InputArgs,
    },
    /// Parse a JSON document and print it compactly.
    Json {
        #[command(flatten)]
        input: InputArgs,
    },
    /// Print the parse tree a bundled grammar produces for the input.
    Tree {
        /// The grammar to parse with.
        #[arg(long, value_enum)]
        grammar: GrammarName,
        /// Start rule (defaults to the grammar's whole-input rule).
        #[arg(long)]
        rule: Option<String>,
        /// Output format for the tree.
        #[arg(long, value_enum, default_value_t = TreeFormat::Text)]
        format: TreeFormat,
        #[command(flatten)]
        input: InputArgs,
    },
    /// List the rules of a bundled grammar with the rules each one references.
    Rules {
        /// The grammar whose rules to list.
        #[arg(value_enum)]
        grammar: GrammarName,
    },
}

/// Where the input text comes from.
#[derive(Debug, Args)]
pub struct InputArgs {
    /// The input text.
    #[arg(required_unless_present = "file", conflicts_with = "file")]
    pub text: Option<String>,

    /// Read the input from a file (`-` for stdin).
    #[arg(short, long)]
    pub file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GrammarName {
    Expression,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TreeFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}
