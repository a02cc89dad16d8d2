//! Command-line interface argument parsing and definitions
//!
//! This module defines the CLI structure using clap's derive API,
//! providing a type-safe and well-documented command interface.

use clap::{Parser, Subcommand, ValueEnum};
use satchel_core::SchemaVersion;
use std::io::IsTerminal;
use std::path::PathBuf;

/// Satchel CLI - Postman Collection v2.2.0 validation and normalization
///
/// A command-line tool for validating collection files against the
/// v2.2.0 schema, inspecting their folder/request structure, and
/// rewriting them in normalized form.
#[derive(Parser, Debug)]
#[command(
    name = "satchel",
    version,
    author,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Enable verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output format for results
    #[arg(short, long, value_enum, global = true, default_value = "human")]
    pub output: OutputFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate collection files or directories against the schema
    Validate(ValidateArgs),

    /// Print the folder and request hierarchy of a collection
    Tree(TreeArgs),

    /// Parse a collection and pretty-print it in normalized form
    Fmt(FmtArgs),
}

/// Arguments for the validate command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Collection files or directories (directories are searched
    /// recursively for *.json)
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<PathBuf>,

    /// Reject unknown fields, empty-object URLs, and uncorrelated raw bodies
    #[arg(long)]
    pub strict: bool,

    /// Keep going past invalid optional fields and report what was pruned
    #[arg(long)]
    pub lenient: bool,

    /// Attempt to repair truncated or fence-wrapped documents before validating
    #[arg(long)]
    pub salvage: bool,
}

/// Arguments for the tree command
#[derive(Parser, Debug)]
pub struct TreeArgs {
    /// Collection file to inspect
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

/// Arguments for the fmt command
#[derive(Parser, Debug)]
pub struct FmtArgs {
    /// Collection file to normalize
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Re-stamp info.schema with this version (e.g. "2.1.0") before writing
    #[arg(long, value_name = "VERSION")]
    pub schema_version: Option<SchemaVersion>,

    /// Rewrite the file in place instead of printing to stdout
    #[arg(short, long)]
    pub write: bool,

    /// Attempt to repair a truncated or fence-wrapped document first
    #[arg(long)]
    pub salvage: bool,
}

/// Output format options
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable formatted output
    Human,
    /// JSON output
    Json,
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the effective verbosity level (considering quiet flag)
    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }

    /// Check if colored output should be used
    pub fn use_color(&self) -> bool {
        !self.no_color && std::io::stdout().is_terminal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbosity_level() {
        let cli = Cli {
            verbose: 2,
            quiet: false,
            output: OutputFormat::Human,
            no_color: false,
            command: Commands::Tree(TreeArgs {
                file: PathBuf::from("test.json"),
            }),
        };
        assert_eq!(cli.verbosity_level(), 2);

        let quiet_cli = Cli {
            verbose: 2,
            quiet: true,
            ..cli
        };
        assert_eq!(quiet_cli.verbosity_level(), 0);
    }

    #[test]
    fn test_validate_args_parsing() {
        let cli = Cli::parse_from([
            "satchel", "validate", "a.json", "fixtures/", "--strict", "--salvage",
        ]);
        match cli.command {
            Commands::Validate(args) => {
                assert_eq!(args.paths.len(), 2);
                assert!(args.strict);
                assert!(args.salvage);
                assert!(!args.lenient);
            }
            other => panic!("expected validate command, got {:?}", other),
        }
    }

    #[test]
    fn test_fmt_schema_version_parsing() {
        let cli = Cli::parse_from([
            "satchel",
            "fmt",
            "a.json",
            "--schema-version",
            "2.1.0",
            "--write",
        ]);
        match cli.command {
            Commands::Fmt(args) => {
                assert_eq!(args.schema_version, Some(SchemaVersion::V2_1_0));
                assert!(args.write);
            }
            other => panic!("expected fmt command, got {:?}", other),
        }
    }
}
