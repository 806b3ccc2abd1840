//! Library interface for the `toshu` CLI.
//!
//! The argument parser and command implementations live here so they can be
//! tested and documented; the entry point is in `main.rs`.
//!
//! # Structure
//!
//! - [`Cli`] - The root argument parser (clap derive)
//! - [`Commands`] - Available subcommands
//! - [`commands`] - Command implementations
//! - `server` - MCP server (feature `mcp`)

pub mod commands;

#[cfg(feature = "mcp")]
pub mod server;

use clap::{CommandFactory, Parser, Subcommand};
use std::io::IsTerminal;
use std::path::PathBuf;

/// Color output preference.
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect terminal capabilities automatically.
    #[default]
    Auto,
    /// Always emit colors.
    Always,
    /// Never emit colors.
    Never,
}

impl ColorChoice {
    /// Set the global color mode. Call once at startup.
    pub fn apply(self) {
        match self {
            Self::Auto => {} // owo-colors auto-detects by default
            Self::Always => owo_colors::set_override(true),
            Self::Never => owo_colors::set_override(false),
        }
    }

    /// Whether text written to stdout should carry ANSI styling.
    ///
    /// `Auto` styles only a terminal, and honors `NO_COLOR`.
    pub fn styles_stdout(self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => {
                std::env::var_os("NO_COLOR").is_none_or(|v| v.is_empty())
                    && std::io::stdout().is_terminal()
            }
        }
    }
}

const ENV_HELP: &str = "\
ENVIRONMENT VARIABLES:
    RUST_LOG          Log filter (e.g., debug, toshu_core=trace)
    TOSHU_LOG_PATH    Explicit log file path
    TOSHU_LOG_DIR     Log directory
    TOSHU_DATA_DIR    Directory for the document, references and sticky notes
    TOSHU_REPORT_DIR  Directory for --save-report output
";

/// Command-line interface definition for toshu.
#[derive(Parser)]
#[command(name = "toshu")]
#[command(about = "Offline writing assistant: statistics, style hints, similarity", long_about = None)]
#[command(version, arg_required_else_help = true)]
#[command(after_long_help = ENV_HELP)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Print only the version number (for scripting)
    #[arg(long)]
    pub version_only: bool,

    /// Path to configuration file (overrides discovery)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Run as if started in DIR
    #[arg(short = 'C', long, global = true)]
    pub chdir: Option<PathBuf>,

    /// Directory holding the document, references and sticky notes
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Only print errors (suppresses warnings/info)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// More detail (repeatable; e.g. -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Colorize output
    #[arg(long, global = true, value_enum, default_value_t)]
    pub color: ColorChoice,

    /// Output as JSON (for scripting)
    #[arg(long, global = true)]
    pub json: bool,
}

/// Available subcommands for the CLI.
#[derive(Subcommand)]
pub enum Commands {
    /// Word, character, page and reading-time statistics
    Stats(commands::stats::StatsArgs),

    /// Flag long sentences, irregular spacing and passive voice
    Style(commands::style::StyleArgs),

    /// Score how similar two texts are
    Compare(commands::compare::CompareArgs),

    /// Show or replace the stored document
    #[command(subcommand)]
    Document(commands::document::DocumentCommand),

    /// Manage stored references
    #[command(subcommand)]
    Refs(commands::refs::RefsCommand),

    /// Show or replace stored sticky notes
    #[command(subcommand)]
    Notes(commands::notes::NotesCommand),

    /// Show package information
    Info(commands::info::InfoArgs),

    /// Start MCP (Model Context Protocol) server on stdio
    #[cfg(feature = "mcp")]
    Serve(commands::serve::ServeArgs),
}

/// Returns the clap command for documentation generation
pub fn command() -> clap::Command {
    Cli::command()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        command().debug_assert();
    }

    #[test]
    fn explicit_color_choice_decides_styling() {
        assert!(ColorChoice::Always.styles_stdout());
        assert!(!ColorChoice::Never.styles_stdout());
    }

    #[test]
    fn data_dir_is_global() {
        let cli = Cli::try_parse_from(["toshu", "refs", "list", "--data-dir", "/tmp/x"]).unwrap();
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/x")));
    }
}
