//! CLI argument parsing types using `clap`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

/// `HfM` command-line interface for driving the project window core headlessly
#[derive(Parser)]
#[command(name = "hfm-cli")]
#[command(author, version, about = "HfM project window command-line interface")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the configuration directory
    #[arg(short, long, global = true, env = "HFM_CONFIG_DIR")]
    pub config: Option<PathBuf>,

    /// Increase output verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Write log lines to this file instead of stderr
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Tracing filter directive, overriding the -v level
    #[arg(long, global = true, env = "HFM_LOG", value_name = "DIRECTIVE")]
    pub log_filter: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Print the outline of a project fixture
    #[command(about = "Print the flattened outline of a project fixture")]
    Outline {
        /// Project fixture (TOML)
        fixture: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "text", value_enum)]
        format: OutputFormat,
    },

    /// Replay a selection script against a project fixture
    #[command(about = "Replay outline events and print every lifecycle call")]
    Replay {
        /// Project fixture (TOML)
        fixture: PathBuf,

        /// Selection script, one command per line; `-` reads stdin
        script: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "text", value_enum)]
        format: OutputFormat,
    },

    /// List the commands of a playground file
    #[command(about = "Split a playground file into commands")]
    Playground {
        /// Playground source file
        file: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "text", value_enum)]
        format: OutputFormat,
    },

    /// Tokenize a Haskell source file
    #[command(about = "Print the highlighting tokens of a source file, line by line")]
    Highlight {
        /// Haskell source file; `-` reads stdin
        file: PathBuf,

        /// Only print these lines (e.g. `3` or `3-7`)
        #[arg(short, long, value_name = "LINES")]
        lines: Option<String>,

        /// Output format
        #[arg(short, long, default_value = "text", value_enum)]
        format: OutputFormat,
    },

    /// Parse compiler output
    #[command(about = "Parse compiler messages and group the issues per file")]
    Diagnostics {
        /// File with compiler output; `-` reads stdin
        file: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "text", value_enum)]
        format: OutputFormat,
    },

    /// Manage preferences
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    #[command(about = "Generate shell completion scripts")]
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Preference subcommands
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the effective preferences
    #[command(about = "Print the effective preferences as TOML")]
    Show,

    /// Print the preferences file location
    #[command(about = "Print the path of the preferences file")]
    Path,

    /// Write default preferences if none exist
    #[command(about = "Create a preferences file with default values")]
    Init,
}

/// Output format for commands that print data
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// JSON
    Json,
}
