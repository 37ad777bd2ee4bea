//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

use crate::config::OutputFormat;

/// Run indentation-structured if/else programs over named numeric facts
#[derive(Parser, Debug)]
#[command(name = "factlogic")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug output, repeat for more (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Project directory holding .factlogic.toml (default: cwd)
    #[arg(
        short = 'C',
        long,
        global = true,
        env = "FACTLOGIC_PROJECT_DIR",
        value_hint = ValueHint::DirPath
    )]
    pub project_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a program over a fact file and print the final variables
    Run {
        /// Fact file (`name=number` per line)
        #[arg(value_hint = ValueHint::FilePath)]
        data: PathBuf,
        /// Program file
        #[arg(value_hint = ValueHint::FilePath)]
        logic: PathBuf,
        /// Context value overriding a fact, e.g. --set age=42 (repeatable)
        #[arg(short, long = "set", value_name = "NAME=VALUE")]
        set: Vec<String>,
        /// Output format (default from config)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
        /// Print the parsed program tree first
        #[arg(long)]
        tree: bool,
    },

    /// Show the parsed program as a tree
    Tree {
        /// Program file
        #[arg(value_hint = ValueHint::FilePath)]
        logic: PathBuf,
    },

    /// Check a program for syntax problems without running it
    Check {
        /// Program file
        #[arg(value_hint = ValueHint::FilePath)]
        logic: PathBuf,
    },

    /// Validate a fact file and print it in canonical form
    Facts {
        /// Fact file
        #[arg(value_hint = ValueHint::FilePath)]
        data: PathBuf,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Create config template
    Init {
        /// Create global config
        #[arg(short, long)]
        global: bool,
    },

    /// Show config paths
    Path,
}
