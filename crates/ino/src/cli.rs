//! Clap derive structures for the `ino` CLI.
//!
//! Defines the command tree, global flags, and shared value enums.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// ino -- remember an Arduino board by its hardware id
#[derive(Debug, Parser)]
#[command(
    name = "ino",
    version,
    about = "Pick an Arduino board once, then build and upload to it wherever it is plugged in",
    long_about = "A thin layer over arduino-cli.\n\n\
        `ino list-devices` lists attached boards and remembers the listing,\n\
        `ino select N` makes board N the active one. `ino build` and\n\
        `ino deploy` then look the active board up again by its hardware id,\n\
        so it is found even after it was replugged into a different port.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "INO_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// arduino-cli executable to run (overrides config)
    #[arg(long, value_name = "PATH", global = true)]
    pub arduino_cli: Option<PathBuf>,

    /// Directory holding boards.json and active.json (overrides config)
    #[arg(long, value_name = "DIR", global = true)]
    pub state_dir: Option<PathBuf>,

    /// Reject board listing rows with missing columns
    #[arg(long, global = true)]
    pub strict: bool,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List attached boards and remember the listing
    #[command(alias = "boards", alias = "ls")]
    ListDevices,

    /// Make a board from the last listing the active one
    Select {
        /// Position shown by `ino list-devices`
        #[arg(value_name = "POSITION")]
        position: usize,
    },

    /// Show the active board as it was when selected
    Active,

    /// Compile a sketch for the active board
    #[command(alias = "compile")]
    Build(SketchArgs),

    /// Compile and upload a sketch to the active board
    #[command(alias = "upload")]
    Deploy(SketchArgs),

    /// Manage ino configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Sketch actions ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct SketchArgs {
    /// Sketch directory or .ino file (defaults to the current directory)
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Board type to use instead of the one reported by arduino-cli
    #[arg(long, value_name = "FQBN")]
    pub fqbn: Option<String>,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,

    /// Print the config file path
    Path,

    /// Write a default config file
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
