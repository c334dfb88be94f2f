//! Clap CLI definitions for the `colorsense` command.

use std::path::PathBuf;
use std::str::FromStr;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use colorsense_core::Probe;

/// colorsense -- does this terminal support ANSI color?
#[derive(Parser, Debug)]
#[command(
    name = "colorsense",
    about = "Detect whether the terminal supports ANSI color",
    long_about = "Detect whether the terminal supports ANSI color. Checks NO_COLOR and \
                  whether output is a terminal, then consults TERM, tput, COLORTERM/ANSICON \
                  and the terminfo database in that order.",
    version,
    propagate_version = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Global flags available to all subcommands.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Config file (.toml, .yaml or .yml).
    #[arg(long, global = true, env = "COLORSENSE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output in JSON format.
    #[arg(long, global = true)]
    pub json: bool,

    /// Report probe failures and enable debug logging.
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Suppress output; rely on the exit status.
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,
}

/// All available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Decide whether to use color (default). Exits 0 if yes, 1 if no.
    Check,

    /// Run a single probe and print true, false or unknown.
    Probe(ProbeArgs),

    /// Show every check and probe result and the final decision.
    Explain,

    /// Generate shell completion scripts.
    Completion(CompletionArgs),

    /// Print version information.
    Version,
}

/// Arguments for `colorsense probe`.
#[derive(Args, Debug)]
pub struct ProbeArgs {
    /// The probe to run: term, tput, env or curses.
    #[arg(value_parser = Probe::from_str)]
    pub probe: Probe,
}

/// Arguments for `colorsense completion`.
#[derive(Args, Debug)]
pub struct CompletionArgs {
    /// Shell to generate the script for.
    #[arg(value_enum)]
    pub shell: Shell,
}
