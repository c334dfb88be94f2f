//! `colorsense completion <shell>` -- print a completion script.
//!
//! The script covers every subcommand (`check`, `probe`, `explain`,
//! `completion`, `version`) and the global flags; source it from the
//! shell's startup file.

use anyhow::Result;
use clap::CommandFactory;

use crate::cli::{Cli, CompletionArgs};

/// Writes the completion script for `args.shell` to stdout.
pub fn run(args: &CompletionArgs) -> Result<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(args.shell, &mut cmd, name, &mut std::io::stdout());
    Ok(())
}
