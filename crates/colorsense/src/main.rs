//! `colorsense` -- does this terminal support ANSI color?
//!
//! Parses CLI arguments with clap, loads the configuration, and dispatches
//! to command handlers. `check` (the default) exits 0 when color is
//! supported and 1 when it is not, so scripts can branch on the status.

mod cli;
mod commands;
mod context;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use context::RuntimeContext;

/// Color is supported, or a non-check command succeeded.
pub const EXIT_SUCCESS: i32 = 0;
/// `check` decided color is not supported.
pub const EXIT_NO_COLOR: i32 = 1;
/// Configuration or runtime error.
pub const EXIT_ERROR: i32 = 2;

/// Log filter used with `--verbose` when `RUST_LOG` is unset.
const VERBOSE_FILTER: &str =
    "warn,colorsense=debug,colorsense_core=debug,colorsense_sys=debug,colorsense_config=debug";

fn main() {
    let cli = Cli::parse();

    let ctx = match RuntimeContext::from_global_args(&cli.global) {
        Ok(ctx) => ctx,
        Err(e) => exit_with_error(&e, cli.global.json),
    };

    init_logging(ctx.config.verbose);
    tracing::debug!(config = ?ctx.config, "loaded configuration");

    let result = match &cli.command {
        None | Some(Commands::Check) => commands::check::run(&ctx).map(|supported| {
            if supported { EXIT_SUCCESS } else { EXIT_NO_COLOR }
        }),
        Some(Commands::Probe(args)) => commands::probe::run(&ctx, args).map(|()| EXIT_SUCCESS),
        Some(Commands::Explain) => commands::explain::run(&ctx).map(|()| EXIT_SUCCESS),
        Some(Commands::Completion(args)) => {
            commands::completion::run(args).map(|()| EXIT_SUCCESS)
        }
        Some(Commands::Version) => commands::version::run(&ctx).map(|()| EXIT_SUCCESS),
    };

    match result {
        Ok(code) => std::process::exit(code),
        Err(e) => exit_with_error(&e, ctx.json),
    }
}

/// Install the stderr log subscriber.
///
/// `RUST_LOG` wins; otherwise only warnings, or debug output for the
/// colorsense crates when verbose.
fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose { VERBOSE_FILTER } else { "warn" })
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Print an error (as JSON in `--json` mode) and exit with [`EXIT_ERROR`].
fn exit_with_error(e: &anyhow::Error, json: bool) -> ! {
    if json {
        let err_json = serde_json::json!({
            "error": format!("{:#}", e),
        });
        if let Ok(s) = serde_json::to_string_pretty(&err_json) {
            eprintln!("{}", s);
        }
    } else {
        eprintln!("Error: {:#}", e);
    }
    std::process::exit(EXIT_ERROR);
}
