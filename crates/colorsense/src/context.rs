//! Runtime context for command execution.
//!
//! The [`RuntimeContext`] holds what a command handler needs: the loaded
//! configuration and the global output flags.

use anyhow::{Context, Result};
use colorsense_config::{Config, load_config};
use colorsense_core::Detector;

use crate::cli::GlobalArgs;

/// Runtime context passed to every command handler.
///
/// Constructed once in `main` after CLI parsing, before command dispatch.
#[derive(Debug)]
pub struct RuntimeContext {
    /// Detector configuration (file and environment, plus `--verbose`).
    pub config: Config,

    /// Whether to produce JSON output.
    pub json: bool,

    /// Quiet mode: suppress stdout.
    pub quiet: bool,
}

impl RuntimeContext {
    /// Build a `RuntimeContext` from parsed global arguments.
    ///
    /// # Errors
    ///
    /// Fails if the config file is missing, has an unsupported extension,
    /// or holds invalid values.
    pub fn from_global_args(global: &GlobalArgs) -> Result<Self> {
        let config = load_config(global.config.as_deref())
            .context("loading configuration")?
            .with_verbose_flag(global.verbose);

        Ok(Self {
            config,
            json: global.json,
            quiet: global.quiet,
        })
    }

    /// A detector over the current process environment.
    pub fn detector(&self) -> Detector {
        Detector::from_process(&self.config)
    }
}
