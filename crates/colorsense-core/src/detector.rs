//! The decision engine.
//!
//! [`Detector`] owns an environment snapshot, the read-only configuration,
//! and its external collaborators. [`Detector::supports_color`] applies the
//! pre-empt rules and then walks [`Probe::ORDER`], stopping at the first
//! definite answer.

use std::fmt;

use colorsense_config::Config;
use colorsense_sys::{CommandRunner, HostPlatform, Platform, SystemRunner};
use serde::Serialize;
use tracing::debug;

use crate::env::Environment;
use crate::probe::curses::{CapabilityLibrary, LibraryLoader};
use crate::probe::{curses, env, term, tput};
use crate::support::{Probe, Support};
use crate::terminfo::TerminfoLoader;

/// Opt-out variable: any non-empty value disables color.
pub const NO_COLOR: &str = "NO_COLOR";

/// Decides whether the output stream supports ANSI color.
pub struct Detector {
    env: Environment,
    verbose: bool,
    platform: Box<dyn Platform>,
    runner: Box<dyn CommandRunner>,
    loader: Box<dyn LibraryLoader>,
}

impl Detector {
    /// Creates a detector over `env` using the real host, subprocesses and
    /// terminfo database.
    pub fn new(env: Environment, config: &Config) -> Self {
        Self {
            env,
            verbose: config.verbose,
            platform: Box::new(HostPlatform::new(config.stream)),
            runner: Box::new(SystemRunner),
            loader: Box::new(TerminfoLoader::default()),
        }
    }

    /// Creates a detector over a snapshot of the process environment.
    pub fn from_process(config: &Config) -> Self {
        Self::new(Environment::capture(), config)
    }

    /// Replaces the platform probe.
    pub fn with_platform(mut self, platform: impl Platform + 'static) -> Self {
        self.platform = Box::new(platform);
        self
    }

    /// Replaces the command runner used by the `tput` probe.
    pub fn with_runner(mut self, runner: impl CommandRunner + 'static) -> Self {
        self.runner = Box::new(runner);
        self
    }

    /// Replaces the native library loader used by the curses probe.
    pub fn with_loader(mut self, loader: impl LibraryLoader + 'static) -> Self {
        self.loader = Box::new(loader);
        self
    }

    /// The environment snapshot.
    pub fn environment(&self) -> &Environment {
        &self.env
    }

    /// Whether probe failures are reported as warnings.
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Whether the output stream is an interactive terminal.
    pub fn is_interactive(&self) -> bool {
        self.platform.is_tty()
    }

    /// Whether color is explicitly disabled through `NO_COLOR`.
    pub fn is_disabled(&self) -> bool {
        self.env.is_non_empty(NO_COLOR)
    }

    /// Returns `true` if color escape sequences should be emitted.
    ///
    /// Non-interactive output and `NO_COLOR` answer `false` before any probe
    /// runs. Otherwise the first probe with a definite answer decides; if
    /// none has one, the answer is `false`.
    pub fn supports_color(&self) -> bool {
        if !self.is_interactive() {
            debug!("output is not a terminal; color disabled");
            return false;
        }
        if self.is_disabled() {
            debug!("NO_COLOR is set; color disabled");
            return false;
        }

        Probe::ORDER
            .into_iter()
            .find_map(|probe| self.probe(probe).as_bool())
            .unwrap_or(false)
    }

    /// Runs a single probe. The curses probe loads its own library.
    pub fn probe(&self, probe: Probe) -> Support {
        let support = match probe {
            Probe::Term => self.from_term(),
            Probe::Tput => self.from_tput(),
            Probe::Env => self.from_env(),
            Probe::Curses => self.from_curses(None),
        };
        debug!(%probe, %support, "probe finished");
        support
    }

    /// Classifies `TERM`.
    pub fn from_term(&self) -> Support {
        term::from_term(self.env.get("TERM"))
    }

    /// Asks `tput colors` under the snapshot's environment.
    pub fn from_tput(&self) -> Support {
        tput::from_tput(self.runner.as_ref(), &self.env)
    }

    /// Checks for `COLORTERM` or `ANSICON`.
    pub fn from_env(&self) -> Support {
        env::from_env(&self.env)
    }

    /// Queries the native capability library, or `library` if given.
    pub fn from_curses(&self, library: Option<&dyn CapabilityLibrary>) -> Support {
        curses::from_curses(
            self.platform.as_ref(),
            self.loader.as_ref(),
            &self.env,
            self.verbose,
            library,
        )
    }

    /// Runs the pre-empt checks and every probe, without short-circuiting.
    ///
    /// The reported decision always matches [`Detector::supports_color`]
    /// for the same external conditions.
    pub fn explain(&self) -> Report {
        let interactive = self.is_interactive();
        let disabled = self.is_disabled();
        let probes: Vec<ProbeResult> = Probe::ORDER
            .into_iter()
            .map(|probe| ProbeResult {
                probe,
                support: self.probe(probe),
            })
            .collect();

        let decided_by = if interactive && !disabled {
            probes.iter().find(|result| result.support.is_known())
        } else {
            None
        };

        Report {
            interactive,
            disabled,
            color: decided_by.is_some_and(|result| result.support == Support::Yes),
            decided_by: decided_by.map(|result| result.probe),
            probes,
        }
    }
}

impl fmt::Debug for Detector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Detector")
            .field("env", &self.env)
            .field("verbose", &self.verbose)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// One probe's outcome inside a [`Report`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProbeResult {
    pub probe: Probe,
    pub support: Support,
}

/// Everything the detector considered, for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    /// Whether the output stream is a terminal.
    pub interactive: bool,
    /// Whether `NO_COLOR` disabled color.
    pub disabled: bool,
    /// Every probe, in chain order.
    pub probes: Vec<ProbeResult>,
    /// The final decision.
    pub color: bool,
    /// The probe whose answer was used, if any.
    pub decided_by: Option<Probe>,
}
