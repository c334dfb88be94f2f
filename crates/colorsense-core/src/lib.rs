//! Color-support detection for the colorsense system.
//!
//! A [`Detector`] answers one question: should this process emit ANSI color
//! escape sequences? It applies two pre-empt rules (non-interactive output,
//! `NO_COLOR`) and then consults an ordered chain of probes, each of which
//! returns a tri-state [`Support`]:
//!
//! 1. `TERM` inspection
//! 2. `tput colors`
//! 3. `COLORTERM` / `ANSICON`
//! 4. the terminfo database, read through a curses-style session
//!
//! The first definite answer wins. When no probe knows, color is off.

pub mod detector;
pub mod env;
pub mod error;
pub mod probe;
pub mod support;
pub mod terminfo;

#[cfg(test)]
pub(crate) mod testing;

pub use detector::{Detector, ProbeResult, Report};
pub use env::Environment;
pub use error::{CursesError, LoadError};
pub use probe::curses::{CapabilityLibrary, LibraryLoader, ScreenSession};
pub use support::{ParseProbeError, Probe, Support};
