//! Tri-state probe results and probe identifiers.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

/// One probe's opinion about color support.
///
/// `Unknown` means "no information" and is deliberately distinct from `No`,
/// so a missing signal can never be mistaken for evidence against color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Support {
    /// The probe found positive evidence of color support.
    Yes,
    /// The probe found evidence that color is not supported.
    No,
    /// The probe could not tell.
    Unknown,
}

impl Support {
    /// Returns the definite answer, or `None` for `Unknown`.
    pub fn as_bool(self) -> Option<bool> {
        match self {
            Self::Yes => Some(true),
            Self::No => Some(false),
            Self::Unknown => None,
        }
    }

    /// Returns `true` for `Yes` and `No`.
    pub fn is_known(self) -> bool {
        self != Self::Unknown
    }

    /// Returns the lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Yes => "yes",
            Self::No => "no",
            Self::Unknown => "unknown",
        }
    }
}

impl From<bool> for Support {
    fn from(supported: bool) -> Self {
        if supported { Self::Yes } else { Self::No }
    }
}

impl fmt::Display for Support {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Probe identifiers
// ---------------------------------------------------------------------------

/// The detection probes, in chain order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Probe {
    /// `TERM` string inspection.
    Term,
    /// `tput colors`.
    Tput,
    /// `COLORTERM` / `ANSICON` presence.
    Env,
    /// Terminfo database via a curses-style session.
    Curses,
}

impl Probe {
    /// The order in which the decision engine consults probes.
    pub const ORDER: [Probe; 4] = [Probe::Term, Probe::Tput, Probe::Env, Probe::Curses];

    /// Returns the lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Term => "term",
            Self::Tput => "tput",
            Self::Env => "env",
            Self::Curses => "curses",
        }
    }
}

impl fmt::Display for Probe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when parsing an unrecognized probe name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown probe '{0}' (expected term, tput, env or curses)")]
pub struct ParseProbeError(pub String);

impl FromStr for Probe {
    type Err = ParseProbeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Probe::ORDER
            .into_iter()
            .find(|probe| probe.as_str() == s)
            .ok_or_else(|| ParseProbeError(s.to_string()))
    }
}
