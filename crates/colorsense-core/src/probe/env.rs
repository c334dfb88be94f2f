//! `COLORTERM` / `ANSICON` presence heuristic.

use crate::env::Environment;
use crate::support::Support;

/// Variables whose mere presence signals a color-capable terminal.
pub const COLOR_HINT_VARS: &[&str] = &["COLORTERM", "ANSICON"];

/// Returns `Yes` if any hint variable is set (even to an empty value).
///
/// Never returns `No`: a missing hint says nothing about the terminal.
pub fn from_env(env: &Environment) -> Support {
    if COLOR_HINT_VARS.iter().any(|name| env.contains(name)) {
        Support::Yes
    } else {
        Support::Unknown
    }
}
