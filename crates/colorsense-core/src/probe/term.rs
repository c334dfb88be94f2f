//! `TERM` string inspection.

use crate::support::Support;

/// Terminal families known to support color.
///
/// Matched as substrings of `TERM`, so suffixed forms such as
/// `xterm-256color` or `tmux-256color` qualify.
pub const COLOR_TERMINALS: &[&str] = &[
    "xterm",
    "screen",
    "vt100",
    "vt220",
    "rxvt",
    "color",
    "linux",
    "cygwin",
    "konsole",
    "bvterm",
    "dtterm",
    "eterm-color",
    "gnome",
    "ansi",
    "tmux",
];

/// Classifies a `TERM` value.
///
/// `dumb` is a definite no; a known color family is a definite yes; anything
/// else (including an absent or empty value) is unknown. Case-sensitive.
pub fn from_term(term: Option<&str>) -> Support {
    let term = term.unwrap_or_default();
    if term == "dumb" {
        return Support::No;
    }
    if COLOR_TERMINALS.iter().any(|family| term.contains(family)) {
        return Support::Yes;
    }
    Support::Unknown
}
