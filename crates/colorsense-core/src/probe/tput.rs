//! `tput colors` capability query.

use colorsense_sys::{CommandError, CommandRunner};
use tracing::debug;

use crate::env::Environment;
use crate::support::Support;

/// The capability-query tool.
pub const TPUT: &str = "tput";

/// Arguments asking for the terminal's color count.
pub const TPUT_ARGS: &[&str] = &["colors"];

/// Asks `tput` how many colors the terminal has.
///
/// `tput` is looked up on the snapshot's `PATH` and runs with the snapshot
/// as its whole environment, so it answers for the snapshot's `TERM`.
/// Returns `Unknown` without running anything when `tput` is not found.
/// More than two colors is `Yes`, anything else `No`. A vanished binary or
/// any other run failure is `Unknown`.
pub fn from_tput(runner: &dyn CommandRunner, env: &Environment) -> Support {
    let Some(tput) = runner.locate(TPUT, env.get_os("PATH")) else {
        return Support::Unknown;
    };

    let envs: Vec<(&str, &str)> = env.vars().collect();
    match runner.run(&tput, TPUT_ARGS, &envs) {
        Ok(output) => {
            let colors = parse_color_count(&output);
            debug!(colors, "tput reported color count");
            Support::from(colors > 2)
        }
        Err(CommandError::NotFound { .. }) => Support::Unknown,
        Err(err) => {
            debug!(error = %err, "tput colors failed");
            Support::Unknown
        }
    }
}

/// Parses a color count leniently.
///
/// Leading whitespace and an optional sign are accepted, then as many digits
/// as follow; trailing text is ignored. Output with no leading digits is 0.
/// Values too large for `i64` saturate.
pub fn parse_color_count(output: &str) -> i64 {
    let s = output.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let magnitude = digits
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0i64, |acc, b| {
            acc.saturating_mul(10).saturating_add(i64::from(b - b'0'))
        });

    if negative { -magnitude } else { magnitude }
}
