//! Output formatting helpers for the `colorsense` CLI.
//!
//! JSON output goes through [`output_json`]. Human-readable output is styled
//! with [`Styler`], which only emits escape sequences when the detector has
//! decided color is supported.

use std::io::{self, Write};

use colorsense_config::Stream;
use colorsense_core::{Report, Support};
use owo_colors::OwoColorize;
use serde::Serialize;

/// Print any serializable value as pretty-printed JSON to stdout.
pub fn output_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            // Ignore broken pipe errors (e.g., piped to `head`)
            let _ = writeln!(handle, "{}", json);
        }
        Err(e) => {
            eprintln!("Error: failed to serialize JSON: {}", e);
            std::process::exit(crate::EXIT_ERROR);
        }
    }
}

/// Print a line to stdout, ignoring broken pipes.
pub fn output_line(line: &str) {
    let _ = writeln!(io::stdout().lock(), "{}", line);
}

/// The word printed for a probe result: `true`, `false` or `unknown`.
pub fn support_word(support: Support) -> &'static str {
    match support {
        Support::Yes => "true",
        Support::No => "false",
        Support::Unknown => "unknown",
    }
}

// ---------------------------------------------------------------------------
// Styling
// ---------------------------------------------------------------------------

/// Applies color only when enabled.
#[derive(Debug, Clone, Copy)]
pub struct Styler {
    color: bool,
}

impl Styler {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    /// Green for yes, red for no, dimmed for unknown.
    pub fn support(&self, support: Support) -> String {
        let word = support_word(support);
        if !self.color {
            return word.to_string();
        }
        match support {
            Support::Yes => word.green().to_string(),
            Support::No => word.red().to_string(),
            Support::Unknown => word.dimmed().to_string(),
        }
    }

    /// Bold label.
    pub fn label(&self, s: &str) -> String {
        if self.color {
            s.bold().to_string()
        } else {
            s.to_string()
        }
    }
}

// ---------------------------------------------------------------------------
// Report rendering
// ---------------------------------------------------------------------------

/// Render an explain report as an aligned two-column listing.
///
/// Labels are padded before styling so escape sequences never skew
/// alignment.
pub fn render_report(report: &Report, stream: Stream, styler: Styler) -> String {
    let mut rows: Vec<(String, String)> = vec![
        (
            "stream".to_string(),
            format!(
                "{} ({})",
                stream,
                if report.interactive { "terminal" } else { "not a terminal" }
            ),
        ),
        (
            "NO_COLOR".to_string(),
            if report.disabled { "set" } else { "not set" }.to_string(),
        ),
    ];
    for result in &report.probes {
        rows.push((format!("probe {}", result.probe), styler.support(result.support)));
    }

    let decision = Support::from(report.color);
    let reason = match report.decided_by {
        Some(probe) => format!("decided by {probe}"),
        None if !report.interactive => "output is not a terminal".to_string(),
        None if report.disabled => "disabled by NO_COLOR".to_string(),
        None => "no probe had an answer".to_string(),
    };
    rows.push(("color".to_string(), format!("{} ({reason})", styler.support(decision))));

    let width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    rows.iter()
        .map(|(label, value)| {
            let padded = format!("{label:<width$}");
            format!("{}  {}", styler.label(&padded), value)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
