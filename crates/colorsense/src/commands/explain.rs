//! `colorsense explain` -- show how the decision was reached.

use anyhow::Result;

use crate::context::RuntimeContext;
use crate::output::{Styler, output_json, output_line, render_report};

/// Execute `colorsense explain`.
pub fn run(ctx: &RuntimeContext) -> Result<()> {
    let report = ctx.detector().explain();

    if ctx.quiet {
        return Ok(());
    }
    if ctx.json {
        output_json(&report);
    } else {
        let styler = Styler::new(report.color);
        output_line(&render_report(&report, ctx.config.stream, styler));
    }

    Ok(())
}
