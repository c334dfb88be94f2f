//! `colorsense check` -- the color decision.

use anyhow::Result;

use crate::context::RuntimeContext;
use crate::output::{output_json, output_line};

/// Execute `colorsense check`, returning the decision.
pub fn run(ctx: &RuntimeContext) -> Result<bool> {
    let supported = ctx.detector().supports_color();

    if ctx.quiet {
        return Ok(supported);
    }
    if ctx.json {
        output_json(&serde_json::json!({ "color": supported }));
    } else {
        output_line(if supported { "true" } else { "false" });
    }

    Ok(supported)
}
