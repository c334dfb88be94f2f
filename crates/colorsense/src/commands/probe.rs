//! `colorsense probe` -- run one probe in isolation.

use anyhow::Result;

use crate::cli::ProbeArgs;
use crate::context::RuntimeContext;
use crate::output::{output_json, output_line, support_word};

/// Execute `colorsense probe <name>`.
///
/// Probes ignore the pre-empt rules, so this works even when output is
/// piped.
pub fn run(ctx: &RuntimeContext, args: &ProbeArgs) -> Result<()> {
    let probe = args.probe;
    let support = ctx.detector().probe(probe);

    if ctx.quiet {
        return Ok(());
    }
    if ctx.json {
        output_json(&serde_json::json!({
            "probe": probe,
            "result": support.as_bool(),
        }));
    } else {
        output_line(support_word(support));
    }

    Ok(())
}
