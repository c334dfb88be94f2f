//! `colorsense version` -- print version and platform.

use anyhow::Result;

use crate::context::RuntimeContext;
use crate::output::{output_json, output_line};

/// Version string, from the workspace version.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Execute the `colorsense version` command.
pub fn run(ctx: &RuntimeContext) -> Result<()> {
    let os = std::env::consts::OS;
    let arch = std::env::consts::ARCH;

    if ctx.json {
        output_json(&serde_json::json!({
            "version": VERSION,
            "os": os,
            "arch": arch,
        }));
    } else {
        output_line(&format!("colorsense version {} {}/{}", VERSION, os, arch));
    }

    Ok(())
}
