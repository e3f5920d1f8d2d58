//! Stats command handler.

use anyhow::Result;

use routenet_lib::{render_stats, RouteNetwork};

use crate::output::{print_json, OutputFormat};

/// Report node, edge and auto-created node counts.
pub fn handle_stats(network: &RouteNetwork, format: OutputFormat) -> Result<()> {
    let stats = network.stats();
    match format {
        OutputFormat::Text => print!("{}", render_stats(&stats)),
        OutputFormat::Json => print_json(&stats)?,
    }
    Ok(())
}
