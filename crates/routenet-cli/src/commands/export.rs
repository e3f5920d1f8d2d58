//! Export command handler for writing the network to SQLite.

use std::path::Path;

use anyhow::{Context, Result};

use routenet_lib::{export_network, RouteNetwork};

pub fn handle_export(network: &RouteNetwork, output: &Path) -> Result<()> {
    let summary = export_network(network, output)
        .with_context(|| format!("failed to export network to {}", output.display()))?;
    println!(
        "Exported {} nodes and {} segments to {}",
        summary.nodes_inserted,
        summary.edges_inserted,
        output.display()
    );
    Ok(())
}
