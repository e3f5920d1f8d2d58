//! Path query command handlers.

use anyhow::{Context, Result};

use routenet_lib::{EdgeId, NodeId, PathOutputKind, PathSummary, RouteNetwork};

use crate::output::{print_summary, OutputFormat};

/// Shortest path over the whole network, or over the subgraph induced by
/// `within` when given.
pub fn handle_shortest_path(
    network: &RouteNetwork,
    format: OutputFormat,
    from: NodeId,
    to: NodeId,
    within: Option<&[NodeId]>,
) -> Result<()> {
    let (kind, edges) = match within {
        Some(subset) => (
            PathOutputKind::SubsetPath,
            network
                .shortest_path_in_subset(from, to, subset)
                .context("shortest path in subset failed")?,
        ),
        None => (
            PathOutputKind::ShortestPath,
            network
                .shortest_path(from, to)
                .context("shortest path failed")?,
        ),
    };

    let summary = PathSummary::from_route(kind, network, from, to, edges)?;
    print_summary(&summary, format)
}

pub fn handle_sort_path(
    network: &RouteNetwork,
    format: OutputFormat,
    edges: &[EdgeId],
) -> Result<()> {
    let sorted = network
        .sort_path(edges)
        .context("could not sort edges into a path")?;
    let summary = PathSummary::from_sorted(network, sorted)?;
    print_summary(&summary, format)
}

pub fn handle_sequence(
    network: &RouteNetwork,
    format: OutputFormat,
    edges: &[EdgeId],
) -> Result<()> {
    let sequence = network
        .build_node_edge_sequence(edges)
        .context("could not build node/edge sequence")?;
    let summary = PathSummary::from_sequence(network, sequence)?;
    print_summary(&summary, format)
}
