use std::fmt::Write;

use serde::Serialize;

use crate::error::Result;
use crate::model::{EdgeId, NodeId};
use crate::network::{NetworkStats, RouteNetwork};
use crate::sequence::PathElement;

/// Classifies the query that produced a path summary.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PathOutputKind {
    ShortestPath,
    SubsetPath,
    SortedPath,
    Sequence,
}

impl PathOutputKind {
    /// Human-readable label shown in textual renderings.
    pub fn label(self) -> &'static str {
        match self {
            PathOutputKind::ShortestPath => "Shortest path",
            PathOutputKind::SubsetPath => "Shortest path in subset",
            PathOutputKind::SortedPath => "Sorted path",
            PathOutputKind::Sequence => "Node/edge sequence",
        }
    }
}

/// Structured representation of a query result that higher-level consumers
/// can serialise.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PathSummary {
    pub kind: PathOutputKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<NodeId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<NodeId>,
    pub edges: Vec<EdgeId>,
    pub total_length: f64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub elements: Vec<PathElement>,
}

impl PathSummary {
    /// Summary of a shortest-path query.
    pub fn from_route(
        kind: PathOutputKind,
        network: &RouteNetwork,
        from: NodeId,
        to: NodeId,
        edges: Vec<EdgeId>,
    ) -> Result<Self> {
        let total_length = network.path_length(&edges)?;
        Ok(Self {
            kind,
            from: Some(from),
            to: Some(to),
            edges,
            total_length,
            elements: Vec::new(),
        })
    }

    /// Summary of a sorted edge chain.
    pub fn from_sorted(network: &RouteNetwork, edges: Vec<EdgeId>) -> Result<Self> {
        let total_length = network.path_length(&edges)?;
        Ok(Self {
            kind: PathOutputKind::SortedPath,
            from: None,
            to: None,
            edges,
            total_length,
            elements: Vec::new(),
        })
    }

    /// Summary of an interleaved node/edge sequence.
    pub fn from_sequence(network: &RouteNetwork, elements: Vec<PathElement>) -> Result<Self> {
        let edges: Vec<EdgeId> = elements.iter().filter_map(PathElement::as_edge).collect();
        let total_length = network.path_length(&edges)?;
        Ok(Self {
            kind: PathOutputKind::Sequence,
            from: elements.first().and_then(PathElement::as_node),
            to: elements.last().and_then(PathElement::as_node),
            edges,
            total_length,
            elements,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Plain-text rendering used by the CLI.
    pub fn render_text(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(buffer, "{}:", self.kind.label());
        if let (Some(from), Some(to)) = (self.from, self.to) {
            let _ = writeln!(buffer, "  from: {from}");
            let _ = writeln!(buffer, "  to:   {to}");
        }

        if self.edges.is_empty() {
            let _ = writeln!(buffer, "  (no path)");
            return buffer;
        }

        if self.elements.is_empty() {
            for (index, edge) in self.edges.iter().enumerate() {
                let _ = writeln!(buffer, "  {:>3}. edge {edge}", index + 1);
            }
        } else {
            for element in &self.elements {
                match element {
                    PathElement::Node(id) => {
                        let _ = writeln!(buffer, "  node {id}");
                    }
                    PathElement::Edge(id) => {
                        let _ = writeln!(buffer, "    edge {id}");
                    }
                }
            }
        }

        let _ = writeln!(
            buffer,
            "  edges: {}, total length: {:.3}",
            self.edges.len(),
            self.total_length
        );
        buffer
    }
}

/// Plain-text rendering of network statistics.
pub fn render_stats(stats: &NetworkStats) -> String {
    format!(
        "nodes: {}\nedges: {}\nauto-created nodes: {}\n",
        stats.nodes, stats.edges, stats.auto_created_nodes
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_summary_renders_no_path() {
        let summary = PathSummary {
            kind: PathOutputKind::ShortestPath,
            from: Some(NodeId::from(uuid::Uuid::from_u128(1))),
            to: Some(NodeId::from(uuid::Uuid::from_u128(2))),
            edges: Vec::new(),
            total_length: 0.0,
            elements: Vec::new(),
        };
        let text = summary.render_text();
        assert!(text.starts_with("Shortest path:"));
        assert!(text.contains("(no path)"));
    }

    #[test]
    fn summary_json_omits_empty_sections() {
        let summary = PathSummary {
            kind: PathOutputKind::SortedPath,
            from: None,
            to: None,
            edges: vec![EdgeId::from(uuid::Uuid::from_u128(3))],
            total_length: 4.5,
            elements: Vec::new(),
        };
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["kind"], "sorted_path");
        assert!(json.get("from").is_none());
        assert!(json.get("elements").is_none());
        assert_eq!(json["edges"][0], "00000000-0000-0000-0000-000000000003");
    }
}
