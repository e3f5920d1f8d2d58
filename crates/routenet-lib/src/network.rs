//! Frozen route network produced by [`crate::GraphBuilder::finalize`].
//!
//! Nodes and edges live in flat, id-keyed maps. Edges refer to nodes by id
//! and nodes list incident edges by id, so every traversal resolves through
//! the store. The network is read-only; clones share the underlying maps.

use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::OnceCell;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::graph::SearchGraph;
use crate::model::{Edge, EdgeId, Node, NodeId};

/// Immutable node and edge collections of one build.
#[derive(Debug, Clone)]
pub struct RouteNetwork {
    nodes: Arc<HashMap<NodeId, Node>>,
    edges: Arc<HashMap<EdgeId, Edge>>,
    search_graph: OnceCell<Arc<SearchGraph>>,
}

/// Size summary of a network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NetworkStats {
    pub nodes: usize,
    pub edges: usize,
    pub auto_created_nodes: usize,
}

impl RouteNetwork {
    pub(crate) fn from_parts(nodes: HashMap<NodeId, Node>, edges: HashMap<EdgeId, Edge>) -> Self {
        Self {
            nodes: Arc::new(nodes),
            edges: Arc::new(edges),
            search_graph: OnceCell::new(),
        }
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(&id)
    }

    /// Like [`RouteNetwork::node`] but reports a missing id as an error.
    pub fn require_node(&self, id: NodeId) -> Result<&Node> {
        self.node(id).ok_or(Error::UnknownNode { id })
    }

    /// Like [`RouteNetwork::edge`] but reports a missing id as an error.
    pub fn require_edge(&self, id: EdgeId) -> Result<&Edge> {
        self.edge(id).ok_or(Error::UnknownEdge { id })
    }

    pub fn contains_node(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.values()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn stats(&self) -> NetworkStats {
        NetworkStats {
            nodes: self.nodes.len(),
            edges: self.edges.len(),
            auto_created_nodes: self.nodes.values().filter(|n| n.auto_created).count(),
        }
    }

    /// Other edges sharing either endpoint with `id`.
    pub fn neighbour_edges(&self, id: EdgeId) -> Result<Vec<EdgeId>> {
        let edge = self.require_edge(id)?;
        let mut neighbours = Vec::new();
        for node_id in [edge.start, edge.end] {
            let node = self.require_node(node_id)?;
            for &other in &node.edges {
                if other != id && !neighbours.contains(&other) {
                    neighbours.push(other);
                }
            }
            if edge.is_loop() {
                break;
            }
        }
        Ok(neighbours)
    }

    /// Endpoint of edge `edge` opposite to `node`.
    pub fn other_end(&self, edge: EdgeId, node: NodeId) -> Result<NodeId> {
        self.require_edge(edge)?
            .other_end(node)
            .ok_or(Error::UnknownNode { id: node })
    }

    /// Sum of the lengths of the given edges.
    pub fn path_length(&self, edges: &[EdgeId]) -> Result<f64> {
        edges
            .iter()
            .map(|id| self.require_edge(*id).map(|edge| edge.length))
            .sum()
    }

    /// Full-graph search structure, built on first use and shared by later
    /// queries against this network.
    pub(crate) fn search_graph(&self) -> &SearchGraph {
        self.search_graph.get_or_init(|| {
            tracing::debug!(
                nodes = self.nodes.len(),
                edges = self.edges.len(),
                "building full search graph"
            );
            Arc::new(SearchGraph::full(self))
        })
    }
}
