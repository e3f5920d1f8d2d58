//! Reconstruction of an ordered path from an unordered set of edge ids.
//!
//! An edge counts as a path endpoint once for every one of its nodes at
//! which no other edge of the set is incident. A simple chain of two or
//! more edges therefore has exactly two endpoint entries, a single edge is
//! listed twice, and a closed cycle has none.

use std::collections::HashSet;

use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::model::{Edge, EdgeId, NodeId};
use crate::network::RouteNetwork;

/// Element of an interleaved `node, edge, node, ..., node` walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type", content = "id", rename_all = "snake_case")]
pub enum PathElement {
    Node(NodeId),
    Edge(EdgeId),
}

impl PathElement {
    pub fn as_node(&self) -> Option<NodeId> {
        match self {
            PathElement::Node(id) => Some(*id),
            PathElement::Edge(_) => None,
        }
    }

    pub fn as_edge(&self) -> Option<EdgeId> {
        match self {
            PathElement::Edge(id) => Some(*id),
            PathElement::Node(_) => None,
        }
    }
}

/// Endpoint entry: the edge and the node at which it is a free end.
#[derive(Debug, Clone, Copy)]
struct PathEnd<'a> {
    edge: &'a Edge,
    free_node: NodeId,
}

impl RouteNetwork {
    /// Edges of `edges` that terminate the set, one entry per free end.
    ///
    /// The result is a multiset: a lone edge appears twice because both of
    /// its ends are free.
    pub fn find_path_endpoints(&self, edges: &[EdgeId]) -> Result<Vec<EdgeId>> {
        let members = self.collect_edges(edges)?;
        Ok(self
            .path_ends(&members)
            .into_iter()
            .map(|end| end.edge.id)
            .collect())
    }

    /// Order `edges` into a simple, non-branching, connected path.
    ///
    /// The walk begins at the endpoint edge whose free end is its own start
    /// node when there is one, otherwise at the endpoint edge with the lower
    /// id, so the result does not depend on the order of the input.
    pub fn sort_path(&self, edges: &[EdgeId]) -> Result<Vec<EdgeId>> {
        let members = self.collect_edges(edges)?;
        if let [only] = members.as_slice() {
            return Ok(vec![only.id]);
        }

        let ends = self.path_ends(&members);
        if ends.len() != 2 {
            return Err(Error::InvalidPathShape {
                endpoints: ends.len(),
                edges: ends.iter().map(|end| end.edge.id).collect(),
            });
        }

        let first = ends
            .iter()
            .min_by_key(|end| (end.free_node != end.edge.start, end.edge.id))
            .map(|end| end.edge)
            .ok_or(Error::InvalidPathShape {
                endpoints: 0,
                edges: Vec::new(),
            })?;

        let mut remaining: Vec<&Edge> = members
            .iter()
            .copied()
            .filter(|edge| edge.id != first.id)
            .collect();
        let mut sorted = vec![first.id];
        let mut current = first;

        while let Some(position) = remaining
            .iter()
            .position(|edge| edge.shares_node_with(current))
        {
            current = remaining.remove(position);
            sorted.push(current.id);
        }

        if sorted.len() != members.len() {
            return Err(Error::Disconnected {
                sorted: sorted.len(),
                total: members.len(),
            });
        }

        debug!(edges = sorted.len(), "sorted edge path");
        Ok(sorted)
    }

    /// Interleaved `node, edge, node, ..., node` sequence of a path.
    ///
    /// With more than one edge the walk starts at the end of the first
    /// sorted edge that is not shared with the second; a single edge is
    /// walked from its start node.
    pub fn build_node_edge_sequence(&self, edges: &[EdgeId]) -> Result<Vec<PathElement>> {
        let sorted = self.sort_path(edges)?;
        let Some(&first_id) = sorted.first() else {
            return Ok(Vec::new());
        };

        let first = self.require_edge(first_id)?;
        let mut current = match sorted.get(1) {
            Some(&second_id) => {
                let second = self.require_edge(second_id)?;
                if second.touches(first.start) {
                    first.end
                } else {
                    first.start
                }
            }
            None => first.start,
        };

        let mut sequence = Vec::with_capacity(sorted.len() * 2 + 1);
        sequence.push(PathElement::Node(current));
        for (walked, &edge_id) in sorted.iter().enumerate() {
            let edge = self.require_edge(edge_id)?;
            let next = edge.other_end(current).ok_or(Error::Disconnected {
                sorted: walked,
                total: sorted.len(),
            })?;
            sequence.push(PathElement::Edge(edge_id));
            sequence.push(PathElement::Node(next));
            current = next;
        }

        Ok(sequence)
    }

    /// Resolve ids to edges, dropping repeated ids while keeping input order.
    fn collect_edges(&self, ids: &[EdgeId]) -> Result<Vec<&Edge>> {
        let mut seen = HashSet::with_capacity(ids.len());
        let mut edges = Vec::with_capacity(ids.len());
        for &id in ids {
            if seen.insert(id) {
                edges.push(self.require_edge(id)?);
            }
        }
        Ok(edges)
    }

    fn path_ends<'a>(&self, members: &[&'a Edge]) -> Vec<PathEnd<'a>> {
        let ids: HashSet<EdgeId> = members.iter().map(|edge| edge.id).collect();
        let mut ends = Vec::new();
        for &edge in members {
            for node_id in [edge.start, edge.end] {
                let shared = self.node(node_id).is_some_and(|node| {
                    node.edges
                        .iter()
                        .any(|other| *other != edge.id && ids.contains(other))
                });
                if !shared {
                    ends.push(PathEnd {
                        edge,
                        free_node: node_id,
                    });
                }
            }
        }
        ends
    }
}
