use std::collections::{HashMap, HashSet};

use crate::model::{EdgeId, NodeId};
use crate::network::RouteNetwork;

/// Traversal step from one node to a neighbour across an edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    pub edge: EdgeId,
    pub target: NodeId,
    pub length: f64,
}

/// Undirected adjacency structure used by the path finder.
#[derive(Debug, Clone, Default)]
pub struct SearchGraph {
    adjacency: HashMap<NodeId, Vec<Link>>,
}

impl SearchGraph {
    /// Adjacency over every node and edge of the network.
    pub fn full(network: &RouteNetwork) -> Self {
        let mut adjacency: HashMap<NodeId, Vec<Link>> = network
            .nodes()
            .map(|node| (node.id, Vec::with_capacity(node.degree())))
            .collect();

        for edge in network.edges() {
            adjacency.entry(edge.start).or_default().push(Link {
                edge: edge.id,
                target: edge.end,
                length: edge.length,
            });
            if !edge.is_loop() {
                adjacency.entry(edge.end).or_default().push(Link {
                    edge: edge.id,
                    target: edge.start,
                    length: edge.length,
                });
            }
        }

        Self { adjacency }
    }

    /// Induced subgraph on `subset`: an edge participates only when both of
    /// its endpoints are members. Ids absent from the network are ignored.
    pub fn induced(network: &RouteNetwork, subset: &HashSet<NodeId>) -> Self {
        let mut adjacency: HashMap<NodeId, Vec<Link>> = HashMap::with_capacity(subset.len());

        for &node_id in subset {
            let Some(node) = network.node(node_id) else {
                continue;
            };
            let links = node
                .edges
                .iter()
                .filter_map(|edge_id| network.edge(*edge_id))
                .filter(|edge| subset.contains(&edge.start) && subset.contains(&edge.end))
                .filter_map(|edge| {
                    edge.other_end(node_id).map(|target| Link {
                        edge: edge.id,
                        target,
                        length: edge.length,
                    })
                })
                .collect();
            adjacency.insert(node_id, links);
        }

        Self { adjacency }
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.adjacency.contains_key(&node)
    }

    /// Return the links leaving a given node.
    pub fn neighbours(&self, node: NodeId) -> &[Link] {
        self.adjacency
            .get(&node)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }
}
