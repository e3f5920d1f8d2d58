use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use tracing::debug;

use crate::error::{Error, Result};
use crate::graph::SearchGraph;
use crate::model::{EdgeId, NodeId};
use crate::network::RouteNetwork;

impl RouteNetwork {
    /// Lowest-total-length path between two nodes over the whole network,
    /// returned as ordered edge ids.
    ///
    /// An empty path is returned when `from == to` or when the nodes are not
    /// connected. Fails with [`Error::UnknownNode`] when either id is absent.
    pub fn shortest_path(&self, from: NodeId, to: NodeId) -> Result<Vec<EdgeId>> {
        self.require_node(from)?;
        self.require_node(to)?;
        if from == to {
            return Ok(Vec::new());
        }

        let path = find_route_dijkstra(self.search_graph(), from, to);
        debug!(%from, %to, edges = path.len(), "shortest path");
        Ok(path)
    }

    /// Shortest path restricted to the subgraph induced by `subset`.
    ///
    /// Only edges whose two endpoints are both in `subset` are traversed. The
    /// origin must be a member of the subset. A destination that exists in
    /// the network but lies outside the subset is unreachable and yields an
    /// empty path.
    pub fn shortest_path_in_subset(
        &self,
        from: NodeId,
        to: NodeId,
        subset: &[NodeId],
    ) -> Result<Vec<EdgeId>> {
        if let Some(&unknown) = subset.iter().find(|id| !self.contains_node(**id)) {
            return Err(Error::UnknownNode { id: unknown });
        }
        self.require_node(to)?;

        let members: HashSet<NodeId> = subset.iter().copied().collect();
        if !members.contains(&from) {
            return Err(Error::UnknownNode { id: from });
        }
        if from == to {
            return Ok(Vec::new());
        }

        let graph = SearchGraph::induced(self, &members);
        let path = find_route_dijkstra(&graph, from, to);
        debug!(%from, %to, subset = members.len(), edges = path.len(), "shortest path in subset");
        Ok(path)
    }
}

/// Run Dijkstra's algorithm over `graph` and return the edges of the
/// lowest-cost path, or an empty vector when `goal` is unreachable.
pub fn find_route_dijkstra(graph: &SearchGraph, start: NodeId, goal: NodeId) -> Vec<EdgeId> {
    if start == goal || !graph.contains(start) {
        return Vec::new();
    }

    let mut distances: HashMap<NodeId, f64> = HashMap::new();
    let mut parents: HashMap<NodeId, (NodeId, EdgeId)> = HashMap::new();
    let mut queue = BinaryHeap::new();

    distances.insert(start, 0.0);
    queue.push(QueueEntry::new(start, 0.0));

    while let Some(entry) = queue.pop() {
        let best = distances.get(&entry.node).copied().unwrap_or(f64::INFINITY);
        if entry.cost.0 > best {
            continue;
        }

        if entry.node == goal {
            return reconstruct_path(&parents, start, goal);
        }

        for link in graph.neighbours(entry.node) {
            let next_cost = entry.cost.0 + link.length;
            if next_cost < *distances.get(&link.target).unwrap_or(&f64::INFINITY) {
                distances.insert(link.target, next_cost);
                parents.insert(link.target, (entry.node, link.edge));
                queue.push(QueueEntry::new(link.target, next_cost));
            }
        }
    }

    Vec::new()
}

fn reconstruct_path(
    parents: &HashMap<NodeId, (NodeId, EdgeId)>,
    start: NodeId,
    goal: NodeId,
) -> Vec<EdgeId> {
    let mut path = Vec::new();
    let mut current = goal;
    while current != start {
        let Some(&(previous, edge)) = parents.get(&current) else {
            break;
        };
        path.push(edge);
        current = previous;
    }
    path.reverse();
    path
}

#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq(&other.0)
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct QueueEntry {
    node: NodeId,
    cost: FloatOrd,
}

impl QueueEntry {
    fn new(node: NodeId, cost: f64) -> Self {
        Self {
            node,
            cost: FloatOrd(cost),
        }
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by cost.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
