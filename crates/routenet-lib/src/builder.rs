//! Construction-time graph builder.
//!
//! Explicit nodes must be added before the edges that should attach to them
//! by coordinate; the identity index only resolves against what has been
//! registered so far. A failed call leaves the builder unchanged.

use std::collections::{HashMap, HashSet};

use tracing::{debug, trace};
use uuid::Uuid;

use crate::error::{EdgeEnd, Error, Result};
use crate::identity::{
    CoordinateIndex, Resolution, DEFAULT_COORDINATE_PRECISION, MAX_COORDINATE_PRECISION,
};
use crate::model::{Attributes, Edge, EdgeId, EdgeInput, Node, NodeId, NodeInput, Point};
use crate::network::RouteNetwork;

/// Options controlling how edge endpoints are matched to nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildOptions {
    /// Synthesize a node when an edge endpoint matches no registered node.
    pub allow_auto_node_creation: bool,
    /// Decimal digits kept when snapping coordinates to node identities.
    pub coordinate_precision: u32,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            allow_auto_node_creation: false,
            coordinate_precision: DEFAULT_COORDINATE_PRECISION,
        }
    }
}

impl BuildOptions {
    pub fn with_auto_node_creation(mut self, allow: bool) -> Self {
        self.allow_auto_node_creation = allow;
        self
    }

    pub fn with_coordinate_precision(mut self, precision: u32) -> Self {
        self.coordinate_precision = precision.min(MAX_COORDINATE_PRECISION);
        self
    }
}

/// Mutable builder that ingests node and edge definitions and produces a
/// frozen [`RouteNetwork`].
#[derive(Debug)]
pub struct GraphBuilder {
    options: BuildOptions,
    index: CoordinateIndex,
    used_ids: HashSet<Uuid>,
    nodes: HashMap<NodeId, Node>,
    edges: HashMap<EdgeId, Edge>,
}

impl GraphBuilder {
    pub fn new(options: BuildOptions) -> Self {
        let precision = options.coordinate_precision.min(MAX_COORDINATE_PRECISION);
        Self {
            options,
            index: CoordinateIndex::new(precision, options.allow_auto_node_creation),
            used_ids: HashSet::new(),
            nodes: HashMap::new(),
            edges: HashMap::new(),
        }
    }

    pub fn options(&self) -> BuildOptions {
        self.options
    }

    /// Register an explicit node at its coordinate.
    pub fn add_node(&mut self, input: NodeInput) -> Result<()> {
        let NodeInput {
            id,
            position,
            attributes,
        } = input;

        self.ensure_unused(id.as_uuid())?;
        self.index.register(id, position)?;
        self.used_ids.insert(id.as_uuid());

        trace!(node = %id, x = position.x, y = position.y, "registered node");
        self.nodes.insert(
            id,
            Node {
                id,
                position,
                edges: Vec::new(),
                auto_created: false,
                attributes,
            },
        );
        Ok(())
    }

    /// Add an edge and wire both of its endpoints to nodes.
    pub fn add_edge(&mut self, input: EdgeInput) -> Result<()> {
        let EdgeInput {
            id,
            start,
            end,
            length,
            geometry,
            attributes,
        } = input;

        self.ensure_unused(id.as_uuid())?;
        if !length.is_finite() || length < 0.0 {
            return Err(Error::InvalidLength { edge: id, length });
        }

        // Both ends must resolve before anything is inserted.
        for (point, which) in [(start, EdgeEnd::Start), (end, EdgeEnd::End)] {
            if self.index.lookup(point)?.is_none() && !self.options.allow_auto_node_creation {
                return Err(Error::EndpointNotFound {
                    edge: id,
                    end: which,
                    x: point.x,
                    y: point.y,
                });
            }
        }

        let start_node = self.resolve_endpoint(id, start, EdgeEnd::Start)?;
        let end_node = self.resolve_endpoint(id, end, EdgeEnd::End)?;
        self.used_ids.insert(id.as_uuid());

        self.attach(start_node, id);
        if end_node != start_node {
            self.attach(end_node, id);
        }

        trace!(edge = %id, start = %start_node, end = %end_node, length, "wired edge");
        self.edges.insert(
            id,
            Edge {
                id,
                start: start_node,
                end: end_node,
                length,
                geometry,
                attributes,
            },
        );
        Ok(())
    }

    /// Freeze the collected nodes and edges. The builder and its coordinate
    /// index are consumed.
    pub fn finalize(self) -> RouteNetwork {
        let auto_created = self.nodes.values().filter(|n| n.auto_created).count();
        debug!(
            nodes = self.nodes.len(),
            edges = self.edges.len(),
            auto_created,
            precision = self.index.precision(),
            "finalized route network"
        );
        RouteNetwork::from_parts(self.nodes, self.edges)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    fn ensure_unused(&self, id: Uuid) -> Result<()> {
        if self.used_ids.contains(&id) {
            return Err(Error::DuplicateId { id });
        }
        Ok(())
    }

    fn resolve_endpoint(&mut self, edge: EdgeId, point: Point, which: EdgeEnd) -> Result<NodeId> {
        match self.index.resolve(point)? {
            Some(Resolution::Existing(node)) => Ok(node),
            Some(Resolution::Created(node)) => {
                trace!(node = %node, edge = %edge, end = %which, "auto-created endpoint node");
                self.used_ids.insert(node.as_uuid());
                self.nodes.insert(
                    node,
                    Node {
                        id: node,
                        position: point,
                        edges: Vec::new(),
                        auto_created: true,
                        attributes: Attributes::new(),
                    },
                );
                Ok(node)
            }
            None => Err(Error::EndpointNotFound {
                edge,
                end: which,
                x: point.x,
                y: point.y,
            }),
        }
    }

    fn attach(&mut self, node: NodeId, edge: EdgeId) {
        if let Some(node) = self.nodes.get_mut(&node) {
            node.edges.push(edge);
        }
    }
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new(BuildOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node_input(n: u128, x: f64, y: f64) -> NodeInput {
        NodeInput::new(NodeId::from(Uuid::from_u128(n)), x, y)
    }

    fn edge_input(n: u128, from: (f64, f64), to: (f64, f64)) -> EdgeInput {
        EdgeInput::straight(
            EdgeId::from(Uuid::from_u128(n)),
            Point::new(from.0, from.1),
            Point::new(to.0, to.1),
        )
    }

    #[test]
    fn precision_is_clamped() {
        let options = BuildOptions::default().with_coordinate_precision(40);
        assert_eq!(options.coordinate_precision, MAX_COORDINATE_PRECISION);
    }

    #[test]
    fn edge_and_node_share_id_space() {
        let mut builder = GraphBuilder::default();
        builder.add_node(node_input(1, 0.0, 0.0)).unwrap();
        builder.add_node(node_input(2, 1.0, 0.0)).unwrap();

        let err = builder
            .add_edge(edge_input(1, (0.0, 0.0), (1.0, 0.0)))
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateId { .. }));
        assert_eq!(builder.edge_count(), 0);
    }

    #[test]
    fn missing_end_leaves_builder_untouched() {
        let mut builder = GraphBuilder::default();
        builder.add_node(node_input(1, 0.0, 0.0)).unwrap();

        let err = builder
            .add_edge(edge_input(10, (0.0, 0.0), (5.0, 0.0)))
            .unwrap_err();
        assert!(matches!(
            err,
            Error::EndpointNotFound {
                end: EdgeEnd::End,
                ..
            }
        ));

        let network = builder.finalize();
        assert_eq!(network.edge_count(), 0);
        let start = network.node(NodeId::from(Uuid::from_u128(1))).unwrap();
        assert!(start.edges.is_empty());
    }

    #[test]
    fn failed_edge_id_can_be_reused() {
        let mut builder = GraphBuilder::default();
        builder.add_node(node_input(1, 0.0, 0.0)).unwrap();
        builder.add_node(node_input(2, 1.0, 0.0)).unwrap();

        assert!(builder
            .add_edge(edge_input(10, (0.0, 0.0), (9.0, 9.0)))
            .is_err());
        builder
            .add_edge(edge_input(10, (0.0, 0.0), (1.0, 0.0)))
            .expect("id was not consumed by the failed call");
    }

    #[test]
    fn negative_length_is_rejected() {
        let mut builder = GraphBuilder::new(BuildOptions::default().with_auto_node_creation(true));
        let err = builder
            .add_edge(edge_input(10, (0.0, 0.0), (1.0, 0.0)).with_length(-1.0))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidLength { .. }));
        assert_eq!(builder.node_count(), 0);
    }

    #[test]
    fn loop_edge_is_listed_once() {
        let mut builder = GraphBuilder::default();
        builder.add_node(node_input(1, 0.0, 0.0)).unwrap();
        builder
            .add_edge(edge_input(10, (0.0, 0.0), (0.0, 0.0)).with_length(3.0))
            .unwrap();

        let network = builder.finalize();
        let node = network.node(NodeId::from(Uuid::from_u128(1))).unwrap();
        assert_eq!(node.edges.len(), 1);
    }
}
