//! JSON record batches accepted by [`build_network`].
//!
//! Coordinates are expected in a single planar projection already; no
//! reprojection happens here.
//!
//! ```json
//! {
//!   "nodes": [{ "id": "…", "x": 0.0, "y": 0.0, "attributes": { "kind": "HH" } }],
//!   "edges": [{ "id": "…", "coordinates": [[0.0, 0.0], [10.0, 0.0]], "length": 10.0 }]
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::builder::{BuildOptions, GraphBuilder};
use crate::error::{Error, Result};
use crate::model::{polyline_length, Attributes, EdgeId, EdgeInput, NodeId, NodeInput, Point};
use crate::network::RouteNetwork;

/// Point record with caller-defined attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: NodeId,
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Attributes::is_empty")]
    pub attributes: Attributes,
}

/// Polyline record. The first and last coordinates are the edge endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub id: EdgeId,
    pub coordinates: Vec<[f64; 2]>,
    /// Path weight; defaults to the planar length of `coordinates`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<f64>,
    #[serde(default, skip_serializing_if = "Attributes::is_empty")]
    pub attributes: Attributes,
}

/// A batch of node and edge records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkRecords {
    #[serde(default)]
    pub nodes: Vec<NodeRecord>,
    #[serde(default)]
    pub edges: Vec<EdgeRecord>,
}

impl NodeRecord {
    pub fn to_input(&self) -> NodeInput {
        NodeInput::new(self.id, self.x, self.y).with_attributes(self.attributes.clone())
    }
}

impl EdgeRecord {
    pub fn to_input(&self) -> Result<EdgeInput> {
        let geometry: Vec<Point> = self.coordinates.iter().copied().map(Point::from).collect();
        let (start, end) = match geometry.as_slice() {
            [first, .., last] => (*first, *last),
            _ => {
                return Err(Error::InvalidGeometry {
                    edge: self.id,
                    points: geometry.len(),
                })
            }
        };

        let length = self.length.unwrap_or_else(|| polyline_length(&geometry));
        Ok(EdgeInput {
            id: self.id,
            start,
            end,
            length,
            geometry,
            attributes: self.attributes.clone(),
        })
    }
}

impl NetworkRecords {
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let records = Self::from_json_str(&text)?;
        debug!(
            path = %path.display(),
            nodes = records.nodes.len(),
            edges = records.edges.len(),
            "loaded network records"
        );
        Ok(records)
    }
}

/// Build and freeze a network from a record batch.
///
/// All nodes are registered before any edge is added. The first failing
/// record aborts the whole batch.
pub fn build_network(records: &NetworkRecords, options: BuildOptions) -> Result<RouteNetwork> {
    let mut builder = GraphBuilder::new(options);
    for node in &records.nodes {
        builder.add_node(node.to_input())?;
    }
    for edge in &records.edges {
        builder.add_edge(edge.to_input()?)?;
    }

    let network = builder.finalize();
    let stats = network.stats();
    info!(
        nodes = stats.nodes,
        edges = stats.edges,
        auto_created = stats.auto_created_nodes,
        "route network built"
    );
    Ok(network)
}

/// Read a JSON record file and build a network from it.
pub fn load_network(path: &Path, options: BuildOptions) -> Result<RouteNetwork> {
    let records = NetworkRecords::from_path(path)?;
    build_network(&records, options)
}
