use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Caller-defined attributes carried alongside a node or edge. The engine
/// never inspects them.
pub type Attributes = serde_json::Map<String, serde_json::Value>;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Generate a fresh random identifier.
            pub fn new_v4() -> Self {
                Self(Uuid::new_v4())
            }

            /// Underlying UUID value.
            pub fn as_uuid(&self) -> Uuid {
                self.0
            }
        }

        impl From<Uuid> for $name {
            fn from(value: Uuid) -> Self {
                Self(value)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s).map(Self)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }
    };
}

entity_id!(
    /// Identifier of a node (route node) in the network.
    NodeId
);

entity_id!(
    /// Identifier of an edge (route segment) in the network.
    EdgeId
);

/// Planar coordinate in the network's projected reference system.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: &Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

/// Planar length of a polyline.
pub fn polyline_length(points: &[Point]) -> f64 {
    points
        .windows(2)
        .map(|pair| pair[0].distance_to(&pair[1]))
        .sum()
}

/// Graph vertex representing a point location in the network.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    pub id: NodeId,
    pub position: Point,
    /// Edges whose start or end is this node.
    pub edges: Vec<EdgeId>,
    /// `true` when the node was synthesized for an unmatched edge endpoint.
    pub auto_created: bool,
    pub attributes: Attributes,
}

impl Node {
    pub fn degree(&self) -> usize {
        self.edges.len()
    }

    pub fn is_incident_to(&self, edge: EdgeId) -> bool {
        self.edges.contains(&edge)
    }
}

/// Graph connection between two nodes. `start`/`end` record digitizing
/// orientation only; traversal is undirected.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Edge {
    pub id: EdgeId,
    pub start: NodeId,
    pub end: NodeId,
    pub length: f64,
    pub geometry: Vec<Point>,
    pub attributes: Attributes,
}

impl Edge {
    /// Endpoint of this edge that is not `node`. Returns `None` when `node`
    /// is not an endpoint.
    pub fn other_end(&self, node: NodeId) -> Option<NodeId> {
        if node == self.start {
            Some(self.end)
        } else if node == self.end {
            Some(self.start)
        } else {
            None
        }
    }

    pub fn touches(&self, node: NodeId) -> bool {
        self.start == node || self.end == node
    }

    /// Whether the two edges share at least one endpoint.
    pub fn shares_node_with(&self, other: &Edge) -> bool {
        self.touches(other.start) || self.touches(other.end)
    }

    pub fn is_loop(&self) -> bool {
        self.start == self.end
    }
}

/// Node definition handed to the graph builder.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeInput {
    pub id: NodeId,
    pub position: Point,
    pub attributes: Attributes,
}

impl NodeInput {
    pub fn new(id: NodeId, x: f64, y: f64) -> Self {
        Self {
            id,
            position: Point::new(x, y),
            attributes: Attributes::new(),
        }
    }

    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }
}

/// Edge definition handed to the graph builder. Endpoint coordinates are
/// resolved to nodes during the build.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeInput {
    pub id: EdgeId,
    pub start: Point,
    pub end: Point,
    pub length: f64,
    pub geometry: Vec<Point>,
    pub attributes: Attributes,
}

impl EdgeInput {
    /// Straight two-point edge whose length is the distance between its ends.
    pub fn straight(id: EdgeId, start: Point, end: Point) -> Self {
        Self {
            id,
            start,
            end,
            length: start.distance_to(&end),
            geometry: vec![start, end],
            attributes: Attributes::new(),
        }
    }

    pub fn with_length(mut self, length: f64) -> Self {
        self.length = length;
        self
    }

    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }
}
