//! Coordinate snapping used to decide whether two positions denote the same node.
//!
//! Two coordinates refer to the same node iff their [`CoordinateKey`]s are
//! equal. The key is derived by scaling each axis by `10^precision` and
//! rounding half away from zero, so the rule does not depend on how floats
//! happen to be formatted. The rounded value is kept as an `f64` bit
//! pattern, so large coordinates at high precision never saturate.

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::model::{NodeId, Point};

/// Default number of decimal digits kept when snapping coordinates.
pub const DEFAULT_COORDINATE_PRECISION: u32 = 6;

/// Precisions beyond this carry no information for an `f64`.
pub const MAX_COORDINATE_PRECISION: u32 = 15;

/// Discrete identity of a snapped coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CoordinateKey {
    x: u64,
    y: u64,
}

impl CoordinateKey {
    /// Snap `(x, y)` to `precision` decimal digits.
    pub fn new(x: f64, y: f64, precision: u32) -> Result<Self> {
        if !x.is_finite() || !y.is_finite() {
            return Err(Error::InvalidCoordinate { x, y });
        }
        let scale = 10f64.powi(precision.min(MAX_COORDINATE_PRECISION) as i32);
        let (scaled_x, scaled_y) = ((x * scale).round(), (y * scale).round());
        if !scaled_x.is_finite() || !scaled_y.is_finite() {
            return Err(Error::InvalidCoordinate { x, y });
        }
        Ok(Self {
            x: snapped_bits(scaled_x),
            y: snapped_bits(scaled_y),
        })
    }

    pub fn from_point(point: Point, precision: u32) -> Result<Self> {
        Self::new(point.x, point.y, precision)
    }
}

/// Bit pattern of an already rounded value; `-0.0` and `0.0` share one key.
fn snapped_bits(value: f64) -> u64 {
    if value == 0.0 {
        0.0f64.to_bits()
    } else {
        value.to_bits()
    }
}

/// Outcome of resolving a coordinate against the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// A node is already registered at the key.
    Existing(NodeId),
    /// A node was synthesized and registered at the key.
    Created(NodeId),
}

impl Resolution {
    pub fn node(self) -> NodeId {
        match self {
            Resolution::Existing(id) | Resolution::Created(id) => id,
        }
    }
}

/// Maps snapped coordinates to the node registered there. Lives only for the
/// duration of a build.
#[derive(Debug, Clone)]
pub struct CoordinateIndex {
    precision: u32,
    allow_auto_creation: bool,
    nodes: HashMap<CoordinateKey, NodeId>,
}

impl CoordinateIndex {
    pub fn new(precision: u32, allow_auto_creation: bool) -> Self {
        Self {
            precision,
            allow_auto_creation,
            nodes: HashMap::new(),
        }
    }

    pub fn precision(&self) -> u32 {
        self.precision
    }

    pub fn allows_auto_creation(&self) -> bool {
        self.allow_auto_creation
    }

    pub fn key(&self, point: Point) -> Result<CoordinateKey> {
        CoordinateKey::from_point(point, self.precision)
    }

    /// Node registered at the snapped position of `point`, if any.
    pub fn lookup(&self, point: Point) -> Result<Option<NodeId>> {
        let key = self.key(point)?;
        Ok(self.nodes.get(&key).copied())
    }

    /// Register an explicit node at `point`.
    pub fn register(&mut self, node: NodeId, point: Point) -> Result<()> {
        let key = self.key(point)?;
        if let Some(&existing) = self.nodes.get(&key) {
            return Err(Error::DuplicateCoordinate {
                id: node,
                existing,
                x: point.x,
                y: point.y,
            });
        }
        self.nodes.insert(key, node);
        Ok(())
    }

    /// Return the node at `point`, synthesizing one when auto-creation is
    /// enabled. Yields `Ok(None)` when nothing matches and auto-creation is
    /// disabled; the caller decides how to report the missing endpoint.
    pub fn resolve(&mut self, point: Point) -> Result<Option<Resolution>> {
        let key = self.key(point)?;
        if let Some(&existing) = self.nodes.get(&key) {
            return Ok(Some(Resolution::Existing(existing)));
        }
        if !self.allow_auto_creation {
            return Ok(None);
        }
        let created = NodeId::new_v4();
        self.nodes.insert(key, created);
        Ok(Some(Resolution::Created(created)))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl Default for CoordinateIndex {
    fn default() -> Self {
        Self::new(DEFAULT_COORDINATE_PRECISION, false)
    }
}
