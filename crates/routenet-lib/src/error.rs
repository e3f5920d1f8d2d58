use thiserror::Error;

use crate::model::{EdgeId, NodeId};

/// Convenient result alias for the route network library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// A node or edge identifier was used twice within one build.
    #[error("non-unique id not allowed: {id}")]
    DuplicateId { id: uuid::Uuid },

    /// An explicit node was registered at a coordinate key that is already taken.
    #[error("node {id} at ({x}, {y}) collides with node {existing} at the same coordinate")]
    DuplicateCoordinate {
        id: NodeId,
        existing: NodeId,
        x: f64,
        y: f64,
    },

    /// An edge endpoint did not match any registered node and auto-creation is disabled.
    #[error("no node found at ({x}, {y}) for the {end} of edge {edge}")]
    EndpointNotFound {
        edge: EdgeId,
        end: EdgeEnd,
        x: f64,
        y: f64,
    },

    /// A query referenced a node that is absent from the network or requested subset.
    #[error("unknown node: {id}")]
    UnknownNode { id: NodeId },

    /// A query referenced an edge that is absent from the network.
    #[error("unknown edge: {id}")]
    UnknownEdge { id: EdgeId },

    /// An edge set does not have exactly two path endpoints.
    #[error("{endpoints} endpoint(s) found in edge set; {}", describe_shape(.endpoints))]
    InvalidPathShape { endpoints: usize, edges: Vec<EdgeId> },

    /// An edge set could not be walked as one connected path.
    #[error("only {sorted} out of {total} edges could be sorted; make sure the edges represent a connected path")]
    Disconnected { sorted: usize, total: usize },

    /// Edge length was negative or not a finite number.
    #[error("edge {edge} has invalid length {length}")]
    InvalidLength { edge: EdgeId, length: f64 },

    /// A coordinate was not a finite number.
    #[error("invalid coordinate ({x}, {y})")]
    InvalidCoordinate { x: f64, y: f64 },

    /// An edge record carried too few geometry points to derive its endpoints.
    #[error("edge {edge} geometry needs at least two points, found {points}")]
    InvalidGeometry { edge: EdgeId, points: usize },

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for JSON decoding errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Wrapper for SQLite errors.
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
}

/// Which end of an edge a coordinate lookup was performed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeEnd {
    Start,
    End,
}

impl std::fmt::Display for EdgeEnd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let value = match self {
            EdgeEnd::Start => "start",
            EdgeEnd::End => "end",
        };
        f.write_str(value)
    }
}

fn describe_shape(endpoints: &usize) -> &'static str {
    match *endpoints {
        0 => "the edges form a closed cycle or have no valid start",
        1 => "a simple path always has two ends",
        _ => "the edges branch instead of forming a single path",
    }
}
