//! Route network topology engine.
//!
//! This crate ingests point (node) and polyline (edge) records with planar
//! coordinates, resolves shared endpoints into one connected graph, and
//! answers shortest-path and path-ordering queries over it. Construction is
//! done once through [`GraphBuilder`]; the resulting [`RouteNetwork`] is
//! immutable and can be queried from any number of threads.
//!

#![deny(warnings)]

pub mod builder;
pub mod error;
pub mod graph;
pub mod identity;
pub mod model;
pub mod network;
pub mod output;
pub mod path;
pub mod records;
pub mod sequence;
pub mod store;

pub use builder::{BuildOptions, GraphBuilder};
pub use error::{EdgeEnd, Error, Result};
pub use identity::{CoordinateIndex, CoordinateKey, DEFAULT_COORDINATE_PRECISION};
pub use model::{Attributes, Edge, EdgeId, EdgeInput, Node, NodeId, NodeInput, Point};
pub use network::{NetworkStats, RouteNetwork};
pub use output::{render_stats, PathOutputKind, PathSummary};
pub use path::find_route_dijkstra;
pub use records::{build_network, load_network, EdgeRecord, NetworkRecords, NodeRecord};
pub use sequence::PathElement;
pub use store::{export_network, export_to_connection, read_records, ExportSummary};
