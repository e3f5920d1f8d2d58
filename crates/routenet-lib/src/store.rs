//! SQLite persistence of a frozen network.
//!
//! Nodes go to `route_node` and edges to `route_segment`. Rows whose id is
//! already present are left as they are.

use std::path::Path;

use rusqlite::{params, Connection, Row};
use tracing::debug;

use crate::error::Result;
use crate::model::{Attributes, EdgeId, NodeId};
use crate::network::RouteNetwork;
use crate::records::{EdgeRecord, NetworkRecords, NodeRecord};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS route_node (
    mrid TEXT PRIMARY KEY,
    x REAL NOT NULL,
    y REAL NOT NULL,
    auto_created INTEGER NOT NULL,
    attributes TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS route_segment (
    mrid TEXT PRIMARY KEY,
    start_node TEXT NOT NULL REFERENCES route_node(mrid),
    end_node TEXT NOT NULL REFERENCES route_node(mrid),
    length REAL NOT NULL,
    geometry TEXT NOT NULL,
    attributes TEXT NOT NULL
);
"#;

/// Rows written by an export.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportSummary {
    pub nodes_inserted: usize,
    pub edges_inserted: usize,
}

/// Write the network to the SQLite database at `db_path`, creating the
/// tables when needed.
pub fn export_network(network: &RouteNetwork, db_path: &Path) -> Result<ExportSummary> {
    let mut connection = Connection::open(db_path)?;
    let summary = export_to_connection(&mut connection, network)?;
    debug!(
        path = %db_path.display(),
        nodes = summary.nodes_inserted,
        edges = summary.edges_inserted,
        "exported route network"
    );
    Ok(summary)
}

/// Write the network through an open connection inside one transaction.
pub fn export_to_connection(
    connection: &mut Connection,
    network: &RouteNetwork,
) -> Result<ExportSummary> {
    connection.execute_batch(SCHEMA)?;
    let tx = connection.transaction()?;
    let mut summary = ExportSummary::default();

    {
        let mut insert_node = tx.prepare(
            "INSERT OR IGNORE INTO route_node (mrid, x, y, auto_created, attributes)
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )?;
        for node in network.nodes() {
            summary.nodes_inserted += insert_node.execute(params![
                node.id.to_string(),
                node.position.x,
                node.position.y,
                node.auto_created,
                serde_json::to_string(&node.attributes)?,
            ])?;
        }

        let mut insert_edge = tx.prepare(
            "INSERT OR IGNORE INTO route_segment
                 (mrid, start_node, end_node, length, geometry, attributes)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )?;
        for edge in network.edges() {
            let coordinates: Vec<[f64; 2]> = edge.geometry.iter().map(|p| [p.x, p.y]).collect();
            summary.edges_inserted += insert_edge.execute(params![
                edge.id.to_string(),
                edge.start.to_string(),
                edge.end.to_string(),
                edge.length,
                serde_json::to_string(&coordinates)?,
                serde_json::to_string(&edge.attributes)?,
            ])?;
        }
    }

    tx.commit()?;
    Ok(summary)
}

/// Read previously exported rows back as a record batch.
///
/// Auto-created nodes come back as ordinary node records, so rebuilding
/// from the result reproduces the same node ids without auto-creation.
pub fn read_records(connection: &Connection) -> Result<NetworkRecords> {
    let mut nodes_stmt =
        connection.prepare("SELECT mrid, x, y, attributes FROM route_node ORDER BY mrid")?;
    let nodes = nodes_stmt
        .query_map([], row_to_node)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    let mut edges_stmt = connection
        .prepare("SELECT mrid, length, geometry, attributes FROM route_segment ORDER BY mrid")?;
    let edges = edges_stmt
        .query_map([], row_to_edge)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(NetworkRecords { nodes, edges })
}

fn row_to_node(row: &Row<'_>) -> rusqlite::Result<NodeRecord> {
    Ok(NodeRecord {
        id: parse_column::<NodeId>(row, 0)?,
        x: row.get(1)?,
        y: row.get(2)?,
        attributes: json_column::<Attributes>(row, 3)?,
    })
}

fn row_to_edge(row: &Row<'_>) -> rusqlite::Result<EdgeRecord> {
    Ok(EdgeRecord {
        id: parse_column::<EdgeId>(row, 0)?,
        coordinates: json_column(row, 2)?,
        length: Some(row.get(1)?),
        attributes: json_column::<Attributes>(row, 3)?,
    })
}

fn parse_column<T>(row: &Row<'_>, index: usize) -> rusqlite::Result<T>
where
    T: std::str::FromStr<Err = uuid::Error>,
{
    let text: String = row.get(index)?;
    text.parse().map_err(|err: uuid::Error| {
        rusqlite::Error::FromSqlConversionFailure(index, rusqlite::types::Type::Text, Box::new(err))
    })
}

fn json_column<T: serde::de::DeserializeOwned>(row: &Row<'_>, index: usize) -> rusqlite::Result<T> {
    let text: String = row.get(index)?;
    serde_json::from_str(&text).map_err(|err| {
        rusqlite::Error::FromSqlConversionFailure(index, rusqlite::types::Type::Text, Box::new(err))
    })
}
