use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use routenet_lib::{load_network, BuildOptions, EdgeId, NodeId, DEFAULT_COORDINATE_PRECISION};

mod commands;
mod output;

use output::OutputFormat;

#[derive(Parser, Debug)]
#[command(author, version, about = "Route network topology utilities")]
struct Cli {
    /// JSON file with the node and edge records to build the network from.
    #[arg(long, required = true)]
    input: PathBuf,

    /// Output format for query results.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    /// Create nodes for edge endpoints that match no node record.
    #[arg(long, global = true)]
    auto_nodes: bool,

    /// Decimal digits used when matching edge endpoints to nodes.
    #[arg(long, default_value_t = DEFAULT_COORDINATE_PRECISION, global = true)]
    precision: u32,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build the network and report node and edge counts.
    Stats,
    /// Compute the shortest path between two nodes.
    ShortestPath {
        /// Starting node id.
        #[arg(long = "from")]
        from: NodeId,
        /// Destination node id.
        #[arg(long = "to")]
        to: NodeId,
        /// Restrict the search to the subgraph induced by these node ids.
        #[arg(long = "within", num_args = 1..)]
        within: Option<Vec<NodeId>>,
    },
    /// Order an unordered set of edges into a single path.
    SortPath {
        /// Edge ids making up the path (any order).
        #[arg(long = "edge", required = true, num_args = 1..)]
        edges: Vec<EdgeId>,
    },
    /// Emit the interleaved node/edge sequence of a path.
    Sequence {
        /// Edge ids making up the path (any order).
        #[arg(long = "edge", required = true, num_args = 1..)]
        edges: Vec<EdgeId>,
    },
    /// Write the built network to a SQLite database.
    Export {
        /// Target database file.
        #[arg(long)]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let input = cli.input.as_path();
    let options = BuildOptions::default()
        .with_auto_node_creation(cli.auto_nodes)
        .with_coordinate_precision(cli.precision);
    let network = load_network(input, options)
        .with_context(|| format!("failed to build route network from {}", input.display()))?;

    match cli.command {
        Command::Stats => commands::stats::handle_stats(&network, cli.format),
        Command::ShortestPath { from, to, within } => commands::query::handle_shortest_path(
            &network,
            cli.format,
            from,
            to,
            within.as_deref(),
        ),
        Command::SortPath { edges } => {
            commands::query::handle_sort_path(&network, cli.format, &edges)
        }
        Command::Sequence { edges } => {
            commands::query::handle_sequence(&network, cli.format, &edges)
        }
        Command::Export { output } => commands::export::handle_export(&network, &output),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
