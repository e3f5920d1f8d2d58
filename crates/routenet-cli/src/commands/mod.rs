// Handlers for the CLI subcommands. main.rs parses arguments and builds the
// network; each module here renders one kind of result.

pub mod export;
pub mod query;
pub mod stats;
