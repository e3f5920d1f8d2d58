//! Rendering of command results to stdout.

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;

use routenet_lib::PathSummary;

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Print a path summary in the requested format.
pub fn print_summary(summary: &PathSummary, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print!("{}", summary.render_text()),
        OutputFormat::Json => print_json(summary)?,
    }
    Ok(())
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
