//! Binary crate for the `weather` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Interactive configuration and location picking
//! - Human-friendly terminal output
//! - Serving the dashboard over HTTP

use clap::Parser;

mod cli;
mod render;
mod web;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cmd = cli::Cli::parse();
    cmd.init_tracing();
    cmd.run().await
}
