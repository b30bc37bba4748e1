//! TibiaDex CLI: extract character records from captured tibia.com pages.
//!
//! Reads saved character pages from disk and prints each extracted record
//! as JSON.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
