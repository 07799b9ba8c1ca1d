//! Schema Manager
//!
//! Drops every warehouse table and recreates it empty.
//!
//! Options: --config <PATH>, --dry-run

use clap::Parser;
use songplay_warehouse::*;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = cli::CreateTables::parse();
    log(args.common.persists_logs())?;
    args.run().await?;
    Ok(())
}
