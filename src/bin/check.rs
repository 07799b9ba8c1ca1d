//! Warehouse Check
//!
//! Logs row counts per table and fails if any dimension holds duplicate
//! keys or any fact breaks its admission rules.
//!
//! Options: --config <PATH>, --dry-run

use clap::Parser;
use songplay_warehouse::*;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = cli::Inspect::parse();
    log(args.common.persists_logs())?;
    args.run().await?;
    Ok(())
}
