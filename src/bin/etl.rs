//! Staging Loader + Transform/Load Engine
//!
//! Bulk-copies the raw logs from S3 into staging, then derives the fact
//! and dimension tables. Run `create_tables` first.
//!
//! Options: --config <PATH>, --dry-run, --skip-staging, --skip-insert

use clap::Parser;
use songplay_warehouse::*;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = cli::Etl::parse();
    log(args.common.persists_logs())?;
    args.run().await?;
    Ok(())
}
