//! Command line surfaces of the three binaries.
//!
//! Each command loads its config first, so a bad config fails before any
//! connection is attempted. `--dry-run` stops right after that and prints
//! the statements instead of executing them.
use crate::check::Check;
use crate::check::Probe;
use crate::pipeline;
use crate::queries::*;
use crate::warehouse;
use crate::*;
use std::path::PathBuf;

/// Options shared by every binary.
#[derive(Debug, Clone, clap::Args)]
pub struct Common {
    /// Warehouse config file
    #[arg(long, short, default_value = DEFAULT_CONFIG)]
    pub config: PathBuf,
    /// Print the statements in order without connecting
    #[arg(long)]
    pub dry_run: bool,
}

impl Common {
    pub fn load(&self) -> Result<Config, Error> {
        log::info!("reading config {}", self.config.display());
        Config::load(&self.config)
    }
    /// Whether the run keeps a debug log under `logs/`. Dry runs don't.
    pub fn persists_logs(&self) -> bool {
        !self.dry_run
    }
}

/// Writes statements to stdout as a runnable script.
pub fn preview(statements: &[Statement]) {
    for statement in statements {
        println!("-- {}", statement);
        println!("{}", statement.sql().trim());
    }
}

/// Drop and recreate every warehouse table.
#[derive(Debug, clap::Parser)]
#[command(name = "create_tables", version)]
pub struct CreateTables {
    #[command(flatten)]
    pub common: Common,
}

impl CreateTables {
    pub fn statements(&self) -> Vec<Statement> {
        pipeline::reset_queries()
    }
    pub async fn execute<W>(&self, warehouse: &W) -> Result<usize, Error>
    where
        W: Warehouse + ?Sized,
    {
        pipeline::reset(warehouse).await
    }
    pub async fn run(self) -> Result<(), Error> {
        let config = self.common.load()?;
        if self.common.dry_run {
            preview(&self.statements());
            return Ok(());
        }
        let client = warehouse::db(&config.db).await?;
        let n = self.execute(&client).await?;
        log::info!("schema ready ({} statements)", n);
        Ok(())
    }
}

/// Load staging tables from S3, then derive the fact and dimension tables.
#[derive(Debug, clap::Parser)]
#[command(name = "etl", version)]
pub struct Etl {
    #[command(flatten)]
    pub common: Common,
    /// Skip the S3 bulk copy and derive from already-staged rows
    #[arg(long, conflicts_with = "skip_insert")]
    pub skip_staging: bool,
    /// Stop after the S3 bulk copy
    #[arg(long)]
    pub skip_insert: bool,
}

impl Etl {
    pub fn statements(&self, config: &Config) -> Vec<Statement> {
        let mut statements = Vec::new();
        if !self.skip_staging {
            statements.extend(copy_table_queries(config));
        }
        if !self.skip_insert {
            statements.extend(insert_table_queries());
        }
        statements
    }
    pub async fn execute<W>(&self, warehouse: &W, config: &Config) -> Result<usize, Error>
    where
        W: Warehouse + ?Sized,
    {
        let mut n = 0;
        if !self.skip_staging {
            n += pipeline::load_staging_tables(warehouse, config).await?;
        }
        if !self.skip_insert {
            n += pipeline::insert_tables(warehouse).await?;
        }
        Ok(n)
    }
    pub async fn run(self) -> Result<(), Error> {
        let config = self.common.load()?;
        if self.common.dry_run {
            preview(&self.statements(&config));
            return Ok(());
        }
        let client = warehouse::db(&config.db).await?;
        let n = self.execute(&client, &config).await?;
        log::info!("warehouse loaded ({} statements)", n);
        Ok(())
    }
}

/// Report row counts and invariant violations without modifying anything.
#[derive(Debug, clap::Parser)]
#[command(name = "check", version)]
pub struct Inspect {
    #[command(flatten)]
    pub common: Common,
}

impl Inspect {
    pub fn statements(&self) -> Vec<Statement> {
        Probe::all().iter().map(Probe::statement).collect()
    }
    pub async fn execute<W>(&self, warehouse: &W) -> Result<usize, Error>
    where
        W: Warehouse,
    {
        let report = warehouse.report().await?;
        report.log();
        match report.violations().len() {
            0 => Ok(report.measurements().len()),
            n => Err(Error::Unhealthy(n)),
        }
    }
    pub async fn run(self) -> Result<(), Error> {
        let config = self.common.load()?;
        if self.common.dry_run {
            preview(&self.statements());
            return Ok(());
        }
        let client = warehouse::db(&config.db).await?;
        self.execute(&client).await?;
        log::info!("warehouse healthy");
        Ok(())
    }
}
