//! The three pipeline stages, each a fixed statement sequence.
//!
//! - [`reset`] — Schema Manager: [`drop_tables`] then [`create_tables`]
//! - [`load_staging_tables`] — Staging Loader
//! - [`insert_tables`] — Transform/Load Engine
//!
//! All of them funnel through [`execute`]: strictly sequential, one commit
//! per statement, and the first error aborts whatever remains.
mod engine;
mod loader;
mod manager;

pub use engine::*;
pub use loader::*;
pub use manager::*;

use crate::Error;
use crate::Statement;
use crate::Warehouse;

/// Runs statements in order, stopping at the first failure.
///
/// Returns how many statements were executed. Statements before a failure
/// stay committed; no compensating rollback is attempted.
pub async fn execute<W>(warehouse: &W, statements: &[Statement]) -> Result<usize, Error>
where
    W: Warehouse + ?Sized,
{
    for statement in statements {
        log::info!("{}", statement);
        log::debug!("{}", statement.sql().trim());
        let start = std::time::Instant::now();
        warehouse
            .run(statement.sql())
            .await
            .map_err(|e| Error::statement(statement, e))?;
        log::info!("{} done in {:.2?}", statement, start.elapsed());
    }
    Ok(statements.len())
}
