use super::*;
use crate::queries::create_table_queries;
use crate::queries::drop_table_queries;

/// Drops every warehouse table that exists.
pub async fn drop_tables<W>(warehouse: &W) -> Result<usize, Error>
where
    W: Warehouse + ?Sized,
{
    execute(warehouse, &drop_table_queries()).await
}

/// Creates every warehouse table that does not exist.
pub async fn create_tables<W>(warehouse: &W) -> Result<usize, Error>
where
    W: Warehouse + ?Sized,
{
    execute(warehouse, &create_table_queries()).await
}

/// Leaves the warehouse with every table present and empty.
///
/// Safe to repeat: drops and creates are both conditional, so a run that
/// died halfway is recovered by simply running this again.
pub async fn reset<W>(warehouse: &W) -> Result<usize, Error>
where
    W: Warehouse + ?Sized,
{
    log::info!("resetting warehouse schema");
    let dropped = drop_tables(warehouse).await?;
    let created = create_tables(warehouse).await?;
    Ok(dropped + created)
}

/// Everything [`reset`] would execute, in order.
pub fn reset_queries() -> Vec<Statement> {
    drop_table_queries()
        .into_iter()
        .chain(create_table_queries())
        .collect()
}
