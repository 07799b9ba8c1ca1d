use super::*;
use crate::queries::insert_table_queries;

/// Derives the fact and dimension tables from the staging tables.
///
/// Not repeatable without a [`reset`]. Where primary keys are enforced the
/// dimensions reject the second load; Redshift treats them as
/// informational and takes the duplicates. `songplays` always accepts a
/// second copy of every fact under fresh surrogate ids.
pub async fn insert_tables<W>(warehouse: &W) -> Result<usize, Error>
where
    W: Warehouse + ?Sized,
{
    log::info!("deriving fact and dimension tables");
    execute(warehouse, &insert_table_queries()).await
}
