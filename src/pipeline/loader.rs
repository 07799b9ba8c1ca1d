use super::*;
use crate::Config;
use crate::queries::copy_table_queries;

/// Bulk-copies the raw logs from S3 into the staging tables.
///
/// Staging tables carry no keys, so running this twice without a
/// [`reset`] in between doubles every staged row.
pub async fn load_staging_tables<W>(warehouse: &W, config: &Config) -> Result<usize, Error>
where
    W: Warehouse + ?Sized,
{
    log::info!("loading staging tables from s3");
    execute(warehouse, &copy_table_queries(config)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::sample;
    use crate::warehouse::Memory;

    #[tokio::test]
    async fn loads_events_then_songs() {
        let memory = Memory::default();
        assert_eq!(load_staging_tables(&memory, &sample()).await.unwrap(), 2);
        let ran = memory.ran();
        assert!(ran[0].starts_with("COPY staging_events FROM 's3://udacity-dend/log_data'"));
        assert!(ran[1].starts_with("COPY staging_songs FROM 's3://udacity-dend/song_data'"));
    }
    #[tokio::test]
    async fn failed_event_copy_skips_songs() {
        let memory = Memory::failing_at(0);
        let err = load_staging_tables(&memory, &sample()).await.unwrap_err();
        assert!(memory.ran().is_empty());
        assert_eq!(err.to_string(), "copy (staging_events) failed");
    }
}
