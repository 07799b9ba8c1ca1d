use super::*;
use crate::config::literal;
use crate::*;

/// Raw song metadata, one row per JSON record.
///
/// Coordinates and duration stay textual here; the dimension inserts cast
/// them.
#[derive(Debug, Clone, Copy)]
pub struct StagingSongs;

impl Schema for StagingSongs {
    fn name() -> &'static str {
        STAGING_SONGS
    }
    fn drops() -> &'static str {
        const_format::concatcp!("DROP TABLE IF EXISTS ", STAGING_SONGS, ";")
    }
    fn creates() -> &'static str {
        const_format::concatcp!(
            "CREATE TABLE IF NOT EXISTS ",
            STAGING_SONGS,
            " (
                num_songs           INT,
                artist_id           VARCHAR,
                artist_latitude     VARCHAR,
                artist_longitude    VARCHAR,
                artist_location     VARCHAR,
                artist_name         VARCHAR,
                song_id             VARCHAR,
                title               VARCHAR,
                duration            VARCHAR,
                year                SMALLINT
            );"
        )
    }
}

impl Stage for StagingSongs {
    /// Song objects are flat, so column mapping is inferred with `'auto'`.
    fn copies(config: &Config) -> String {
        format!(
            "COPY {t} FROM {src}
                credentials {auth}
                region {region}
                format as JSON 'auto';",
            t = STAGING_SONGS,
            src = literal(&config.s3.song_data),
            auth = credentials(config),
            region = literal(&config.s3.region),
        )
    }
}
