use super::*;
use crate::*;

/// Dimension of catalogued songs.
///
/// Duration is kept twice: as the source text, and cast to `REAL`.
#[derive(Debug, Clone, Copy)]
pub struct Songs;

impl Schema for Songs {
    fn name() -> &'static str {
        SONGS
    }
    fn drops() -> &'static str {
        const_format::concatcp!("DROP TABLE IF EXISTS ", SONGS, ";")
    }
    fn creates() -> &'static str {
        const_format::concatcp!(
            "CREATE TABLE IF NOT EXISTS ",
            SONGS,
            " (
                song_id         VARCHAR PRIMARY KEY,
                title           VARCHAR,
                artist_id       VARCHAR,
                year            SMALLINT,
                duration_str    VARCHAR,
                duration_real   REAL
            ) DISTSTYLE ALL SORTKEY (song_id);"
        )
    }
}

impl Derive for Songs {
    fn key() -> &'static str {
        "song_id"
    }
    fn inserts() -> &'static str {
        const_format::concatcp!(
            "INSERT INTO ",
            SONGS,
            " (song_id, title, artist_id, year, duration_str, duration_real)
            SELECT DISTINCT song_id, title, artist_id, year, duration, duration::REAL
            FROM ",
            STAGING_SONGS,
            "
            WHERE song_id IS NOT NULL;"
        )
    }
}
