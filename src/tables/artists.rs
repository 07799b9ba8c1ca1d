use super::*;
use crate::*;

/// Dimension of artists that appear on at least one catalogued song.
#[derive(Debug, Clone, Copy)]
pub struct Artists;

impl Schema for Artists {
    fn name() -> &'static str {
        ARTISTS
    }
    fn drops() -> &'static str {
        const_format::concatcp!("DROP TABLE IF EXISTS ", ARTISTS, ";")
    }
    fn creates() -> &'static str {
        const_format::concatcp!(
            "CREATE TABLE IF NOT EXISTS ",
            ARTISTS,
            " (
                artist_id   VARCHAR PRIMARY KEY,
                name        VARCHAR,
                location    VARCHAR,
                latitude    REAL,
                longitude   REAL
            ) DISTSTYLE ALL SORTKEY (artist_id);"
        )
    }
}

impl Derive for Artists {
    fn key() -> &'static str {
        "artist_id"
    }
    fn inserts() -> &'static str {
        const_format::concatcp!(
            "INSERT INTO ",
            ARTISTS,
            " (artist_id, name, location, latitude, longitude)
            SELECT DISTINCT artist_id, artist_name, artist_location, artist_latitude::REAL, artist_longitude::REAL
            FROM ",
            STAGING_SONGS,
            "
            WHERE   artist_id   IS NOT NULL
                AND song_id     IS NOT NULL;"
        )
    }
}
