use super::*;
use crate::*;

/// Fact table: one row per song play that matched a catalogued song.
///
/// Keyed by a warehouse-generated surrogate, so re-inserting the same
/// staging data duplicates facts instead of failing.
#[derive(Debug, Clone, Copy)]
pub struct Songplays;

impl Schema for Songplays {
    fn name() -> &'static str {
        SONGPLAYS
    }
    fn drops() -> &'static str {
        const_format::concatcp!("DROP TABLE IF EXISTS ", SONGPLAYS, ";")
    }
    fn creates() -> &'static str {
        const_format::concatcp!(
            "CREATE TABLE IF NOT EXISTS ",
            SONGPLAYS,
            " (
                songplay_id     BIGINT IDENTITY(0,1) PRIMARY KEY,
                start_time      TIMESTAMP NOT NULL,
                user_id         INT NOT NULL,
                level           VARCHAR NOT NULL,
                song_id         VARCHAR,
                artist_id       VARCHAR,
                session_id      VARCHAR,
                location        VARCHAR,
                user_agent      VARCHAR
            ) DISTSTYLE KEY DISTKEY (start_time) SORTKEY (start_time);"
        )
    }
}

impl Derive for Songplays {
    fn key() -> &'static str {
        "songplay_id"
    }
    /// Plays are matched to songs on the literal (title, artist name) pair.
    /// Events without a match are left out, not null-joined.
    fn inserts() -> &'static str {
        const_format::concatcp!(
            "INSERT INTO ",
            SONGPLAYS,
            " (start_time, user_id, level, song_id, artist_id, session_id, location, user_agent)
            SELECT DISTINCT
                event.ts            AS start_time,
                event.userId        AS user_id,
                event.level         AS level,
                song.song_id        AS song_id,
                song.artist_id      AS artist_id,
                event.sessionId     AS session_id,
                event.location      AS location,
                event.userAgent     AS user_agent
            FROM ",
            STAGING_EVENTS,
            " AS event
            JOIN ",
            STAGING_SONGS,
            " AS song
                ON  event.song      = song.title
                AND event.artist    = song.artist_name
            WHERE   event.page      = '",
            NEXT_SONG,
            "'
                AND event.ts        IS NOT NULL
                AND event.userId    IS NOT NULL
                AND event.level     IS NOT NULL;"
        )
    }
}
