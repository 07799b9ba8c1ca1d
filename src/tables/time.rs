use super::*;
use crate::*;

/// Dimension of play timestamps broken into calendar fields.
///
/// Filled from [`Songplays`], so it must be derived after the fact table.
#[derive(Debug, Clone, Copy)]
pub struct Time;

impl Schema for Time {
    fn name() -> &'static str {
        TIME
    }
    fn drops() -> &'static str {
        const_format::concatcp!("DROP TABLE IF EXISTS ", TIME, ";")
    }
    fn creates() -> &'static str {
        const_format::concatcp!(
            "CREATE TABLE IF NOT EXISTS ",
            TIME,
            " (
                start_time  TIMESTAMP PRIMARY KEY,
                hour        SMALLINT NOT NULL,
                day         SMALLINT NOT NULL,
                week        SMALLINT NOT NULL,
                month       SMALLINT NOT NULL,
                year        SMALLINT NOT NULL,
                weekday     VARCHAR NOT NULL
            ) DISTSTYLE KEY DISTKEY (start_time) SORTKEY (start_time);"
        )
    }
}

impl Derive for Time {
    fn key() -> &'static str {
        "start_time"
    }
    /// `week` is the ISO week; `weekday` is 0 (Sunday) through 6.
    fn inserts() -> &'static str {
        const_format::concatcp!(
            "INSERT INTO ",
            TIME,
            " (start_time, hour, day, week, month, year, weekday)
            SELECT DISTINCT
                start_time                          AS start_time,
                EXTRACT(hour      FROM start_time)  AS hour,
                EXTRACT(day       FROM start_time)  AS day,
                EXTRACT(week      FROM start_time)  AS week,
                EXTRACT(month     FROM start_time)  AS month,
                EXTRACT(year      FROM start_time)  AS year,
                EXTRACT(dayofweek FROM start_time)  AS weekday
            FROM ",
            SONGPLAYS,
            ";"
        )
    }
}
