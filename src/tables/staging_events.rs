use super::*;
use crate::config::literal;
use crate::*;

/// Raw play-event log, one row per JSON record.
///
/// No keys and no constraints: a verbatim mirror of the source objects,
/// read by the transform stage and discarded on the next reset.
#[derive(Debug, Clone, Copy)]
pub struct StagingEvents;

impl Schema for StagingEvents {
    fn name() -> &'static str {
        STAGING_EVENTS
    }
    fn drops() -> &'static str {
        const_format::concatcp!("DROP TABLE IF EXISTS ", STAGING_EVENTS, ";")
    }
    fn creates() -> &'static str {
        const_format::concatcp!(
            "CREATE TABLE IF NOT EXISTS ",
            STAGING_EVENTS,
            " (
                artist          VARCHAR,
                auth            VARCHAR,
                firstName       VARCHAR,
                gender          VARCHAR,
                itemInSession   INT,
                lastName        VARCHAR,
                length          VARCHAR,
                level           VARCHAR,
                location        VARCHAR,
                method          VARCHAR,
                page            VARCHAR,
                registration    VARCHAR,
                sessionId       VARCHAR,
                song            VARCHAR,
                status          VARCHAR,
                ts              TIMESTAMP,
                userAgent       VARCHAR,
                userId          INT
            );"
        )
    }
}

impl Stage for StagingEvents {
    /// Event logs need an explicit JSONPaths descriptor, and their `ts`
    /// field arrives as epoch milliseconds.
    fn copies(config: &Config) -> String {
        format!(
            "COPY {t} FROM {src}
                credentials {auth}
                region {region}
                format as JSON {paths}
                timeformat as 'epochmillisecs';",
            t = STAGING_EVENTS,
            src = literal(&config.s3.log_data),
            auth = credentials(config),
            region = literal(&config.s3.region),
            paths = literal(&config.s3.log_json),
        )
    }
}
