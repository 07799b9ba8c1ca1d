use super::*;
use crate::*;

/// Dimension of listeners, keyed by the log's own user id.
#[derive(Debug, Clone, Copy)]
pub struct Users;

impl Schema for Users {
    fn name() -> &'static str {
        USERS
    }
    fn drops() -> &'static str {
        const_format::concatcp!("DROP TABLE IF EXISTS ", USERS, ";")
    }
    fn creates() -> &'static str {
        const_format::concatcp!(
            "CREATE TABLE IF NOT EXISTS ",
            USERS,
            " (
                user_id     INT PRIMARY KEY,
                first_name  VARCHAR,
                last_name   VARCHAR,
                gender      VARCHAR,
                level       VARCHAR NOT NULL
            ) DISTSTYLE ALL SORTKEY (user_id);"
        )
    }
}

impl Derive for Users {
    fn key() -> &'static str {
        "user_id"
    }
    /// Full-row DISTINCT. A user whose level or name changes across events
    /// yields one row per variant; which one the warehouse keeps is up to
    /// its scan order.
    fn inserts() -> &'static str {
        const_format::concatcp!(
            "INSERT INTO ",
            USERS,
            " (user_id, first_name, last_name, gender, level)
            SELECT DISTINCT userId, firstName, lastName, gender, level
            FROM ",
            STAGING_EVENTS,
            "
            WHERE   userId  IS NOT NULL
                AND level   IS NOT NULL;"
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_natural_key() {
        let sql = squash(Users::creates());
        assert!(sql.contains("user_id INT PRIMARY KEY"));
        assert!(sql.contains("level VARCHAR NOT NULL"));
        assert!(sql.ends_with("DISTSTYLE ALL SORTKEY (user_id);"));
    }
    #[test]
    fn inserts_from_events_with_identity() {
        let sql = squash(Users::inserts());
        assert_eq!(
            sql,
            "INSERT INTO users (user_id, first_name, last_name, gender, level) \
             SELECT DISTINCT userId, firstName, lastName, gender, level \
             FROM staging_events \
             WHERE userId IS NOT NULL AND level IS NOT NULL;"
        );
    }
}
