//! Warehouse tables and the SQL that defines and fills them.
//!
//! Each table is a marker type implementing [`Schema`]. Staging tables
//! additionally implement [`Stage`] (filled by `COPY` from S3), while fact
//! and dimension tables implement [`Derive`] (filled by one
//! `INSERT … SELECT` over tables that are already loaded).
//!
//! DDL and DML with no runtime inputs are assembled at compile time via
//! [`const_format::concatcp!`]. Only the bulk-copy statements depend on
//! [`Config`], so only they allocate.
mod artists;
mod songplays;
mod songs;
mod staging_events;
mod staging_songs;
mod time;
mod users;

pub use artists::*;
pub use songplays::*;
pub use songs::*;
pub use staging_events::*;
pub use staging_songs::*;
pub use time::*;
pub use users::*;

use crate::Config;

/// Schema metadata for warehouse tables.
///
/// Contains no I/O; it only describes table structure. Execution is the
/// job of [`crate::pipeline`].
pub trait Schema {
    /// Returns the table name in the warehouse.
    fn name() -> &'static str;
    /// Returns `DROP TABLE IF EXISTS` DDL statement.
    fn drops() -> &'static str;
    /// Returns `CREATE TABLE IF NOT EXISTS` DDL statement.
    fn creates() -> &'static str;
}

/// Staging tables bulk-loaded from object storage.
pub trait Stage: Schema {
    /// Returns the `COPY … FROM 's3://…'` statement for this table.
    fn copies(config: &Config) -> String;
}

/// Fact and dimension tables derived from already-loaded tables.
pub trait Derive: Schema {
    /// Column that identifies one row; duplicates here are a defect.
    fn key() -> &'static str;
    /// Returns the `INSERT … SELECT` statement that fills this table.
    fn inserts() -> &'static str;
}

/// `credentials` clause value authorizing the warehouse through an IAM role.
pub(crate) fn credentials(config: &Config) -> String {
    crate::config::literal(&format!(
        "aws_iam_role={}",
        crate::config::unquote(&config.iam.iam_role_arn)
    ))
}

/// Collapses runs of whitespace so SQL can be compared by content.
#[cfg(test)]
pub(crate) fn squash(sql: &str) -> String {
    sql.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
pub(crate) fn sample() -> Config {
    Config::parse(
        r#"
        [DB]
        DB_USER     = "dwhuser"
        DB_PASSWORD = "secret"
        DB_ENDPOINT = "localhost"
        DB_PORT     = 5439
        DB_NAME     = "dwh"
        [IAM]
        IAM_ROLE_ARN = "arn:aws:iam::123456789012:role/dwhRole"
        [S3]
        LOG_DATA  = "s3://udacity-dend/log_data"
        LOG_JSON  = "s3://udacity-dend/log_json_path.json"
        SONG_DATA = "s3://udacity-dend/song_data"
        "#,
    )
    .unwrap()
}
