//! Warehouse configuration.
//!
//! Same three sections and keys as the classic `dwh.cfg`, written as TOML:
//!
//! ```toml
//! [DB]
//! DB_USER     = "dwhuser"
//! DB_PASSWORD = "..."
//! DB_ENDPOINT = "dwhcluster.xxxx.us-west-2.redshift.amazonaws.com"
//! DB_PORT     = 5439
//! DB_NAME     = "dwh"
//!
//! [IAM]
//! IAM_ROLE_ARN = "arn:aws:iam::123456789012:role/dwhRole"
//!
//! [S3]
//! LOG_DATA  = "s3://udacity-dend/log_data"
//! LOG_JSON  = "s3://udacity-dend/log_json_path.json"
//! SONG_DATA = "s3://udacity-dend/song_data"
//! ```
use crate::Error;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    #[serde(rename = "DB")]
    pub db: Db,
    #[serde(rename = "IAM")]
    pub iam: Iam,
    #[serde(rename = "S3")]
    pub s3: S3,
}

/// Connection parameters for the warehouse cluster.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Db {
    pub db_user: String,
    pub db_password: String,
    pub db_endpoint: String,
    pub db_port: u16,
    pub db_name: String,
}

/// Identity the warehouse assumes when reading from S3.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Iam {
    pub iam_role_arn: String,
}

/// Source locations of the raw logs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct S3 {
    /// Event-log JSON objects.
    pub log_data: String,
    /// JSONPaths descriptor mapping event-log fields to columns.
    pub log_json: String,
    /// Song-metadata JSON objects.
    pub song_data: String,
    #[serde(default = "region")]
    pub region: String,
}

fn region() -> String {
    crate::DEFAULT_REGION.to_string()
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text).map_err(|source| Error::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}

impl Db {
    /// Typed connection parameters; nothing is interpolated into a string.
    pub fn pg(&self) -> tokio_postgres::Config {
        let mut config = tokio_postgres::Config::new();
        config
            .user(&self.db_user)
            .password(&self.db_password)
            .host(&self.db_endpoint)
            .port(self.db_port)
            .dbname(&self.db_name);
        config
    }
}

// keeps the password out of logs and error chains
impl std::fmt::Debug for Db {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Db")
            .field("db_user", &self.db_user)
            .field("db_password", &"***")
            .field("db_endpoint", &self.db_endpoint)
            .field("db_port", &self.db_port)
            .field("db_name", &self.db_name)
            .finish()
    }
}

/// Renders a config value as a single-quoted SQL string literal.
///
/// Accepts values that are already wrapped in single quotes, as the
/// classic config file stored them, and never double-wraps them.
pub fn literal(value: &str) -> String {
    format!("'{}'", unquote(value).replace('\'', "''"))
}

/// Strips surrounding whitespace and one pair of enclosing single quotes.
pub fn unquote(value: &str) -> &str {
    let value = value.trim();
    value
        .strip_prefix('\'')
        .and_then(|v| v.strip_suffix('\''))
        .unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        [DB]
        DB_USER     = "dwhuser"
        DB_PASSWORD = "Passw0rd"
        DB_ENDPOINT = "dwhcluster.abc123.us-west-2.redshift.amazonaws.com"
        DB_PORT     = 5439
        DB_NAME     = "dwh"

        [IAM]
        IAM_ROLE_ARN = "arn:aws:iam::123456789012:role/dwhRole"

        [S3]
        LOG_DATA  = "s3://udacity-dend/log_data"
        LOG_JSON  = "'s3://udacity-dend/log_json_path.json'"
        SONG_DATA = "s3://udacity-dend/song_data"
    "#;

    #[test]
    fn parses_all_sections() {
        let config = Config::parse(SAMPLE).unwrap();
        assert_eq!(config.db.db_user, "dwhuser");
        assert_eq!(config.db.db_port, 5439);
        assert_eq!(config.db.db_name, "dwh");
        assert_eq!(config.iam.iam_role_arn, "arn:aws:iam::123456789012:role/dwhRole");
        assert_eq!(config.s3.log_data, "s3://udacity-dend/log_data");
        assert_eq!(config.s3.region, "us-west-2");
    }
    #[test]
    fn region_overrides_default() {
        let text = format!("{}\nREGION = \"eu-central-1\"\n", SAMPLE);
        let config = Config::parse(&text).unwrap();
        assert_eq!(config.s3.region, "eu-central-1");
    }
    #[test]
    fn missing_option_is_rejected() {
        let text = SAMPLE.replace("IAM_ROLE_ARN", "ROLE");
        assert!(Config::parse(&text).is_err());
    }
    #[test]
    fn non_numeric_port_is_rejected() {
        let text = SAMPLE.replace("5439", "\"redshift\"");
        assert!(Config::parse(&text).is_err());
    }
    #[test]
    fn load_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");
        let err = Config::load(&path).unwrap_err();
        assert!(err.is_config());
        assert!(err.to_string().contains("missing.toml"));
    }
    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dwh.toml");
        std::fs::write(&path, SAMPLE).unwrap();
        assert_eq!(Config::load(&path).unwrap(), Config::parse(SAMPLE).unwrap());
    }
    #[test]
    fn malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dwh.toml");
        std::fs::write(&path, "[DB\nDB_USER = ").unwrap();
        assert!(matches!(Config::load(&path), Err(Error::Parse { .. })));
    }
    #[test]
    fn password_is_redacted() {
        let config = Config::parse(SAMPLE).unwrap();
        let debug = format!("{:?}", config);
        assert!(!debug.contains("Passw0rd"));
        assert!(debug.contains("dwhuser"));
    }
    #[test]
    fn pg_config_carries_parameters() {
        let config = Config::parse(SAMPLE).unwrap().db.pg();
        assert_eq!(config.get_user(), Some("dwhuser"));
        assert_eq!(config.get_dbname(), Some("dwh"));
        assert_eq!(config.get_ports(), &[5439]);
        assert_eq!(config.get_password(), Some(&b"Passw0rd"[..]));
    }
    #[test]
    fn literal_quotes_once() {
        assert_eq!(literal("s3://bucket/key"), "'s3://bucket/key'");
        assert_eq!(literal("'s3://bucket/key'"), "'s3://bucket/key'");
        assert_eq!(literal("  s3://bucket/key "), "'s3://bucket/key'");
        assert_eq!(literal("it's"), "'it''s'");
    }
}
