//! The seam between pipeline logic and a live warehouse connection.
//!
//! Statements go over the simple query protocol, one per round trip and
//! outside any explicit transaction, so each commits as soon as it
//! completes. A failure leaves earlier statements committed.
#[cfg(test)]
mod memory;
#[cfg(test)]
pub use memory::*;

use crate::config::Db;
use crate::Error;
use std::sync::Arc;
use tokio_postgres::Client;
use tokio_postgres::SimpleQueryMessage;

/// Executes SQL against a warehouse, one statement at a time.
#[async_trait::async_trait]
pub trait Warehouse: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;
    /// Runs one statement to completion and commits it.
    async fn run(&self, sql: &str) -> Result<(), Self::Error>;
    /// Runs one query returning a single integer (e.g. `COUNT(*)`).
    async fn count(&self, sql: &str) -> Result<i64, Self::Error>;
}

/// Failure of a live warehouse query.
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error(transparent)]
    Pg(#[from] tokio_postgres::Error),
    #[error("expected one integer from `{sql}`, got {found}")]
    NoValue { sql: String, found: String },
}

#[async_trait::async_trait]
impl Warehouse for Client {
    type Error = QueryError;
    async fn run(&self, sql: &str) -> Result<(), Self::Error> {
        Ok(self.batch_execute(sql).await?)
    }
    async fn count(&self, sql: &str) -> Result<i64, Self::Error> {
        let messages = self.simple_query(sql).await?;
        let row = messages.iter().find_map(|m| match m {
            SimpleQueryMessage::Row(row) => Some(row),
            _ => None,
        });
        let cell = match row {
            Some(row) => Some(row.try_get(0)?),
            None => None,
        };
        scalar(sql, cell)
    }
}

#[async_trait::async_trait]
impl Warehouse for Arc<Client> {
    type Error = QueryError;
    async fn run(&self, sql: &str) -> Result<(), Self::Error> {
        self.as_ref().run(sql).await
    }
    async fn count(&self, sql: &str) -> Result<i64, Self::Error> {
        self.as_ref().count(sql).await
    }
}

/// Reads the first column of the first row as an integer.
///
/// The simple protocol returns text; `None` is a missing row and
/// `Some(None)` a NULL. Neither counts as zero.
fn scalar(sql: &str, cell: Option<Option<&str>>) -> Result<i64, QueryError> {
    let missing = |found: String| QueryError::NoValue {
        sql: sql.trim().to_string(),
        found,
    };
    match cell {
        None => Err(missing("no row".to_string())),
        Some(None) => Err(missing("NULL".to_string())),
        Some(Some(text)) => text
            .trim()
            .parse::<i64>()
            .map_err(|_| missing(format!("'{}'", text))),
    }
}

/// Establishes a warehouse connection.
///
/// The connection future runs on its own task until the returned client
/// is dropped, which closes it. There is no retry: an unreachable host or
/// bad credentials fail the run.
pub async fn db(config: &Db) -> Result<Arc<Client>, Error> {
    log::info!(
        "connecting to warehouse {}:{}/{}",
        config.db_endpoint,
        config.db_port,
        config.db_name
    );
    let tls = tokio_postgres::tls::NoTls;
    let (client, connection) = config.pg().connect(tls).await.map_err(Error::Connect)?;
    tokio::spawn(async move {
        if let Err(e) = connection.await {
            log::error!("warehouse connection closed: {}", e);
        }
    });
    Ok(Arc::new(client))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_reads_bigint_text() {
        assert_eq!(scalar("SELECT COUNT(*) FROM users;", Some(Some("104"))).unwrap(), 104);
        assert_eq!(scalar("SELECT -3;", Some(Some(" -3 "))).unwrap(), -3);
    }
    #[test]
    fn scalar_rejects_missing_row() {
        let err = scalar("SELECT 1 WHERE false;", None).unwrap_err();
        assert!(matches!(err, QueryError::NoValue { .. }));
        assert!(err.to_string().ends_with("got no row"));
    }
    #[test]
    fn scalar_rejects_null() {
        let err = scalar("SELECT NULL;", Some(None)).unwrap_err();
        assert_eq!(err.to_string(), "expected one integer from `SELECT NULL;`, got NULL");
    }
    #[test]
    fn scalar_rejects_non_integer_text() {
        let err = scalar("SELECT 'x';", Some(Some("x"))).unwrap_err();
        assert!(err.to_string().ends_with("got 'x'"));
        assert!(scalar("SELECT 1.5;", Some(Some("1.5"))).is_err());
    }
    #[test]
    fn live_impls_share_error_type() {
        fn error<W: Warehouse>() -> std::any::TypeId
        where
            W::Error: 'static,
        {
            std::any::TypeId::of::<W::Error>()
        }
        assert_eq!(error::<Client>(), error::<Arc<Client>>());
        assert_eq!(error::<Client>(), std::any::TypeId::of::<QueryError>());
    }
    #[tokio::test]
    async fn unreadable_count_fails_the_check() {
        use crate::check::Check;
        struct Blank;
        #[async_trait::async_trait]
        impl Warehouse for Blank {
            type Error = QueryError;
            async fn run(&self, _: &str) -> Result<(), Self::Error> {
                Ok(())
            }
            async fn count(&self, sql: &str) -> Result<i64, Self::Error> {
                scalar(sql, Some(None))
            }
        }
        let err = Blank.report().await.unwrap_err();
        assert!(matches!(err, Error::Statement { .. }));
    }
}
