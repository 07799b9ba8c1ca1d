use crate::queries::Statement;
use std::path::PathBuf;

/// Boxed error raised by a [`crate::Warehouse`] backend.
pub type Source = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Everything that can stop a run.
///
/// Nothing here is retried or downgraded. The first error ends the run,
/// and whatever was committed before it stays committed.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("cannot read config {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed config {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("database connection failed")]
    Connect(#[source] tokio_postgres::Error),
    #[error("{statement} failed")]
    Statement {
        statement: String,
        #[source]
        source: Source,
    },
    #[error("{0} warehouse invariant(s) violated")]
    Unhealthy(usize),
}

impl Error {
    pub fn statement(statement: &Statement, source: impl Into<Source>) -> Self {
        Self::Statement {
            statement: statement.to_string(),
            source: source.into(),
        }
    }
    /// True for failures before any SQL reached the warehouse.
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Read { .. } | Self::Parse { .. })
    }
}
