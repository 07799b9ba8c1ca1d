//! Ordered statement lists for each pipeline stage.
//!
//! Order is part of the contract. Staging tables come first, then the
//! fact table, then each dimension; `time` is always last because it is
//! derived from `songplays`.
use crate::Config;
use crate::tables::*;
use std::borrow::Cow;
use std::fmt::Display;
use std::fmt::Formatter;

/// What a statement does to its table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Drop,
    Create,
    Copy,
    Insert,
    Check,
}

impl Display for Verb {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Drop => write!(f, "drop"),
            Self::Create => write!(f, "create"),
            Self::Copy => write!(f, "copy"),
            Self::Insert => write!(f, "insert"),
            Self::Check => write!(f, "check"),
        }
    }
}

/// One SQL statement, tagged with the table it targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    verb: Verb,
    table: &'static str,
    sql: Cow<'static, str>,
}

impl Statement {
    pub fn new(verb: Verb, table: &'static str, sql: impl Into<Cow<'static, str>>) -> Self {
        Self {
            verb,
            table,
            sql: sql.into(),
        }
    }
    pub fn drop<T: Schema>() -> Self {
        Self::new(Verb::Drop, T::name(), T::drops())
    }
    pub fn create<T: Schema>() -> Self {
        Self::new(Verb::Create, T::name(), T::creates())
    }
    pub fn copy<T: Stage>(config: &Config) -> Self {
        Self::new(Verb::Copy, T::name(), T::copies(config))
    }
    pub fn insert<T: Derive>() -> Self {
        Self::new(Verb::Insert, T::name(), T::inserts())
    }
    pub fn verb(&self) -> Verb {
        self.verb
    }
    pub fn table(&self) -> &'static str {
        self.table
    }
    pub fn sql(&self) -> &str {
        &self.sql
    }
}

impl Display for Statement {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.verb, self.table)
    }
}

pub fn drop_table_queries() -> Vec<Statement> {
    vec![
        Statement::drop::<StagingEvents>(),
        Statement::drop::<StagingSongs>(),
        Statement::drop::<Songplays>(),
        Statement::drop::<Users>(),
        Statement::drop::<Songs>(),
        Statement::drop::<Artists>(),
        Statement::drop::<Time>(),
    ]
}

pub fn create_table_queries() -> Vec<Statement> {
    vec![
        Statement::create::<StagingEvents>(),
        Statement::create::<StagingSongs>(),
        Statement::create::<Songplays>(),
        Statement::create::<Users>(),
        Statement::create::<Songs>(),
        Statement::create::<Artists>(),
        Statement::create::<Time>(),
    ]
}

/// Bulk copies carry config-derived locations and credentials, so this is
/// the only list that needs a [`Config`].
pub fn copy_table_queries(config: &Config) -> Vec<Statement> {
    vec![
        Statement::copy::<StagingEvents>(config),
        Statement::copy::<StagingSongs>(config),
    ]
}

pub fn insert_table_queries() -> Vec<Statement> {
    vec![
        Statement::insert::<Songplays>(),
        Statement::insert::<Users>(),
        Statement::insert::<Songs>(),
        Statement::insert::<Artists>(),
        Statement::insert::<Time>(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::*;

    fn tables(statements: &[Statement]) -> Vec<&'static str> {
        statements.iter().map(Statement::table).collect()
    }

    #[test]
    fn drops_and_creates_share_dependency_order() {
        let order = vec![STAGING_EVENTS, STAGING_SONGS, SONGPLAYS, USERS, SONGS, ARTISTS, TIME];
        assert_eq!(tables(&drop_table_queries()), order);
        assert_eq!(tables(&create_table_queries()), order);
    }
    #[test]
    fn drops_are_idempotent() {
        for statement in drop_table_queries() {
            assert_eq!(statement.verb(), Verb::Drop);
            assert!(statement.sql().starts_with("DROP TABLE IF EXISTS "));
        }
    }
    #[test]
    fn creates_are_idempotent() {
        for statement in create_table_queries() {
            assert_eq!(statement.verb(), Verb::Create);
            assert!(statement.sql().starts_with("CREATE TABLE IF NOT EXISTS "));
        }
    }
    #[test]
    fn copies_target_staging_only() {
        let copies = copy_table_queries(&sample());
        assert_eq!(tables(&copies), vec![STAGING_EVENTS, STAGING_SONGS]);
        assert!(copies.iter().all(|s| s.verb() == Verb::Copy));
    }
    #[test]
    fn time_is_inserted_after_songplays() {
        let order = tables(&insert_table_queries());
        assert_eq!(order, vec![SONGPLAYS, USERS, SONGS, ARTISTS, TIME]);
    }
    #[test]
    fn every_statement_is_single() {
        let config = sample();
        let all = drop_table_queries()
            .into_iter()
            .chain(create_table_queries())
            .chain(copy_table_queries(&config))
            .chain(insert_table_queries());
        for statement in all {
            let sql = statement.sql().trim_end();
            assert!(sql.ends_with(';'), "{} unterminated", statement);
            assert_eq!(sql.matches(';').count(), 1, "{} batches", statement);
        }
    }
    #[test]
    fn display_names_verb_and_table() {
        assert_eq!(Statement::drop::<Users>().to_string(), "drop (users)");
        assert_eq!(Statement::insert::<Time>().to_string(), "insert (time)");
    }
}
