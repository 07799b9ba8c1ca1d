//! Read-only invariant report over a loaded warehouse.
use crate::tables::*;
use crate::*;

/// One measurement taken by [`Check::report`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Probe {
    /// Row count of a table.
    Rows(&'static str),
    /// Rows sharing a natural key with another row.
    Duplicates(&'static str, &'static str),
    /// Facts missing a required column.
    Incomplete,
    /// Song-play events that produced no fact, usually for want of an
    /// exact (title, artist) match in staging_songs. Expected to be nonzero.
    Unmatched,
}

impl Probe {
    pub fn all() -> Vec<Self> {
        vec![
            Self::Rows(STAGING_EVENTS),
            Self::Rows(STAGING_SONGS),
            Self::Rows(SONGPLAYS),
            Self::Rows(USERS),
            Self::Rows(SONGS),
            Self::Rows(ARTISTS),
            Self::Rows(TIME),
            Self::duplicates::<Users>(),
            Self::duplicates::<Songs>(),
            Self::duplicates::<Artists>(),
            Self::duplicates::<Time>(),
            Self::Incomplete,
            Self::Unmatched,
        ]
    }
    fn duplicates<T: Derive>() -> Self {
        Self::Duplicates(T::name(), T::key())
    }
    pub fn table(&self) -> &'static str {
        match self {
            Self::Rows(t) | Self::Duplicates(t, _) => *t,
            Self::Incomplete => SONGPLAYS,
            Self::Unmatched => STAGING_EVENTS,
        }
    }
    /// Whether a nonzero measurement means the load is broken.
    pub fn is_invariant(&self) -> bool {
        matches!(self, Self::Duplicates(..) | Self::Incomplete)
    }
    pub fn label(&self) -> &'static str {
        match self {
            Self::Rows(_) => "rows",
            Self::Duplicates(..) => "duplicate keys",
            Self::Incomplete => "incomplete facts",
            Self::Unmatched => "unmatched plays",
        }
    }
    pub fn statement(&self) -> Statement {
        let sql = match self {
            Self::Rows(t) => format!("SELECT COUNT(*) FROM {};", t),
            Self::Duplicates(t, key) => {
                format!("SELECT COUNT(*) - COUNT(DISTINCT {}) FROM {};", key, t)
            }
            Self::Incomplete => format!(
                "SELECT COUNT(*) FROM {} \
                 WHERE start_time IS NULL OR user_id IS NULL OR level IS NULL;",
                SONGPLAYS
            ),
            Self::Unmatched => format!(
                "SELECT COUNT(*) FROM {s} AS event \
                 WHERE event.page = '{p}' \
                 AND event.ts IS NOT NULL \
                 AND event.userId IS NOT NULL \
                 AND event.level IS NOT NULL \
                 AND NOT EXISTS (\
                 SELECT 1 FROM {f} AS play \
                 WHERE play.start_time = event.ts \
                 AND play.user_id = event.userId);",
                s = STAGING_EVENTS,
                f = SONGPLAYS,
                p = NEXT_SONG
            ),
        };
        Statement::new(Verb::Check, self.table(), sql)
    }
}

/// Measurements from one [`Check::report`] run, in probe order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report(Vec<(Probe, i64)>);

impl Report {
    pub fn measurements(&self) -> &[(Probe, i64)] {
        &self.0
    }
    pub fn get(&self, probe: Probe) -> Option<i64> {
        self.0.iter().find(|(p, _)| *p == probe).map(|(_, n)| *n)
    }
    /// Invariant probes that measured anything but zero.
    pub fn violations(&self) -> Vec<(Probe, i64)> {
        self.0
            .iter()
            .copied()
            .filter(|(p, n)| p.is_invariant() && *n != 0)
            .collect()
    }
    pub fn is_healthy(&self) -> bool {
        self.violations().is_empty()
    }
    pub fn log(&self) {
        fn commas(n: i64) -> String {
            let digits = n.unsigned_abs().to_string();
            let grouped = digits
                .as_bytes()
                .rchunks(3)
                .rev()
                .map(|c| String::from_utf8_lossy(c).into_owned())
                .collect::<Vec<_>>()
                .join(",");
            if n < 0 { format!("-{}", grouped) } else { grouped }
        }
        log::info!("┌────────────────┬──────────────────┬───────────────┐");
        log::info!("│ Table          │ Measure          │         Value │");
        log::info!("├────────────────┼──────────────────┼───────────────┤");
        for (probe, n) in self.0.iter() {
            let mark = if probe.is_invariant() && *n != 0 { "✗" } else { " " };
            log::info!(
                "│ {:<14} │ {:<16} │ {:>12}{}│",
                probe.table(),
                probe.label(),
                commas(*n),
                mark
            );
        }
        log::info!("└────────────────┴──────────────────┴───────────────┘");
    }
}

/// Check measures a loaded warehouse without modifying it.
#[async_trait::async_trait]
pub trait Check: Warehouse {
    async fn measure(&self, probe: Probe) -> Result<i64, Error> {
        let statement = probe.statement();
        log::debug!("{}", statement.sql());
        self.count(statement.sql())
            .await
            .map_err(|e| Error::statement(&statement, e))
    }
    async fn report(&self) -> Result<Report, Error> {
        let mut measurements = Vec::new();
        for probe in Probe::all() {
            measurements.push((probe, self.measure(probe).await?));
        }
        Ok(Report(measurements))
    }
}

impl<W> Check for W where W: Warehouse {}
