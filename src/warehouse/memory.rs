use super::*;
use std::sync::Mutex;

/// Error raised by [`Memory`] when told to refuse a statement.
#[derive(Debug, thiserror::Error)]
#[error("statement #{0} refused")]
pub struct Refused(pub usize);

/// In-memory warehouse that records every statement it is given.
#[derive(Debug, Default)]
pub struct Memory {
    ran: Mutex<Vec<String>>,
    fail: Option<usize>,
    counts: Vec<(&'static str, i64)>,
}

impl Memory {
    /// Refuses the n-th statement (0-based) and every later one.
    pub fn failing_at(n: usize) -> Self {
        Self {
            fail: Some(n),
            ..Self::default()
        }
    }
    /// Answers `count` queries containing `pattern` with `n`; others get 0.
    pub fn with_count(mut self, pattern: &'static str, n: i64) -> Self {
        self.counts.push((pattern, n));
        self
    }
    pub fn ran(&self) -> Vec<String> {
        self.ran.lock().unwrap().clone()
    }
    fn record(&self, sql: &str) -> Result<(), Refused> {
        let mut ran = self.ran.lock().unwrap();
        if self.fail.is_some_and(|n| ran.len() >= n) {
            return Err(Refused(ran.len()));
        }
        ran.push(sql.to_string());
        Ok(())
    }
}

#[async_trait::async_trait]
impl Warehouse for Memory {
    type Error = Refused;
    async fn run(&self, sql: &str) -> Result<(), Self::Error> {
        self.record(sql)
    }
    async fn count(&self, sql: &str) -> Result<i64, Self::Error> {
        self.record(sql)?;
        Ok(self
            .counts
            .iter()
            .find(|(pattern, _)| sql.contains(pattern))
            .map(|(_, n)| *n)
            .unwrap_or(0))
    }
}
