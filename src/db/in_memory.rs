use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use super::{Database, RawRow};
use crate::error::AppError;
use crate::sql::{QueryBuf, SqlValue};

/// A recorded statement for verification.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedQuery {
    pub sql: String,
    pub params: Vec<SqlValue>,
}

#[derive(Debug)]
enum Response {
    Rows(Vec<RawRow>),
    Affected(u64),
    Error(String),
}

/// An in-memory driver for tests.
///
/// Responses are queued up front and handed out in FIFO order, one per
/// statement; every statement is recorded. With the queue empty, reads return
/// no rows and writes affect nothing.
///
/// ```
/// use laris_assistant::db::{InMemoryDatabase, RawRow};
///
/// let db = InMemoryDatabase::new()
///     .with_rows(vec![RawRow::new().with("count", 2i64)])
///     .with_affected(1);
/// assert_eq!(db.query_count(), 0);
/// ```
#[derive(Debug, Default)]
pub struct InMemoryDatabase {
    responses: Mutex<VecDeque<Response>>,
    recorded: Mutex<Vec<RecordedQuery>>,
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a result set for the next statement.
    pub fn with_rows(self, rows: Vec<RawRow>) -> Self {
        lock(&self.responses).push_back(Response::Rows(rows));
        self
    }

    /// Queue a rows-affected count for the next statement.
    pub fn with_affected(self, n: u64) -> Self {
        lock(&self.responses).push_back(Response::Affected(n));
        self
    }

    /// Queue a driver failure for the next statement.
    pub fn with_error(self, message: impl Into<String>) -> Self {
        lock(&self.responses).push_back(Response::Error(message.into()));
        self
    }

    pub fn recorded_queries(&self) -> Vec<RecordedQuery> {
        lock(&self.recorded).clone()
    }

    pub fn last_query(&self) -> Option<RecordedQuery> {
        lock(&self.recorded).last().cloned()
    }

    pub fn query_count(&self) -> usize {
        lock(&self.recorded).len()
    }

    fn record(&self, q: &QueryBuf) -> Option<Response> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query (in-memory)");
        lock(&self.recorded).push(RecordedQuery {
            sql: q.sql.clone(),
            params: q.params.clone(),
        });
        lock(&self.responses).pop_front()
    }
}

#[async_trait]
impl Database for InMemoryDatabase {
    async fn fetch_all(&self, q: &QueryBuf) -> Result<Vec<RawRow>, AppError> {
        match self.record(q) {
            Some(Response::Rows(rows)) => Ok(rows),
            Some(Response::Affected(_)) | None => Ok(Vec::new()),
            Some(Response::Error(e)) => Err(AppError::Driver(e)),
        }
    }

    async fn execute(&self, q: &QueryBuf) -> Result<u64, AppError> {
        match self.record(q) {
            Some(Response::Affected(n)) => Ok(n),
            Some(Response::Rows(rows)) => Ok(rows.len() as u64),
            None => Ok(0),
            Some(Response::Error(e)) => Err(AppError::Driver(e)),
        }
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
