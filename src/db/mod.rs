//! Database driver seam. Drivers execute a [`QueryBuf`] and hand back untyped rows;
//! typing happens in [`crate::mapping`].

mod in_memory;
mod postgres;

pub use in_memory::{InMemoryDatabase, RecordedQuery};
pub use postgres::PgDatabase;

use crate::error::AppError;
use crate::sql::QueryBuf;
use async_trait::async_trait;

/// A cell as delivered by the driver, before conversion.
#[derive(Clone, Debug, PartialEq)]
pub enum RawValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Json(serde_json::Value),
    /// Non-null value of a type the driver does not decode; carries the type name.
    Unsupported(String),
}

impl RawValue {
    /// Short description used in conversion errors.
    pub fn describe(&self) -> String {
        match self {
            RawValue::Null => "null".into(),
            RawValue::Bool(b) => format!("bool {}", b),
            RawValue::Int(n) => format!("integer {}", n),
            RawValue::Float(n) => format!("float {}", n),
            RawValue::Text(s) => format!("text {:?}", s),
            RawValue::Json(_) => "json".into(),
            RawValue::Unsupported(t) => format!("unsupported {}", t),
        }
    }
}

impl From<i64> for RawValue {
    fn from(value: i64) -> Self {
        RawValue::Int(value)
    }
}

impl From<i32> for RawValue {
    fn from(value: i32) -> Self {
        RawValue::Int(value.into())
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Float(value)
    }
}

impl From<bool> for RawValue {
    fn from(value: bool) -> Self {
        RawValue::Bool(value)
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::Text(value)
    }
}

impl<T: Into<RawValue>> From<Option<T>> for RawValue {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => v.into(),
            None => RawValue::Null,
        }
    }
}

/// One result row: column labels in select order with their raw values.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawRow {
    columns: Vec<(String, RawValue)>,
}

impl RawRow {
    pub fn new() -> Self {
        RawRow { columns: Vec::new() }
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<RawValue>) {
        self.columns.push((name.into(), value.into()));
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<RawValue>) -> Self {
        self.push(name, value);
        self
    }

    /// Value under `name`, or `None` when the row has no such column.
    pub fn get(&self, name: &str) -> Option<&RawValue> {
        self.columns.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }
}

#[async_trait]
pub trait Database: Send + Sync {
    /// Run a statement and collect every row, in the order the store returns them.
    async fn fetch_all(&self, query: &QueryBuf) -> Result<Vec<RawRow>, AppError>;

    /// Run a statement and keep the first row.
    async fn fetch_optional(&self, query: &QueryBuf) -> Result<Option<RawRow>, AppError> {
        Ok(self.fetch_all(query).await?.into_iter().next())
    }

    /// Run a statement without result rows; returns rows affected.
    async fn execute(&self, query: &QueryBuf) -> Result<u64, AppError>;

    /// Cheap round trip for readiness checks.
    async fn ping(&self) -> Result<(), AppError>;
}
