//! Column-name -> typed value bag produced by the row mapper and consumed by entities.

use crate::sql::SqlValue;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Record {
    values: Vec<(&'static str, SqlValue)>,
}

impl Record {
    pub fn new() -> Self {
        Record { values: Vec::new() }
    }

    pub fn with_capacity(n: usize) -> Self {
        Record {
            values: Vec::with_capacity(n),
        }
    }

    /// Set a column value, replacing an earlier one with the same name.
    pub fn insert(&mut self, column: &'static str, value: SqlValue) {
        match self.values.iter_mut().find(|(name, _)| *name == column) {
            Some(slot) => slot.1 = value,
            None => self.values.push((column, value)),
        }
    }

    pub fn with(mut self, column: &'static str, value: impl Into<SqlValue>) -> Self {
        self.insert(column, value.into());
        self
    }

    /// Value for `column`; absent columns read as NULL.
    pub fn get(&self, column: &str) -> &SqlValue {
        self.values
            .iter()
            .find(|(name, _)| *name == column)
            .map(|(_, v)| v)
            .unwrap_or(&SqlValue::Null)
    }

    pub fn is_null(&self, column: &str) -> bool {
        matches!(self.get(column), SqlValue::Null)
    }

    pub fn take(&mut self, column: &str) -> SqlValue {
        match self.values.iter().position(|(name, _)| *name == column) {
            Some(i) => self.values.swap_remove(i).1,
            None => SqlValue::Null,
        }
    }

    pub fn take_i64(&mut self, column: &str) -> Option<i64> {
        match self.take(column) {
            SqlValue::BigInt(n) => Some(n),
            _ => None,
        }
    }

    pub fn take_f64(&mut self, column: &str) -> Option<f64> {
        match self.take(column) {
            SqlValue::Double(n) => Some(n),
            SqlValue::BigInt(n) => Some(n as f64),
            _ => None,
        }
    }

    pub fn take_text(&mut self, column: &str) -> Option<String> {
        match self.take(column) {
            SqlValue::Text(s) => Some(s),
            _ => None,
        }
    }
}
